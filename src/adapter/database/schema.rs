//! 起動時に実行するスキーマ定義

pub(super) const STATEMENTS: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT    NOT NULL UNIQUE,
    email       TEXT    NOT NULL,
    password    TEXT    NOT NULL,
    disabled    BOOLEAN NOT NULL DEFAULT FALSE,
    create_time TEXT    NOT NULL,
    update_time TEXT    NOT NULL
)
"#];
