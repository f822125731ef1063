//! # HTTP Transport
//!
//! アカウントAPIのルーティングと依存性の組み立て
//!
//! ## 構成要素
//!
//! - **dto**: リクエスト/レスポンス
//! - **error**: エラーレスポンスへの変換
//! - **extract**: エクストラクタ
//! - **handlers**: ハンドラ
//! - **middleware**: リクエストログ、タイムアウト、パニック処理

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use crate::adapter::database::Data;
use crate::adapter::repositories::sql_user_repository::SqlUserRepository;
use crate::application::use_cases::account::AccountUseCase;
use crate::application::use_cases::authenticate::AuthenticateUseCase;

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub account: Arc<AccountUseCase<Data, SqlUserRepository>>,
    pub authenticate: Arc<AuthenticateUseCase<SqlUserRepository>>,
}

impl AppState {
    /// データベースハンドルからユースケースを組み立てる
    pub fn new(data: Data) -> Self {
        let user_repository = Arc::new(SqlUserRepository::new(data.clone()));
        let account = Arc::new(AccountUseCase::new(
            Arc::new(data),
            user_repository.clone(),
        ));
        let authenticate = Arc::new(AuthenticateUseCase::new(user_repository));

        Self {
            account,
            authenticate,
        }
    }
}

/// ルーターを作成
pub fn router(state: AppState, timeout: Duration) -> Router {
    let routes = Router::new()
        .route(
            "/account/v1/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/account/v1/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/account/v1/users:set-password",
            post(handlers::set_user_password),
        )
        .route(
            "/account/v1/users:authenticate",
            post(handlers::authenticate),
        )
        .route("/account/v1/users:enable", post(handlers::enable_user))
        .route("/account/v1/users:disable", post(handlers::disable_user))
        .route("/healthz", get(handlers::healthz));

    with_middleware(routes, timeout).with_state(state)
}

/// タイムアウト、パニック処理、リクエストログを適用する
///
/// 後から追加したレイヤーほど外側になる。リクエストログは最も外側。
pub fn with_middleware<S>(routes: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum::middleware::map_response(middleware::render_timeout))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::log_requests))
}
