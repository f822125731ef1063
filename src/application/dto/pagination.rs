//! # Pagination DTO
//!
//! 一覧取得のページング指定

/// `limit` 未指定（0以下）のときの件数
pub const DEFAULT_LIMIT: i64 = 20;
/// `limit` の上限
pub const MAX_LIMIT: i64 = 100;

/// ページング指定
///
/// 生成時に正規化されるため、`offset` は常に0以上、`limit` は
/// `1..=MAX_LIMIT` の範囲に収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: i64,
    limit: i64,
}

impl Pagination {
    /// ページング指定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use usm::application::dto::pagination::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};
    ///
    /// let page = Pagination::new(10, 5);
    /// assert_eq!(page.offset(), 10);
    /// assert_eq!(page.limit(), 5);
    ///
    /// // limit 0 はデフォルト件数になる
    /// assert_eq!(Pagination::new(0, 0).limit(), DEFAULT_LIMIT);
    ///
    /// // 上限を超える limit は切り詰める
    /// assert_eq!(Pagination::new(0, 1000).limit(), MAX_LIMIT);
    /// ```
    pub fn new(offset: i64, limit: i64) -> Self {
        let offset = offset.max(0);
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        Self { offset, limit }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_offset_is_clamped() {
        let page = Pagination::new(-5, 10);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_negative_limit_uses_default() {
        assert_eq!(Pagination::new(0, -1).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_at_max_is_kept() {
        assert_eq!(Pagination::new(0, MAX_LIMIT).limit(), MAX_LIMIT);
    }

    #[test]
    fn test_default() {
        let page = Pagination::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_LIMIT);
    }
}
