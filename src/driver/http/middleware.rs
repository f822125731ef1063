//! HTTP Middleware
//!
//! リクエストログ、タイムアウトとパニック時のレスポンス

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{error, info};
use std::any::Any;
use std::time::Instant;
use uuid::Uuid;

use super::error::{ApiError, REASON_REQUEST_TIMEOUT};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// リクエストごとにメソッド・パス・ステータス・処理時間を記録する
///
/// `x-request-id` ヘッダがなければ生成し、レスポンスにも付与する。
pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        "request_id={} method={} path={} status={} latency_ms={}",
        request_id,
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}

/// ハンドラがパニックした場合のレスポンス
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("handler panicked: {}", detail);

    ApiError::internal("internal server error").into_response()
}

/// タイムアウトで打ち切られた空の408レスポンスをエラーボディに置き換える
pub async fn render_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    ApiError::new(
        StatusCode::REQUEST_TIMEOUT,
        REASON_REQUEST_TIMEOUT,
        "request timeout",
    )
    .into_response()
}
