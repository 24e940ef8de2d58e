//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `GET /api/Login/Token2` - 자격증명 발급 (JSON 문자열)
//! - `GET /api/Login/jsonp` - 자격증명 발급 (JSONP)
//! - `GET /api/Login/Current` - 현재 자격증명 조회 (`AdminOrClient` 정책)

pub mod login;

pub use login::{login_router, JsonpQuery, TokenQuery};

use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

/// 전체 라우터 생성.
///
/// `request_timeout`을 넘긴 요청은 408로 응답합니다.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/Login", login_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}
