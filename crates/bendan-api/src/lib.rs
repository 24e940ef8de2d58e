//! BenDan HTTP 어댑터.
//!
//! 이 크레이트는 토큰 코어(`bendan-auth`)를 HTTP에 연결합니다:
//! - 로그인 엔드포인트 (JSON / JSONP 발급)
//! - Bearer 인증 추출기 및 정책 추출기
//! - 인증 에러 → 401/403 응답 변환
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: 로그인 엔드포인트와 라우터
//! - [`auth`]: 인증/인가 추출기
//! - [`jsonp`]: JSONP 응답 포맷터
//! - [`error`]: API 에러 응답

pub mod auth;
pub mod error;
pub mod jsonp;
pub mod routes;
pub mod state;

pub use auth::{
    AdminAuth, AdminOrClientAuth, ClientAuth, JwtAuth, PolicyName, RequirePolicy,
};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
