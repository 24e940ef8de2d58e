//! API 에러 응답.
//!
//! 모든 실패는 다음 형식으로 응답합니다:
//!
//! ```json
//! { "error": { "code": "TOKEN_EXPIRED", "message": "자격증명이 만료되었습니다" } }
//! ```

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bendan_auth::{AuthError, IssueError};
use serde_json::json;

use crate::jsonp::JsonpError;

/// API 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("잘못된 쿼리 파라미터: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Issue(#[from] IssueError),
    #[error(transparent)]
    Jsonp(#[from] JsonpError),
}

impl ApiError {
    /// HTTP 상태 코드.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidAuthHeader => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
            ApiError::Auth(AuthError::UnknownPolicy(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Issue(IssueError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidQuery(_) | ApiError::Issue(_) | ApiError::Jsonp(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingToken => "MISSING_TOKEN",
            ApiError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            ApiError::InvalidQuery(_) => "INVALID_QUERY",
            ApiError::Auth(e) => e.code(),
            ApiError::Issue(IssueError::EmptyRole) => "EMPTY_ROLE",
            ApiError::Issue(IssueError::InvalidExpiry { .. }) => "INVALID_EXPIRY",
            ApiError::Issue(IssueError::Signing(_)) => "SIGNING_FAILED",
            ApiError::Jsonp(JsonpError::MissingCallback) => "MISSING_CALLBACK",
            ApiError::Jsonp(JsonpError::InvalidCallback(_)) => "INVALID_CALLBACK",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.code(), "Request failed");
            "내부 서버 에러".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (ApiError::MissingToken, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidAuthHeader, StatusCode::UNAUTHORIZED),
            (ApiError::Auth(AuthError::Expired), StatusCode::UNAUTHORIZED),
            (ApiError::Auth(AuthError::InvalidSignature), StatusCode::UNAUTHORIZED),
            (ApiError::Auth(AuthError::Revoked), StatusCode::UNAUTHORIZED),
            (ApiError::Auth(AuthError::Forbidden), StatusCode::FORBIDDEN),
            (
                ApiError::Auth(AuthError::UnknownPolicy("Staff".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Issue(IssueError::EmptyRole), StatusCode::BAD_REQUEST),
            (ApiError::Jsonp(JsonpError::MissingCallback), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = ApiError::Auth(AuthError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::Auth(AuthError::UnknownPolicy("Staff".into())).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "UNKNOWN_POLICY");
        assert!(!body["error"]["message"].as_str().unwrap().contains("Staff"));
    }
}
