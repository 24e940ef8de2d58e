//! 발급/검증 에러 타입.

/// 자격증명 검증 및 인가 에러.
///
/// 모든 검증 실패는 호출자에게 값으로 반환됩니다.
/// HTTP 상태 코드로의 변환은 호출 계층이 담당합니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("자격증명 형식이 올바르지 않습니다")]
    MalformedCredential,
    #[error("자격증명 서명이 유효하지 않습니다")]
    InvalidSignature,
    #[error("자격증명이 만료되었습니다")]
    Expired,
    #[error("자격증명 발급자가 올바르지 않습니다")]
    InvalidIssuer,
    #[error("자격증명 대상(audience)이 올바르지 않습니다")]
    InvalidAudience,
    #[error("폐기된 자격증명입니다")]
    Revoked,
    #[error("권한이 부족합니다")]
    Forbidden,
    #[error("알 수 없는 정책: {0}")]
    UnknownPolicy(String),
}

impl AuthError {
    /// 안정적인 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MalformedCredential => "MALFORMED_CREDENTIAL",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::InvalidIssuer => "INVALID_ISSUER",
            AuthError::InvalidAudience => "INVALID_AUDIENCE",
            AuthError::Revoked => "TOKEN_REVOKED",
            AuthError::Forbidden => "INSUFFICIENT_PERMISSION",
            AuthError::UnknownPolicy(_) => "UNKNOWN_POLICY",
        }
    }

    /// 인증(자격증명 자체) 실패인지 확인합니다.
    ///
    /// `false`이면 자격증명은 유효하지만 인가에 실패한 경우입니다.
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, AuthError::Forbidden | AuthError::UnknownPolicy(_))
    }
}

/// 자격증명 발급 에러.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("역할이 비어 있습니다")]
    EmptyRole,
    #[error("잘못된 만료 시간: sliding={sliding}분, absolute={absolute}분")]
    InvalidExpiry { sliding: i64, absolute: i64 },
    #[error("토큰 서명 실패: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures() {
        assert!(AuthError::Expired.is_authentication_failure());
        assert!(AuthError::InvalidSignature.is_authentication_failure());
        assert!(AuthError::Revoked.is_authentication_failure());
        assert!(!AuthError::Forbidden.is_authentication_failure());
        assert!(!AuthError::UnknownPolicy("Staff".into()).is_authentication_failure());
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            AuthError::MalformedCredential,
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::InvalidIssuer,
            AuthError::InvalidAudience,
            AuthError::Revoked,
            AuthError::Forbidden,
            AuthError::UnknownPolicy(String::new()),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(AuthError::code).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
