//! JWT 페이로드와 검증된 자격증명.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::roles::RoleSet;

/// JWT 페이로드.
///
/// 표준 클레임 이름을 사용합니다. `sub`는 subject ID의 10진 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 역할 (쉼표 구분 복수 역할 허용)
    pub role: String,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 자격증명 고유 식별자
    pub jti: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `subject_id` - 사용자 ID
    /// * `role` - 사용자 역할
    /// * `issued_at` - 발급 시각 (초 단위로 절사)
    /// * `lifetime` - 유효 기간
    /// * `issuer`, `audience` - 서명 컨텍스트 값
    pub fn new(
        subject_id: u64,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject_id.to_string(),
            role: role.into(),
            iat,
            exp: iat + lifetime.num_seconds(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: issuer.into(),
            aud: audience.into(),
        }
    }

    /// `now` 시점에 만료되었는지 확인 (`now >= exp`).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// 검증을 통과한 자격증명.
///
/// 발급 후 변경할 수 없으며, 내용을 바꾸려면 재발급해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    subject_id: u64,
    role: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    id: String,
}

impl Credential {
    pub fn subject_id(&self) -> u64 {
        self.subject_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// 자격증명 고유 식별자 (`jti`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 보유 역할 집합.
    pub fn roles(&self) -> RoleSet {
        RoleSet::parse(&self.role)
    }

    /// 요구 역할 중 하나라도 보유하는지 확인.
    pub fn has_any_role(&self, required: &RoleSet) -> bool {
        self.roles().intersects(required)
    }
}

impl TryFrom<Claims> for Credential {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let subject_id = claims
            .sub
            .parse::<u64>()
            .map_err(|_| AuthError::MalformedCredential)?;

        if claims.role.trim().is_empty() || claims.jti.is_empty() || claims.exp < claims.iat {
            return Err(AuthError::MalformedCredential);
        }

        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(AuthError::MalformedCredential)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::MalformedCredential)?;

        Ok(Self {
            subject_id,
            role: claims.role,
            issued_at,
            expires_at,
            id: claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Claims::new(42, "Admin", issued_at, Duration::minutes(30), "BenDan.API", "bendan")
    }

    #[test]
    fn test_claims_window() {
        let claims = sample_claims();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_claims_wire_names() {
        let value = serde_json::to_value(sample_claims()).unwrap();
        for key in ["sub", "role", "iat", "exp", "jti", "iss", "aud"] {
            assert!(value.get(key).is_some(), "missing claim {key}");
        }
        assert_eq!(value["sub"], "42");
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let claims = sample_claims();
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap();
        assert!(!claims.is_expired_at(expires_at - Duration::seconds(1)));
        assert!(claims.is_expired_at(expires_at));
    }

    #[test]
    fn test_credential_from_claims() {
        let claims = sample_claims();
        let jti = claims.jti.clone();
        let credential = Credential::try_from(claims).unwrap();

        assert_eq!(credential.subject_id(), 42);
        assert_eq!(credential.role(), "Admin");
        assert_eq!(credential.id(), jti);
        assert_eq!(
            credential.expires_at() - credential.issued_at(),
            Duration::minutes(30)
        );
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let mut claims = sample_claims();
        claims.sub = "user_123".to_string();
        assert_eq!(
            Credential::try_from(claims),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn test_empty_role_is_malformed() {
        let mut claims = sample_claims();
        claims.role = " ".to_string();
        assert_eq!(
            Credential::try_from(claims),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn test_compound_role_credential() {
        let mut claims = sample_claims();
        claims.role = "Admin,Client".to_string();
        let credential = Credential::try_from(claims).unwrap();

        assert!(credential.has_any_role(&RoleSet::parse("Client")));
        assert!(!credential.has_any_role(&RoleSet::parse("Guest")));
    }
}
