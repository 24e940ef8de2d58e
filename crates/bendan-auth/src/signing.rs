//! 서명 컨텍스트.
//!
//! 프로세스 시작 시 설정에서 한 번 생성되고, 이후 읽기 전용으로
//! `Arc` 핸들을 통해 공유됩니다. 프로세스 수명 동안 키는 교체되지 않습니다.

use std::fmt;

use bendan_core::{AuthConfig, ConfigResult};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// HS256 서명/검증 키와 발급자 정보.
pub struct SigningContext {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl SigningContext {
    /// 설정에서 서명 컨텍스트를 생성합니다.
    ///
    /// # Errors
    /// 비밀 키가 없거나 너무 짧으면 설정 에러를 반환합니다. 이 에러는
    /// 프로세스 시작을 중단시켜야 합니다.
    pub fn from_config(config: &AuthConfig) -> ConfigResult<Self> {
        config.validate()?;
        let secret = config.secret_bytes()?;
        Ok(Self::new(secret, &config.issuer, &config.audience))
    }

    /// 원시 비밀 키로 생성합니다. 길이 검증은 하지 않습니다.
    pub fn new(secret: &[u8], issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub(crate) fn header(&self) -> Header {
        Header::new(Algorithm::HS256)
    }

    /// 검증 규칙.
    ///
    /// 만료는 주입된 `Clock`으로 직접 판단하므로 라이브러리의 `exp`
    /// 검사는 끄고, 클레임 존재 여부만 요구합니다.
    pub(crate) fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("algorithm", &"HS256")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
