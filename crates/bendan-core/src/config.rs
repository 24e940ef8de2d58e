//! 설정 관리.
//!
//! 서버, 로깅, 토큰 발급 설정을 정의하고 파일과 환경 변수에서 로드합니다.
//!
//! 로드 순서 (뒤에 오는 소스가 우선):
//! 1. 구조체 기본값
//! 2. `config/default.toml` (없어도 됨)
//! 3. `BENDAN__` 접두사 환경 변수 (예: `BENDAN__AUTH__SECRET`)

use std::net::SocketAddr;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::error::{ConfigError, ConfigResult};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "BENDAN";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HS256 서명 비밀 키 최소 길이 (바이트).
pub const MIN_SECRET_LEN: usize = 16;

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 토큰 발급/검증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `ConfigError::InvalidValue`를 반환합니다.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("server.host/server.port: {e}")))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨 필터
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 추가 역할 정책 설정.
///
/// ```toml
/// [[auth.policies]]
/// name = "Staff"
/// roles = "Admin,Editor"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    /// 정책 이름
    pub name: String,
    /// 허용 역할 목록 (쉼표 구분)
    pub roles: String,
}

/// 토큰 발급/검증 설정.
///
/// 비밀 키는 `SecretString`으로 보관되며 `Debug` 출력에 노출되지 않습니다.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 서명 비밀 키
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: Option<SecretString>,
    /// `iss` 클레임
    pub issuer: String,
    /// `aud` 클레임
    pub audience: String,
    /// 배포 환경에서 인식하는 역할 이름
    pub roles: Vec<String>,
    /// 기본 슬라이딩 만료 (분)
    pub sliding_minutes: i64,
    /// 기본 절대 만료 (분)
    pub absolute_minutes: i64,
    /// 발급 요청에 subject가 없을 때 사용할 값
    pub default_subject_id: u64,
    /// 발급 요청에 역할이 없을 때 사용할 값
    pub default_role: String,
    /// 추가 역할 정책
    pub policies: Vec<PolicyConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: "BenDan.API".to_string(),
            audience: "bendan".to_string(),
            roles: vec!["Admin".to_string(), "Client".to_string()],
            sliding_minutes: 30,
            absolute_minutes: 30,
            default_subject_id: 1,
            default_role: "Admin".to_string(),
            policies: Vec::new(),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(SecretString::from))
}

impl AuthConfig {
    /// 주어진 비밀 키와 기본값으로 설정을 생성합니다.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(SecretString::from(secret.into())),
            ..Default::default()
        }
    }

    /// 서명 비밀 키 바이트를 반환합니다.
    ///
    /// # Errors
    /// 키가 없거나 비어 있으면 `MissingSecret`, 너무 짧으면 `WeakSecret`.
    pub fn secret_bytes(&self) -> ConfigResult<&[u8]> {
        let secret = self
            .secret
            .as_ref()
            .map(|s| s.expose_secret().as_bytes())
            .filter(|bytes| !bytes.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                len: secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        Ok(secret)
    }

    /// 설정 값 전체를 검증합니다.
    pub fn validate(&self) -> ConfigResult<()> {
        self.secret_bytes()?;

        if self.issuer.trim().is_empty() {
            return Err(ConfigError::InvalidValue("auth.issuer must not be empty".into()));
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::InvalidValue("auth.audience must not be empty".into()));
        }
        if self.sliding_minutes <= 0 || self.absolute_minutes <= 0 {
            return Err(ConfigError::InvalidValue(format!(
                "auth expiry windows must be positive (sliding={}, absolute={})",
                self.sliding_minutes, self.absolute_minutes
            )));
        }
        if self.default_role.trim().is_empty() {
            return Err(ConfigError::InvalidValue("auth.default_role must not be empty".into()));
        }
        for policy in &self.policies {
            let has_role = policy.roles.split(',').any(|r| !r.trim().is_empty());
            if policy.name.trim().is_empty() || !has_role {
                return Err(ConfigError::InvalidValue(format!(
                    "auth.policies entry '{}' needs a name and at least one role",
                    policy.name
                )));
            }
        }

        Ok(())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드하고 검증합니다.
    ///
    /// 파일이 없으면 건너뜁니다. 비밀 키가 없으면 에러를 반환하므로
    /// 호출자는 프로세스 시작을 중단해야 합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let builder = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.roles")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.auth.validate()?;

        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ConfigResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
