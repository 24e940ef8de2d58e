//! 설정 및 로깅 초기화 에러 타입.
//!
//! 여기 정의된 에러는 모두 프로세스 시작 단계에서 발생하며,
//! 발생 시 서버는 시작되지 않습니다.

use thiserror::Error;

/// 설정 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 서명 비밀 키 누락
    #[error("서명 비밀 키가 설정되지 않았습니다 (auth.secret / BENDAN__AUTH__SECRET)")]
    MissingSecret,

    /// 서명 비밀 키 길이 부족
    #[error("서명 비밀 키가 너무 짧습니다: {len}바이트 (최소 {min}바이트)")]
    WeakSecret { len: usize, min: usize },

    /// 잘못된 설정 값
    #[error("잘못된 설정 값: {0}")]
    InvalidValue(String),

    /// 설정 소스 로드/역직렬화 실패
    #[error("설정 로드 실패: {0}")]
    Load(#[from] config::ConfigError),
}

/// 설정 작업을 위한 Result 타입.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 로깅 초기화 에러.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// 로그 레벨 필터 파싱 실패
    #[error("잘못된 로그 필터: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// 알 수 없는 출력 형식
    #[error("알 수 없는 로그 형식: {0} (pretty, json, compact)")]
    UnknownFormat(String),

    /// 전역 subscriber가 이미 설치됨
    #[error("로깅 초기화 실패: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

impl ConfigError {
    /// 비밀 키 관련 에러인지 확인합니다.
    pub fn is_secret_error(&self) -> bool {
        matches!(self, ConfigError::MissingSecret | ConfigError::WeakSecret { .. })
    }
}
