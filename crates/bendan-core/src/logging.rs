//! tracing 기반 로깅 초기화.
//!
//! 출력 형식은 `pretty`(개발), `json`(운영/수집), `compact`(한 줄) 중 하나입니다.
//! `RUST_LOG`가 있으면 설정 파일의 레벨보다 우선하고, `LOG_FORMAT`은 형식을
//! 덮어씁니다.

use std::str::FromStr;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::LoggingError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 사용자 필터 뒤에 붙는 의존성 크레이트 기본 레벨.
const DEPENDENCY_DIRECTIVES: &str = "hyper=warn,tower_http=info";

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// 이벤트 필드를 최상위로 펼친 JSON
    Json,
    Compact,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

/// 로깅 초기화 옵션.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` 지시어 (예: "info", "bendan_auth=debug")
    pub filter: String,
    pub format: LogFormat,
    /// 소스 파일/줄 번호 출력
    pub source_location: bool,
}

impl LogConfig {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            format: LogFormat::default(),
            source_location: false,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_source_location(mut self, enabled: bool) -> Self {
        self.source_location = enabled;
        self
    }

    /// `[logging]` 설정 섹션에서 생성합니다.
    ///
    /// `LOG_FORMAT`이 유효하면 파일 설정보다 우선하며, 둘 다 알 수 없는
    /// 값이면 pretty를 씁니다.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| config.format.parse().ok())
            .unwrap_or_default();

        Self::new(config.level.clone()).with_format(format)
    }

    fn filter_directives(&self) -> String {
        let filter = self.filter.trim();
        if filter.is_empty() {
            format!("info,{DEPENDENCY_DIRECTIVES}")
        } else {
            format!("{filter},{DEPENDENCY_DIRECTIVES}")
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.filter_directives())?),
        }
    }
}

fn format_layer(format: LogFormat, source_location: bool) -> BoxedLayer {
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(source_location)
            .with_line_number(source_location)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_file(source_location)
            .with_line_number(source_location)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_file(source_location)
            .with_line_number(source_location)
            .boxed(),
    }
}

/// 전역 subscriber를 설치합니다.
///
/// 이미 설치되어 있으면 `LoggingError::Init`을 반환합니다.
///
/// ```no_run
/// use bendan_core::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), LoggingError> {
    let env_filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(format_layer(config.format, config.source_location))
        .with(env_filter)
        .try_init()?;

    tracing::debug!(format = config.format.as_str(), filter = %config.filter, "Logging initialized");
    Ok(())
}
