//! # BenDan Core
//!
//! BenDan 서비스 전반에서 공유하는 기반 구성 요소를 제공합니다:
//! - 설정 관리 (파일 + 환경 변수)
//! - 로깅 인프라
//! - 설정/로깅 에러 타입

pub mod config;
pub mod error;
pub mod logging;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::logging::*;
