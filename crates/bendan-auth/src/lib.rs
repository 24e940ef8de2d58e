//! 토큰 발급 및 검증.
//!
//! HS256 서명 JWT 기반 자격증명 발급, 검증, 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`SigningContext`]: 서명 키, issuer, audience (시작 시 한 번 생성)
//! - [`TokenAuthority`]: 발급(`issue`) / 검증(`validate`) / 인가(`authorize`)
//! - [`Credential`]: 검증된 자격증명
//! - [`RoleSet`], [`PolicyRegistry`]: 역할 집합과 이름 있는 정책
//! - [`Clock`]: 시간 소스 (테스트에서는 [`ManualClock`])
//! - [`RevocationList`]: 선택적 폐기 목록
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let context = Arc::new(SigningContext::from_config(&config.auth)?);
//! let authority = TokenAuthority::new(context, &config.auth);
//!
//! let token = authority.issue(1, "Admin", 30, 30)?;
//! let credential = authority.validate(&token)?;
//! assert!(authority.authorize(&credential, &RoleSet::parse("Admin,Client")));
//! ```

mod authority;
mod claims;
mod clock;
mod error;
mod revocation;
mod roles;
mod signing;

pub use authority::{TokenAuthority, MAX_EXPIRY_MINUTES};
pub use claims::{Claims, Credential};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, IssueError};
pub use revocation::{InMemoryRevocationList, RevocationList};
pub use roles::{PolicyRegistry, RoleSet, ADMIN, CLIENT};
pub use signing::SigningContext;
