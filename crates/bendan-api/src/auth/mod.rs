//! 인증 및 권한 부여 추출기.
//!
//! # 구성 요소
//!
//! - [`JwtAuth`]: Bearer 자격증명을 검증하는 추출기
//! - [`RequirePolicy`]: 이름 있는 정책을 요구하는 추출기
//! - [`AdminAuth`], [`ClientAuth`], [`AdminOrClientAuth`]: 기본 정책 별칭
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn admin_only(AdminAuth { credential, .. }: AdminAuth) -> impl IntoResponse {
//!     format!("subject {}", credential.subject_id())
//! }
//! ```

mod middleware;

pub use middleware::{
    bearer_token, AdminAuth, AdminOrClientAuth, AdminOrClientPolicy, AdminPolicy, ClientAuth,
    ClientPolicy, JwtAuth, PolicyName, RequirePolicy,
};
