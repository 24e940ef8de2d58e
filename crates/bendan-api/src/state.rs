//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use std::sync::Arc;

use bendan_auth::TokenAuthority;
use bendan_core::AuthConfig;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러와 추출기에 주입됩니다.
/// 서명 비밀 키는 `TokenAuthority` 안의 `SigningContext`에만 있습니다.
#[derive(Clone)]
pub struct AppState {
    /// 자격증명 발급/검증기
    pub authority: Arc<TokenAuthority>,

    /// 발급 요청에 `id`가 없을 때의 subject
    pub default_subject_id: u64,

    /// 발급 요청에 `sub`가 없을 때의 역할
    pub default_role: String,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(authority: Arc<TokenAuthority>, config: &AuthConfig) -> Self {
        Self {
            authority,
            default_subject_id: config.default_subject_id,
            default_role: config.default_role.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// 테스트용 AppState 생성.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use bendan_auth::SigningContext;

    let config = AuthConfig::with_secret("test-secret-key-for-api-testing-minimum-32-chars");
    let context = SigningContext::from_config(&config)
        .unwrap_or_else(|e| panic!("test signing context: {e}"));
    let authority = Arc::new(TokenAuthority::new(Arc::new(context), &config));
    AppState::new(authority, &config)
}
