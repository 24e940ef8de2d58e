//! 자격증명 발급/검증/인가.

use std::fmt;
use std::sync::Arc;

use bendan_core::AuthConfig;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode};

use crate::claims::{Claims, Credential};
use crate::clock::{Clock, SystemClock};
use crate::error::{AuthError, IssueError};
use crate::revocation::RevocationList;
use crate::roles::{PolicyRegistry, RoleSet};
use crate::signing::SigningContext;

/// 발급 가능한 최대 유효 기간 (분, 1년).
pub const MAX_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

/// 서명된 bearer 자격증명을 발급하고 검증합니다.
///
/// 발급과 검증은 불변 `SigningContext`만 읽으므로 여러 태스크에서
/// 동시에 호출해도 됩니다. 폐기 목록을 연결한 경우에만 공유 가변
/// 상태가 생깁니다.
pub struct TokenAuthority {
    context: Arc<SigningContext>,
    clock: Arc<dyn Clock>,
    policies: PolicyRegistry,
    known_roles: RoleSet,
    sliding_minutes: i64,
    absolute_minutes: i64,
    revocations: Option<Arc<dyn RevocationList>>,
}

impl TokenAuthority {
    /// 서명 컨텍스트와 설정의 기본값(만료 시간, 역할, 정책)으로 생성합니다.
    pub fn new(context: Arc<SigningContext>, config: &AuthConfig) -> Self {
        Self {
            context,
            clock: Arc::new(SystemClock),
            policies: PolicyRegistry::from_config(config),
            known_roles: RoleSet::from_roles(&config.roles),
            sliding_minutes: config.sliding_minutes,
            absolute_minutes: config.absolute_minutes,
            revocations: None,
        }
    }

    /// 시간 소스를 교체합니다.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 폐기 목록을 연결합니다.
    #[must_use]
    pub fn with_revocation_list(mut self, list: Arc<dyn RevocationList>) -> Self {
        self.revocations = Some(list);
        self
    }

    /// 정책 레지스트리를 교체합니다.
    #[must_use]
    pub fn with_policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = policies;
        self
    }

    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }

    /// 설정된 기본 만료 시간 `(sliding, absolute)` (분).
    pub fn default_windows(&self) -> (i64, i64) {
        (self.sliding_minutes, self.absolute_minutes)
    }

    /// 자격증명 발급.
    ///
    /// 유효 기간은 `min(sliding_minutes, absolute_minutes)`분입니다.
    /// 슬라이딩 갱신은 하지 않으며, 자격증명은 발급 시 정해진 시각에
    /// 만료됩니다.
    ///
    /// # Errors
    ///
    /// - 역할이 비어 있으면 `EmptyRole`
    /// - 만료 시간이 `1..=MAX_EXPIRY_MINUTES` 밖이면 `InvalidExpiry`
    /// - 서명 실패 시 `Signing`
    pub fn issue(
        &self,
        subject_id: u64,
        role: &str,
        sliding_minutes: i64,
        absolute_minutes: i64,
    ) -> Result<String, IssueError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(IssueError::EmptyRole);
        }

        let valid = 1..=MAX_EXPIRY_MINUTES;
        if !valid.contains(&sliding_minutes) || !valid.contains(&absolute_minutes) {
            return Err(IssueError::InvalidExpiry {
                sliding: sliding_minutes,
                absolute: absolute_minutes,
            });
        }

        if !RoleSet::parse(role).iter().all(|r| self.known_roles.contains(r)) {
            tracing::warn!(subject_id, role, "Issuing credential for unrecognised role");
        }

        let lifetime = Duration::minutes(sliding_minutes.min(absolute_minutes));
        let claims = Claims::new(
            subject_id,
            role,
            self.clock.now(),
            lifetime,
            self.context.issuer(),
            self.context.audience(),
        );

        let token = encode(&self.context.header(), &claims, self.context.encoding_key())?;

        tracing::debug!(
            subject_id,
            role,
            jti = %claims.jti,
            exp = claims.exp,
            "Credential issued"
        );

        Ok(token)
    }

    /// 설정된 기본 만료 시간으로 발급합니다.
    pub fn issue_default(&self, subject_id: u64, role: &str) -> Result<String, IssueError> {
        self.issue(subject_id, role, self.sliding_minutes, self.absolute_minutes)
    }

    /// 자격증명 검증.
    ///
    /// 구조 → 서명 → issuer/audience → 만료 → 폐기 순으로 확인합니다.
    pub fn validate(&self, token: &str) -> Result<Credential, AuthError> {
        let result = self.validate_inner(token);
        if let Err(ref e) = result {
            tracing::debug!(reason = e.code(), "Credential rejected");
        }
        result
    }

    fn validate_inner(&self, token: &str) -> Result<Credential, AuthError> {
        let data = decode::<Claims>(
            token.trim(),
            self.context.decoding_key(),
            &self.context.validation(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                AuthError::InvalidSignature
            }
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            ErrorKind::InvalidAudience => AuthError::InvalidAudience,
            _ => AuthError::MalformedCredential,
        })?;

        // 만료는 주입된 Clock으로만 판정합니다.
        let claims = data.claims;
        if claims.is_expired_at(self.clock.now()) {
            return Err(AuthError::Expired);
        }

        let credential = Credential::try_from(claims)?;

        if let Some(list) = &self.revocations {
            if list.is_revoked(credential.id()) {
                return Err(AuthError::Revoked);
            }
        }

        Ok(credential)
    }

    /// 자격증명의 역할이 요구 역할 집합과 겹치면 `true`.
    pub fn authorize(&self, credential: &Credential, required: &RoleSet) -> bool {
        credential.has_any_role(required)
    }

    /// 이름 있는 정책으로 인가합니다.
    pub fn authorize_policy(&self, credential: &Credential, policy: &str) -> Result<(), AuthError> {
        let required = self
            .policies
            .get(policy)
            .ok_or_else(|| AuthError::UnknownPolicy(policy.to_string()))?;

        if self.authorize(credential, required) {
            Ok(())
        } else {
            tracing::debug!(
                subject_id = credential.subject_id(),
                role = credential.role(),
                policy,
                "Policy check failed"
            );
            Err(AuthError::Forbidden)
        }
    }

    /// 자격증명을 폐기합니다.
    ///
    /// 폐기 목록이 연결되지 않았으면 아무 일도 하지 않고 `false`를 반환합니다.
    pub fn revoke(&self, credential: &Credential) -> bool {
        match &self.revocations {
            Some(list) => {
                list.revoke(credential.id(), credential.expires_at());
                list.purge_expired(self.clock.now());
                tracing::info!(
                    subject_id = credential.subject_id(),
                    jti = credential.id(),
                    "Credential revoked"
                );
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("context", &self.context)
            .field("policies", &self.policies)
            .field("sliding_minutes", &self.sliding_minutes)
            .field("absolute_minutes", &self.absolute_minutes)
            .field("revocation", &self.revocations.is_some())
            .finish()
    }
}
