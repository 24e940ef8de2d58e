//! 자격증명 폐기 목록.
//!
//! 기본 구성은 무상태(폐기 불가)입니다. 로그아웃이나 유출 대응이 필요하면
//! `TokenAuthority::with_revocation_list`로 폐기 목록을 연결합니다.
//! 항목은 해당 자격증명의 만료 시각까지만 유지하면 됩니다.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// `jti` 기준 폐기 목록.
pub trait RevocationList: Send + Sync {
    /// 자격증명 ID를 폐기합니다. `expires_at` 이후에는 항목을 지워도 됩니다.
    fn revoke(&self, id: &str, expires_at: DateTime<Utc>);

    fn is_revoked(&self, id: &str) -> bool;

    /// 만료된 항목을 제거하고 제거된 개수를 반환합니다.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

/// 메모리 기반 폐기 목록.
#[derive(Debug, Default)]
pub struct InMemoryRevocationList {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RevocationList for InMemoryRevocationList {
    fn revoke(&self, id: &str, expires_at: DateTime<Utc>) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.to_string(), expires_at);
    }

    fn is_revoked(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        let purged = before - entries.len();

        if purged > 0 {
            tracing::debug!(purged, remaining = entries.len(), "Purged expired revocations");
        }

        purged
    }
}
