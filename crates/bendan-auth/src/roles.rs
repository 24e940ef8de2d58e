//! 역할 기반 접근 제어 (RBAC).
//!
//! 역할은 열린 집합입니다. `"Admin,Client"`처럼 쉼표로 구분된 문자열은
//! 역할 집합으로 해석합니다. 비교는 공백 제거 후 대소문자를 구분합니다.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bendan_core::AuthConfig;

/// 관리자 역할.
pub const ADMIN: &str = "Admin";
/// 일반 사용자 역할.
pub const CLIENT: &str = "Client";

/// 역할 이름 집합.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// 쉼표로 구분된 역할 문자열을 파싱합니다. 빈 항목은 버립니다.
    pub fn parse(roles: &str) -> Self {
        Self(
            roles
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// 여러 역할 문자열을 합칩니다. 각 항목도 쉼표 구분을 허용합니다.
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for role in roles {
            set.extend(Self::parse(role.as_ref()).0);
        }
        Self(set)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role.trim())
    }

    /// 두 집합에 공통 역할이 있는지 확인합니다.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        self.0.iter().any(|role| other.0.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}

/// 이름 있는 역할 정책 모음.
///
/// 기본 구성(`["Admin", "Client"]`)에서는 `Admin`, `Client`,
/// `AdminOrClient` 세 정책이 만들어집니다.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, RoleSet>,
}

impl PolicyRegistry {
    /// 역할마다 단일 역할 정책을 만들고, 역할이 둘 이상이면
    /// 이름을 `Or`로 이어 붙인 통합 정책을 추가합니다.
    pub fn from_roles<S: AsRef<str>>(roles: &[S]) -> Self {
        let mut policies = BTreeMap::new();
        let mut names = Vec::new();

        for role in roles {
            let role = role.as_ref().trim();
            if role.is_empty() {
                continue;
            }
            policies.insert(role.to_string(), RoleSet::parse(role));
            names.push(role);
        }

        if names.len() > 1 {
            policies.insert(names.join("Or"), RoleSet::from_roles(&names));
        }

        Self { policies }
    }

    /// 설정의 역할 목록과 추가 정책으로 레지스트리를 구성합니다.
    ///
    /// 같은 이름의 추가 정책은 기본 정책을 덮어씁니다.
    pub fn from_config(config: &AuthConfig) -> Self {
        config
            .policies
            .iter()
            .fold(Self::from_roles(&config.roles), |registry, policy| {
                registry.with_policy(&policy.name, &policy.roles)
            })
    }

    /// 정책을 추가합니다.
    #[must_use]
    pub fn with_policy(mut self, name: &str, roles: &str) -> Self {
        self.policies
            .insert(name.trim().to_string(), RoleSet::parse(roles));
        self
    }

    pub fn get(&self, name: &str) -> Option<&RoleSet> {
        self.policies.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }
}
