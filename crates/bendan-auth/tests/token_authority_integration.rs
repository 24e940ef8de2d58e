//! TokenAuthority 통합 테스트
//!
//! 발급 → 검증 → 만료 → 인가 흐름과 변조 저항성을 확인합니다.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use bendan_auth::{
    AuthError, InMemoryRevocationList, ManualClock, RoleSet, SigningContext, TokenAuthority, ADMIN,
    CLIENT,
};
use bendan_core::AuthConfig;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

const TEST_SECRET: &str = "integration-secret-key-minimum-32-characters";

const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.";

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap()
}

/// 수동 시계를 사용하는 테스트용 TokenAuthority
fn setup() -> (TokenAuthority, Arc<ManualClock>) {
    let config = AuthConfig::with_secret(TEST_SECRET);
    let context = Arc::new(SigningContext::from_config(&config).unwrap());
    let clock = Arc::new(ManualClock::new(t0()));
    let authority = TokenAuthority::new(context, &config).with_clock(clock.clone());
    (authority, clock)
}

#[test]
fn test_issue_validate_then_expire() {
    let (authority, clock) = setup();

    // Issue(1, "Admin", 30, 30) → T
    let token = authority.issue(1, ADMIN, 30, 30).unwrap();

    // t0 시점 검증 성공
    let credential = authority.validate(&token).unwrap();
    assert_eq!(credential.subject_id(), 1);
    assert_eq!(credential.role(), ADMIN);

    // t0 + 31분 → 만료
    clock.advance(Duration::minutes(31));
    assert_eq!(authority.validate(&token), Err(AuthError::Expired));
}

#[test]
fn test_never_expired_before_expiry() {
    let (authority, clock) = setup();
    let token = authority.issue(9, CLIENT, 5, 5).unwrap();

    for _ in 0..(5 * 60 - 1) {
        clock.advance(Duration::seconds(1));
        assert!(authority.validate(&token).is_ok());
    }

    clock.advance(Duration::seconds(1));
    assert_eq!(authority.validate(&token), Err(AuthError::Expired));

    clock.advance(Duration::days(1));
    assert_eq!(authority.validate(&token), Err(AuthError::Expired));
}

#[test]
fn test_distinct_credentials() {
    let (authority, _) = setup();

    let first = authority.issue(1, ADMIN, 30, 30).unwrap();
    let second = authority.issue(2, ADMIN, 30, 30).unwrap();
    let again = authority.issue(1, ADMIN, 30, 30).unwrap();

    assert_ne!(first, second);
    // 같은 subject, 같은 시각이어도 jti가 다름
    assert_ne!(first, again);

    let ids: HashSet<String> = [&first, &second, &again]
        .iter()
        .map(|t| authority.validate(t).unwrap().id().to_string())
        .collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_credential_is_url_safe() {
    let (authority, _) = setup();
    let token = authority.issue(123, "Admin,Client", 30, 30).unwrap();

    assert_eq!(token.split('.').count(), 3);
    assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
}

#[test]
fn test_authorize_examples() {
    let (authority, _) = setup();

    let admin = authority
        .validate(&authority.issue(1, ADMIN, 30, 30).unwrap())
        .unwrap();
    let guest = authority
        .validate(&authority.issue(2, "Guest", 30, 30).unwrap())
        .unwrap();
    let both = authority
        .validate(&authority.issue(3, "Admin,Client", 30, 30).unwrap())
        .unwrap();

    assert!(authority.authorize(&admin, &RoleSet::parse("Admin,Client")));
    assert!(!authority.authorize(&guest, &RoleSet::parse("Admin")));
    assert!(authority.authorize(&both, &RoleSet::parse("Client")));
    assert!(!authority.authorize(&admin, &RoleSet::parse("Client")));
}

#[test]
fn test_revocation_flow() {
    let (authority, clock) = setup();
    let list = Arc::new(InMemoryRevocationList::new());
    let authority = authority.with_revocation_list(list.clone());

    let token = authority.issue(1, ADMIN, 30, 30).unwrap();
    let credential = authority.validate(&token).unwrap();
    assert!(authority.revoke(&credential));
    assert_eq!(authority.validate(&token), Err(AuthError::Revoked));

    // 만료 후에는 폐기 여부보다 만료가 먼저 보고됨
    clock.advance(Duration::minutes(30));
    assert_eq!(authority.validate(&token), Err(AuthError::Expired));

    // 다음 폐기 시 만료된 항목 정리
    let other = authority
        .validate(&authority.issue(2, CLIENT, 30, 30).unwrap())
        .unwrap();
    assert!(authority.revoke(&other));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_concurrent_issue_and_validate() {
    let (authority, _) = setup();
    let authority = Arc::new(authority);

    thread::scope(|scope| {
        for subject in 0..8u64 {
            let authority = Arc::clone(&authority);
            scope.spawn(move || {
                for _ in 0..50 {
                    let token = authority.issue(subject, CLIENT, 30, 30).unwrap();
                    let credential = authority.validate(&token).unwrap();
                    assert_eq!(credential.subject_id(), subject);
                }
            });
        }
    });
}

proptest! {
    #[test]
    fn prop_issued_credentials_round_trip(
        subject in any::<u64>(),
        role in "[A-Za-z]{1,12}(,[A-Za-z]{1,12}){0,2}",
        sliding in 1i64..=1440,
        absolute in 1i64..=1440,
    ) {
        let (authority, _) = setup();
        let token = authority.issue(subject, &role, sliding, absolute).unwrap();
        let credential = authority.validate(&token).unwrap();

        prop_assert_eq!(credential.subject_id(), subject);
        prop_assert_eq!(credential.role(), role.as_str());
        prop_assert_eq!(
            credential.expires_at() - credential.issued_at(),
            Duration::minutes(sliding.min(absolute))
        );
    }

    #[test]
    fn prop_tampering_never_validates(
        index in any::<prop::sample::Index>(),
        replacement in prop::sample::select(TOKEN_ALPHABET.to_vec()),
    ) {
        let (authority, _) = setup();
        let token = authority.issue(1, ADMIN, 30, 30).unwrap();

        let position = index.index(token.len());
        prop_assume!(token.as_bytes()[position] != replacement);

        let mut bytes = token.into_bytes();
        bytes[position] = replacement;
        let tampered = String::from_utf8(bytes).unwrap();

        let result = authority.validate(&tampered);
        prop_assert!(
            matches!(
                result,
                Err(AuthError::InvalidSignature) | Err(AuthError::MalformedCredential)
            ),
            "tampered credential produced {:?}",
            result
        );
    }
}
