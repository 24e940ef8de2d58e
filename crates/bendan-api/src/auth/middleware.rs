//! Axum용 자격증명 추출기.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use bendan_auth::{Credential, ADMIN, CLIENT};

use crate::{error::ApiError, state::AppState};

/// Authorization 헤더 값에서 자격증명을 꺼냅니다.
///
/// `Bearer <token>`(스킴 대소문자 무시)과 스킴 없는 원시 토큰을 모두 받습니다.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None if header.eq_ignore_ascii_case("bearer") => return None,
        None => header,
    };

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// 자격증명 인증 추출기.
///
/// 검증된 [`Credential`]은 요청 extensions에도 저장되어 이후 추출기가 재사용합니다.
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Credential);

impl<S> FromRequestParts<S> for JwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(credential) = parts.extensions.get::<Credential>() {
            return Ok(JwtAuth(credential.clone()));
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::MissingToken)?
            .to_str()
            .map_err(|_| ApiError::InvalidAuthHeader)?;

        let token = bearer_token(header).ok_or(ApiError::InvalidAuthHeader)?;

        let app_state = AppState::from_ref(state);
        let credential = app_state.authority.validate(token)?;

        parts.extensions.insert(credential.clone());
        Ok(JwtAuth(credential))
    }
}

/// 정책 이름을 타입으로 표현합니다.
pub trait PolicyName: Send + Sync + 'static {
    const NAME: &'static str;
}

/// `Admin` 역할만 허용.
#[derive(Debug)]
pub struct AdminPolicy;

impl PolicyName for AdminPolicy {
    const NAME: &'static str = ADMIN;
}

/// `Client` 역할만 허용.
#[derive(Debug)]
pub struct ClientPolicy;

impl PolicyName for ClientPolicy {
    const NAME: &'static str = CLIENT;
}

/// `Admin` 또는 `Client` 허용.
#[derive(Debug)]
pub struct AdminOrClientPolicy;

impl PolicyName for AdminOrClientPolicy {
    const NAME: &'static str = "AdminOrClient";
}

/// 정책 `P`를 만족하는 자격증명만 통과시키는 추출기.
///
/// 인증 실패는 401, 정책 불일치는 403으로 응답합니다.
#[derive(Debug)]
pub struct RequirePolicy<P: PolicyName> {
    pub credential: Credential,
    _policy: PhantomData<fn() -> P>,
}

impl<P: PolicyName> RequirePolicy<P> {
    pub fn into_inner(self) -> Credential {
        self.credential
    }
}

impl<P, S> FromRequestParts<S> for RequirePolicy<P>
where
    P: PolicyName,
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(credential) = JwtAuth::from_request_parts(parts, state).await?;

        AppState::from_ref(state)
            .authority
            .authorize_policy(&credential, P::NAME)?;

        Ok(RequirePolicy {
            credential,
            _policy: PhantomData,
        })
    }
}

pub type AdminAuth = RequirePolicy<AdminPolicy>;
pub type ClientAuth = RequirePolicy<ClientPolicy>;
pub type AdminOrClientAuth = RequirePolicy<AdminOrClientPolicy>;
