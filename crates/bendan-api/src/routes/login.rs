//! 로그인 엔드포인트.
//!
//! 자격증명 발급과 현재 자격증명 조회를 제공합니다.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bendan_auth::Credential;
use serde::Deserialize;

use crate::{
    auth::AdminOrClientAuth,
    error::ApiError,
    jsonp::{self, JSONP_CONTENT_TYPE},
    state::AppState,
};

/// `Token2` 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    /// subject ID (없으면 설정 기본값)
    pub id: Option<u64>,
    /// 역할 (없으면 설정 기본값)
    pub sub: Option<String>,
}

/// `jsonp` 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct JsonpQuery {
    #[serde(rename = "callBack", alias = "callback")]
    pub callback: Option<String>,
    pub id: Option<u64>,
    pub sub: Option<String>,
    #[serde(rename = "expiresSliding")]
    pub expires_sliding: Option<i64>,
    // 기존 클라이언트가 보내는 철자를 그대로 받습니다.
    #[serde(rename = "expiresAbsoulute", alias = "expiresAbsolute")]
    pub expires_absolute: Option<i64>,
}

fn resolve_role<'a>(state: &'a AppState, sub: Option<&'a str>) -> &'a str {
    match sub.map(str::trim) {
        Some(role) if !role.is_empty() => role,
        _ => state.default_role.as_str(),
    }
}

/// 자격증명 발급.
///
/// GET /api/Login/Token2?id=1&sub=Admin
pub async fn issue_token(
    State(state): State<AppState>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<String>, ApiError> {
    let Query(query) = query?;
    let subject_id = query.id.unwrap_or(state.default_subject_id);
    let role = resolve_role(&state, query.sub.as_deref());

    let token = state.authority.issue_default(subject_id, role)?;
    tracing::info!(subject_id, role, "Token issued");

    Ok(Json(token))
}

/// JSONP 자격증명 발급.
///
/// GET /api/Login/jsonp?callBack=cb&id=1&sub=Admin&expiresSliding=30&expiresAbsoulute=30
pub async fn issue_jsonp(
    State(state): State<AppState>,
    query: Result<Query<JsonpQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let callback = jsonp::check_callback(query.callback.as_deref())?;
    let (default_sliding, default_absolute) = state.authority.default_windows();
    let subject_id = query.id.unwrap_or(state.default_subject_id);
    let role = resolve_role(&state, query.sub.as_deref());

    let token = state.authority.issue(
        subject_id,
        role,
        query.expires_sliding.unwrap_or(default_sliding),
        query.expires_absolute.unwrap_or(default_absolute),
    )?;
    let body = jsonp::wrap(callback, &token)?;
    tracing::info!(subject_id, role, "JSONP token issued");

    Ok(([(CONTENT_TYPE, JSONP_CONTENT_TYPE)], body))
}

/// 현재 자격증명 조회.
///
/// GET /api/Login/Current
pub async fn current_credential(auth: AdminOrClientAuth) -> Json<Credential> {
    Json(auth.into_inner())
}

/// 로그인 라우터 생성.
pub fn login_router() -> Router<AppState> {
    Router::new()
        .route("/Token2", get(issue_token))
        .route("/jsonp", get(issue_jsonp))
        .route("/Current", get(current_credential))
}
