//! JSONP 응답 포맷터.
//!
//! `<script>` 태그로 교차 출처 소비하는 레거시 클라이언트를 위해
//! 자격증명 문자열을 `callback({"value":"<credential>"})` 형태로 감쌉니다.
//! 토큰 코어는 자격증명을 평문 문자열로만 다루며, 이 모듈은 전송 계층에
//! 속합니다.

use serde_json::json;

/// 콜백 이름 최대 길이.
pub const MAX_CALLBACK_LEN: usize = 128;

/// JSONP 응답 Content-Type.
pub const JSONP_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

/// JSONP 포맷 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonpError {
    #[error("callBack 파라미터가 필요합니다")]
    MissingCallback,
    #[error("잘못된 콜백 이름: {0}")]
    InvalidCallback(String),
}

/// 콜백 이름이 `.`으로 이어진 JavaScript 식별자인지 확인합니다.
///
/// 예: `handle`, `window.app.onToken`, `$cb_1`
pub fn is_valid_callback(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_CALLBACK_LEN {
        return false;
    }

    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    })
}

/// 콜백 파라미터를 정리하고 검사합니다.
pub fn check_callback(callback: Option<&str>) -> Result<&str, JsonpError> {
    let callback = callback.map(str::trim).unwrap_or_default();
    if callback.is_empty() {
        return Err(JsonpError::MissingCallback);
    }
    if !is_valid_callback(callback) {
        return Err(JsonpError::InvalidCallback(callback.chars().take(32).collect()));
    }
    Ok(callback)
}

/// 자격증명을 JSONP 본문으로 감쌉니다.
pub fn wrap(callback: &str, credential: &str) -> Result<String, JsonpError> {
    let callback = check_callback(Some(callback))?;
    let payload = json!({ "value": credential });
    Ok(format!("{callback}({payload})"))
}
