//! JSON response body shared by every reply

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"code": <int>, "msg": "<string>"}` sent back for every request.
///
/// `code` starts out mirroring the transport status but can be set on its own.
#[derive(Debug, Clone, Serialize)]
pub struct HookResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: u16,
    pub msg: String,
}

impl HookResponse {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            code: status.as_u16(),
            msg: msg.into(),
        }
    }

    pub fn ok(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, msg)
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for HookResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[test]
    fn test_code_mirrors_status() {
        let resp = HookResponse::bad_gateway("boom");
        assert_eq!(resp.code, 502);
        assert!(!resp.is_success());
    }

    #[test]
    fn test_code_is_independent_of_status() {
        let resp = HookResponse::ok("fine").with_code(0);
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.code, 0);
    }

    #[tokio::test]
    async fn test_into_response_writes_json_body() {
        let response = HookResponse::ok("deployed\n").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"code": 200, "msg": "deployed\n"}));
    }
}
