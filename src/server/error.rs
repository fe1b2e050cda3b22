use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::service::ServiceError;

/// HTTP 핸들러용 에러 타입
///
/// 모든 에러는 `{"error": "<message>"}` JSON 으로 응답합니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 컨셉 서비스 에러 (입력 에러는 400, 나머지는 500)
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// 잘못된 요청
    #[error("{0}")]
    BadRequest(String),

    /// 내부 에러 (메시지는 그대로 노출)
    #[error("{0}")]
    Internal(String),
}

/// 핸들러 반환 타입
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Service(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        }

        error_response(status, &message)
    }
}

/// `{"error": "<message>"}` JSON 응답 생성
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
