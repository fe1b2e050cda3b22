use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::concept::UgcConcept;
use crate::email::normalize_email;
use crate::service::DEFAULT_FAILURE_MESSAGE;

use super::error::{ApiError, ApiResult};
use super::AppState;

// ============================================================================
// Payloads
// ============================================================================

/// `POST /generate` 요청 본문
///
/// 문자열이 아닌 값도 받아들이고, 검증은 서비스에서 처리합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(default)]
    product_url: Option<Value>,
    #[serde(default)]
    product_name: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub concept: UgcConcept,
}

#[derive(Debug, Deserialize)]
struct CaptureEmailRequest {
    #[serde(default)]
    email: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CaptureEmailResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub generation_backend: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /generate -- 제품 URL로 컨셉 생성
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerateResponse>> {
    let request: GenerateRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Unreadable generate body: {}", e);
        ApiError::Internal(DEFAULT_FAILURE_MESSAGE.to_string())
    })?;

    let product_url = request.product_url.as_ref().and_then(Value::as_str);
    let product_name = request.product_name.as_ref().and_then(Value::as_str);

    let concept = state
        .service
        .handle_generate(product_url, product_name)
        .await?;

    Ok(Json(GenerateResponse { concept }))
}

/// POST /capture-email -- 이메일 수집
pub async fn capture_email(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<CaptureEmailResponse>> {
    let request: CaptureEmailRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Internal("Failed to capture email.".to_string()))?;

    let email = request
        .email
        .as_ref()
        .and_then(Value::as_str)
        .and_then(normalize_email)
        .ok_or_else(|| ApiError::BadRequest("Valid email is required.".to_string()))?;

    let count = state.emails.add(&email).map_err(|e| {
        tracing::error!("Email store error: {}", e);
        ApiError::Internal("Failed to capture email.".to_string())
    })?;

    Ok(Json(CaptureEmailResponse {
        success: true,
        count,
    }))
}

/// GET /health -- 서비스 상태
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generation_backend: state.service.has_backend(),
    })
}
