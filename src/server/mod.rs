//! HTTP 서버 모듈 - axum 라우터
//!
//! 엔드포인트는 루트와 `/api` 아래 양쪽에 마운트됩니다.
//!
//! - `POST /generate`       : 제품 URL → UGC 컨셉
//! - `POST /capture-email`  : 이메일 수집
//! - `GET  /health`         : 상태 확인

mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{CaptureEmailResponse, GenerateResponse, HealthResponse};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{AppConfig, ServerConfig};
use crate::email::{EmailStore, InMemoryEmailStore};
use crate::service::ConceptService;

use self::error::error_response;

// ============================================================================
// State
// ============================================================================

/// 핸들러 공유 상태 (`State<AppState>`)
#[derive(Clone)]
pub struct AppState {
    /// 컨셉 서비스
    pub service: Arc<ConceptService>,
    /// 이메일 저장소
    pub emails: Arc<dyn EmailStore>,
    /// 서버 설정
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(service: ConceptService, emails: Arc<dyn EmailStore>, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(service),
            emails,
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// API 라우트 (state 미적용)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/capture-email", post(handlers::capture_email))
}

/// 미들웨어를 포함한 전체 라우터
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(map_response(json_error_body))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// CORS 레이어
///
/// `*` 가 하나라도 있으면 모든 origin 허용. 잘못된 origin 은 경고 후 건너뜀
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}: {}", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// JSON 이 아닌 에러 응답을 `{"error"}` 형태로 변환
///
/// 타임아웃(408), 패닉(500), 라우팅 실패(404/405) 처럼
/// 핸들러를 거치지 않은 응답이 대상입니다.
async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let message = match status {
        StatusCode::REQUEST_TIMEOUT => "Request timed out.",
        _ => status.canonical_reason().unwrap_or("Request failed."),
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);

    let (error_parts, body) = error_response(status, message).into_parts();
    parts.headers.extend(error_parts.headers);

    Response::from_parts(parts, body)
}

// ============================================================================
// Serve
// ============================================================================

/// 설정으로 서버 실행 (종료 시그널까지 블록)
pub async fn serve(config: AppConfig) -> Result<()> {
    let service = ConceptService::from_config(&config.generator)?;
    let emails: Arc<dyn EmailStore> = Arc::new(InMemoryEmailStore::new());

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid HOST address: {}", config.server.host))?,
        config.server.port,
    );

    let app = build_router(AppState::new(service, emails, config.server));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Ctrl-C 또는 SIGTERM 대기
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::generator::ConceptGenerator;
    use crate::scraper::ProductScraper;

    fn app(config: ServerConfig) -> Router {
        let service = ConceptService::new(
            ProductScraper::new().expect("scraper"),
            ConceptGenerator::template_only(),
        );
        build_router(AppState::new(
            service,
            Arc::new(InMemoryEmailStore::new()),
            config,
        ))
    }

    async fn error_message(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        json["error"].as_str().expect("error string").to_string()
    }

    #[tokio::test]
    async fn test_cors_wildcard() {
        let config = ServerConfig {
            cors_origins: vec!["*".to_string(), "http://localhost:3000".to_string()],
            ..Default::default()
        };

        let request = Request::builder()
            .uri("/health")
            .header("origin", "https://anywhere.example")
            .body(Body::empty())
            .expect("request");
        let response = app(config).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn test_cors_listed_origin() {
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .expect("request");
        let response = app(ServerConfig::default())
            .oneshot(request)
            .await
            .expect("response");

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("http://localhost:3000")
        );
    }

    #[tokio::test]
    async fn test_timeout_body_is_json() {
        let response = json_error_body(StatusCode::REQUEST_TIMEOUT.into_response()).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            HeaderValue::from_static("application/json")
        );
        assert_eq!(error_message(response).await, "Request timed out.");
    }

    #[tokio::test]
    async fn test_panic_body_is_json() {
        async fn boom() -> &'static str {
            panic!("handler panicked")
        }

        let router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::new())
            .layer(map_response(json_error_body));

        let request = Request::builder()
            .uri("/boom")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_unknown_route_body_is_json() {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .expect("request");
        let response = app(ServerConfig::default())
            .oneshot(request)
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_message(response).await, "Not Found");
    }

    #[tokio::test]
    async fn test_handler_error_body_untouched() {
        let response = json_error_body(
            ApiError::BadRequest("Valid email is required.".to_string()).into_response(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, "Valid email is required.");
    }
}
