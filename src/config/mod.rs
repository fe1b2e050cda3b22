//! 설정 모듈 - 환경변수 기반 설정
//!
//! `.env` 파일이 있으면 먼저 읽어들입니다 (`dotenvy`).
//!
//! | 환경변수               | 기본값                        |
//! |------------------------|-------------------------------|
//! | `HOST`                 | `0.0.0.0`                     |
//! | `PORT`                 | `3000`                        |
//! | `CORS_ORIGINS`         | `http://localhost:3000`       |
//! | `REQUEST_TIMEOUT_SECS` | `60`                          |
//! | `OPENAI_API_KEY`       | (없음 - 템플릿 폴백 사용)     |
//! | `OPENAI_MODEL`         | `gpt-4o-mini`                 |
//! | `OPENAI_BASE_URL`      | `https://api.openai.com/v1`   |

use anyhow::{Context, Result};

/// 기본 생성 모델
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// 기본 OpenAI API 베이스 URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// Types
// ============================================================================

/// HTTP 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인드 주소
    pub host: String,
    /// 바인드 포트
    pub port: u16,
    /// 허용 CORS origin 목록
    pub cors_origins: Vec<String>,
    /// 서버 전체 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

/// 컨셉 생성 서비스 설정
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API 키. 없으면 항상 템플릿 폴백
    pub api_key: Option<String>,
    /// 모델 이름
    pub model: String,
    /// API 베이스 URL (`/chat/completions` 가 붙음)
    pub base_url: String,
}

/// 전체 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 60,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ServerConfig {
    /// 환경변수에서 로드
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env_non_empty("HOST").unwrap_or(defaults.host);

        let port = match env_non_empty("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT must be a valid u16: {}", v))?,
            None => defaults.port,
        };

        let cors_origins = match env_non_empty("CORS_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let request_timeout_secs = match env_non_empty("REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a valid u64: {}", v))?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}

impl GeneratorConfig {
    /// 환경변수에서 로드
    pub fn from_env() -> Self {
        Self {
            api_key: get_api_key(),
            model: env_non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env_non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl AppConfig {
    /// `.env` + 환경변수에서 전체 설정 로드
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        Ok(Self {
            server: ServerConfig::from_env()?,
            generator: GeneratorConfig::from_env(),
        })
    }
}

// ============================================================================
// API Key Management
// ============================================================================

/// API 키 로드 (`OPENAI_API_KEY`)
pub fn get_api_key() -> Option<String> {
    let key = env_non_empty("OPENAI_API_KEY");
    if key.is_some() {
        tracing::debug!("Using API key from OPENAI_API_KEY");
    }
    key
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
