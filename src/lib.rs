//! ugc-concept - 제품 URL → UGC 숏폼 광고 컨셉
//!
//! 제품 페이지 메타데이터를 스크래핑하고,
//! OpenAI 또는 결정적 템플릿으로 훅 / 스크립트 / 씬 / 보이스오버 / CTA 를 생성합니다.

pub mod cli;
pub mod concept;
pub mod config;
pub mod email;
pub mod generator;
pub mod scraper;
pub mod server;
pub mod service;

// Re-exports
pub use concept::{ConceptDraft, Scene, UgcConcept, ValidationError};
pub use config::{AppConfig, GeneratorConfig, ServerConfig};
pub use email::{normalize_email, EmailStore, InMemoryEmailStore};
pub use generator::{ConceptGenerator, ConceptProvider, GenerationError, OpenAiProvider};
pub use self::scraper::{ProductScraper, ProductSnapshot, ScrapeError};
pub use server::{build_router, AppState};
pub use service::{ConceptService, ServiceError};
