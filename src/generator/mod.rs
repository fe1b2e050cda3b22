//! 컨셉 생성 모듈 - LLM 프로바이더 + 템플릿 폴백
//!
//! 생성기는 절대 실패하지 않습니다.
//! 프로바이더가 없거나, 호출이 실패하거나, 응답이 검증을 통과하지 못하면
//! 결정적인 템플릿 컨셉으로 대체합니다.
//!
//! ## 사용법
//! ```rust,ignore
//! let generator = ConceptGenerator::from_config(&GeneratorConfig::from_env())?;
//! let concept = generator.generate(&snapshot, Some("Acme Mug")).await;
//! ```

mod openai;
mod template;

pub use openai::{build_prompt, OpenAiProvider};
pub use template::fallback_concept;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::concept::{ConceptDraft, UgcConcept};
use crate::config::GeneratorConfig;
use crate::scraper::ProductSnapshot;

// ============================================================================
// ConceptProvider Trait
// ============================================================================

/// 컨셉 프로바이더 트레이트
///
/// 외부 텍스트 생성 서비스에서 검증 전 초안을 받아오는 인터페이스입니다.
#[async_trait]
pub trait ConceptProvider: Send + Sync {
    /// 표시 이름과 설명으로 초안 생성
    async fn draft(&self, name: &str, description: &str) -> Result<ConceptDraft, GenerationError>;

    /// 프로바이더 이름 (로그용)
    fn name(&self) -> &str;
}

/// 생성 서비스 에러
///
/// 사용자에게 노출되지 않고 항상 폴백을 유발합니다.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("completion had no message content")]
    EmptyContent,

    #[error("completion content is not a concept object: {0}")]
    Content(#[source] serde_json::Error),
}

// ============================================================================
// ConceptGenerator
// ============================================================================

/// 컨셉 생성기
#[derive(Clone, Default)]
pub struct ConceptGenerator {
    provider: Option<Arc<dyn ConceptProvider>>,
}

impl ConceptGenerator {
    /// 프로바이더 지정 (`None` 이면 항상 템플릿)
    pub fn new(provider: Option<Arc<dyn ConceptProvider>>) -> Self {
        Self { provider }
    }

    /// 템플릿 전용 생성기
    pub fn template_only() -> Self {
        Self::default()
    }

    /// 설정에서 생성 (API 키가 있으면 OpenAI 사용)
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let provider = OpenAiProvider::from_config(config)?;

        match &provider {
            Some(p) => tracing::info!("Using generation backend: {}", p.name()),
            None => tracing::info!("No OPENAI_API_KEY set, using template concepts"),
        }

        Ok(Self::new(
            provider.map(|p| Arc::new(p) as Arc<dyn ConceptProvider>),
        ))
    }

    /// 외부 생성 백엔드 사용 여부
    pub fn has_backend(&self) -> bool {
        self.provider.is_some()
    }

    /// 컨셉 생성 (실패 없음)
    pub async fn generate(
        &self,
        product: &ProductSnapshot,
        product_name: Option<&str>,
    ) -> UgcConcept {
        let name = display_name(product_name, &product.title);

        let Some(provider) = &self.provider else {
            return fallback_concept(product, name);
        };

        tracing::info!("Generating concept for {:?} via {}", name, provider.name());

        let draft = match provider.draft(name, &product.description).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Generation failed, using template: {}", e);
                return fallback_concept(product, name);
            }
        };

        let snapshot = ProductSnapshot {
            title: name.to_string(),
            ..product.clone()
        };

        match draft.into_concept(snapshot) {
            Ok(concept) => concept,
            Err(e) => {
                tracing::warn!("Generated concept rejected, using template: {}", e);
                fallback_concept(product, name)
            }
        }
    }
}

/// 표시 이름 결정: 공백 제거 후 비어 있지 않은 사용자 입력 > 스크랩된 제목
pub fn display_name<'a>(product_name: Option<&'a str>, title: &'a str) -> &'a str {
    product_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(title)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::SceneDraft;

    fn product() -> ProductSnapshot {
        ProductSnapshot {
            url: "https://shop.example/p/1".to_string(),
            title: "Scraped Title".to_string(),
            description: "Scraped description".to_string(),
            image: None,
        }
    }

    /// 고정 응답을 돌려주는 테스트 프로바이더
    struct StaticProvider {
        scenes: usize,
        fail: bool,
    }

    #[async_trait]
    impl ConceptProvider for StaticProvider {
        async fn draft(
            &self,
            name: &str,
            _description: &str,
        ) -> Result<ConceptDraft, GenerationError> {
            if self.fail {
                return Err(GenerationError::EmptyContent);
            }
            let scenes = (1..=self.scenes)
                .map(|n| SceneDraft {
                    scene: Some(n as u32),
                    visual: Some(format!("visual {n}")),
                    direction: Some(format!("direction {n}")),
                    voiceover: Some(format!("{name} line {n}")),
                })
                .collect();
            Ok(ConceptDraft {
                hook: Some(format!("{name} hook")),
                script: Some("script".to_string()),
                scenes: Some(scenes),
                voiceover: Some("voiceover".to_string()),
                cta: Some("cta".to_string()),
            })
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    fn with_provider(scenes: usize, fail: bool) -> ConceptGenerator {
        ConceptGenerator::new(Some(Arc::new(StaticProvider { scenes, fail })))
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Some("  Acme Mug "), "Title"), "Acme Mug");
        assert_eq!(display_name(Some("   "), "Title"), "Title");
        assert_eq!(display_name(None, "Title"), "Title");
    }

    #[tokio::test]
    async fn test_template_without_provider() {
        let generator = ConceptGenerator::template_only();
        assert!(!generator.has_backend());

        let concept = generator.generate(&product(), Some("Acme Mug")).await;
        assert_eq!(concept.scenes.len(), 5);
        assert!(concept.hook.contains("Acme Mug"));
        assert!(concept.script.contains("Acme Mug"));
        assert!(concept.voiceover.contains("Acme Mug"));
        assert!(concept.call_to_action.contains("Acme Mug"));
    }

    #[tokio::test]
    async fn test_provider_result_used() {
        let concept = with_provider(6, false)
            .generate(&product(), Some("Acme Mug"))
            .await;

        assert_eq!(concept.hook, "Acme Mug hook");
        assert_eq!(concept.scenes.len(), 6);
        assert_eq!(concept.product.title, "Acme Mug");
        assert_eq!(concept.product.description, "Scraped description");
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let concept = with_provider(6, true).generate(&product(), None).await;

        assert_eq!(concept, fallback_concept(&product(), "Scraped Title"));
    }

    #[tokio::test]
    async fn test_invalid_draft_falls_back() {
        let concept = with_provider(3, false).generate(&product(), None).await;

        assert_eq!(concept.scenes.len(), 5);
        assert_eq!(concept, fallback_concept(&product(), "Scraped Title"));
    }

    #[tokio::test]
    async fn test_generator_from_config_without_key() {
        let generator = ConceptGenerator::from_config(&GeneratorConfig::default()).expect("config");
        assert!(!generator.has_backend());
    }

    #[tokio::test]
    async fn test_openai_error_status_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("boom")
            .expect(1)
            .create_async()
            .await;

        let config = GeneratorConfig {
            api_key: Some("test-key".to_string()),
            base_url: format!("{}/v1", server.url()),
            ..Default::default()
        };
        let generator = ConceptGenerator::from_config(&config).expect("config");
        assert!(generator.has_backend());

        let concept = generator.generate(&product(), Some("Acme Mug")).await;
        assert_eq!(concept, fallback_concept(&product(), "Acme Mug"));

        mock.assert_async().await;
    }
}
