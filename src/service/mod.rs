//! 컨셉 서비스 - 요청 오케스트레이션
//!
//! URL 검증 → 스크래핑 → 컨셉 생성을 순차적으로 수행합니다.
//! 부분 결과는 없으며, 컨셉은 전부 아니면 에러입니다.

use anyhow::Result;
use url::Url;

use crate::concept::UgcConcept;
use crate::config::GeneratorConfig;
use crate::generator::ConceptGenerator;
use crate::scraper::{ProductScraper, ScrapeError};

/// 알 수 없는 실패 시 기본 메시지
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to generate concept.";

// ============================================================================
// Errors
// ============================================================================

/// 서비스 에러
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// URL 누락
    #[error("Product URL is required.")]
    MissingUrl,

    /// URL 파싱 실패
    #[error("Please enter a valid product URL.")]
    InvalidUrl(#[source] url::ParseError),

    /// 제품 페이지를 가져오지 못함
    #[error(transparent)]
    Fetch(#[from] ScrapeError),
}

impl ServiceError {
    /// 사용자 입력 문제인지 여부 (400 대상)
    pub fn is_input_error(&self) -> bool {
        matches!(self, ServiceError::MissingUrl | ServiceError::InvalidUrl(_))
    }
}

// ============================================================================
// ConceptService
// ============================================================================

/// 컨셉 서비스
pub struct ConceptService {
    scraper: ProductScraper,
    generator: ConceptGenerator,
}

impl ConceptService {
    /// 스크래퍼와 생성기로 서비스 생성
    pub fn new(scraper: ProductScraper, generator: ConceptGenerator) -> Self {
        Self { scraper, generator }
    }

    /// 설정에서 생성
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(
            ProductScraper::new()?,
            ConceptGenerator::from_config(config)?,
        ))
    }

    /// 외부 생성 백엔드 사용 여부
    pub fn has_backend(&self) -> bool {
        self.generator.has_backend()
    }

    /// 컨셉 생성 요청 처리
    ///
    /// `product_name` 이 비어 있지 않으면 스크랩된 제목 대신 사용합니다.
    pub async fn handle_generate(
        &self,
        raw_url: Option<&str>,
        product_name: Option<&str>,
    ) -> Result<UgcConcept, ServiceError> {
        let url = parse_product_url(raw_url)?;

        let product = self.scraper.scrape(&url).await?;
        let concept = self.generator.generate(&product, product_name).await;

        tracing::info!(
            "Generated concept for {} ({} scenes)",
            concept.product.url,
            concept.scenes.len()
        );

        Ok(concept)
    }
}

/// 제품 URL 검증 및 정규화
///
/// 빈 문자열은 누락으로 취급합니다.
pub fn parse_product_url(raw_url: Option<&str>) -> Result<Url, ServiceError> {
    let raw = raw_url
        .filter(|s| !s.is_empty())
        .ok_or(ServiceError::MissingUrl)?;

    Url::parse(raw).map_err(ServiceError::InvalidUrl)
}
