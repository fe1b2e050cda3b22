//! 제품 페이지 스크래퍼 - 메타데이터 추출
//!
//! 제품 URL을 가져와 제목 / 설명 / 대표 이미지를 추출합니다.
//! 필드마다 [`SelectorChain`] 폴백 순서를 적용하며,
//! 아무것도 찾지 못하면 고정된 기본값을 사용합니다.

mod chain;

pub use chain::{description_chain, image_chain, title_chain, Rule, SelectorChain};

use anyhow::{Context, Result};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

/// 요청 시 사용하는 User-Agent
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; UGCConceptBot/1.0)";

/// 제목을 찾지 못했을 때의 기본값
pub const DEFAULT_TITLE: &str = "Untitled Product";

/// 설명을 찾지 못했을 때의 기본값
pub const DEFAULT_DESCRIPTION: &str = "No product description was found.";

// ============================================================================
// Types
// ============================================================================

/// 스크랩된 제품 정보
///
/// `title`, `description` 은 항상 비어 있지 않고,
/// `image` 는 절대 URL이거나 없음입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// 원본 URL
    pub url: String,
    /// 제품 제목
    pub title: String,
    /// 제품 설명
    pub description: String,
    /// 대표 이미지 (절대 URL)
    pub image: Option<String>,
}

/// 스크래핑 에러
///
/// 사용자에게는 원인과 관계없이 동일한 메시지가 노출됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// 연결 실패, 본문 읽기 실패 등
    #[error("Unable to fetch the product URL.")]
    Transport(#[from] reqwest::Error),

    /// 2xx 가 아닌 응답
    #[error("Unable to fetch the product URL.")]
    Status(u16),
}

// ============================================================================
// ProductScraper
// ============================================================================

/// 제품 페이지 스크래퍼
pub struct ProductScraper {
    client: reqwest::Client,
}

impl ProductScraper {
    /// 새 스크래퍼 생성
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client })
    }

    /// URL에서 제품 정보 추출
    pub async fn scrape(&self, url: &Url) -> Result<ProductSnapshot, ScrapeError> {
        tracing::info!("Scraping product page: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Product page returned {}: {}", status, url);
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let html = response.text().await?;

        Ok(extract_snapshot(url, &html))
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// HTML 문서에서 제품 정보 추출
///
/// 네트워크와 무관한 순수 함수입니다.
pub fn extract_snapshot(page_url: &Url, html: &str) -> ProductSnapshot {
    let document = Html::parse_document(html);

    let title = title_chain()
        .first_match(&document)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let description = description_chain()
        .first_match(&document)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let image = image_chain()
        .first_match(&document)
        .and_then(|candidate| resolve_image(page_url, &candidate));

    ProductSnapshot {
        url: page_url.to_string(),
        title,
        description,
        image,
    }
}

/// 이미지 경로를 페이지 URL 기준 절대 URL로 변환
///
/// 변환에 실패하면 잘못된 URL을 노출하지 않고 `None` 을 반환합니다.
fn resolve_image(page_url: &Url, candidate: &str) -> Option<String> {
    match page_url.join(candidate) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            tracing::debug!("Dropping unresolvable image {:?}: {}", candidate, e);
            None
        }
    }
}
