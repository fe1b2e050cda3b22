//! 셀렉터 체인 - 필드별 순서 있는 폴백 규칙
//!
//! 각 필드(제목, 설명, 이미지)는 규칙 목록을 순서대로 시도하고
//! 처음으로 비어 있지 않은 값을 채택합니다.
//! 셀렉터 자체는 데이터이고, "첫 매치 우선" 정책만이 고정된 계약입니다.

use scraper::{ElementRef, Html, Selector};

// ============================================================================
// Rule
// ============================================================================

/// 단일 추출 규칙
///
/// 규칙은 셀렉터에 매치되는 **첫 번째** 요소만 봅니다.
/// 그 요소의 값이 비어 있으면 다음 규칙으로 넘어갑니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// 요소의 속성 값 (예: `meta[property='og:title']` 의 `content`)
    Attr {
        selector: &'static str,
        attr: &'static str,
    },
    /// 요소의 텍스트 노드 (앞뒤 공백 제거)
    Text { selector: &'static str },
}

impl Rule {
    /// 문서에서 이 규칙의 후보 값 추출
    pub fn candidate(&self, document: &Html) -> Option<String> {
        let selector_str = match self {
            Rule::Attr { selector, .. } | Rule::Text { selector } => *selector,
        };

        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Invalid selector {:?}: {}", selector_str, e);
                return None;
            }
        };

        let element = document.select(&selector).next()?;

        let value = match self {
            Rule::Attr { attr, .. } => element.value().attr(attr)?.trim().to_string(),
            Rule::Text { .. } => element_text(&element),
        };

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// 요소 텍스트 추출 (앞뒤 공백만 제거, 내부 공백은 보존)
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

// ============================================================================
// SelectorChain
// ============================================================================

/// 순서 있는 규칙 체인
#[derive(Debug, Clone, Default)]
pub struct SelectorChain {
    rules: Vec<Rule>,
}

impl SelectorChain {
    /// 빈 체인 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 속성 규칙 추가
    pub fn attr(mut self, selector: &'static str, attr: &'static str) -> Self {
        self.rules.push(Rule::Attr { selector, attr });
        self
    }

    /// 텍스트 규칙 추가
    pub fn text(mut self, selector: &'static str) -> Self {
        self.rules.push(Rule::Text { selector });
        self
    }

    /// 등록된 규칙 목록
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 첫 번째로 값을 내는 규칙의 결과 반환
    pub fn first_match(&self, document: &Html) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            let value = rule.candidate(document)?;
            tracing::debug!("Selector hit: {:?}", rule);
            Some(value)
        })
    }
}

// ============================================================================
// Field Chains
// ============================================================================

/// 제목: og:title > twitter:title > <title>
pub fn title_chain() -> SelectorChain {
    SelectorChain::new()
        .attr("meta[property='og:title']", "content")
        .attr("meta[name='twitter:title']", "content")
        .text("title")
}

/// 설명: og:description > meta description > 첫 번째 <p>
pub fn description_chain() -> SelectorChain {
    SelectorChain::new()
        .attr("meta[property='og:description']", "content")
        .attr("meta[name='description']", "content")
        .text("p")
}

/// 이미지: og:image > twitter:image > 첫 번째 <img> src
pub fn image_chain() -> SelectorChain {
    SelectorChain::new()
        .attr("meta[property='og:image']", "content")
        .attr("meta[name='twitter:image']", "content")
        .attr("img", "src")
}
