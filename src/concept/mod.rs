//! UGC 컨셉 모델 - 생성 결과와 검증
//!
//! [`UgcConcept`] 는 한 번의 요청 동안만 존재하는 불변 값입니다.
//! 외부 생성 서비스의 응답은 먼저 [`ConceptDraft`] 로 받은 뒤
//! [`ConceptDraft::into_concept`] 로 검증을 거쳐야 컨셉이 됩니다.

use serde::{Deserialize, Serialize};

use crate::scraper::ProductSnapshot;

/// 컨셉당 최소 씬 개수
pub const MIN_SCENES: usize = 5;

/// 컨셉당 최대 씬 개수
pub const MAX_SCENES: usize = 7;

// ============================================================================
// Types
// ============================================================================

/// 씬 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// 씬 번호 (1부터 시작)
    #[serde(rename = "scene")]
    pub index: u32,
    /// 화면 묘사
    pub visual: String,
    /// 촬영 디렉션
    pub direction: String,
    /// 해당 씬의 보이스오버 대사
    pub voiceover: String,
}

/// UGC 숏폼 광고 컨셉
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UgcConcept {
    pub product: ProductSnapshot,
    pub hook: String,
    pub script: String,
    pub scenes: Vec<Scene>,
    pub voiceover: String,
    #[serde(rename = "cta")]
    pub call_to_action: String,
}

// ============================================================================
// Draft (unvalidated)
// ============================================================================

/// 생성 서비스가 돌려준 검증 전 컨셉
///
/// 모든 필드가 선택적이며, 타입이 맞지 않으면 역직렬화 단계에서 실패합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConceptDraft {
    #[serde(default)]
    pub hook: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub scenes: Option<Vec<SceneDraft>>,
    #[serde(default)]
    pub voiceover: Option<String>,
    #[serde(default)]
    pub cta: Option<String>,
}

/// 검증 전 씬
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneDraft {
    #[serde(default)]
    pub scene: Option<u32>,
    #[serde(default)]
    pub visual: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub voiceover: Option<String>,
}

/// 검증 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),

    #[error("expected 5-7 scenes, got {0}")]
    SceneCount(usize),

    #[error("scene {position}: missing or empty field `{field}`")]
    SceneField {
        position: usize,
        field: &'static str,
    },

    #[error("scene {position}: scene number must be positive")]
    SceneNumber { position: usize },
}

impl ConceptDraft {
    /// 초안을 검증하여 컨셉으로 변환
    ///
    /// 씬 번호가 없으면 1부터 시작하는 위치 번호로 채웁니다.
    pub fn into_concept(self, product: ProductSnapshot) -> Result<UgcConcept, ValidationError> {
        let hook = required(self.hook, "hook")?;
        let script = required(self.script, "script")?;
        let voiceover = required(self.voiceover, "voiceover")?;
        let call_to_action = required(self.cta, "cta")?;

        let drafts = self.scenes.ok_or(ValidationError::MissingField("scenes"))?;
        if !(MIN_SCENES..=MAX_SCENES).contains(&drafts.len()) {
            return Err(ValidationError::SceneCount(drafts.len()));
        }

        let scenes = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| draft.into_scene(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UgcConcept {
            product,
            hook,
            script,
            scenes,
            voiceover,
            call_to_action,
        })
    }
}

impl SceneDraft {
    fn into_scene(self, position: usize) -> Result<Scene, ValidationError> {
        let check = |value: Option<String>, field: &'static str| {
            non_empty(value).ok_or(ValidationError::SceneField { position, field })
        };

        let index = match self.scene {
            Some(0) => return Err(ValidationError::SceneNumber { position }),
            Some(n) => n,
            None => position as u32,
        };

        Ok(Scene {
            index,
            visual: check(self.visual, "visual")?,
            direction: check(self.direction, "direction")?,
            voiceover: check(self.voiceover, "voiceover")?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    non_empty(value).ok_or(ValidationError::MissingField(field))
}
