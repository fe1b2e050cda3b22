//! OpenAI Chat Completions 기반 컨셉 프로바이더
//!
//! ref: https://platform.openai.com/docs/api-reference/chat/create
//!
//! JSON 모드(`response_format: json_object`)로 한 번만 호출합니다.
//! 재시도는 하지 않으며, 실패는 호출자(ConceptGenerator)가 폴백으로 흡수합니다.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::concept::ConceptDraft;
use crate::config::GeneratorConfig;

use super::{ConceptProvider, GenerationError};

/// 고정 temperature
const TEMPERATURE: f32 = 0.8;

/// 시스템 지시문
const SYSTEM_PROMPT: &str =
    "You write high-converting, authentic UGC ad concepts in natural human language.";

// ============================================================================
// OpenAiProvider
// ============================================================================

/// OpenAI 컨셉 프로바이더
#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiProvider {
    /// 새 프로바이더 생성
    pub fn new(api_key: String, model: String, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            api_key,
            model,
            endpoint,
        })
    }

    /// 설정에서 생성. API 키가 없으면 `None`
    pub fn from_config(config: &GeneratorConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(key) => Ok(Some(Self::new(
                key.clone(),
                config.model.clone(),
                &config.base_url,
            )?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ConceptProvider for OpenAiProvider {
    async fn draft(&self, name: &str, description: &str) -> Result<ConceptDraft, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(name, description),
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body).map_err(GenerationError::Envelope)?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyContent)?;

        serde_json::from_str(&content).map_err(GenerationError::Content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// 사용자 프롬프트 구성
pub fn build_prompt(name: &str, description: &str) -> String {
    format!(
        "Create a short UGC video concept from this product data. \
         Return strict JSON with keys: hook, script, scenes, voiceover, cta.\n\
         Product title: {name}\n\
         Product description: {description}\n\
         Rules:\n\
         - hook: 1 sentence\n\
         - script: 30-45 seconds spoken naturally\n\
         - scenes: array with 5-7 scenes. each scene includes scene (number), visual, direction, voiceover\n\
         - cta: concise and persuasive"
    )
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
