use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vol_common::insights::{ImpactAnalysis, ImpactAnalyzer, ImpactSnapshot};
use vol_common::provider::{ProviderError, ScoringProvider, ScoringResponse};
use vol_common::{AssessmentResult, Opportunity, UserProfile};

use crate::config::AiRuntimeConfig;
use crate::prompt;

// Impact analysis runs colder and shorter than match scoring.
const IMPACT_TEMPERATURE: f64 = 0.3;
const IMPACT_MAX_TOKENS: u32 = 1000;

/// Chat-completions client for any OpenAI-compatible endpoint. One request
/// per batch, no retries: the caller decides what a failure means.
#[derive(Clone)]
pub struct OpenAiClient {
    config: AiRuntimeConfig,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: AiRuntimeConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(transport_error)?;
        Ok(Self { config, client })
    }

    async fn chat(&self, request: ChatRequest<'_>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".into()))
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(err.to_string())
    }
}

fn status_error(status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::InvalidCredentials,
        429 => ProviderError::RateLimited,
        _ => ProviderError::Api { status, body },
    }
}

#[async_trait::async_trait]
impl ScoringProvider for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn score(
        &self,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunities: &[Opportunity],
    ) -> Result<ScoringResponse, ProviderError> {
        let user_prompt = prompt::matching_prompt(profile, assessment, opportunities);
        let content = self
            .chat(ChatRequest {
                model: &self.config.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: prompt::MATCHING_SYSTEM_PROMPT,
                    },
                    ChatMessage {
                        role: "user",
                        content: &user_prompt,
                    },
                ],
                response_format: ResponseFormat::JSON_OBJECT,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            })
            .await?;

        debug!(
            model = %self.config.model,
            candidates = opportunities.len(),
            content_bytes = content.len(),
            "received scoring completion"
        );

        serde_json::from_str(&content)
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ImpactAnalyzer for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, snapshot: &ImpactSnapshot) -> Result<ImpactAnalysis, ProviderError> {
        let user_prompt = prompt::impact_prompt(snapshot);
        let content = self
            .chat(ChatRequest {
                model: &self.config.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: prompt::IMPACT_SYSTEM_PROMPT,
                    },
                    ChatMessage {
                        role: "user",
                        content: &user_prompt,
                    },
                ],
                response_format: ResponseFormat::JSON_OBJECT,
                temperature: IMPACT_TEMPERATURE,
                max_tokens: IMPACT_MAX_TOKENS,
            })
            .await?;

        serde_json::from_str(&content)
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    const JSON_OBJECT: Self = Self {
        kind: "json_object",
    };
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Debug, Deserialize)]
struct ChatContent {
    content: String,
}
