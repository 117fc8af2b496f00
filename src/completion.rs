//! Chat-completion client.
//!
//! The generator only needs "send role-tagged messages, get text back". The
//! wire format of OpenAI-compatible services varies between SDK generations
//! (plain string content vs. content parts), so the response is normalized into
//! a single [`Completion`] right after the call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Res, config::Config};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Normalized completion output.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Res<Completion>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
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
    content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

impl MessageContent {
    fn into_text(self) -> String {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Parts(parts) => parts.into_iter().filter_map(|p| p.text).collect(),
        }
    }
}

impl OpenAiClient {
    pub fn new(http: Client, config: &Config) -> Self {
        OpenAiClient {
            http,
            api_url: config.openai_api_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Res<Completion> {
        let body = ChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::upstream("chat completion", e))?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::parse("chat completion response", e))?;

        normalize(chat)
    }
}

fn normalize(chat: ChatResponse) -> Res<Completion> {
    let content = chat
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(MessageContent::into_text)
        .ok_or_else(|| Error::parse("chat completion response", "no message content"))?;

    Ok(Completion {
        content: content.trim().to_string(),
    })
}
