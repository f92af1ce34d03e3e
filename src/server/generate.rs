//! Ticket generation service.
//!
//! Sends the user's project description to a chat-completion provider with a
//! fixed system instruction and a schema-constrained response format, parses
//! the structured result into drafts, and stamps each draft into a full
//! `Ticket`. Parsing happens before anything reaches the store, so a schema
//! violation commits nothing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::config::ProviderConfig;
use crate::errors::GenerateError;
use crate::ticket::{Ticket, TicketBreakdown, TicketDraft, TicketStatus};

const SYSTEM_PROMPT: &str = "You are a project management assistant. Break down the given project \
or task into specific, actionable tickets. Each ticket should be a concrete task that can be \
assigned to a developer. Consider different aspects like frontend, backend, database, testing, \
documentation, etc. Make sure each ticket is:\n\
\n\
1. Specific and actionable\n\
2. Has a clear deliverable\n\
3. Can be completed independently or with minimal dependencies\n\
4. Includes technical details where relevant\n\
5. Has realistic time estimates\n\
\n\
Focus on creating 3-8 tickets that cover all aspects of the project.";

/// JSON schema for the provider's structured response: an object holding a
/// `tickets` array of drafts, nothing else.
pub(crate) fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tickets": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Brief title of the task"
                        },
                        "description": {
                            "type": "string",
                            "description": "Detailed description of what needs to be done"
                        },
                        "priority": {
                            "type": "string",
                            "enum": ["Low", "Medium", "High"],
                            "description": "Priority level of the task"
                        },
                        "estimatedHours": {
                            "type": "number",
                            "description": "Estimated hours to complete the task"
                        },
                        "category": {
                            "type": "string",
                            "description": "Category or type of work (e.g., Frontend, Backend, Design, Testing)"
                        }
                    },
                    "required": ["title", "description", "priority", "estimatedHours", "category"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["tickets"],
        "additionalProperties": false
    })
}

fn build_user_prompt(prompt: &str) -> String {
    format!(
        "Please break down this project into specific development tickets: {}",
        prompt
    )
}

/// Transport seam for the completion provider. The production implementation
/// speaks OpenAI-compatible HTTP; tests substitute canned responses.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion and return the raw message content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> Result<String, GenerateError>;
}

/// OpenAI-compatible chat-completions backend.
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> Result<String, GenerateError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "ticket_breakdown",
                    "schema": schema
                }
            }
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatCompletionResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerateError::MissingContent)
    }
}

/// Stamp provider drafts into full tickets: fresh id, `todo` status, and
/// equal creation/update timestamps taken from a single instant.
pub fn stamp_drafts(drafts: Vec<TicketDraft>) -> Vec<Ticket> {
    let now = Utc::now();
    drafts
        .into_iter()
        .map(|draft| Ticket {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            estimated_hours: draft.estimated_hours,
            category: draft.category,
            status: TicketStatus::Todo,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// The generation service. Holds the transport behind `CompletionBackend`.
#[derive(Clone)]
pub struct TicketGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl TicketGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Decompose a free-text prompt into stamped tickets. The returned batch
    /// has not been stored yet; the API layer appends it on success.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<Ticket>, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let content = self
            .backend
            .complete(SYSTEM_PROMPT, &build_user_prompt(prompt), response_schema())
            .await?;

        let breakdown: TicketBreakdown = serde_json::from_str(&content)?;
        Ok(stamp_drafts(breakdown.tickets))
    }
}
