//! Text-generation client for RecDesk.
//!
//! Talks to a chat-completions endpoint to produce two artifacts the sync
//! layer cannot derive itself: the SQL script that initializes the remote
//! store (three tables, cascading foreign keys, row-level security
//! disabled, seed data) and the system documentation. The sync layer
//! depends on nothing here beyond "returns a string or fails".
//!
//! The high-level generators never fail: a transport or API error is
//! rendered into the returned text (an SQL comment, a markdown error
//! document), matching how the artifacts are shown to the user.

mod prompts;

pub use prompts::{documentation_prompt, init_script_prompt, strip_code_fences};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder returned when the model answers with an empty script.
pub const EMPTY_SCRIPT_PLACEHOLDER: &str = "-- empty response from the model";

/// Result type for scribe operations.
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Errors that can occur talking to the text-generation service.
#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Configuration for the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
    /// Base URL of the chat-completions endpoint, without the path.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: "gpt-4.1-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the text-generation service.
pub struct ScribeClient {
    config: ScribeConfig,
    client: Client,
}

impl ScribeClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: ScribeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Sends one prompt and returns the raw completion text. An absent
    /// `content` in the reply is treated as an empty string.
    pub async fn generate(&self, prompt: &str) -> ScribeResult<String> {
        debug!("Requesting completion ({} prompt chars)", prompt.len());

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScribeError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ScribeError::Api { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScribeError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    /// Generates the store-initialization SQL script. The response is
    /// stripped of code-fence markup; an empty answer becomes a placeholder
    /// comment and a failed call becomes an error comment, so the result is
    /// always presentable as raw SQL.
    pub async fn generate_init_script(&self) -> String {
        match self.generate(&init_script_prompt()).await {
            Ok(text) => {
                let script = strip_code_fences(&text);
                if script.is_empty() {
                    EMPTY_SCRIPT_PLACEHOLDER.to_string()
                } else {
                    script
                }
            }
            Err(e) => {
                warn!("Init-script generation failed: {e}");
                format!("-- failed to generate the script: {e}")
            }
        }
    }

    /// Generates the system documentation as markdown. A failed call
    /// becomes a markdown error document.
    pub async fn generate_documentation(&self) -> String {
        match self.generate(&documentation_prompt()).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Documentation generation failed: {e}");
                format!("# Error\n\nFailed to generate the documentation: {e}")
            }
        }
    }
}
