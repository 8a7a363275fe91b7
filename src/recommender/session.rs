//! Recommendation session - one chat transcript and its calls to the
//! external completion service.

use std::time::Duration;

use crate::domain::LibraryError;
use crate::recommender::models::{ChatTurn, CompletionRequest, CompletionResponse, Role};

/// Opening line shown in the chat panel before any user turn.
pub const GREETING: &str = "Hi! I'm your reading assistant. Tell me what genres \
and themes you enjoy and I'll recommend books to match.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 150;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Recommender {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    transcript: Vec<ChatTurn>,
}

impl Recommender {
    /// Fails with a `Configuration` error when no API key is present; the
    /// caller decides whether that disables the feature or aborts startup.
    pub fn new(
        api_key: Option<String>,
        base_url: String,
        model: String,
    ) -> Result<Self, LibraryError> {
        let api_key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            LibraryError::Configuration(
                "no API key found, set OPENAI_API_KEY in your .env file".to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LibraryError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
            transcript: Vec::new(),
        })
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// One conversational turn. The user message always joins the transcript;
    /// the assistant reply joins it only when the upstream call succeeds.
    /// Failures come back as a displayable string, never as an error, so the
    /// chat surface keeps working through network trouble.
    pub async fn recommend(&mut self, user_input: &str) -> String {
        self.transcript.push(ChatTurn {
            role: Role::User,
            content: user_input.to_string(),
        });

        match self.complete().await {
            Ok(reply) => {
                self.transcript.push(ChatTurn {
                    role: Role::Assistant,
                    content: reply.clone(),
                });
                reply
            }
            Err(e) => {
                tracing::warn!("Recommendation turn failed: {}", e);
                format!("An error occurred: {}", e)
            }
        }
    }

    // The service is stateless between calls, so the whole transcript is
    // resent every time.
    async fn complete(&self) -> Result<String, LibraryError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = CompletionRequest {
            model: &self.model,
            messages: &self.transcript,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LibraryError::Completion(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(LibraryError::Completion(format!(
                "upstream returned {}: {}",
                status, detail
            )));
        }

        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| LibraryError::Completion(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LibraryError::Completion("reply contained no choices".to_string()))
    }
}
