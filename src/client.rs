//! # Model Client
//!
//! One synchronous request/response exchange per model call. The endpoint is
//! stateless: every request carries the full conversation, the system prompt
//! and the generated tool catalog.
//!
//! The [`CompletionBackend`] trait is the seam for tests — the agent loop is
//! exercised against a scripted fake instead of the network.

use crate::backend::Auth;
use crate::config::Config;
use crate::protocol::{ContentBlock, ToolDeclaration, Turn};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends the running conversation and returns the assistant's content
    /// blocks in emission order.
    async fn complete(
        &self,
        turns: &[Turn],
        system_prompt: &str,
        tools: &[ToolDeclaration],
    ) -> Result<Vec<ContentBlock>>;
}

pub struct AnthropicClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    auth: Auth,
    model: String,
    max_tokens: u32,
}

pub fn initialize_client(config: &Config) -> Result<AnthropicClient> {
    let settings = config.backend.settings();
    let api_key = match std::env::var(settings.api_key_env_var) {
        Ok(val) => val,
        Err(_) => bail!("environment variable {} not set", settings.api_key_env_var),
    };
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()?;
    Ok(AnthropicClient {
        http,
        url: format!("{}/v1/messages", settings.base_url),
        api_key,
        auth: settings.auth,
        model: config.model.clone(),
        max_tokens: config.max_tokens,
    })
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    async fn complete(
        &self,
        turns: &[Turn],
        system_prompt: &str,
        tools: &[ToolDeclaration],
    ) -> Result<Vec<ContentBlock>> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system_prompt,
            "messages": turns,
            "tools": tools,
        });

        let mut request = self
            .http
            .post(&self.url)
            .header("content-type", "application/json")
            .header("anthropic-version", ANTHROPIC_VERSION);
        request = match self.auth {
            Auth::Bearer => request.bearer_auth(&self.api_key),
            Auth::XApiKey => request.header("x-api-key", &self.api_key),
        };

        let response = request
            .json(&body)
            .send()
            .await
            .context("request to model endpoint failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("model endpoint returned {status}: {detail}");
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("failed to parse model response")?;
        Ok(parsed.content)
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}
