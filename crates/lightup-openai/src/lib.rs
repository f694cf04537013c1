// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for LightUp.
//!
//! One implementation of [`ProviderAdapter`] serves three backends that
//! speak the same `/chat/completions` SSE protocol: OpenAI, xAI and a
//! user-hosted local server. They differ only in base URL, credentials
//! and default model, captured by [`Flavor`].

pub mod client;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lightup_config::{ProvidersConfig, Settings};
use lightup_core::{
    AdapterType, ChunkStream, HealthStatus, LightupError, PluginAdapter, ProviderAdapter,
    ProviderRequest, Role,
};
use strum::Display;
use tracing::{debug, info};

use crate::client::ChatClient;
use crate::types::{ChatMessage, ChatRequest};

/// Which OpenAI-compatible backend a provider talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Flavor {
    OpenAi,
    Xai,
    Local,
}

impl Flavor {
    /// Prefix used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Flavor::OpenAi => "OpenAI",
            Flavor::Xai => "xAI",
            Flavor::Local => "Local server",
        }
    }

    /// Environment variable consulted when settings carry no key.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Flavor::OpenAi => Some("OPENAI_API_KEY"),
            Flavor::Xai => Some("XAI_API_KEY"),
            Flavor::Local => None,
        }
    }
}

/// Provider for OpenAI, xAI or a local server.
pub struct OpenAiCompatProvider {
    flavor: Flavor,
    client: ChatClient,
    model: String,
}

impl OpenAiCompatProvider {
    /// Builds the provider for `flavor` from user settings and endpoint config.
    ///
    /// # API Key Resolution
    /// 1. the key stored in settings (`apiKey` or `xaiApiKey`)
    /// 2. `OPENAI_API_KEY` / `XAI_API_KEY`
    /// 3. error; the local server needs no key
    pub fn from_settings(
        flavor: Flavor,
        settings: &Settings,
        providers: &ProvidersConfig,
    ) -> Result<Self, LightupError> {
        let timeout = Duration::from_secs(providers.request_timeout_secs);
        let (base_url, api_key, model) = match flavor {
            Flavor::OpenAi => (
                providers.openai_base_url.clone(),
                Some(resolve_api_key(flavor, settings.api_key.as_deref())?),
                settings.openai_model.clone(),
            ),
            Flavor::Xai => (
                providers.xai_base_url.clone(),
                Some(resolve_api_key(flavor, settings.xai_api_key.as_deref())?),
                settings.xai_model.clone(),
            ),
            Flavor::Local => (
                format!("{}/v1", settings.server_url.trim_end_matches('/')),
                None,
                settings.local_model.clone(),
            ),
        };

        let client = ChatClient::new(&base_url, api_key.as_deref(), timeout, flavor.label())?;
        info!(flavor = %flavor, model = %model, url = %client.completions_url(), "provider initialized");
        Ok(Self::new(flavor, client, model))
    }

    /// Creates a provider around an existing client.
    pub fn new(flavor: Flavor, client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            flavor,
            client,
            model: model.into(),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Converts a [`ProviderRequest`] to the wire request, system prompt first.
    fn to_chat_request(&self, request: &ProviderRequest) -> ChatRequest {
        let system = request.system_prompt.iter().map(|prompt| ChatMessage {
            role: Role::System.to_string(),
            content: prompt.clone(),
        });
        let turns = request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        });

        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: system.chain(turns).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: true,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiCompatProvider {
    fn name(&self) -> &str {
        match self.flavor {
            Flavor::OpenAi => "openai",
            Flavor::Xai => "xai",
            Flavor::Local => "local",
        }
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, LightupError> {
        // No request is made; that would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LightupError> {
        debug!(flavor = %self.flavor, "provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ChunkStream, LightupError> {
        let chat_request = self.to_chat_request(&request);
        debug!(
            flavor = %self.flavor,
            messages = chat_request.messages.len(),
            "sending chat request"
        );
        self.client.stream_chat(&chat_request).await
    }
}

/// Resolves the API key from settings or the flavor's environment variable.
fn resolve_api_key(flavor: Flavor, configured: Option<&str>) -> Result<String, LightupError> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Ok(key.trim().to_string());
    }

    let missing = || {
        LightupError::Config(format!(
            "{} API key not found. Add it in settings or set {}.",
            flavor.label(),
            flavor.api_key_env().unwrap_or("an API key")
        ))
    };
    let var = flavor.api_key_env().ok_or_else(missing)?;
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(missing()),
    }
}
