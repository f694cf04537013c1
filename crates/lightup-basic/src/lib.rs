// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter for the hosted "basic" model that needs no API key.
//!
//! The proxy takes a flat prompt plus the mode and preferred language rather
//! than a message list. All text is passed through [`sanitize_content`]
//! before it leaves the process.

pub mod client;
pub mod sanitize;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lightup_config::{ProvidersConfig, Settings};
use lightup_core::{
    AdapterType, ChunkStream, HealthStatus, LightupError, Mode, PluginAdapter, ProviderAdapter,
    ProviderRequest, Role,
};
use tracing::{debug, info};

pub use client::{BasicClient, RetryPolicy};
pub use sanitize::sanitize_content;

use crate::types::GenerateRequest;

pub struct BasicProvider {
    client: BasicClient,
    mode: Mode,
    preferred_language: String,
}

impl BasicProvider {
    pub fn from_settings(
        settings: &Settings,
        providers: &ProvidersConfig,
        mode: Mode,
    ) -> Result<Self, LightupError> {
        let retry = RetryPolicy {
            max_attempts: providers.basic_max_attempts,
            base_delay: Duration::from_millis(providers.basic_retry_base_ms),
        };
        let client = BasicClient::new(
            &providers.basic_url,
            Duration::from_secs(providers.request_timeout_secs),
            retry,
        )?;
        info!(url = %client.url(), %mode, "basic provider initialized");
        Ok(Self::new(
            client,
            mode,
            &settings.customization.ai_response_language,
        ))
    }

    pub fn new(client: BasicClient, mode: Mode, preferred_language: &str) -> Self {
        Self {
            client,
            mode,
            preferred_language: preferred_language.to_string(),
        }
    }

    fn to_generate_request(&self, request: &ProviderRequest) -> GenerateRequest {
        GenerateRequest {
            prompt: sanitize_content(&flatten_prompt(request)),
            mode: self.mode.to_string(),
            system_prompt: sanitize_content(request.system_prompt.as_deref().unwrap_or_default()),
            stream: true,
            preferred_language: self.preferred_language.clone(),
        }
    }
}

/// A single turn is sent as-is; a conversation becomes a labelled transcript.
fn flatten_prompt(request: &ProviderRequest) -> String {
    match request.messages.as_slice() {
        [only] => only.content.clone(),
        messages => messages
            .iter()
            .map(|m| {
                let speaker = match m.role {
                    Role::User => "User",
                    Role::Assistant => "Assistant",
                    Role::System => "System",
                };
                format!("{speaker}: {}", m.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

#[async_trait]
impl PluginAdapter for BasicProvider {
    fn name(&self) -> &str {
        "basic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, LightupError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LightupError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for BasicProvider {
    fn model(&self) -> &str {
        "basic"
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ChunkStream, LightupError> {
        let body = self.to_generate_request(&request);
        debug!(mode = %body.mode, prompt_chars = body.prompt.chars().count(), "sending basic request");
        self.client.stream_generate(&body).await
    }
}
