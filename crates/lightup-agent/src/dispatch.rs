// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chooses the provider for a request from `settings.modelType`.

use std::sync::Arc;

use lightup_basic::BasicProvider;
use lightup_config::{ProvidersConfig, Settings};
use lightup_core::{LightupError, Mode, ModelType, ProviderAdapter};
use lightup_gemini::GeminiProvider;
use lightup_openai::{Flavor, OpenAiCompatProvider};
use tracing::debug;

/// Builds the provider that serves one request.
///
/// Providers are created per request because the settings (keys, model,
/// backend) can change between requests.
pub trait ProviderFactory: Send + Sync {
    fn create(
        &self,
        settings: &Settings,
        mode: Mode,
    ) -> Result<Arc<dyn ProviderAdapter>, LightupError>;
}

/// The real backends, configured from `[providers]`.
#[derive(Debug, Clone, Default)]
pub struct DefaultProviderFactory {
    providers: ProvidersConfig,
}

impl DefaultProviderFactory {
    pub fn new(providers: ProvidersConfig) -> Self {
        Self { providers }
    }
}

impl ProviderFactory for DefaultProviderFactory {
    fn create(
        &self,
        settings: &Settings,
        mode: Mode,
    ) -> Result<Arc<dyn ProviderAdapter>, LightupError> {
        debug!(model_type = %settings.model_type, model = settings.active_model(), "selecting provider");
        let provider: Arc<dyn ProviderAdapter> = match settings.model_type {
            ModelType::OpenAi => Arc::new(OpenAiCompatProvider::from_settings(
                Flavor::OpenAi,
                settings,
                &self.providers,
            )?),
            ModelType::Xai => Arc::new(OpenAiCompatProvider::from_settings(
                Flavor::Xai,
                settings,
                &self.providers,
            )?),
            ModelType::Local => Arc::new(OpenAiCompatProvider::from_settings(
                Flavor::Local,
                settings,
                &self.providers,
            )?),
            ModelType::Gemini => Arc::new(GeminiProvider::from_settings(settings, &self.providers)?),
            ModelType::Basic => Arc::new(BasicProvider::from_settings(
                settings,
                &self.providers,
                mode,
            )?),
        };
        Ok(provider)
    }
}

/// Always hands out the same provider, whatever the settings say.
impl ProviderFactory for Arc<dyn ProviderAdapter> {
    fn create(
        &self,
        _settings: &Settings,
        _mode: Mode,
    ) -> Result<Arc<dyn ProviderAdapter>, LightupError> {
        Ok(Arc::clone(self))
    }
}
