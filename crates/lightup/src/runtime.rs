// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared wiring for every subcommand: storage, rate limiter and processor.

use std::sync::Arc;
use std::time::Duration;

use lightup_agent::{DefaultProviderFactory, EnhancedProcessor, ProviderFactory};
use lightup_config::LightupConfig;
use lightup_core::{LightupError, StorageAdapter};
use lightup_ratelimit::RateLimiter;
use lightup_storage::SqliteStore;
use lightup_storage::accessors::is_enabled;
use tracing::info;

pub struct Runtime {
    pub config: LightupConfig,
    pub store: SqliteStore,
    pub limiter: RateLimiter,
    pub processor: EnhancedProcessor,
}

impl Runtime {
    /// Opens the database and builds a processor over the real providers.
    pub async fn open(config: LightupConfig) -> Result<Self, LightupError> {
        let store = SqliteStore::open(&config.storage).await?;
        let factory = Arc::new(DefaultProviderFactory::new(config.providers.clone()));
        let runtime = Self::with_parts(config, store, factory);
        info!(
            database = %runtime.config.storage.database_path,
            daily_limit = runtime.limiter.daily_limit(),
            "lightup ready"
        );
        Ok(runtime)
    }

    /// Assembles a runtime from an open store and any provider factory.
    pub fn with_parts(
        config: LightupConfig,
        store: SqliteStore,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        // The limiter shares the store's connection so all writes stay on one thread.
        let limiter = RateLimiter::new(store.database().clone(), &config.rate_limit);
        let processor = EnhancedProcessor::new(
            Arc::new(store.clone()),
            providers,
            config.memory.clone(),
        )
        .with_rate_limiter(limiter.clone());

        Self {
            config,
            store,
            limiter,
            processor,
        }
    }

    pub fn storage(&self) -> &dyn StorageAdapter {
        &self.store
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.follow_up.debounce_ms)
    }

    /// Fails when the user has switched LightUp off.
    pub async fn ensure_enabled(&self) -> Result<(), LightupError> {
        if is_enabled(self.storage()).await? {
            Ok(())
        } else {
            Err(LightupError::Config(
                "LightUp is disabled. Run `lightup settings enable` to turn it back on.".to_string(),
            ))
        }
    }
}
