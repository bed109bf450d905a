//! Application context - dependency injection container

use std::sync::Arc;

use picnic_core::{AuthCache, OperationDispatcher};
use picnic_domain::{NodeConfig, Result};
use picnic_infra::{config, EnvCacheTtl, PicnicHttpClientFactory, StaticCredentialsProvider};
use tracing::info;

/// Application context - holds the configuration and the dispatcher
///
/// The session cache lives inside the dispatcher and stays alive for as long
/// as the context does, so one context should be created per process.
pub struct AppContext {
    pub config: NodeConfig,
    pub dispatcher: Arc<OperationDispatcher>,
}

impl AppContext {
    /// Load configuration from the environment (or a config file) and wire
    /// the services.
    pub fn new() -> Result<Self> {
        Self::from_config(config::load()?)
    }

    pub fn from_config(config: NodeConfig) -> Result<Self> {
        let mut factory = PicnicHttpClientFactory::new()?;
        if let Some(base_url) = &config.base_url {
            factory = factory.with_base_url(base_url.clone());
        }

        let auth_cache = Arc::new(AuthCache::new(Arc::new(EnvCacheTtl)));
        let dispatcher = OperationDispatcher::new(
            factory.into_shared(),
            Arc::new(StaticCredentialsProvider::new(config.credentials.clone())),
            auth_cache,
        );

        info!(
            country_code = %config.credentials.country_code,
            api_version = config.credentials.api_version(),
            continue_on_fail = config.continue_on_fail,
            "app_context_initialized"
        );

        Ok(Self { config, dispatcher: Arc::new(dispatcher) })
    }
}
