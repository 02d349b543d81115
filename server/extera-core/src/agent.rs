use std::sync::Arc;
use std::time::Duration;

use extera_types::AgentError;
use serde_json::Value;
use tokio::time::timeout;

use crate::llm::{create_provider, ProviderClient};
use crate::store::AgentStore;

/// Default bound on a single provider call in seconds. The provider call is
/// the only unbounded step in the pipeline, so it is the only one wrapped in
/// a timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

type ProviderFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn ProviderClient>, AgentError> + Send + Sync>;

/// Orchestrates one agent invocation end to end: load the definition, merge
/// the runtime request, assemble the prompt, resolve the provider, dispatch.
///
/// Holds no mutable state; concurrent requests run without coordination.
pub struct AgentService {
    store: AgentStore,
    provider_factory: ProviderFactory,
    provider_timeout: Duration,
}

impl AgentService {
    pub fn new(store: AgentStore) -> Self {
        Self {
            store,
            provider_factory: Arc::new(create_provider),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }

    /// Replace the provider factory. Used by tests to dispatch against a
    /// mock backend.
    pub fn with_provider_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn ProviderClient>, AgentError> + Send + Sync + 'static,
    {
        self.provider_factory = Arc::new(factory);
        self
    }

    pub fn with_provider_timeout(mut self, provider_timeout: Duration) -> Self {
        self.provider_timeout = provider_timeout;
        self
    }

    /// Run one request through the named agent and return the provider's
    /// completion text unchanged.
    ///
    /// Every failure from any stage is caught here once and re-raised as
    /// `AgentRunFailed` with the original message preserved.
    pub async fn run_agent(&self, agent_name: &str, request: Value) -> Result<String, AgentError> {
        self.execute(agent_name, request)
            .await
            .map_err(|e| AgentError::AgentRunFailed(e.to_string()))
    }

    async fn execute(&self, agent_name: &str, request: Value) -> Result<String, AgentError> {
        let definition = self
            .store
            .load(agent_name)
            .await
            .map_err(|e| AgentError::AgentLoadFailed(agent_name.to_string(), e.to_string()))?;

        let invocation = definition.into_invocation(request);
        let prompt = invocation.render_prompt();
        tracing::debug!(
            "Assembled prompt for agent '{}' ({} chars)",
            invocation.name,
            prompt.len()
        );

        let provider = (self.provider_factory)(&invocation.config.ai_model)?;

        let settings = &invocation.config.model_settings;
        match timeout(self.provider_timeout, provider.generate(&prompt, settings)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::ProviderTimeout(self.provider_timeout.as_secs())),
        }
    }
}
