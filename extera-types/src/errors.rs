use crate::ProviderKind;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Agent '{0}' not found")]
    AgentNotFound(String),
    #[error("Failed to load {0}: {1}")]
    ConfigLoad(String, String),
    #[error("Unsupported AI model: {0}")]
    UnsupportedProvider(String),
    #[error("{0} client not yet implemented")]
    ProviderNotImplemented(ProviderKind),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Provider call timed out after {0}s")]
    ProviderTimeout(u64),
    #[error("Failed to load agent '{0}': {1}")]
    AgentLoadFailed(String, String),
    #[error("Failed to run agent: {0}")]
    AgentRunFailed(String),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}
