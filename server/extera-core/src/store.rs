use std::path::{Path, PathBuf};

use extera_types::{AgentConfig, AgentDefinition, AgentError};
use serde_json::Value;
use tokio::fs;

pub const CONFIG_FILE: &str = "config.json";
pub const INSTRUCTION_FILE: &str = "instruction.json";
pub const INPUT_SCHEMA_FILE: &str = "input-schema.json";
pub const OUTPUT_SCHEMA_FILE: &str = "output-schema.json";
pub const EXAMPLES_FILE: &str = "examples.json";

/// On-disk agent bundles, one directory per agent holding the five fixed
/// documents.
///
/// Loading is all-or-nothing and re-reads disk on every call, so edits to a
/// bundle take effect on the next request without a restart.
#[derive(Debug, Clone)]
pub struct AgentStore {
    root: PathBuf,
}

impl AgentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the store root from `EXTERA_AGENTS_DIR`, falling back to
    /// `agent-content` under the working directory.
    pub fn from_env() -> Self {
        let root =
            std::env::var("EXTERA_AGENTS_DIR").unwrap_or_else(|_| "agent-content".to_string());
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the named agent's full definition.
    ///
    /// Fails with `AgentNotFound` before any document is read when the
    /// directory does not exist, and with `ConfigLoad` naming the offending
    /// file when any document is missing, empty, or invalid JSON.
    pub async fn load(&self, agent_name: &str) -> Result<AgentDefinition, AgentError> {
        // Bundle names map directly onto directory names; anything that
        // could escape the store root is treated as unknown.
        if agent_name.is_empty()
            || agent_name.contains(['/', '\\'])
            || agent_name.contains("..")
        {
            return Err(AgentError::AgentNotFound(agent_name.to_string()));
        }

        let agent_path = self.root.join(agent_name);
        if !agent_path.is_dir() {
            return Err(AgentError::AgentNotFound(agent_name.to_string()));
        }

        tracing::debug!(
            "Loading agent bundle '{}' from {}",
            agent_name,
            agent_path.display()
        );

        let config_doc = load_document(&agent_path, CONFIG_FILE).await?;
        let config: AgentConfig = serde_json::from_value(config_doc)
            .map_err(|e| AgentError::ConfigLoad(CONFIG_FILE.to_string(), e.to_string()))?;

        let instruction_doc = load_document(&agent_path, INSTRUCTION_FILE).await?;
        let instruction = instruction_doc
            .get("instruction")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AgentError::ConfigLoad(
                    INSTRUCTION_FILE.to_string(),
                    "missing `instruction` field".to_string(),
                )
            })?
            .to_string();

        let input_schema = load_document(&agent_path, INPUT_SCHEMA_FILE).await?;
        let output_schema = load_document(&agent_path, OUTPUT_SCHEMA_FILE).await?;
        let examples = load_document(&agent_path, EXAMPLES_FILE).await?;

        Ok(AgentDefinition {
            name: agent_name.to_string(),
            config,
            instruction,
            input_schema,
            output_schema,
            examples,
        })
    }
}

async fn load_document(agent_path: &Path, file: &str) -> Result<Value, AgentError> {
    let path = agent_path.join(file);
    if !path.is_file() {
        return Err(AgentError::ConfigLoad(
            file.to_string(),
            "file not found".to_string(),
        ));
    }

    let contents = fs::read_to_string(&path)
        .await
        .map_err(|e| AgentError::ConfigLoad(file.to_string(), e.to_string()))?;

    if contents.trim().is_empty() {
        return Err(AgentError::ConfigLoad(
            file.to_string(),
            "file is empty".to_string(),
        ));
    }

    serde_json::from_str(&contents)
        .map_err(|e| AgentError::ConfigLoad(file.to_string(), e.to_string()))
}
