use crate::AgentError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Providers an agent's `config.json` can select via `ai_model`.
///
/// This is a closed set: adding a provider means adding both a variant here
/// and a client implementation in the factory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
}

impl FromStr for ProviderKind {
    type Err = AgentError;

    /// Identifiers are matched case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_uppercase().as_str() {
            "OPENAI" => Ok(ProviderKind::OpenAi),
            "ANTHROPIC" => Ok(ProviderKind::Anthropic),
            "GOOGLE" => Ok(ProviderKind::Google),
            _ => Err(AgentError::UnsupportedProvider(value.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Google => "Google",
        };
        write!(f, "{}", name)
    }
}

/// Generation parameters dispatched with every completion request.
/// Defaults apply per-field when a key is absent from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ModelSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,
    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            frequency_penalty: default_frequency_penalty(),
            presence_penalty: default_presence_penalty(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_top_p() -> f32 {
    1.0
}

fn default_frequency_penalty() -> f32 {
    0.0
}

fn default_presence_penalty() -> f32 {
    0.0
}

fn default_ai_model() -> String {
    "OPENAI".to_string()
}

/// Contents of an agent's `config.json`: the provider identifier plus the
/// generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AgentConfig {
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
    #[serde(flatten)]
    pub model_settings: ModelSettings,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ai_model: default_ai_model(),
            model_settings: ModelSettings::default(),
        }
    }
}

/// A fully loaded agent bundle. Immutable once loaded; the store re-reads
/// the documents on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub config: AgentConfig,
    pub instruction: String,
    pub input_schema: Value,
    pub output_schema: Value,
    pub examples: Value,
}

impl AgentDefinition {
    /// Merge the caller's runtime request into the definition. The request
    /// replaces the input wholesale; nothing from the bundle survives under
    /// `input`.
    pub fn into_invocation(self, input: Value) -> AgentInvocation {
        AgentInvocation {
            name: self.name,
            config: self.config,
            instruction: self.instruction,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
            examples: self.examples,
            input,
        }
    }
}

/// One merged agent run, ready for prompt assembly. Lives for a single
/// request.
#[derive(Debug, Clone, Serialize)]
pub struct AgentInvocation {
    pub name: String,
    pub config: AgentConfig,
    pub instruction: String,
    pub input_schema: Value,
    pub output_schema: Value,
    pub examples: Value,
    pub input: Value,
}

impl AgentInvocation {
    /// Assemble the prompt text sent verbatim to the provider.
    ///
    /// Section order is fixed and the serializations are deterministic
    /// (serde_json object keys iterate in sorted order), so the same
    /// documents always produce byte-identical prompts.
    pub fn render_prompt(&self) -> String {
        format!(
            "{}\n\nInput Schema: {}\n\nOutput Schema: {}\n\nExamples: {}\n\nInput: {}",
            self.instruction,
            pretty(&self.input_schema),
            pretty(&self.output_schema),
            pretty(&self.examples),
            pretty(&self.input),
        )
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
