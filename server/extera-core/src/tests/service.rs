use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use extera_types::AgentError;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use super::mock_provider::MockProvider;
use crate::agent::AgentService;
use crate::analyze::TranscriptAnalyzeService;
use crate::llm::ProviderClient;
use crate::store::AgentStore;
use crate::types::TranscriptMessage;

fn write_bundle(root: &Path, name: &str, config: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), config).unwrap();
    std::fs::write(
        dir.join("instruction.json"),
        r#"{"instruction": "Summarize."}"#,
    )
    .unwrap();
    std::fs::write(dir.join("input-schema.json"), "{}").unwrap();
    std::fs::write(dir.join("output-schema.json"), "{}").unwrap();
    std::fs::write(dir.join("examples.json"), "[]").unwrap();
}

fn service_with_provider(root: &Path, provider: Arc<MockProvider>) -> AgentService {
    AgentService::new(AgentStore::new(root)).with_provider_factory(move |_| {
        Ok(provider.clone() as Arc<dyn ProviderClient>)
    })
}

#[tokio::test]
async fn completion_text_is_returned_unchanged() {
    let temp = TempDir::new().unwrap();
    write_bundle(
        temp.path(),
        "summarizer",
        r#"{"ai_model": "OPENAI", "temperature": 0.2}"#,
    );

    let provider = MockProvider::fixed("A short summary.");
    let service = service_with_provider(temp.path(), provider.clone());

    let result = service
        .run_agent("summarizer", json!({"text": "user: Hello"}))
        .await
        .unwrap();

    assert_eq!(result, "A short summary.");
    assert_eq!(provider.call_count(), 1);

    let prompt = provider.prompt().unwrap();
    assert!(prompt.starts_with("Summarize."));
    assert!(prompt.contains("Input Schema: {}"));
    assert!(prompt.contains("user: Hello"));

    // Config overrides only the named field; everything else stays default.
    let settings = provider.settings().unwrap();
    assert_eq!(settings.temperature, 0.2);
    assert_eq!(settings.model, "gpt-4o-mini");
    assert_eq!(settings.max_tokens, 1000);
}

#[tokio::test]
async fn analyze_formats_the_transcript_and_merges_extras() {
    let temp = TempDir::new().unwrap();
    write_bundle(temp.path(), "summarizer", r#"{"ai_model": "OPENAI"}"#);

    let provider = MockProvider::fixed("ok");
    let service =
        TranscriptAnalyzeService::new(service_with_provider(temp.path(), provider.clone()));

    let transcript = vec![
        TranscriptMessage {
            role: "user".to_string(),
            content: "Hello".to_string(),
        },
        TranscriptMessage {
            role: "assistant".to_string(),
            content: "Hi".to_string(),
        },
    ];
    let mut extras = Map::new();
    extras.insert("language".to_string(), Value::String("en".to_string()));

    let result = service
        .analyze("summarizer", &transcript, extras)
        .await
        .unwrap();
    assert_eq!(result, "ok");

    let prompt = provider.prompt().unwrap();
    assert!(prompt.contains(r#""text": "user: Hello\nassistant: Hi""#));
    assert!(prompt.contains(r#""language": "en""#));
}

#[tokio::test]
async fn unimplemented_provider_surfaces_through_run_agent() {
    let temp = TempDir::new().unwrap();
    write_bundle(temp.path(), "summarizer", r#"{"ai_model": "ANTHROPIC"}"#);

    let service = AgentService::new(AgentStore::new(temp.path()));
    let err = service
        .run_agent("summarizer", json!({"text": ""}))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::AgentRunFailed(_)));
    assert!(err.to_string().contains("Anthropic client not yet implemented"));
}

#[tokio::test]
async fn unknown_agent_wraps_into_load_then_run_failure() {
    let temp = TempDir::new().unwrap();
    let service = AgentService::new(AgentStore::new(temp.path()));

    let err = service
        .run_agent("ghost", json!({"text": ""}))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Failed to run agent:"));
    assert!(message.contains("Failed to load agent 'ghost'"));
    assert!(message.contains("Agent 'ghost' not found"));
}

#[tokio::test]
async fn incomplete_bundle_names_the_missing_document() {
    let temp = TempDir::new().unwrap();
    write_bundle(temp.path(), "summarizer", r#"{"ai_model": "OPENAI"}"#);
    std::fs::remove_file(temp.path().join("summarizer/examples.json")).unwrap();

    let provider = MockProvider::fixed("never used");
    let service = service_with_provider(temp.path(), provider.clone());

    let err = service
        .run_agent("summarizer", json!({"text": ""}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("examples.json"));
    // Loading is all-or-nothing; the provider is never contacted.
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn provider_failure_preserves_the_original_message() {
    let temp = TempDir::new().unwrap();
    write_bundle(temp.path(), "summarizer", r#"{"ai_model": "OPENAI"}"#);

    let provider = MockProvider::failing("OpenAI API error: 429 rate limited");
    let service = service_with_provider(temp.path(), provider);

    let err = service
        .run_agent("summarizer", json!({"text": ""}))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::AgentRunFailed(_)));
    assert!(err.to_string().contains("429 rate limited"));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_surfaces_a_timeout() {
    let temp = TempDir::new().unwrap();
    write_bundle(temp.path(), "summarizer", r#"{"ai_model": "OPENAI"}"#);

    let provider = MockProvider::delayed(Duration::from_secs(300), "too late");
    let service = service_with_provider(temp.path(), provider)
        .with_provider_timeout(Duration::from_secs(5));

    let err = service
        .run_agent("summarizer", json!({"text": ""}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out after 5s"));
}
