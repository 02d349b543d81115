use extera_types::{format_transcript, AgentError, TranscriptMessage};
use serde_json::{Map, Value};

use crate::agent::AgentService;

/// Turns a transcript plus any caller-supplied extras into a runtime request
/// and hands it to the agent service.
pub struct TranscriptAnalyzeService {
    agent_service: AgentService,
}

impl TranscriptAnalyzeService {
    pub fn new(agent_service: AgentService) -> Self {
        Self { agent_service }
    }

    pub async fn analyze(
        &self,
        agent_name: &str,
        transcript: &[TranscriptMessage],
        extra_fields: Map<String, Value>,
    ) -> Result<String, AgentError> {
        let text = format_transcript(transcript);

        let mut request = Map::new();
        request.insert("text".to_string(), Value::String(text));
        // Extras ride along verbatim; a caller-supplied `text` wins.
        request.extend(extra_fields);

        self.agent_service
            .run_agent(agent_name, Value::Object(request))
            .await
    }
}
