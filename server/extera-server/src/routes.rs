use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use extera_core::TranscriptAnalyzeService;
use extera_types::TranscriptMessage;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(welcome)))
        .service(
            web::scope("/api/transcript-analyze")
                .service(web::resource("/analyze").route(web::post().to(analyze))),
        );
}

/// Request body for the analyze endpoint. Unknown fields are collected and
/// forwarded verbatim as part of the runtime request.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub agent_name: Option<String>,
    pub transcript: Option<Vec<TranscriptMessage>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError {
        success: false,
        error: message.into(),
    })
}

async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome to Extera Service" }))
}

/// All pipeline failures flatten to a 400 carrying the error message; the
/// HTTP layer does not distinguish error kinds.
async fn analyze(
    service: web::Data<Arc<TranscriptAnalyzeService>>,
    body: web::Json<AnalyzeRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    let Some(agent_name) = request.agent_name else {
        return bad_request("agent_name is required");
    };
    let Some(transcript) = request.transcript else {
        return bad_request("transcript is required");
    };

    match service
        .analyze(&agent_name, &transcript, request.extra)
        .await
    {
        Ok(data) => HttpResponse::Ok().json(json!({ "success": true, "data": data })),
        Err(e) => {
            tracing::warn!("Agent invocation failed: {}", e);
            bad_request(e.to_string())
        }
    }
}
