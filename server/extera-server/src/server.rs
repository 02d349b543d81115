use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::sync::Arc;

use extera_core::TranscriptAnalyzeService;

use crate::routes;

/// HTTP front end for the agent invocation pipeline.
///
/// The analyze service is constructed once at startup and shared by
/// reference; it holds no mutable state, so requests need no coordination.
pub struct ExteraServer {
    service: Arc<TranscriptAnalyzeService>,
}

impl ExteraServer {
    pub fn new(service: Arc<TranscriptAnalyzeService>) -> Self {
        Self { service }
    }

    pub async fn start(&self, host: &str, port: u16) -> Result<()> {
        let service = self.service.clone();

        tracing::info!("Server is running on port {}", port);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .wrap(Cors::permissive())
                .app_data(web::Data::new(service.clone()))
                .configure(routes::configure)
        })
        .bind((host, port))?
        .run()
        .await?;
        Ok(())
    }
}
