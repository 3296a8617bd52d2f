//! # API Server Module
//!
//! ## Purpose
//! The HTTP transport layer: `GET /health`, `POST /detect`, and a small
//! landing page. Holds no logic of its own beyond request/response shaping,
//! all recognition work is delegated to [`crate::recognizer::recognize`].

use crate::config::Config;
use crate::errors::{CitationError, Result};
use crate::recognizer::{recognize, CompiledRecognizer, ParsedRef};
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};

/// Shared, read-only application state handed to every request handler.
pub struct ApiServer {
    app_state: crate::AppState,
}

/// `POST /detect` request body.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// A single citation as serialized on the wire. Field names match the
/// external contract verbatim, which differ from `ParsedRef`'s internal
/// `point`/`subpoint` names: this is a DTO rename, not a data model change.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkDto {
    pub law_id: i64,
    pub article: Option<String>,
    pub point_article: Option<String>,
    pub subpoint_article: Option<String>,
}

impl From<ParsedRef> for LinkDto {
    fn from(r: ParsedRef) -> Self {
        Self {
            law_id: r.law_id,
            article: r.article,
            point_article: r.point,
            subpoint_article: r.subpoint,
        }
    }
}

/// `POST /detect` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectResponse {
    pub links: Vec<LinkDto>,
}

/// `GET /health` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl ApiServer {
    /// Create a new API server over the given application state.
    pub async fn new(app_state: crate::AppState) -> Result<Self> {
        Ok(Self { app_state })
    }

    /// Run the API server until shutdown.
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!(
            "{}:{}",
            self.app_state.config.server.host, self.app_state.config.server.port
        );

        tracing::info!("starting API server on {}", bind_addr);
        let enable_cors = self.app_state.config.server.enable_cors;

        HttpServer::new(move || {
            let app = App::new()
                .app_data(web::Data::new(self.app_state.clone()))
                .route("/detect", web::post().to(detect_handler))
                .route("/health", web::get().to(health_handler))
                .route("/", web::get().to(index_handler));

            if enable_cors {
                app.wrap(actix_cors::Cors::permissive())
            } else {
                app.wrap(actix_cors::Cors::default())
            }
        })
        .workers(num_cpus::get())
        .bind(&bind_addr)
        .map_err(|e| CitationError::Internal {
            message: format!("failed to bind server to {bind_addr}: {e}"),
        })?
        .run()
        .await
        .map_err(|e| CitationError::Internal {
            message: format!("server error: {e}"),
        })?;

        Ok(())
    }
}

/// `POST /detect` handler. The core never fails on input content; an
/// unexpected panic inside the recognizer is caught here and mapped to a
/// generic 500 body without leaking internal details.
async fn detect_handler(
    app_state: web::Data<crate::AppState>,
    request: web::Json<DetectRequest>,
) -> ActixResult<HttpResponse> {
    let text = request.text.clone();
    let recognizer = app_state.recognizer.clone();
    let outcome =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| recognize(&text, &recognizer)));

    match outcome {
        Ok(refs) => {
            let links: Vec<LinkDto> = refs.into_iter().map(LinkDto::from).collect();
            Ok(HttpResponse::Ok().json(DetectResponse { links }))
        }
        Err(_) => {
            tracing::error!("internal parsing error on /detect");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "detail": "Internal parsing error",
            })))
        }
    }
}

/// `GET /health` handler.
async fn health_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// `GET /` landing page.
async fn index_handler() -> ActixResult<HttpResponse> {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Russian Legal Citation Extractor</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .header { color: #2c3e50; }
            .endpoint { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
            .method { font-weight: bold; color: #27ae60; }
        </style>
    </head>
    <body>
        <h1 class="header">Russian Legal Citation Extractor</h1>
        <p>Extracts structured legal citations from free-form Russian-language text.</p>

        <h2>Available Endpoints</h2>

        <div class="endpoint">
            <span class="method">POST</span> /detect
            <p>Extract citations from a text body: <code>{"text": "..."}</code></p>
        </div>

        <div class="endpoint">
            <span class="method">GET</span> /health
            <p>Check service health.</p>
        </div>

        <h2>Example Request</h2>
        <pre>{"text": "ст. 145 УК РФ, п. 2, подп. б"}</pre>
    </body>
    </html>
    "#;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias_dict::AliasDict;
    use actix_web::{test, web, App};
    use std::sync::Arc;

    fn test_state() -> crate::AppState {
        let mut dict = AliasDict::new();
        dict.insert(17, vec!["УК РФ".to_string()]);
        let recognizer = CompiledRecognizer::build(&dict).unwrap();
        crate::AppState {
            config: Arc::new(Config::default()),
            recognizer: Arc::new(recognizer),
        }
    }

    #[actix_web::test]
    async fn health_endpoint_reports_healthy() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/health", web::get().to(health_handler)),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn detect_endpoint_extracts_citation() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/detect", web::post().to(detect_handler)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/detect")
            .set_json(&DetectRequest {
                text: "УК РФ, ст. 145, п. 2, подп. б".to_string(),
            })
            .to_request();
        let resp: DetectResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.links.len(), 1);
        assert_eq!(resp.links[0].law_id, 17);
        assert_eq!(resp.links[0].article.as_deref(), Some("145"));
        assert_eq!(resp.links[0].point_article.as_deref(), Some("2"));
        assert_eq!(resp.links[0].subpoint_article.as_deref(), Some("б"));
    }

    #[actix_web::test]
    async fn detect_endpoint_handles_empty_text() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/detect", web::post().to(detect_handler)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/detect")
            .set_json(&DetectRequest {
                text: String::new(),
            })
            .to_request();
        let resp: DetectResponse = test::call_and_read_body_json(&app, req).await;
        assert!(resp.links.is_empty());
    }
}
