//! HTTP surface.
//!
//! Exposes [`generate`](crate::handler::generate) over axum. Every generate request answers
//! `200 OK` with a JSON [`GenerateResponse`], including malformed bodies.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap},
    routing::{get, post},
    Form, Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::handler::{generate, GenerateResponse, HandlerConfig};
use crate::vcard::ContactForm;

/// Create the router
pub fn router(config: HandlerConfig) -> Router {
    Router::new()
        .route("/generate", post(generate_qr))
        .route("/api/generate", post(generate_qr))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Generate endpoint
async fn generate_qr(
    State(config): State<Arc<HandlerConfig>>,
    ContactBody(form): ContactBody,
) -> Json<GenerateResponse> {
    Json(generate(&form, &config))
}

/// A contact form read from either a JSON or a form-encoded body.
///
/// Bodies of any other media type carry no fields and read as an empty form. Rejections are
/// answered with a `success: false` body instead of a 4xx status.
pub struct ContactBody(pub ContactForm);

/// How a request body is read, by its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Empty,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
        else {
            return Self::Empty;
        };
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if media_type == "application/json"
            || (media_type.starts_with("application/") && media_type.ends_with("+json"))
        {
            Self::Json
        } else if media_type == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Empty
        }
    }
}

impl<S> FromRequest<S> for ContactBody
where
    S: Send + Sync,
{
    type Rejection = Json<GenerateResponse>;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let form = match BodyKind::of(req.headers()) {
            BodyKind::Json => Json::<ContactForm>::from_request(req, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| reject(rejection.body_text()))?,
            BodyKind::Form => Form::<ContactForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| reject(rejection.body_text()))?,
            BodyKind::Empty => {
                debug!("no JSON or form body, reading an empty contact form");
                ContactForm::default()
            }
        };
        Ok(Self(form))
    }
}

fn reject(detail: String) -> Json<GenerateResponse> {
    warn!(%detail, "unreadable request body");
    Json(GenerateResponse::generation_failure(detail))
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = router(config.handler());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(style = ?config.style, "vCard QR server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
