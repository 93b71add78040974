//! Web surface: the form page, the generation endpoint, and health.

use crate::app::App;
use crate::models::{CaptionRequest, PromptStyle};
use crate::Error;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

const INDEX_HTML: &str = include_str!("../templates/index.html");

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    store: &'static str,
}

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/captions",
            post(generate_captions).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthBody> {
    match app.ping_store().await {
        Ok(()) => Json(HealthBody {
            status: "ok",
            store: "ok",
        }),
        Err(e) => {
            warn!("Health check: document store unreachable: {}", e);
            Json(HealthBody {
                status: "degraded",
                store: "unreachable",
            })
        }
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::MissingInput(_) => StatusCode::BAD_REQUEST,
        Error::AiProvider(_) | Error::Media(_) | Error::Store(_) | Error::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Caption generation failed: {}", err);
    json_error(status, &err.to_string())
}

fn has_allowed_extension(file_name: &str) -> bool {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    matches!(ext.as_deref(), Some("jpg" | "jpeg" | "png"))
}

async fn generate_captions(State(app): State<Arc<App>>, mut multipart: Multipart) -> Response {
    let mut requirement = String::new();
    let mut style = app.default_style();
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                // `text()`/`bytes()` consume the field, so take the name first.
                let name = field.name().map(|name| name.to_string());
                match name.as_deref() {
                    Some("requirement") => match field.text().await {
                        Ok(text) => requirement = text,
                        Err(err) => {
                            return json_error(
                                StatusCode::BAD_REQUEST,
                                &format!("Failed to read requirement field: {}", err),
                            )
                        }
                    },
                    Some("style") => match field.text().await {
                        Ok(text) => match PromptStyle::parse(&text) {
                            Some(parsed) => style = parsed,
                            None => {
                                return json_error(
                                    StatusCode::BAD_REQUEST,
                                    &format!("Unknown caption style: {}", text),
                                )
                            }
                        },
                        Err(err) => {
                            return json_error(
                                StatusCode::BAD_REQUEST,
                                &format!("Failed to read style field: {}", err),
                            )
                        }
                    },
                    Some("image") => {
                        file_name = field.file_name().map(|name| name.to_string());
                        match field.bytes().await {
                            Ok(data) => image_bytes = Some(data.to_vec()),
                            Err(err) => {
                                return json_error(
                                    StatusCode::BAD_REQUEST,
                                    &format!("Failed to read image upload: {}", err),
                                )
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(err) => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Malformed multipart body: {}", err),
                )
            }
        }
    }

    let Some(image_bytes) = image_bytes else {
        warn!("Generation triggered without an image upload");
        return json_error(StatusCode::BAD_REQUEST, "Please upload your image");
    };

    // Extension filtering only; the bytes themselves are not validated.
    if let Some(name) = &file_name {
        if !name.is_empty() && !has_allowed_extension(name) {
            return json_error(
                StatusCode::BAD_REQUEST,
                "Only JPEG or PNG uploads are allowed",
            );
        }
    }

    let request = CaptionRequest {
        requirement,
        image_bytes,
        style,
    };

    match app.generate(request).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => error_response(err),
    }
}
