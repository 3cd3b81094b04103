pub mod config;
pub mod dto;
pub mod handler;
pub mod mailer;
pub mod service;
pub mod templates;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use service::SubmissionService;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

pub fn router(service: Arc<SubmissionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            SEND_EMAIL_PATH,
            post(handler::send_email)
                .options(handler::preflight)
                .fallback(handler::method_not_allowed),
        )
        .route("/", get(handler::health_check))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
