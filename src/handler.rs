use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::dto::{ErrorResponse, SendEmailRequest};
use crate::service::{RelayError, SubmissionService};

#[debug_handler]
pub async fn send_email(
    State(service): State<Arc<SubmissionService>>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected malformed submission: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    match service.relay(payload).await {
        Ok(r) => (StatusCode::OK, Json(r)).into_response(),
        Err(RelayError::Validation(msg)) => {
            tracing::warn!("Rejected submission: {msg}");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to send email: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to send email").with_details(e.to_string())),
            )
                .into_response()
        }
    }
}

#[debug_handler]
pub async fn preflight() -> Response {
    StatusCode::OK.into_response()
}

#[debug_handler]
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from contact relay!").into_response()
}
