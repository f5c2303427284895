use axum::extract::State;
use standard_response::prelude::{Error, Produced, StandardResponse};

use crate::AppState;

/// Health check endpoint
///
/// Answers with a standard envelope whose payload is "ok". The envelope is
/// rendered as declared, without alias conversion.
pub async fn health(State(state): State<AppState>) -> StandardResponse {
    StandardResponse::build_with(&state.config.response, || Ok::<_, Error>(Produced::ok("ok")))
}
