use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use standard_response::prelude::*;

use crate::models::{Profile, User};
use crate::AppState;

/// Key conversion demo: a bare record with per-instance aliases
pub async fn key_convert() -> Json<Value> {
    let user = User {
        id: 1,
        name: "Hong Gildong".to_string(),
        email: "gildong@example.com".to_string(),
        profile: Profile { age: 30 },
    };

    Json(user.to_json_with(&AliasContext::new()))
}

/// Single item; a rejected input is answered with a FAIL envelope
pub async fn item(
    State(state): State<AppState>,
    Path((value_1, value_2)): Path<(String, i64)>,
) -> Json<Value> {
    let response = StandardResponse::build_with(&state.config.response, || {
        let produced = match state.service.get_item(&value_1, value_2) {
            Ok(payload) => Produced::ok(&payload),
            Err(rejected) => Produced::fail(&rejected),
        };
        Ok::<_, Error>(produced)
    });

    Json(response.to_json_with(&state.aliases))
}
