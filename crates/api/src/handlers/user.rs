//! Handler reporting the server's OS user.

use axum::extract::State;
use axum::Json;

use crate::response::UserResponse;
use crate::state::AppState;

/// GET /user -- the user the server process runs as.
pub async fn current_user(State(state): State<AppState>) -> Json<UserResponse> {
    Json(UserResponse {
        user: state.username.to_string(),
    })
}
