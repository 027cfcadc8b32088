/*
 * Responsibility
 * - URL layout of v1
 * - Which route groups run mandatory vs optional user resolution
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    users::{me, whoami},
};
use crate::middleware::user_ctx;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // POST /me lets clients that put user_id in a JSON body hit the same endpoint.
    let identified = user_ctx::require(
        Router::new().route("/me", get(me).post(me)),
        state.clone(),
    );

    let anonymous_ok = user_ctx::optional(
        Router::new().route("/whoami", get(whoami).post(whoami)),
        state,
    );

    Router::new()
        .route("/health", get(health))
        .merge(identified)
        .merge(anonymous_ok)
}
