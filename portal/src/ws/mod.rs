use axum::{Router, routing::get};
use util::state::AppState;

pub mod notifications;

/// WebSocket routes under `/ws`.
///
/// Authentication happens inside the socket handshake, not in a route guard, so a
/// client with a bad token still gets an `error` frame before the close.
pub fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/notifications", get(notifications::notifications_ws_handler))
        .with_state(app_state)
}
