use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
};
use services::NotificationService;
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use crate::response::ApiResponse;

pub fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/stats",
        get(get_connection_stats).route_layer(from_fn(allow_authenticated)),
    )
}

/// GET /api/notifications/stats
///
/// ```json
/// { "success": true, "data": { "connectedUsers": 3, "timestamp": "..." }, "message": "..." }
/// ```
async fn get_connection_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    let stats = NotificationService::new(app_state.gateway_clone())
        .connection_stats()
        .await;
    Json(ApiResponse::success(stats, "Connection stats retrieved"))
}
