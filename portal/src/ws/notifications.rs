use axum::{
    extract::{Query, State, WebSocketUpgrade},
    http::{HeaderMap, header::AUTHORIZATION},
    response::IntoResponse,
};
use serde::Deserialize;
use util::auth::extract_bearer;
use util::state::AppState;
use util::ws::serve::{WsServerOptions, serve_socket};

#[derive(Debug, Default, Deserialize)]
pub struct WsAuthQuery {
    pub token: Option<String>,
}

/// GET /ws/notifications
///
/// Upgrades to the notification socket. The token comes from `?token=` or from an
/// `Authorization: Bearer` header.
pub async fn notifications_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = extract_bearer(query.token.as_deref(), authorization);
    let gateway = app_state.gateway_clone();
    let opts = WsServerOptions::from_config();

    ws.on_upgrade(move |socket| serve_socket(socket, gateway, token, opts))
}
