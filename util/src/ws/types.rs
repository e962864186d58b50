use serde::{Deserialize, Serialize};

/// Frames a client may send after connecting.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsIn {
    Subscribe {
        #[serde(default)]
        events: Vec<String>,
    },
    Ping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connected<'a> {
    pub message: &'a str,
    pub user_id: i64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Subscribed {
    pub events: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Pong {
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStats {
    pub connected_users: usize,
    pub timestamp: String,
}
