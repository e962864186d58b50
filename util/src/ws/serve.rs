//! Axum transport for notification sockets.
//!
//! Splits the socket into a writer task that drains the session's outbound queue and
//! a read loop that feeds client frames to the gateway.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, time};

use super::{NotificationGateway, Session, session::ConnectionState};

const OUTBOUND_QUEUE: usize = 64;
const WRITER_FLUSH: Duration = Duration::from_secs(2);

pub struct WsServerOptions {
    pub ws_ping_sec: u64,
}

impl Default for WsServerOptions {
    fn default() -> Self {
        Self { ws_ping_sec: 30 }
    }
}

impl WsServerOptions {
    pub fn from_config() -> Self {
        Self {
            ws_ping_sec: crate::config::AppConfig::global().ws_ping_seconds,
        }
    }
}

/// Drives one notification socket until either side closes it.
pub async fn serve_socket(
    socket: WebSocket,
    gateway: NotificationGateway,
    token: Option<String>,
    opts: WsServerOptions,
) {
    let (mut sink, mut socket_rx) = socket.split();

    let (out_tx, mut out_rx) = mpsc::channel::<Message>(OUTBOUND_QUEUE);
    let mut writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            let closing = matches!(frame, Message::Close(_));
            if sink.send(frame).await.is_err() || closing {
                break;
            }
        }
    });

    let mut session = Session::new(out_tx.clone());

    if gateway.on_connect(&mut session, token.as_deref()).await.is_err() {
        drop(session);
        drop(out_tx);
        let _ = time::timeout(WRITER_FLUSH, &mut writer_task).await;
        writer_task.abort();
        return;
    }

    let ping_task = {
        let out_tx = out_tx.clone();
        let period = Duration::from_secs(opts.ws_ping_sec.max(1));
        tokio::spawn(async move {
            loop {
                time::sleep(period).await;
                if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        })
    };

    while let Some(Ok(msg)) = socket_rx.next().await {
        match msg {
            Message::Text(text) => gateway.on_text(&mut session, text.as_str()).await,
            Message::Ping(payload) => {
                let _ = out_tx.send(Message::Pong(payload)).await;
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                tracing::warn!(session = %session.id(), "Ignoring binary frame");
            }
            Message::Close(_) => break,
        }
        if session.state() == ConnectionState::Disconnected {
            break;
        }
    }

    ping_task.abort();
    gateway.on_disconnect(&mut session).await;
    drop(session);
    drop(out_tx);

    let _ = time::timeout(WRITER_FLUSH, &mut writer_task).await;
    writer_task.abort();
    tracing::debug!("Notification socket closed");
}
