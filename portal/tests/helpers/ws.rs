use axum::Router;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Message, client::IntoClientRequest},
};
use url::Url;

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Spawns the Axum app on a random local port.
pub async fn spawn_server(app: Router) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}

/// Connects to `/ws/notifications`, with the token in the query string when given.
pub async fn connect_ws(
    addr: &std::net::SocketAddr,
    token: Option<&str>,
    bearer: Option<&str>,
) -> Result<Socket, tokio_tungstenite::tungstenite::Error> {
    let url = match token {
        Some(t) => format!("ws://{addr}/ws/notifications?token={t}"),
        None => format!("ws://{addr}/ws/notifications"),
    };
    let url = Url::parse(&url).unwrap();

    let mut req = url.to_string().into_client_request().unwrap();
    if let Some(b) = bearer {
        req.headers_mut()
            .insert("Authorization", format!("Bearer {b}").parse().unwrap());
    }
    connect_async(req).await.map(|(socket, _)| socket)
}

/// Next text frame as JSON, skipping control frames. `None` on close or timeout.
pub async fn next_json(socket: &mut Socket) -> Option<Value> {
    loop {
        match timeout(Duration::from_millis(500), socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => return serde_json::from_str(text.as_str()).ok(),
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => continue,
            _ => return None,
        }
    }
}
