//! Real-time order feed over WebSocket
//!
//! Replaces display polling with a persistent push connection. Each
//! subscriber receives JSON frames `{"event": <channel>, "data": <order>}`
//! for every committed mutation.
//!
//! Kitchen and waiter displays connect without parameters and receive the
//! global channels. A customer device passes `?table_id=...` and receives
//! only its table channel.

use axum::{
    Router,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::core::ServerState;
use shared::feed::{OrderChannel, OrderFeedEvent};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/ws", get(feed_ws))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Restrict the connection to one table's channel
    #[serde(default)]
    pub table_id: Option<String>,
}

/// GET /api/ws - upgrade to the order feed
pub async fn feed_ws(
    State(state): State<ServerState>,
    Query(query): Query<FeedQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.feed.subscribe();
    ws.on_upgrade(move |socket| handle_feed(socket, rx, query.table_id))
}

/// Should this connection see the event?
fn wants(table_filter: &Option<String>, channel: &OrderChannel) -> bool {
    match table_filter {
        Some(table_id) => channel.table_id() == Some(table_id.as_str()),
        None => channel.is_global(),
    }
}

async fn handle_feed(
    socket: WebSocket,
    mut rx: broadcast::Receiver<OrderFeedEvent>,
    table_filter: Option<String>,
) {
    tracing::debug!(table_filter = ?table_filter, "Feed subscriber connected");
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    if !wants(&table_filter, &event.channel) {
                        continue;
                    }
                    let frame = match serde_json::to_string(&event.frame()) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize feed frame");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow consumer: skip missed frames, keep the connection
                    tracing::warn!(skipped, "Feed subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                // Clients only ever send pings / close; payloads are ignored
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Feed subscriber disconnected");
}
