#![cfg(feature = "std")]

//! WebSocket transport for the reference `ws://` deployment.

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::transport::Transport;

pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Open a WebSocket connection to `url` (e.g. `ws://localhost:8080`).
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (stream, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to {}", url))?;
        debug!("connected to {}", url);
        Ok(Self { stream })
    }

    /// Close the connection gracefully.
    pub async fn close(&mut self) -> anyhow::Result<()> {
        self.stream.close(None).await.context("failed to close connection")
    }
}

#[async_trait::async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, frame: &str) -> anyhow::Result<()> {
        self.stream
            .send(Message::Text(frame.to_string()))
            .await
            .context("failed to send frame")
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        loop {
            let message = self
                .stream
                .next()
                .await
                .ok_or_else(|| anyhow::anyhow!("connection closed by server"))?
                .context("failed to receive frame")?;
            match message {
                Message::Text(text) => return Ok(text),
                Message::Close(_) => {
                    return Err(anyhow::anyhow!("connection closed by server"))
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                other => {
                    warn!("ignoring non-text frame ({} bytes)", other.len());
                    continue;
                }
            }
        }
    }
}
