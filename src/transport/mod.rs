//! Text-frame transport abstraction. The core never sees a socket: frames
//! go in and out whole, and a disconnect surfaces as an `Err` from `recv`
//! which the embedding layer turns into `handle_connection_lost`.

#[async_trait::async_trait]
pub trait Transport: Send {
    /// Send one whole text frame.
    async fn send(&mut self, frame: &str) -> anyhow::Result<()>;
    /// Receive the next whole text frame. Errors are terminal for the
    /// connection.
    async fn recv(&mut self) -> anyhow::Result<String>;
}

pub mod in_memory;
pub mod ws;
