#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod common;
mod config;
mod controller;
#[cfg(feature = "std")]
mod logging;
pub mod protocol;
mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use controller::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use protocol::*;
pub use session::*;
#[cfg(feature = "std")]
pub use transport::ws::WsTransport;
