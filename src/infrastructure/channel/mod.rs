//! Method Channel Module
//!
//! Request/response bridge between the application layer and native code.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  JSON line   ┌──────────────┐  dispatch  ┌────────────────────────┐
//! │ ChannelClient│ ───────────▶ │    server    │ ─────────▶ │     MethodChannel      │
//! │              │ ◀─────────── │ (local sock) │ ◀───────── │ enableBluetooth → ...  │
//! └──────────────┘  JSON line   └──────────────┘  response  └────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dispatch`] - Method name to handler table
//! - [`server`] - Local socket worker answering one call per line
//! - [`client`] - Caller side of the channel

pub mod client;
pub mod dispatch;
pub mod server;

pub use client::ChannelClient;
pub use dispatch::{bluetooth_channel, MethodChannel};
