//! Native bridge that exposes "enable the Bluetooth radio" to an application
//! layer over a named request/response method channel.

pub mod domain;
pub mod error;
pub mod infrastructure;
