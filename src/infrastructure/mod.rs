pub mod channel;
pub mod logging;
pub mod platform;
