use std::io;

use thiserror::Error;

/// Failures raised by a platform adapter.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Failed to launch Bluetooth settings: {0}")]
    SettingsLaunch(String),
}

/// Failures on the method channel transport.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Channel closed before a response was received")]
    Disconnected,
}

pub type ChannelResult<T> = Result<T, ChannelError>;
