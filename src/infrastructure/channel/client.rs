use crate::domain::enable_handler::METHOD_ENABLE_BLUETOOTH;
use crate::domain::models::{MethodCall, MethodResponse};
use crate::error::{ChannelError, ChannelResult};
use interprocess::local_socket::{traits::Stream, GenericNamespaced, Stream as LocalStream, ToNsName};
use std::io::{BufRead, BufReader, Read, Write};
use tracing::info;

pub struct ChannelClient {
    channel_name: String,
    // Kept across calls so bytes buffered past one reply are not lost.
    stream: Option<BufReader<LocalStream>>,
}

impl ChannelClient {
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            stream: None,
        }
    }

    /// Try to connect to a running bridge worker.
    /// If it is not running, returns Ok(false).
    pub fn try_connect(&mut self) -> ChannelResult<bool> {
        if self.stream.is_some() {
            return Ok(true);
        }

        let socket_name = self.channel_name.as_str().to_ns_name::<GenericNamespaced>()?;
        match LocalStream::connect(socket_name) {
            Ok(stream) => {
                info!("Connected to channel {}", self.channel_name);
                self.stream = Some(BufReader::new(stream));
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Send one call and wait for its response.
    pub fn invoke_method(&mut self, method: &str) -> ChannelResult<MethodResponse> {
        if !self.try_connect()? {
            return Err(ChannelError::Disconnected);
        }
        let stream = self.stream.as_mut().ok_or(ChannelError::Disconnected)?;

        let result = exchange(stream, &MethodCall::new(method));
        if result.is_err() {
            // Drop the broken stream so the next call reconnects.
            self.stream = None;
        }
        result
    }

    pub fn enable_bluetooth(&mut self) -> ChannelResult<MethodResponse> {
        self.invoke_method(METHOD_ENABLE_BLUETOOTH)
    }
}

/// Write `call` as one JSON line and read one JSON line back.
pub fn exchange<S: Read + Write>(
    stream: &mut BufReader<S>,
    call: &MethodCall,
) -> ChannelResult<MethodResponse> {
    let json_call = serde_json::to_string(call)? + "\n";
    let writer = stream.get_mut();
    writer.write_all(json_call.as_bytes())?;
    writer.flush()?;

    let mut buffer = String::new();
    if stream.read_line(&mut buffer)? == 0 {
        return Err(ChannelError::Disconnected);
    }

    let response: MethodResponse = serde_json::from_str(&buffer)?;
    Ok(response)
}
