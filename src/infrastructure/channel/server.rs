use crate::domain::models::{
    BridgeEvent, ErrorCode, MessageSeverity, MethodCall, MethodResponse, StatusMessage,
};
use crate::error::ChannelResult;
use crate::infrastructure::channel::dispatch::MethodChannel;
use anyhow::{Context, Result};
use interprocess::local_socket::{
    traits::ListenerExt, GenericNamespaced, ListenerOptions, Stream as LocalStream, ToNsName,
};
use interprocess::TryClone;
use std::io::{BufRead, BufReader, Write};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Serve `channel` on its local socket until the listener fails.
pub fn run_server(channel: &MethodChannel, events: mpsc::UnboundedSender<BridgeEvent>) -> Result<()> {
    let socket_name = channel
        .name()
        .to_ns_name::<GenericNamespaced>()
        .with_context(|| format!("Invalid channel name {}", channel.name()))?;
    let listener = ListenerOptions::new()
        .name(socket_name)
        .create_sync()
        .with_context(|| format!("Failed to bind channel {}", channel.name()))?;

    info!("Listening on channel {}", channel.name());
    publish(
        &events,
        format!("Channel {} ready", channel.name()),
        MessageSeverity::Success,
    );

    for conn in listener.incoming().filter_map(|x| x.ok()) {
        info!("Client connected");
        publish(&events, "Client connected", MessageSeverity::Info);
        if let Err(e) = handle_connection(conn, channel, &events) {
            error!("Connection error: {}", e);
            publish(
                &events,
                format!("Connection error: {}", e),
                MessageSeverity::Error,
            );
        }
    }

    Ok(())
}

fn handle_connection(
    stream: LocalStream,
    channel: &MethodChannel,
    events: &mpsc::UnboundedSender<BridgeEvent>,
) -> ChannelResult<()> {
    let reader = BufReader::new(stream.try_clone()?);
    serve_stream(reader, stream, channel, events)
}

fn publish(
    events: &mpsc::UnboundedSender<BridgeEvent>,
    message: impl Into<String>,
    severity: MessageSeverity,
) {
    let _ = events.send(BridgeEvent::LogMessage(StatusMessage {
        message: message.into(),
        severity,
    }));
}

/// Answer one JSON call per line until EOF.
pub fn serve_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    channel: &MethodChannel,
    events: &mpsc::UnboundedSender<BridgeEvent>,
) -> ChannelResult<()> {
    // Raw bytes, so a line that is not UTF-8 still gets a reply.
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break; // EOF
        }
        if buffer.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match serde_json::from_slice::<MethodCall>(&buffer) {
            Ok(call) => {
                info!("Received call: {}", call.method);
                let response = channel.invoke(&call);
                info!("{} -> {}", call.method, response);
                let _ = events.send(BridgeEvent::CallHandled {
                    method: call.method,
                    outcome: response.outcome().to_string(),
                });
                response
            }
            Err(e) => {
                warn!("Malformed call: {}", e);
                publish(
                    events,
                    format!("Rejected malformed call: {}", e),
                    MessageSeverity::Warning,
                );
                MethodResponse::error(ErrorCode::MalformedCall, format!("Malformed call: {}", e))
            }
        };

        let json = serde_json::to_string(&response)? + "\n";
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}
