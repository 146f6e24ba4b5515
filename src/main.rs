use anyhow::{Context, Result};
use bluetooth_bridge::domain::enable_handler::METHOD_ENABLE_BLUETOOTH;
use bluetooth_bridge::domain::models::{BridgeEvent, MessageSeverity};
use bluetooth_bridge::domain::settings::{Settings, SettingsService};
use bluetooth_bridge::error::ChannelError;
use bluetooth_bridge::infrastructure::channel::{bluetooth_channel, server, ChannelClient};
use bluetooth_bridge::infrastructure::platform::BluetoothPlatform;
use bluetooth_bridge::infrastructure::{logging, platform};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const USAGE: &str = "Usage: bluetooth-bridge [serve | call [method]]";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings_service = SettingsService::new()?;
    let settings = settings_service.get().clone();
    let log_guard = logging::init_logger(&settings.log_settings)?;
    info!(
        "Starting Bluetooth bridge (settings: {})",
        settings_service.path().display()
    );

    match args.first().map(String::as_str) {
        None | Some("serve") => {
            serve(settings).await?;
            // Blocking accept loop cannot be cancelled; exit instead of waiting on it.
            drop(log_guard);
            std::process::exit(0);
        }
        Some("call") => {
            let method = args
                .get(1)
                .cloned()
                .unwrap_or_else(|| METHOD_ENABLE_BLUETOOTH.to_string());
            call(settings.channel_name, method).await
        }
        Some(other) => anyhow::bail!("Unknown command: {}. {}", other, USAGE),
    }
}

async fn serve(settings: Settings) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                BridgeEvent::CallHandled { method, outcome } => {
                    info!("Handled {} ({})", method, outcome)
                }
                BridgeEvent::LogMessage(msg) => match msg.severity {
                    MessageSeverity::Warning => warn!("{}", msg.message),
                    MessageSeverity::Error => error!("{}", msg.message),
                    _ => info!("{}", msg.message),
                },
            }
        }
    });

    let platform = platform::from_settings(&settings.platform);
    info!(
        "Platform backend {:?}, tier {:?}",
        settings.platform.backend,
        platform.tier()
    );
    let channel = Arc::new(bluetooth_channel(settings.channel_name, platform));

    let worker = tokio::task::spawn_blocking(move || server::run_server(&channel, event_tx));

    tokio::select! {
        result = worker => result.context("Channel worker panicked")?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}

async fn call(channel_name: String, method: String) -> Result<()> {
    let response = tokio::task::spawn_blocking(move || {
        let mut client = ChannelClient::new(channel_name.clone());
        client.invoke_method(&method).map_err(|e| match e {
            ChannelError::Disconnected => {
                anyhow::anyhow!("No bridge worker is serving channel {}", channel_name)
            }
            other => anyhow::Error::new(other),
        })
    })
    .await
    .context("Channel client panicked")??;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
