//! Method dispatch table for a named channel.

use crate::domain::enable_handler::{BluetoothEnableHandler, METHOD_ENABLE_BLUETOOTH};
use crate::domain::models::{MethodCall, MethodResponse};
use crate::infrastructure::platform::BluetoothPlatform;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub type MethodHandler = Box<dyn Fn(&MethodCall) -> MethodResponse + Send + Sync>;

pub struct MethodChannel {
    name: String,
    handlers: HashMap<String, MethodHandler>,
}

impl MethodChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install `handler` for `method`, replacing any earlier registration.
    pub fn register<F>(&mut self, method: impl Into<String>, handler: F)
    where
        F: Fn(&MethodCall) -> MethodResponse + Send + Sync + 'static,
    {
        let method = method.into();
        debug!("Registering {}::{}", self.name, method);
        self.handlers.insert(method, Box::new(handler));
    }

    pub fn invoke(&self, call: &MethodCall) -> MethodResponse {
        match self.handlers.get(&call.method) {
            Some(handler) => handler(call),
            None => {
                info!("{}: no handler for {}", self.name, call.method);
                MethodResponse::NotImplemented
            }
        }
    }
}

/// The Bluetooth channel with `enableBluetooth` installed.
pub fn bluetooth_channel(name: impl Into<String>, platform: Arc<dyn BluetoothPlatform>) -> MethodChannel {
    let handler = BluetoothEnableHandler::new(platform);
    let mut channel = MethodChannel::new(name);
    channel.register(METHOD_ENABLE_BLUETOOTH, move |_| handler.enable_bluetooth());
    channel
}
