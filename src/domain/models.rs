use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A request arriving on the method channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }
}

/// Exactly one of these is produced per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            result: Value::String(message.into()),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Short label used in logs and events.
    pub fn outcome(&self) -> &str {
        match self {
            Self::Success { .. } => "success",
            Self::Error { code, .. } => code,
            Self::NotImplemented => "not_implemented",
        }
    }
}

impl fmt::Display for MethodResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                result: Value::String(message),
            } => write!(f, "{}", message),
            Self::Success { result } => write!(f, "{}", result),
            Self::Error { code, message, .. } => write!(f, "{}: {}", code, message),
            Self::NotImplemented => write!(f, "not implemented"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No Bluetooth adapter on this device. Not retryable.
    Unavailable,
    /// An attempted action failed.
    Error,
    /// The transport could not decode the request line.
    MalformedCall,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "UNAVAILABLE",
            Self::Error => "ERROR",
            Self::MalformedCall => "MALFORMED_CALL",
        }
    }
}

/// Snapshot of the Bluetooth subsystem taken at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioCapability {
    Absent,
    Disabled,
    Enabled,
}

/// Whether the OS lets us toggle the radio or only lets the user do it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformTier {
    Programmatic,
    SettingsRedirect,
}

impl PlatformTier {
    /// First API level (Android 13) on which apps can no longer enable the radio.
    pub const SETTINGS_REDIRECT_API_LEVEL: u32 = 33;

    pub fn for_api_level(api_level: u32) -> Self {
        if api_level >= Self::SETTINGS_REDIRECT_API_LEVEL {
            Self::SettingsRedirect
        } else {
            Self::Programmatic
        }
    }

    /// Explicit tier wins, then the API level, then programmatic.
    pub fn resolve(explicit: Option<PlatformTier>, api_level: Option<u32>) -> Self {
        explicit
            .or_else(|| api_level.map(Self::for_api_level))
            .unwrap_or(Self::Programmatic)
    }
}

/// Events published by the channel worker.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    CallHandled { method: String, outcome: String },
    LogMessage(StatusMessage),
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_for_api_level() {
        assert_eq!(PlatformTier::for_api_level(32), PlatformTier::Programmatic);
        assert_eq!(
            PlatformTier::for_api_level(33),
            PlatformTier::SettingsRedirect
        );
        assert_eq!(
            PlatformTier::for_api_level(34),
            PlatformTier::SettingsRedirect
        );
    }

    #[test]
    fn test_tier_resolution_order() {
        assert_eq!(
            PlatformTier::resolve(Some(PlatformTier::Programmatic), Some(34)),
            PlatformTier::Programmatic
        );
        assert_eq!(
            PlatformTier::resolve(None, Some(33)),
            PlatformTier::SettingsRedirect
        );
        assert_eq!(PlatformTier::resolve(None, None), PlatformTier::Programmatic);
    }

    #[test]
    fn test_response_wire_format() {
        let json = serde_json::to_value(MethodResponse::error(
            ErrorCode::Unavailable,
            "Bluetooth is not available on this device.",
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "code": "UNAVAILABLE",
                "message": "Bluetooth is not available on this device.",
                "details": null,
            })
        );

        let json = serde_json::to_value(MethodResponse::NotImplemented).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "not_implemented" }));
    }

    #[test]
    fn test_call_without_arguments() {
        let call: MethodCall = serde_json::from_str(r#"{"method":"enableBluetooth"}"#).unwrap();
        assert_eq!(call, MethodCall::new("enableBluetooth"));
    }
}
