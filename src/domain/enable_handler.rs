//! Enable Bluetooth Handler
//!
//! Decides how to turn the radio on from a snapshot of the adapter state
//! and the platform's capability tier.

use crate::domain::models::{ErrorCode, MethodResponse, PlatformTier, RadioCapability};
use crate::infrastructure::platform::BluetoothPlatform;
use std::sync::Arc;
use tracing::{info, warn};

pub const METHOD_ENABLE_BLUETOOTH: &str = "enableBluetooth";

pub const MSG_UNAVAILABLE: &str = "Bluetooth is not available on this device.";
pub const MSG_ALREADY_ENABLED: &str = "Bluetooth is already enabled.";
pub const MSG_ENABLE_MANUALLY: &str = "Please enable Bluetooth manually.";
pub const MSG_SETTINGS_FAILED: &str = "Could not open Bluetooth settings.";
pub const MSG_ENABLED: &str = "Bluetooth enabled successfully.";
pub const MSG_ENABLE_FAILED: &str = "Could not enable Bluetooth automatically.";

pub struct BluetoothEnableHandler {
    platform: Arc<dyn BluetoothPlatform>,
}

impl BluetoothEnableHandler {
    pub fn new(platform: Arc<dyn BluetoothPlatform>) -> Self {
        Self { platform }
    }

    /// Handle an `enableBluetooth` call.
    pub fn enable_bluetooth(&self) -> MethodResponse {
        let radio = self.platform.radio();
        let tier = self.platform.tier();
        info!("enableBluetooth: radio={:?}, tier={:?}", radio, tier);

        match (radio, tier) {
            (RadioCapability::Absent, _) => {
                MethodResponse::error(ErrorCode::Unavailable, MSG_UNAVAILABLE)
            }
            (RadioCapability::Enabled, _) => MethodResponse::success(MSG_ALREADY_ENABLED),
            (RadioCapability::Disabled, PlatformTier::SettingsRedirect) => {
                self.prompt_user_to_enable()
            }
            (RadioCapability::Disabled, PlatformTier::Programmatic) => self.enable_directly(),
        }
    }

    /// Reports success once the settings screen is up, not once the radio is on.
    fn prompt_user_to_enable(&self) -> MethodResponse {
        match self.platform.open_settings() {
            Ok(()) => MethodResponse::success(MSG_ENABLE_MANUALLY),
            Err(e) => {
                warn!("Could not open Bluetooth settings: {}", e);
                MethodResponse::error(ErrorCode::Error, MSG_SETTINGS_FAILED)
            }
        }
    }

    fn enable_directly(&self) -> MethodResponse {
        if self.platform.enable() {
            MethodResponse::success(MSG_ENABLED)
        } else {
            warn!("Platform refused to enable Bluetooth");
            MethodResponse::error(ErrorCode::Error, MSG_ENABLE_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::SimulatedPlatform;

    const TIERS: [PlatformTier; 2] = [PlatformTier::Programmatic, PlatformTier::SettingsRedirect];

    fn handle(platform: SimulatedPlatform) -> (MethodResponse, Arc<SimulatedPlatform>) {
        let platform = Arc::new(platform);
        let handler = BluetoothEnableHandler::new(platform.clone());
        (handler.enable_bluetooth(), platform)
    }

    fn assert_error(response: &MethodResponse, expected_code: &str, expected_message: &str) {
        match response {
            MethodResponse::Error {
                code,
                message,
                details,
            } => {
                assert_eq!(code, expected_code);
                assert_eq!(message, expected_message);
                assert!(details.is_none());
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_adapter_is_unavailable_on_every_tier() {
        for tier in TIERS {
            let (response, platform) = handle(SimulatedPlatform::absent(tier));
            assert_error(&response, "UNAVAILABLE", MSG_UNAVAILABLE);
            assert_eq!(platform.enable_calls(), 0);
            assert_eq!(platform.settings_launches(), 0);
        }
    }

    #[test]
    fn test_already_enabled_on_every_tier() {
        for tier in TIERS {
            let (response, platform) = handle(SimulatedPlatform::new(tier).with_enabled(true));
            assert_eq!(response, MethodResponse::success(MSG_ALREADY_ENABLED));
            assert_eq!(platform.enable_calls(), 0);
            assert_eq!(platform.settings_launches(), 0);
        }
    }

    #[test]
    fn test_programmatic_enable_succeeds() {
        let (response, platform) = handle(SimulatedPlatform::new(PlatformTier::Programmatic));
        assert_eq!(response, MethodResponse::success(MSG_ENABLED));
        assert_eq!(platform.enable_calls(), 1);
        assert_eq!(platform.settings_launches(), 0);
        assert!(platform.is_enabled());
    }

    #[test]
    fn test_programmatic_enable_refused() {
        let (response, _) = handle(
            SimulatedPlatform::new(PlatformTier::Programmatic).with_enable_result(false),
        );
        assert_error(&response, "ERROR", MSG_ENABLE_FAILED);
    }

    #[test]
    fn test_settings_redirect_prompts_user() {
        let (response, platform) = handle(SimulatedPlatform::new(PlatformTier::SettingsRedirect));
        assert_eq!(response, MethodResponse::success(MSG_ENABLE_MANUALLY));
        assert_eq!(platform.settings_launches(), 1);
        assert_eq!(platform.enable_calls(), 0);
        // The radio stays off until the user acts.
        assert!(!platform.is_enabled());
    }

    #[test]
    fn test_settings_launch_failure() {
        let (response, _) = handle(
            SimulatedPlatform::new(PlatformTier::SettingsRedirect)
                .with_settings_launch_result(false),
        );
        assert_error(&response, "ERROR", MSG_SETTINGS_FAILED);
    }

    #[test]
    fn test_second_call_sees_enabled_radio() {
        let platform = Arc::new(SimulatedPlatform::new(PlatformTier::Programmatic));
        let handler = BluetoothEnableHandler::new(platform.clone());
        assert_eq!(handler.enable_bluetooth(), MethodResponse::success(MSG_ENABLED));
        assert_eq!(
            handler.enable_bluetooth(),
            MethodResponse::success(MSG_ALREADY_ENABLED)
        );
        assert_eq!(platform.enable_calls(), 1);
    }
}
