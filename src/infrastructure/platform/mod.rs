//! Platform Module
//!
//! The seam between the enable handler and the operating system's
//! Bluetooth stack.
//!
//! ## Modules
//!
//! - [`system`] - BlueZ (`bluetoothctl`) backed adapter with a configurable settings launcher
//! - [`simulated`] - In-memory adapter used by tests and hosts without a Bluetooth stack

pub mod simulated;
pub mod system;

use crate::domain::models::{PlatformTier, RadioCapability};
use crate::domain::settings::{PlatformBackend, PlatformSettings};
use crate::error::PlatformError;
use std::sync::Arc;

pub use simulated::SimulatedPlatform;
pub use system::SystemPlatform;

/// Platform calls consumed by the enable handler.
pub trait BluetoothPlatform: Send + Sync {
    /// Does the device have a Bluetooth adapter at all?
    fn has_adapter(&self) -> bool;

    /// Is the adapter currently powered on?
    fn is_enabled(&self) -> bool;

    /// Power the adapter on. Returns whether the platform accepted the request.
    fn enable(&self) -> bool;

    /// Open the system Bluetooth settings screen.
    fn open_settings(&self) -> Result<(), PlatformError>;

    /// Capability tier, fixed for the lifetime of the platform.
    fn tier(&self) -> PlatformTier;

    /// Read both environment queries into a single snapshot.
    fn radio(&self) -> RadioCapability {
        if !self.has_adapter() {
            RadioCapability::Absent
        } else if self.is_enabled() {
            RadioCapability::Enabled
        } else {
            RadioCapability::Disabled
        }
    }
}

/// Build the platform selected in settings. The tier is resolved once here.
pub fn from_settings(settings: &PlatformSettings) -> Arc<dyn BluetoothPlatform> {
    let tier = PlatformTier::resolve(settings.tier, settings.api_level);
    match settings.backend {
        PlatformBackend::System => Arc::new(SystemPlatform::new(
            settings.bluetoothctl_path.clone(),
            settings.settings_command.clone(),
            tier,
        )
        .with_timeout(settings.bluetoothctl_timeout_secs)),
        PlatformBackend::Simulated => {
            Arc::new(SimulatedPlatform::from_settings(&settings.simulated, tier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::SimulatedSettings;

    #[test]
    fn test_radio_snapshot() {
        let absent = SimulatedPlatform::absent(PlatformTier::Programmatic);
        assert_eq!(absent.radio(), RadioCapability::Absent);

        let disabled = SimulatedPlatform::new(PlatformTier::Programmatic);
        assert_eq!(disabled.radio(), RadioCapability::Disabled);

        let enabled = SimulatedPlatform::new(PlatformTier::Programmatic).with_enabled(true);
        assert_eq!(enabled.radio(), RadioCapability::Enabled);
    }

    #[test]
    fn test_from_settings_resolves_tier() {
        let settings = PlatformSettings {
            backend: PlatformBackend::Simulated,
            api_level: Some(33),
            simulated: SimulatedSettings::default(),
            ..Default::default()
        };
        let platform = from_settings(&settings);
        assert_eq!(platform.tier(), PlatformTier::SettingsRedirect);
    }
}
