//! In-memory Bluetooth adapter.

use crate::domain::models::PlatformTier;
use crate::domain::settings::SimulatedSettings;
use crate::error::PlatformError;
use crate::infrastructure::platform::BluetoothPlatform;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::info;

pub struct SimulatedPlatform {
    adapter_present: bool,
    enabled: AtomicBool,
    enable_succeeds: bool,
    settings_launch_succeeds: bool,
    tier: PlatformTier,
    enable_calls: AtomicUsize,
    settings_launches: AtomicUsize,
}

impl SimulatedPlatform {
    /// A present, disabled adapter that accepts every request.
    pub fn new(tier: PlatformTier) -> Self {
        Self {
            adapter_present: true,
            enabled: AtomicBool::new(false),
            enable_succeeds: true,
            settings_launch_succeeds: true,
            tier,
            enable_calls: AtomicUsize::new(0),
            settings_launches: AtomicUsize::new(0),
        }
    }

    /// A device with no Bluetooth hardware.
    pub fn absent(tier: PlatformTier) -> Self {
        Self {
            adapter_present: false,
            ..Self::new(tier)
        }
    }

    pub fn from_settings(settings: &SimulatedSettings, tier: PlatformTier) -> Self {
        Self {
            adapter_present: settings.adapter_present,
            enabled: AtomicBool::new(settings.enabled),
            enable_succeeds: settings.enable_succeeds,
            settings_launch_succeeds: settings.settings_launch_succeeds,
            ..Self::new(tier)
        }
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.store(enabled, Ordering::SeqCst);
        self
    }

    pub fn with_enable_result(mut self, succeeds: bool) -> Self {
        self.enable_succeeds = succeeds;
        self
    }

    pub fn with_settings_launch_result(mut self, succeeds: bool) -> Self {
        self.settings_launch_succeeds = succeeds;
        self
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    pub fn settings_launches(&self) -> usize {
        self.settings_launches.load(Ordering::SeqCst)
    }
}

impl BluetoothPlatform for SimulatedPlatform {
    fn has_adapter(&self) -> bool {
        self.adapter_present
    }

    fn is_enabled(&self) -> bool {
        self.adapter_present && self.enabled.load(Ordering::SeqCst)
    }

    fn enable(&self) -> bool {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        if self.adapter_present && self.enable_succeeds {
            self.enabled.store(true, Ordering::SeqCst);
            info!("Simulated adapter powered on");
            true
        } else {
            false
        }
    }

    fn open_settings(&self) -> Result<(), PlatformError> {
        self.settings_launches.fetch_add(1, Ordering::SeqCst);
        if self.settings_launch_succeeds {
            info!("Simulated Bluetooth settings screen opened");
            Ok(())
        } else {
            Err(PlatformError::SettingsLaunch(
                "settings activity not found".to_string(),
            ))
        }
    }

    fn tier(&self) -> PlatformTier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_turns_radio_on() {
        let platform = SimulatedPlatform::new(PlatformTier::Programmatic);
        assert!(!platform.is_enabled());
        assert!(platform.enable());
        assert!(platform.is_enabled());
        assert_eq!(platform.enable_calls(), 1);
    }

    #[test]
    fn test_failed_enable_leaves_radio_off() {
        let platform = SimulatedPlatform::new(PlatformTier::Programmatic).with_enable_result(false);
        assert!(!platform.enable());
        assert!(!platform.is_enabled());
    }

    #[test]
    fn test_settings_launch_failure() {
        let platform =
            SimulatedPlatform::new(PlatformTier::SettingsRedirect).with_settings_launch_result(false);
        assert!(platform.open_settings().is_err());
        assert_eq!(platform.settings_launches(), 1);
    }
}
