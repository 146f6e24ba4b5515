//! System Platform Module
//!
//! Talks to the BlueZ stack through `bluetoothctl` and opens the desktop's
//! Bluetooth settings panel with a configurable command.

use crate::domain::models::PlatformTier;
use crate::error::PlatformError;
use crate::infrastructure::platform::BluetoothPlatform;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Seconds `bluetoothctl` may wait for bluetoothd before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub struct SystemPlatform {
    bluetoothctl: String,
    settings_command: Vec<String>,
    tier: PlatformTier,
    timeout_secs: u64,
}

impl SystemPlatform {
    pub fn new(bluetoothctl: String, settings_command: Vec<String>, tier: PlatformTier) -> Self {
        Self {
            bluetoothctl,
            settings_command,
            tier,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Run `bluetoothctl <args>` and return stdout when it exits cleanly.
    fn bluetoothctl(&self, args: &[&str]) -> Option<String> {
        let command_args = bluetoothctl_args(self.timeout_secs, args);
        match Command::new(&self.bluetoothctl).args(&command_args).output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                if output.status.success() {
                    Some(stdout)
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    debug!("bluetoothctl {:?} failed: {}", args, stderr.trim());
                    None
                }
            }
            Err(e) => {
                warn!("Could not run {}: {}", self.bluetoothctl, e);
                None
            }
        }
    }
}

impl BluetoothPlatform for SystemPlatform {
    fn has_adapter(&self) -> bool {
        self.bluetoothctl(&["list"])
            .map(|out| lists_controller(&out))
            .unwrap_or(false)
    }

    fn is_enabled(&self) -> bool {
        self.bluetoothctl(&["show"])
            .map(|out| is_powered(&out))
            .unwrap_or(false)
    }

    fn enable(&self) -> bool {
        info!("Powering on Bluetooth adapter...");
        self.bluetoothctl(&["power", "on"])
            .map(|out| power_on_succeeded(&out))
            .unwrap_or(false)
    }

    fn open_settings(&self) -> Result<(), PlatformError> {
        let (program, args) = self
            .settings_command
            .split_first()
            .ok_or_else(|| PlatformError::SettingsLaunch("no settings command configured".into()))?;

        info!("Opening Bluetooth settings with {}", program);
        // Launch only; the user finishes enabling in the settings UI.
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::SettingsLaunch(format!("{}: {}", program, e)))?;
        Ok(())
    }

    fn tier(&self) -> PlatformTier {
        self.tier
    }
}

/// Without `--timeout`, bluetoothctl waits forever when bluetoothd is not running.
fn bluetoothctl_args(timeout_secs: u64, args: &[&str]) -> Vec<String> {
    let timeout_secs = timeout_secs.max(1);
    ["--timeout".to_string(), timeout_secs.to_string()]
        .into_iter()
        .chain(args.iter().map(|arg| arg.to_string()))
        .collect()
}

/// `bluetoothctl list` prints one `Controller <addr> <name>` line per adapter.
fn lists_controller(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.trim_start().starts_with("Controller "))
}

fn is_powered(output: &str) -> bool {
    output
        .lines()
        .map(str::trim)
        .any(|line| line == "Powered: yes")
}

fn power_on_succeeded(output: &str) -> bool {
    output.contains("succeeded")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_POWERED: &str = "Controller 00:1A:7D:DA:71:13 (public)\n\
        \tName: laptop\n\
        \tPowered: yes\n\
        \tDiscoverable: no\n";

    #[test]
    fn test_commands_carry_timeout() {
        assert_eq!(
            bluetoothctl_args(5, &["power", "on"]),
            vec!["--timeout", "5", "power", "on"]
        );
        // Zero would mean "wait forever" to bluetoothctl.
        assert_eq!(bluetoothctl_args(0, &["list"]), vec!["--timeout", "1", "list"]);
    }

    #[test]
    fn test_lists_controller() {
        assert!(lists_controller("Controller 00:1A:7D:DA:71:13 laptop [default]\n"));
        assert!(!lists_controller(""));
        assert!(!lists_controller("No default controller available\n"));
    }

    #[test]
    fn test_is_powered() {
        assert!(is_powered(SHOW_POWERED));
        assert!(!is_powered(&SHOW_POWERED.replace("yes", "no")));
    }

    #[test]
    fn test_power_on_result() {
        assert!(power_on_succeeded("Changing power on succeeded\n"));
        assert!(!power_on_succeeded(
            "Failed to set power on: org.bluez.Error.Blocked\n"
        ));
    }

    #[test]
    fn test_missing_tool_reads_as_absent() {
        let platform = SystemPlatform::new(
            "/nonexistent/bluetoothctl".to_string(),
            Vec::new(),
            PlatformTier::Programmatic,
        );
        assert!(!platform.has_adapter());
        assert!(!platform.is_enabled());
        assert!(!platform.enable());
    }

    #[test]
    fn test_empty_settings_command_fails() {
        let platform = SystemPlatform::new(
            "bluetoothctl".to_string(),
            Vec::new(),
            PlatformTier::SettingsRedirect,
        );
        assert!(platform.open_settings().is_err());
    }

    #[test]
    fn test_unknown_settings_command_fails() {
        let platform = SystemPlatform::new(
            "bluetoothctl".to_string(),
            vec!["/nonexistent/settings-panel".to_string()],
            PlatformTier::SettingsRedirect,
        );
        assert!(matches!(
            platform.open_settings(),
            Err(PlatformError::SettingsLaunch(_))
        ));
    }
}
