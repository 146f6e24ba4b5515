use crate::domain::models::PlatformTier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHANNEL: &str = "com.example.bluetooth";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_false")]
    pub show_file_line: bool,
    #[serde(default = "default_false")]
    pub show_thread_ids: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_false(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_false(),
            show_thread_ids: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: default_rotation(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformBackend {
    #[default]
    System,
    Simulated,
}

/// Initial state of the in-memory adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedSettings {
    #[serde(default = "default_true")]
    pub adapter_present: bool,
    #[serde(default = "default_false")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub enable_succeeds: bool,
    #[serde(default = "default_true")]
    pub settings_launch_succeeds: bool,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            adapter_present: true,
            enabled: false,
            enable_succeeds: true,
            settings_launch_succeeds: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSettings {
    #[serde(default)]
    pub backend: PlatformBackend,
    /// OS API level used to derive the tier when `tier` is unset.
    #[serde(default)]
    pub api_level: Option<u32>,
    #[serde(default)]
    pub tier: Option<PlatformTier>,
    #[serde(default = "default_bluetoothctl")]
    pub bluetoothctl_path: String,
    #[serde(default = "default_bluetoothctl_timeout")]
    pub bluetoothctl_timeout_secs: u64,
    #[serde(default = "default_settings_command")]
    pub settings_command: Vec<String>,
    #[serde(default)]
    pub simulated: SimulatedSettings,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            backend: PlatformBackend::default(),
            api_level: None,
            tier: None,
            bluetoothctl_path: default_bluetoothctl(),
            bluetoothctl_timeout_secs: default_bluetoothctl_timeout(),
            settings_command: default_settings_command(),
            simulated: SimulatedSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_channel")]
    pub channel_name: String,

    #[serde(default)]
    pub platform: PlatformSettings,

    #[serde(default)]
    pub log_settings: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel_name: default_channel(),
            platform: PlatformSettings::default(),
            log_settings: LogSettings::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "bluetooth_bridge".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}
fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}
fn default_bluetoothctl() -> String {
    "bluetoothctl".to_string()
}
fn default_bluetoothctl_timeout() -> u64 {
    5
}
fn default_settings_command() -> Vec<String> {
    vec!["gnome-control-center".to_string(), "bluetooth".to_string()]
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::open(settings_path))
    }

    /// Load from `path`, falling back to defaults when the file is missing or unreadable.
    pub fn open(settings_path: PathBuf) -> Self {
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();
        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("BluetoothBridge");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
