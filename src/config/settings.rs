use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use prestobar_core::connectivity::DEFAULT_PROBE_HOSTS;
use prestobar_core::orchestrator::MAX_HISTORY_YEARS;
use prestobar_core::{Credentials, Palette, RunConfig, Thresholds};

/// Environment variable overriding the configured username
pub const USERNAME_ENV: &str = "PRESTO_USERNAME";
/// Environment variable overriding the configured password
pub const PASSWORD_ENV: &str = "PRESTO_PASSWORD";

/// Icon looked up next to the executable when none is configured
const BUNDLED_ICON: &str = "resource/prestocard.png";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "PRESTO card balance for the menu bar")]
pub struct Config {
    /// Enable debug logging (stderr)
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Card account username
    #[serde(default)]
    pub username: Option<String>,

    /// Card account password
    #[serde(default)]
    pub password: Option<String>,

    /// Card service gateway settings
    #[serde(default)]
    pub service: ServiceSettings,

    /// Connectivity probe settings
    #[serde(default)]
    pub connectivity: ConnectivitySettings,

    /// Balance, staleness and fetch window thresholds
    #[serde(default)]
    pub thresholds: ThresholdSettings,

    /// Presentation settings
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Card service gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Gateway base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8765".to_string()
}

fn default_service_timeout() -> u64 {
    30
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_service_timeout(),
        }
    }
}

impl ServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Connectivity probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivitySettings {
    /// `host:port` pairs tried in order
    #[serde(default = "default_probe_hosts")]
    pub hosts: Vec<String>,

    /// Connect timeout per host in milliseconds
    #[serde(default = "default_probe_timeout")]
    pub timeout_ms: u64,
}

fn default_probe_hosts() -> Vec<String> {
    DEFAULT_PROBE_HOSTS.iter().map(|h| h.to_string()).collect()
}

fn default_probe_timeout() -> u64 {
    3000
}

impl Default for ConnectivitySettings {
    fn default() -> Self {
        Self {
            hosts: default_probe_hosts(),
            timeout_ms: default_probe_timeout(),
        }
    }
}

impl ConnectivitySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Classification and fetch window thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Balances strictly above this are shown as good
    #[serde(default = "default_low_balance")]
    pub low_balance: Decimal,

    /// Hours after which the balance is considered stale
    #[serde(default = "default_stale_after_hours")]
    pub stale_after_hours: i64,

    /// Hours after which the last-updated line turns bad
    #[serde(default = "default_freshness_bad_hours")]
    pub freshness_bad_hours: i64,

    /// Past calendar years of activity to fetch
    #[serde(default = "default_history_years")]
    pub history_years: i32,

    /// Activity page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_low_balance() -> Decimal {
    Thresholds::default().low_balance
}

fn default_stale_after_hours() -> i64 {
    Thresholds::default().stale_after_hours
}

fn default_freshness_bad_hours() -> i64 {
    Thresholds::default().freshness_bad_hours
}

fn default_history_years() -> i32 {
    prestobar_core::orchestrator::DEFAULT_HISTORY_YEARS
}

fn default_page_size() -> u32 {
    prestobar_core::orchestrator::DEFAULT_PAGE_SIZE
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            low_balance: default_low_balance(),
            stale_after_hours: default_stale_after_hours(),
            freshness_bad_hours: default_freshness_bad_hours(),
            history_years: default_history_years(),
            page_size: default_page_size(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Status line icon (PNG); defaults to the bundled icon next to the binary
    #[serde(default)]
    pub icon_path: Option<PathBuf>,

    /// Card website linked from the last-updated line
    #[serde(default = "default_url")]
    pub url: String,

    /// Host color keywords
    #[serde(default)]
    pub colors: Palette,
}

fn default_url() -> String {
    prestobar_core::orchestrator::DEFAULT_CARD_URL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            icon_path: None,
            url: default_url(),
            colors: Palette::default(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                return Self::load_from(p);
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("prestobar/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/prestobar/config.toml")),
            dirs::home_dir().map(|p| p.join(".prestobar.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Override credentials from the environment (environment takes precedence)
    pub fn apply_env(&mut self) {
        if let Some(username) = non_empty_env(USERNAME_ENV) {
            self.username = Some(username);
        }
        if let Some(password) = non_empty_env(PASSWORD_ENV) {
            self.password = Some(password);
        }
    }

    /// Validate and normalize settings values
    pub fn validate(&mut self) {
        const MIN_PAGE_SIZE: u32 = 1;

        if self.thresholds.page_size < MIN_PAGE_SIZE {
            self.thresholds.page_size = MIN_PAGE_SIZE;
        }
        self.thresholds.history_years = self.thresholds.history_years.clamp(0, MAX_HISTORY_YEARS);
        if self.thresholds.freshness_bad_hours < self.thresholds.stale_after_hours {
            self.thresholds.freshness_bad_hours = self.thresholds.stale_after_hours;
        }
    }

    /// Configured credentials; both are required
    pub fn credentials(&self) -> Result<Credentials> {
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .with_context(|| format!("Missing username (set `username` or {})", USERNAME_ENV))?;
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .with_context(|| format!("Missing password (set `password` or {})", PASSWORD_ENV))?;
        Ok(Credentials::new(username, password))
    }

    /// Icon file to load: the configured one, else the bundled one
    pub fn icon_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.display.icon_path {
            return Some(path.clone());
        }
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join(BUNDLED_ICON))
    }

    /// Build the orchestrator's run configuration
    pub fn run_config(&self, icon: Option<String>) -> Result<RunConfig> {
        let mut config = RunConfig::new(self.credentials()?);
        config.thresholds = Thresholds {
            low_balance: self.thresholds.low_balance,
            stale_after_hours: self.thresholds.stale_after_hours,
            freshness_bad_hours: self.thresholds.freshness_bad_hours,
        };
        config.palette = self.display.colors.clone();
        config.history_years = self.thresholds.history_years;
        config.page_size = self.thresholds.page_size;
        config.url = self.display.url.clone();
        config.icon = icon;
        Ok(config)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
