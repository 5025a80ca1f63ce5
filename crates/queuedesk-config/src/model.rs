// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Queuedesk client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Queuedesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueDeskConfig {
    /// Client identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Queue backend connection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Branch used when no branch link has been applied.
    #[serde(default)]
    pub branch: BranchConfig,

    /// Persisted client state.
    #[serde(default)]
    pub state: StateConfig,

    /// Counter console behavior.
    #[serde(default)]
    pub counter: CounterConfig,

    /// Customer intake flow.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Public display polling.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Push notification bridge.
    #[serde(default)]
    pub push: PushConfig,
}

/// Client identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in the terminal front end.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "queuedesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Queue backend connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL every endpoint path is joined onto. Must end with `/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/MaxMoneyQueue/".to_string()
}

/// Fallback branch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BranchConfig {
    /// Branch id used until a branch link is applied.
    #[serde(default = "default_branch_id")]
    pub default_branch_id: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            default_branch_id: default_branch_id(),
        }
    }
}

fn default_branch_id() -> String {
    "1320429a-84e4-43dc-ac13-95f2e24fb3d6".to_string()
}

/// Persisted client state configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Path to the SQLite file holding the staff session and active branch.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("queuedesk").join("state.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("./queuedesk-state.db"))
        .to_string_lossy()
        .to_string()
}

/// Counter console configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    /// Queue entries per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seconds a guard or error notice stays visible.
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            notice_secs: default_notice_secs(),
        }
    }
}

fn default_page_size() -> usize {
    5
}

fn default_notice_secs() -> u64 {
    3
}

/// Customer intake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// How long the "customer not found" notice is shown before the form opens.
    #[serde(default = "default_lookup_miss_delay_ms")]
    pub lookup_miss_delay_ms: u64,

    /// Number treated as currently served when computing a customer's position.
    #[serde(default = "default_current_serving")]
    pub current_serving: String,

    /// Position at or below which the result screen says the customer is almost up.
    #[serde(default = "default_almost_up_position")]
    pub almost_up_position: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            lookup_miss_delay_ms: default_lookup_miss_delay_ms(),
            current_serving: default_current_serving(),
            almost_up_position: default_almost_up_position(),
        }
    }
}

fn default_lookup_miss_delay_ms() -> u64 {
    2000
}

fn default_current_serving() -> String {
    "0001".to_string()
}

fn default_almost_up_position() -> u64 {
    5
}

/// Public display configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Seconds between polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// How many upcoming numbers are shown.
    #[serde(default = "default_next_count")]
    pub next_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            next_count: default_next_count(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_next_count() -> usize {
    10
}

/// Push notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PushConfig {
    /// Whether device tokens are registered with the backend.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Device token of this terminal, if the host provides one.
    #[serde(default)]
    pub device_token: Option<String>,

    /// Public VAPID key used when requesting a token from the push service.
    #[serde(default)]
    pub vapid_key: Option<String>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            device_token: None,
            vapid_key: None,
        }
    }
}

fn default_true() -> bool {
    true
}
