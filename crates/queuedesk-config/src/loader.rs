// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./queuedesk.toml` > `~/.config/queuedesk/queuedesk.toml`
//! > `/etc/queuedesk/queuedesk.toml` with environment variable overrides via
//! the `QUEUEDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::QueueDeskConfig;

pub(crate) const LOCAL_FILE: &str = "queuedesk.toml";
pub(crate) const SYSTEM_FILE: &str = "/etc/queuedesk/queuedesk.toml";

/// Sections addressable from `QUEUEDESK_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: [&str; 8] = [
    "app", "backend", "branch", "state", "counter", "intake", "display", "push",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/queuedesk/queuedesk.toml`
/// 3. `~/.config/queuedesk/queuedesk.toml`
/// 4. `./queuedesk.toml`
/// 5. `QUEUEDESK_*` environment variables
pub fn load_config() -> Result<QueueDeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<QueueDeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QueueDeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<QueueDeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QueueDeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(QueueDeskConfig::default()))
        .merge(Toml::file(SYSTEM_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_FILE))
        .merge(env_provider())
}

pub(crate) fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("queuedesk").join(LOCAL_FILE))
}

/// Environment provider mapping the first `_` after a known section to a dot.
///
/// `Env::split("_")` would break keys such as `base_url`:
/// `QUEUEDESK_BACKEND_BASE_URL` must become `backend.base_url`.
fn env_provider() -> Env {
    Env::prefixed("QUEUEDESK_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str);
        mapped.into()
    })
}
