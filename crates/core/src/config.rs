use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    pub assets: AssetsConfig,
    #[serde(default)]
    pub badge: BadgeDefaults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request deadline; a request that runs past it fails with 500.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self { Self { host: "localhost".to_string(), port: 8080, request_timeout_secs: 30 } }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the project registry API, without the `/project` suffix.
    pub base_url: String,
    /// Applies to each of the metadata and icon requests separately.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.modrinth.com/v2".to_string(),
            timeout_secs: 10,
            user_agent: concat!("mcbadges/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    pub regular_font: PathBuf,
    pub bold_font: PathBuf,
    pub ui_page: PathBuf,
}

/// Values used for query parameters the caller leaves out.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BadgeDefaults {
    pub mod_id: String,
    pub top_text: String,
    pub bg_fill: String,
    pub top_fill: String,
    pub bot_fill: String,
}

impl Default for BadgeDefaults {
    fn default() -> Self {
        Self {
            mod_id: "fabric-api".to_string(),
            top_text: "Requires".to_string(),
            bg_fill: "f6f6f6ff".to_string(),
            top_fill: "38342aff".to_string(),
            bot_fill: "38342aff".to_string(),
        }
    }
}
