use std::time::Duration;

use anyhow::{Context, Result};
use image::DynamicImage;
use mcbadges_core::{BadgeError, config::RegistryConfig, util::UrlExt};
use serde::Deserialize;
use url::Url;

/// The subset of a registry project record needed to draw a badge.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub title: String,
    pub icon_url: String,
}

/// Client for the project registry. Cheap to clone; clones share a connection pool.
#[derive(Clone)]
pub struct Registry {
    client: reqwest::Client,
    base_url: Url,
}

impl Registry {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid registry base URL {}", config.base_url))?;
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn project_url(&self, mod_id: &str) -> Url { self.base_url.with_segments(["project", mod_id]) }

    pub async fn project(&self, mod_id: &str) -> Result<ProjectMetadata, BadgeError> {
        let url = self.project_url(mod_id);
        tracing::debug!("Fetching project metadata from {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(BadgeError::MetadataFetch)?
            .bytes()
            .await
            .map_err(BadgeError::MetadataFetch)?;
        serde_json::from_slice(&body).map_err(BadgeError::MetadataParse)
    }

    pub async fn icon(&self, icon_url: &str) -> Result<DynamicImage, BadgeError> {
        tracing::debug!("Fetching icon from {}", icon_url);
        let body = self
            .client
            .get(icon_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(BadgeError::IconFetch)?
            .bytes()
            .await
            .map_err(BadgeError::IconFetch)?;
        image::load_from_memory(&body).map_err(BadgeError::IconDecode)
    }
}
