use anyhow::{Context, Result};
use axum::body::Bytes;
use mcbadges_core::config::Config;
use mcbadges_images::{badge::BadgeTemplate, fonts::Fonts};

/// Read-only resources loaded once at startup and shared by every request.
pub struct Assets {
    pub fonts: Fonts,
    pub ui_page: Bytes,
    pub template: BadgeTemplate,
}

impl Assets {
    pub fn load(config: &Config) -> Result<Self> {
        let fonts = Fonts::load(&config.assets.regular_font, &config.assets.bold_font)?;
        let ui_page = std::fs::read(&config.assets.ui_page).with_context(|| {
            format!("Failed to read UI page {}", config.assets.ui_page.display())
        })?;
        let template =
            BadgeTemplate::try_from(&config.badge).context("Invalid badge defaults")?;
        tracing::info!(
            "Loaded fonts {} and {}, UI page {}",
            config.assets.regular_font.display(),
            config.assets.bold_font.display(),
            config.assets.ui_page.display()
        );
        Ok(Self { fonts, ui_page: Bytes::from(ui_page), template })
    }
}
