use std::collections::HashMap;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use mcbadges_core::{BadgeError, config::BadgeDefaults};

use crate::{
    color::{FABRIC_BROWN, FABRIC_WHITE, parse_hex_color},
    encode_image,
    fonts::Fonts,
    layout::{BOT_TEXT_Y, ICON_SIZE, Layout, TEXT_X, TOP_TEXT_Y},
};

/// Widest canvas we are willing to allocate.
pub const MAX_WIDTH: u32 = 32768;

/// Values applied to parameters missing from a request.
#[derive(Debug, Clone)]
pub struct BadgeTemplate {
    pub mod_id: String,
    pub top_text: String,
    pub bg_fill: Rgba<u8>,
    pub top_fill: Rgba<u8>,
    pub bot_fill: Rgba<u8>,
}

impl Default for BadgeTemplate {
    fn default() -> Self {
        Self {
            mod_id: "fabric-api".to_string(),
            top_text: "Requires".to_string(),
            bg_fill: FABRIC_WHITE,
            top_fill: FABRIC_BROWN,
            bot_fill: FABRIC_BROWN,
        }
    }
}

impl TryFrom<&BadgeDefaults> for BadgeTemplate {
    type Error = BadgeError;

    fn try_from(value: &BadgeDefaults) -> Result<Self, Self::Error> {
        Ok(Self {
            mod_id: value.mod_id.clone(),
            top_text: value.top_text.clone(),
            bg_fill: parse_hex_color(&value.bg_fill)?,
            top_fill: parse_hex_color(&value.top_fill)?,
            bot_fill: parse_hex_color(&value.bot_fill)?,
        })
    }
}

/// Everything a caller can ask for in one badge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeRequest {
    pub mod_id: String,
    pub top_text: String,
    /// `None` means the project title is used.
    pub bot_text: Option<String>,
    pub bg_fill: Rgba<u8>,
    pub top_fill: Rgba<u8>,
    pub bot_fill: Rgba<u8>,
    pub top_centered: bool,
    pub bot_centered: bool,
}

impl BadgeRequest {
    pub fn from_query(
        query: &HashMap<String, String>,
        template: &BadgeTemplate,
    ) -> Result<Self, BadgeError> {
        let text =
            |key: &str, default: &str| query.get(key).map_or(default, String::as_str).to_string();
        let fill = |key: &str, default: Rgba<u8>| match query.get(key) {
            Some(value) => parse_hex_color(value),
            None => Ok(default),
        };
        Ok(Self {
            mod_id: text("mod_id", &template.mod_id),
            top_text: text("top_text", &template.top_text),
            bot_text: query.get("bot_text").cloned(),
            bg_fill: fill("bg_fill", template.bg_fill)?,
            top_fill: fill("top_fill", template.top_fill)?,
            bot_fill: fill("bot_fill", template.bot_fill)?,
            top_centered: query.contains_key("top_centered"),
            bot_centered: query.contains_key("bot_centered"),
        })
    }
}

/// Composite a badge: background, icon at the origin, then the two text lines.
pub fn render(
    fonts: &Fonts,
    request: &BadgeRequest,
    bot_text: &str,
    icon: &DynamicImage,
) -> Result<RgbaImage, BadgeError> {
    let icon =
        imageops::resize(&icon.to_rgba8(), ICON_SIZE, ICON_SIZE, imageops::FilterType::Nearest);
    let layout = Layout::compute(
        fonts,
        &request.top_text,
        bot_text,
        request.top_centered,
        request.bot_centered,
    );
    tracing::debug!("Badge layout for {}: {:?}", request.mod_id, layout);
    if layout.width > MAX_WIDTH {
        return Err(BadgeError::Render(format!("badge width {} exceeds {MAX_WIDTH}", layout.width)));
    }

    let mut badge = RgbaImage::from_pixel(layout.width, layout.height, request.bg_fill);
    paste_masked(&mut badge, &icon, 0, 0);
    let top_x = TEXT_X + layout.top_offset;
    fonts.regular.draw(&mut badge, request.top_fill, top_x, TOP_TEXT_Y, &request.top_text);
    let bot_x = TEXT_X + layout.bot_offset;
    fonts.bold.draw(&mut badge, request.bot_fill, bot_x, BOT_TEXT_Y, bot_text);
    Ok(badge)
}

pub fn render_png(
    fonts: &Fonts,
    request: &BadgeRequest,
    bot_text: &str,
    icon: &DynamicImage,
) -> Result<Vec<u8>, BadgeError> {
    let badge = render(fonts, request, bot_text, icon)?;
    encode_image(&DynamicImage::ImageRgba8(badge), ImageFormat::Png)
}

/// Paste `src` onto `dst`, using the source alpha as a mask on all four channels.
fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, src_px) in src.enumerate_pixels() {
        let Some(dst_px) = dst.get_pixel_mut_checked(x + sx, y + sy) else {
            continue;
        };
        let mask = src_px[3] as u32;
        for (d, s) in dst_px.0.iter_mut().zip(src_px.0) {
            *d = ((s as u32 * mask + *d as u32 * (255 - mask) + 127) / 255) as u8;
        }
    }
}
