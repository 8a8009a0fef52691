use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont, point};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::pixelops::weighted_sum;

/// Em size, in pixels, of both text lines.
pub const FONT_SIZE: f32 = 56.0;

/// A font paired with the scale it is drawn at.
#[derive(Clone)]
pub struct Face {
    pub font: FontArc,
    pub scale: PxScale,
}

impl Face {
    pub fn new(font: FontArc, em_px: f32) -> Self {
        let scale = em_scale(&font, em_px);
        Self { font, scale }
    }

    /// Position the glyphs of `text` on a line whose top (ascender) is at y = 0.
    /// Returns the glyphs and the total advance, including pair kerning.
    pub fn layout(&self, text: &str) -> (Vec<Glyph>, f32) {
        let font = self.font.as_scaled(self.scale);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0.0;
        let mut last = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(last) = last {
                x += font.kern(last, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(x, font.ascent())));
            x += font.h_advance(id);
            last = Some(id);
        }
        (glyphs, x)
    }

    /// Horizontal advance of `text` in pixels.
    pub fn advance_width(&self, text: &str) -> f32 { self.layout(text).1 }

    /// Draw `text` with its top-left (ascender line) at `(x, y)`, blending by coverage.
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        for glyph in self.layout(text).0 {
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            let (left, top) = (x + bounds.min.x as i32, y + bounds.min.y as i32);
            outline.draw(|gx, gy, coverage| {
                let (px, py) = (left + gx as i32, top + gy as i32);
                if (0..width).contains(&px) && (0..height).contains(&py) {
                    let coverage = coverage.clamp(0.0, 1.0);
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    *pixel = weighted_sum(*pixel, color, 1.0 - coverage, coverage);
                }
            });
        }
    }
}

/// The two faces a badge is drawn with. Loaded once, shared read-only between requests.
#[derive(Clone)]
pub struct Fonts {
    pub regular: Face,
    pub bold: Face,
}

impl Fonts {
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> Result<Self> {
        let regular = FontArc::try_from_vec(regular).context("Invalid regular font")?;
        let bold = FontArc::try_from_vec(bold).context("Invalid bold font")?;
        Ok(Self { regular: Face::new(regular, FONT_SIZE), bold: Face::new(bold, FONT_SIZE) })
    }

    pub fn load(regular: &Path, bold: &Path) -> Result<Self> {
        let regular_data = std::fs::read(regular)
            .with_context(|| format!("Failed to read font {}", regular.display()))?;
        let bold_data = std::fs::read(bold)
            .with_context(|| format!("Failed to read font {}", bold.display()))?;
        Self::from_bytes(regular_data, bold_data)
    }
}

/// `PxScale` measures ascent to descent; convert an em size to it.
fn em_scale(font: &impl Font, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) => PxScale::from(em_px * font.height_unscaled() / units_per_em),
        None => PxScale::from(em_px),
    }
}
