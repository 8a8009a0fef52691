pub mod badge;
pub mod color;
pub mod fonts;
pub mod layout;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use mcbadges_core::BadgeError;

pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, BadgeError> {
    let mut out = Vec::new();
    image.write_to(&mut Cursor::new(&mut out), format)?;
    Ok(out)
}
