use image::Rgba;
use mcbadges_core::BadgeError;

pub const FABRIC_WHITE: Rgba<u8> = Rgba([246, 246, 246, 255]);
pub const FABRIC_BROWN: Rgba<u8> = Rgba([56, 52, 42, 255]);

/// Parses a gray, gray+alpha, RGB or RGBA hex string (optionally prefixed with `#`).
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, BadgeError> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    let bytes = hex::decode(digits).map_err(|e| {
        BadgeError::invalid_color(value, match e {
            hex::FromHexError::OddLength => "odd number of hex digits",
            _ => "invalid hex digit",
        })
    })?;
    match *bytes.as_slice() {
        [g] => Ok(Rgba([g, g, g, 255])),
        [g, a] => Ok(Rgba([g, g, g, a])),
        [r, g, b] => Ok(Rgba([r, g, b, 255])),
        [r, g, b, a] => Ok(Rgba([r, g, b, a])),
        _ => Err(BadgeError::invalid_color(value, "hex string must contain 1, 2, 3, or 4 bytes")),
    }
}
