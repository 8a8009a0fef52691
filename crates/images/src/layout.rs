use crate::fonts::Fonts;

/// Side length of the square icon slot, which is also the badge height.
pub const ICON_SIZE: u32 = 128;
/// Horizontal gap on each side of the text column.
pub const PADDING: u32 = 12;
/// Left edge of the text column.
pub const TEXT_X: i32 = (ICON_SIZE + PADDING) as i32;
pub const TOP_TEXT_Y: i32 = 4;
pub const BOT_TEXT_Y: i32 = 68;

/// Offset needed to center an element of `len` against one of `cmp_len`.
/// Never negative: the longer element is not shifted.
pub fn calc_center_offset(len: f32, cmp_len: f32) -> f32 { (cmp_len - len).max(0.0) / 2.0 }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub top_offset: i32,
    pub bot_offset: i32,
}

impl Layout {
    pub fn compute(
        fonts: &Fonts,
        top_text: &str,
        bot_text: &str,
        top_centered: bool,
        bot_centered: bool,
    ) -> Self {
        let top_len = fonts.regular.advance_width(top_text);
        let bot_len = fonts.bold.advance_width(bot_text);
        Self::from_lengths(top_len, bot_len, top_centered, bot_centered)
    }

    pub fn from_lengths(top_len: f32, bot_len: f32, top_centered: bool, bot_centered: bool) -> Self {
        let text_width = top_len.max(bot_len).round_ties_even() as u32;
        let offset = |centered: bool, len: f32, cmp_len: f32| {
            if centered { calc_center_offset(len, cmp_len).round_ties_even() as i32 } else { 0 }
        };
        Self {
            width: (ICON_SIZE + PADDING * 2).saturating_add(text_width),
            height: ICON_SIZE,
            top_offset: offset(top_centered, top_len, bot_len),
            bot_offset: offset(bot_centered, bot_len, top_len),
        }
    }
}
