use u8g2_fonts::{
    fonts::{
        u8g2_font_spleen12x24_mr, u8g2_font_spleen16x32_mr, u8g2_font_spleen32x64_mr,
        u8g2_font_spleen5x8_mr, u8g2_font_spleen6x12_mr, u8g2_font_spleen8x16_mr,
    },
    FontRenderer,
};

use crate::draw::DrawError;

/// Smallest cell height on offer.
pub const MIN_HEIGHT: u32 = 8;

// Nominal cell height of each font, smallest first.
const LADDER: [(u32, FontRenderer); 6] = [
    (8, FontRenderer::new::<u8g2_font_spleen5x8_mr>()),
    (12, FontRenderer::new::<u8g2_font_spleen6x12_mr>()),
    (16, FontRenderer::new::<u8g2_font_spleen8x16_mr>()),
    (24, FontRenderer::new::<u8g2_font_spleen12x24_mr>()),
    (32, FontRenderer::new::<u8g2_font_spleen16x32_mr>()),
    (64, FontRenderer::new::<u8g2_font_spleen32x64_mr>()),
];

/// Height of the largest bitmap font that fits in `max_height` pixels.
pub fn fitting_height(max_height: u32) -> Option<u32> {
    LADDER
        .iter()
        .rev()
        .map(|(height, _)| *height)
        .find(|height| *height <= max_height)
}

/// Picks the largest bitmap font not taller than `max_height`.
///
/// Bitmap fonts cannot be scaled, so a requested text size is rounded down
/// to the nearest available cell height.
pub fn font_for_height(max_height: u32) -> Result<FontRenderer, DrawError> {
    LADDER
        .iter()
        .rev()
        .find(|(height, _)| *height <= max_height)
        .map(|(_, font)| font.clone())
        .ok_or(DrawError::FontNotFound(max_height))
}
