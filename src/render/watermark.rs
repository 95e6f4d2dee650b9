use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::RgbaImage;

use crate::{
    config::compositor::WatermarkStyle,
    foundation::core::SlotRect,
    render::composite::fill_rect_clipped,
};

const GLYPH_PX: u32 = 8;

/// Pixel scale applied to the 8×8 base font for a requested glyph height.
pub fn glyph_scale(glyph_height: u32) -> u32 {
    ((glyph_height + GLYPH_PX / 2) / GLYPH_PX).max(1)
}

/// Size of `text` when drawn with `style`, bold overstrike included.
pub fn measure(text: &str, style: &WatermarkStyle) -> (u32, u32) {
    let scale = glyph_scale(style.glyph_height);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return (0, 0);
    }
    let bold = u32::from(style.bold);
    (chars * GLYPH_PX * scale + bold, GLYPH_PX * scale)
}

/// Stamp the watermark text, horizontally centered, its middle
/// `offset_from_bottom` pixels above the canvas bottom.
///
/// Returns the bounds of the text box (possibly partly off-canvas, then clipped).
pub fn draw_watermark(canvas: &mut RgbaImage, style: &WatermarkStyle) -> Option<SlotRect> {
    let (text_w, text_h) = measure(&style.text, style);
    if text_w == 0 {
        return None;
    }
    let scale = i64::from(glyph_scale(style.glyph_height));

    let (cw, ch) = canvas.dimensions();
    let left = i64::from(cw) / 2 - i64::from(text_w) / 2;
    let top = i64::from(ch) - i64::from(style.offset_from_bottom) - i64::from(text_h) / 2;

    let passes: &[i64] = if style.bold { &[0, 1] } else { &[0] };
    let mut pen_x = left;
    for c in style.text.chars() {
        let glyph = BASIC_FONTS
            .get(c)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_PX as i64 {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let px = pen_x + col * scale;
                let py = top + row as i64 * scale;
                for &dx in passes {
                    fill_rect_clipped(
                        canvas,
                        px + dx,
                        py,
                        px + dx + scale,
                        py + scale,
                        style.color,
                    );
                }
            }
        }
        pen_x += i64::from(GLYPH_PX) * scale;
    }

    let clamp = |v: i64| v.max(0) as u32;
    Some(SlotRect::new(clamp(left), clamp(top), text_w, text_h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;
