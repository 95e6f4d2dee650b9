use image::RgbaImage;

use crate::foundation::core::{Rgba8, SlotRect};

/// Straight-alpha RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// Source-over for straight alpha.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255 - sa;
    let dst_w = mul_div255(u16::from(dst[3]), inv);
    let out_a = u16::from(src[3]) + u16::from(dst_w);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(dst_w);
        out[i] = ((num + u32::from(out_a) / 2) / u32::from(out_a)).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

/// Paint the whole canvas with `color`.
pub fn fill(canvas: &mut RgbaImage, color: Rgba8) {
    let px = color.to_pixel();
    for p in canvas.pixels_mut() {
        *p = px;
    }
}

/// Composite `src` over `canvas` with its top-left at `(x, y)`, clipped to the canvas.
pub fn blit_over(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (cw, ch) = canvas.dimensions();
    if x >= cw || y >= ch {
        return;
    }
    let w = src.width().min(cw - x);
    let h = src.height().min(ch - y);
    for sy in 0..h {
        for sx in 0..w {
            let s = src.get_pixel(sx, sy).0;
            let d = canvas.get_pixel_mut(x + sx, y + sy);
            d.0 = over(d.0, s);
        }
    }
}

/// Stroke `rect` with a `width`-pixel line centered on its edge, clipped to the canvas.
///
/// For even widths half the stroke lies outside the rectangle, half inside.
pub fn stroke_rect(canvas: &mut RgbaImage, rect: SlotRect, width: u32, color: Rgba8) {
    if width == 0 || rect.width == 0 || rect.height == 0 {
        return;
    }
    let outside = i64::from(width / 2);
    let inside = i64::from(width) - outside;

    let x0 = i64::from(rect.x) - outside;
    let y0 = i64::from(rect.y) - outside;
    let x1 = i64::from(rect.right()) + outside;
    let y1 = i64::from(rect.bottom()) + outside;

    // Top and bottom bands span the full outer width; sides fill the rows between.
    fill_rect_clipped(canvas, x0, y0, x1, y0 + outside + inside, color);
    fill_rect_clipped(canvas, x0, y1 - outside - inside, x1, y1, color);
    fill_rect_clipped(canvas, x0, y0, x0 + outside + inside, y1, color);
    fill_rect_clipped(canvas, x1 - outside - inside, y0, x1, y1, color);
}

/// Blend `color` over every pixel in `[x0, x1) × [y0, y1)` that lies on the canvas.
pub fn fill_rect_clipped(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba8) {
    let (cw, ch) = canvas.dimensions();
    let x0 = x0.clamp(0, i64::from(cw)) as u32;
    let x1 = x1.clamp(0, i64::from(cw)) as u32;
    let y0 = y0.clamp(0, i64::from(ch)) as u32;
    let y1 = y1.clamp(0, i64::from(ch)) as u32;
    let src = color.to_array();
    for y in y0..y1 {
        for x in x0..x1 {
            let d = canvas.get_pixel_mut(x, y);
            d.0 = over(d.0, src);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
