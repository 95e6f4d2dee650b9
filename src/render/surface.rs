use image::{RgbaImage, imageops::FilterType};

use crate::{
    composition::model::FilterKind,
    effects::filters::apply_filter_image,
    foundation::{
        core::SlotRect,
        error::{FotorekError, FotorekResult},
    },
};

/// Contain-fit `src_w × src_h` into `box_w × box_h`, centered on both axes.
///
/// The result never exceeds the box and is at least 1 px on each axis. The
/// limiting axis is picked with exact integer cross-multiplication.
pub fn contain_fit(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> FotorekResult<SlotRect> {
    if src_w == 0 || src_h == 0 {
        return Err(FotorekError::render("cannot fit a zero-sized image"));
    }
    if box_w == 0 || box_h == 0 {
        return Err(FotorekError::render("cannot fit into a zero-sized slot"));
    }

    let (sw, sh, bw, bh) = (
        u64::from(src_w),
        u64::from(src_h),
        u64::from(box_w),
        u64::from(box_h),
    );
    let (w, h) = if sw * bh >= sh * bw {
        // Relatively wider (or equal): width binds.
        (bw, rounded_div(sh * bw, sw).clamp(1, bh))
    } else {
        (rounded_div(sw * bh, sh).clamp(1, bw), bh)
    };

    // w <= box_w and h <= box_h, so both fit in u32.
    let (w, h) = (w as u32, h as u32);
    Ok(SlotRect::new((box_w - w) / 2, (box_h - h) / 2, w, h))
}

fn rounded_div(num: u64, den: u64) -> u64 {
    (num * 2 + den) / (den * 2)
}

/// Slot-sized scratch bitmap.
///
/// Starts fully transparent, so letterbox areas show the canvas background
/// once composited. Filtering touches this surface only.
pub struct SlotSurface {
    pixels: RgbaImage,
    placed: Option<SlotRect>,
}

impl SlotSurface {
    /// Allocate a transparent `width × height` surface.
    pub fn new(width: u32, height: u32) -> FotorekResult<Self> {
        if width == 0 || height == 0 {
            return Err(FotorekError::render("slot surface must be non-empty"));
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
            placed: None,
        })
    }

    /// Resample `src` with contain-fit and draw it centered.
    pub fn draw_contain(&mut self, src: &RgbaImage) -> FotorekResult<SlotRect> {
        let fit = contain_fit(
            src.width(),
            src.height(),
            self.pixels.width(),
            self.pixels.height(),
        )?;

        if (fit.width, fit.height) == src.dimensions() {
            image::imageops::replace(&mut self.pixels, src, i64::from(fit.x), i64::from(fit.y));
        } else {
            let scaled = image::imageops::resize(src, fit.width, fit.height, FilterType::Triangle);
            image::imageops::replace(
                &mut self.pixels,
                &scaled,
                i64::from(fit.x),
                i64::from(fit.y),
            );
        }
        self.placed = Some(fit);
        Ok(fit)
    }

    /// Apply `filter` to this surface's pixels.
    pub fn apply_filter(&mut self, filter: FilterKind) {
        apply_filter_image(&mut self.pixels, filter);
    }

    /// Where the last [`SlotSurface::draw_contain`] placed its image.
    pub fn placed(&self) -> Option<SlotRect> {
        self.placed
    }

    /// Borrow the pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
