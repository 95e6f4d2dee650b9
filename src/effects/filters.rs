use image::RgbaImage;

use crate::{
    composition::model::FilterKind,
    foundation::error::{FotorekError, FotorekResult},
};

const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply `filter` in place to a tightly packed RGBA8 buffer. Alpha is never touched.
pub fn apply_filter(rgba: &mut [u8], filter: FilterKind) -> FotorekResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(FotorekError::render(
            "apply_filter expects an rgba8 buffer (length multiple of 4)",
        ));
    }
    if filter == FilterKind::None {
        return Ok(());
    }
    for px in rgba.chunks_exact_mut(4) {
        let [r, g, b] = filter_rgb([px[0], px[1], px[2]], filter);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    Ok(())
}

/// Apply `filter` in place to an image.
pub fn apply_filter_image(image: &mut RgbaImage, filter: FilterKind) {
    if filter == FilterKind::None {
        return;
    }
    for px in image.pixels_mut() {
        let [r, g, b] = filter_rgb([px[0], px[1], px[2]], filter);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

/// Transform one pixel's color channels.
pub fn filter_rgb(rgb: [u8; 3], filter: FilterKind) -> [u8; 3] {
    let [r, g, b] = rgb;
    match filter {
        FilterKind::None => rgb,
        FilterKind::Grayscale => {
            // Rounded average: sum/3 has fractional part 0, 1/3 or 2/3.
            let avg = ((u16::from(r) + u16::from(g) + u16::from(b) + 1) / 3) as u8;
            [avg, avg, avg]
        }
        FilterKind::Sepia => {
            let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
            SEPIA.map(|[kr, kg, kb]| to_channel(kr * r + kg * g + kb * b))
        }
        FilterKind::Vintage => scale_rgb(rgb, [1.2, 0.9, 0.7]),
        FilterKind::Cool => scale_rgb(rgb, [0.8, 1.1, 1.2]),
        FilterKind::Warm => scale_rgb(rgb, [1.2, 1.1, 0.8]),
    }
}

fn scale_rgb(rgb: [u8; 3], k: [f64; 3]) -> [u8; 3] {
    [
        to_channel(f64::from(rgb[0]) * k[0]),
        to_channel(f64::from(rgb[1]) * k[1]),
        to_channel(f64::from(rgb[2]) * k[2]),
    ]
}

/// Clamp, then round half to even, the way a clamped byte canvas stores floats.
fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;
