use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_alpha_on_opaque_mixes_evenly() {
    let out = over([0, 0, 0, 255], [200, 100, 50, 128]);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 100).abs() <= 1);
    assert!((i32::from(out[1]) - 50).abs() <= 1);
}

#[test]
fn over_onto_transparent_keeps_src() {
    assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200]), [100, 110, 120, 200]);
}

#[test]
fn fill_paints_every_pixel() {
    let mut canvas = RgbaImage::new(3, 2);
    fill(&mut canvas, Rgba8::opaque(255, 0, 255));
    assert!(canvas.pixels().all(|p| p.0 == [255, 0, 255, 255]));
}

#[test]
fn blit_over_clips_and_skips_transparent() {
    let mut canvas = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let mut src = RgbaImage::from_pixel(3, 3, image::Rgba([9, 9, 9, 255]));
    src.put_pixel(0, 0, image::Rgba([200, 200, 200, 0]));

    blit_over(&mut canvas, &src, 2, 2);

    assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(3, 3).0, [9, 9, 9, 255]);
    assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 255]);

    blit_over(&mut canvas, &src, 10, 10);
}

#[test]
fn two_pixel_stroke_straddles_the_edge() {
    let mut canvas = RgbaImage::from_pixel(10, 10, image::Rgba([255, 255, 255, 255]));
    let gray = Rgba8::opaque(0x44, 0x44, 0x44);
    stroke_rect(&mut canvas, SlotRect::new(2, 2, 6, 6), 2, gray);

    let is_gray = |x, y| canvas.get_pixel(x, y).0 == [0x44, 0x44, 0x44, 255];
    // outer ring
    assert!(is_gray(1, 1));
    assert!(is_gray(8, 8));
    // inner ring
    assert!(is_gray(2, 5));
    assert!(is_gray(7, 5));
    // interior and outside untouched
    assert!(!is_gray(3, 3));
    assert!(!is_gray(0, 0));
    assert!(!is_gray(9, 9));
}

#[test]
fn stroke_at_canvas_edge_is_clipped() {
    let mut canvas = RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
    stroke_rect(&mut canvas, SlotRect::new(0, 0, 4, 4), 2, Rgba8::opaque(0, 0, 0));
    assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255, 255]);
}
