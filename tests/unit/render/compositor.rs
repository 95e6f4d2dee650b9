use std::time::{Duration, UNIX_EPOCH};

use super::*;

fn compositor() -> Compositor {
    Compositor::new(CompositorConfig::default()).unwrap()
}

fn photo(w: u32, h: u32, rgb: [u8; 3]) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(
        w,
        h,
        image::Rgba([rgb[0], rgb[1], rgb[2], 255]),
    ))
}

fn near(got: [u8; 4], want: [u8; 4]) -> bool {
    got.iter().zip(want).all(|(g, w)| g.abs_diff(w) <= 1)
}

const BORDER: [u8; 4] = [0x44, 0x44, 0x44, 255];

#[test]
fn canvas_matches_the_layout_table() {
    let c = compositor();
    for (layout, dims) in [
        (LayoutSpec::Single, (1200, 1800)),
        (LayoutSpec::Vertical4, (600, 1800)),
        (LayoutSpec::Horizontal2x2, (1200, 1800)),
        (LayoutSpec::Grid2x3, (1200, 1800)),
    ] {
        let strip = c
            .render(layout, &[photo(4, 3, [1, 2, 3])], FilterKind::None, FrameColor::White)
            .unwrap();
        assert_eq!((strip.width(), strip.height()), dims, "{layout}");
        assert_eq!(strip.layout(), layout);
    }
}

#[test]
fn grid_slot_is_letterboxed_on_the_frame_color() {
    let c = compositor();
    let bitmaps = vec![photo(800, 600, [255, 0, 0]); 4];
    let strip = c
        .render(
            LayoutSpec::Horizontal2x2,
            &bitmaps,
            FilterKind::None,
            FrameColor::Black,
        )
        .unwrap();
    let img = strip.image();

    // Padding and letterbox bands show the background.
    assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(300, 100).0, [0, 0, 0, 255]);
    // Slot 0 sits at (40, 40); the 540x405 image starts 202 px down.
    assert!(near(img.get_pixel(300, 40 + 202).0, [255, 0, 0, 255]));
    assert!(near(img.get_pixel(300, 40 + 202 + 404).0, [255, 0, 0, 255]));
    assert_eq!(img.get_pixel(300, 40 + 202 + 405).0, [0, 0, 0, 255]);
    // Slot 3 is bottom-right.
    assert!(near(img.get_pixel(620 + 270, 890 + 405).0, [255, 0, 0, 255]));
}

#[test]
fn border_straddles_the_slot_edge() {
    let c = compositor();
    let strip = c
        .render(
            LayoutSpec::Horizontal2x2,
            &[photo(540, 810, [255, 255, 255])],
            FilterKind::None,
            FrameColor::Black,
        )
        .unwrap();
    let img = strip.image();

    assert_eq!(img.get_pixel(300, 38).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(300, 39).0, BORDER);
    assert_eq!(img.get_pixel(300, 40).0, BORDER);
    assert_eq!(img.get_pixel(300, 41).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(39, 300).0, BORDER);
    assert_eq!(img.get_pixel(580, 300).0, BORDER);

    // Empty slots get no border.
    assert_eq!(img.get_pixel(900, 39).0, [0, 0, 0, 255]);
}

#[test]
fn filter_applies_inside_slots_only() {
    let c = compositor();
    let strip = c
        .render(
            LayoutSpec::Horizontal2x2,
            &[photo(800, 600, [255, 0, 0])],
            FilterKind::Grayscale,
            FrameColor::Pink,
        )
        .unwrap();
    let img = strip.image();

    assert_eq!(img.get_pixel(10, 10).0, [0xff, 0xc0, 0xcb, 255]);
    assert_eq!(img.get_pixel(300, 100).0, [0xff, 0xc0, 0xcb, 255]);
    assert!(near(img.get_pixel(300, 400).0, [85, 85, 85, 255]));
}

#[test]
fn watermark_is_stamped_in_the_band() {
    let c = compositor();
    let strip = c
        .render(
            LayoutSpec::Single,
            &[photo(10, 10, [0, 0, 255])],
            FilterKind::None,
            FrameColor::White,
        )
        .unwrap();
    let img = strip.image();
    let ink = [0x66, 0x66, 0x66, 255];
    assert!((504..697).any(|x| img.get_pixel(x, 1770).0 == ink));
    assert!((0..504).all(|x| img.get_pixel(x, 1770).0 == [255, 255, 255, 255]));
}

#[test]
fn extra_bitmaps_are_ignored() {
    let c = compositor();
    let four = vec![photo(8, 8, [9, 9, 9]); 4];
    let six = vec![photo(8, 8, [9, 9, 9]); 6];
    let a = c
        .render(LayoutSpec::Horizontal2x2, &four, FilterKind::Cool, FrameColor::Green)
        .unwrap();
    let b = c
        .render(LayoutSpec::Horizontal2x2, &six, FilterKind::Cool, FrameColor::Green)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_render_is_rejected() {
    let err = compositor()
        .render(LayoutSpec::Single, &[], FilterKind::None, FrameColor::White)
        .unwrap_err();
    assert!(matches!(err, FotorekError::NoImages));
}

#[test]
fn render_is_deterministic() {
    let c = compositor();
    let bitmaps = [
        Arc::new(RgbaImage::from_fn(97, 61, |x, y| {
            image::Rgba([x as u8, y as u8, (x ^ y) as u8, 255])
        })),
        photo(61, 97, [200, 150, 100]),
    ];
    let a = c
        .render(LayoutSpec::Grid2x3, &bitmaps, FilterKind::Vintage, FrameColor::Maroon)
        .unwrap();
    let b = c
        .render(LayoutSpec::Grid2x3, &bitmaps, FilterKind::Vintage, FrameColor::Maroon)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn preview_keeps_aspect() {
    let strip = compositor()
        .render(
            LayoutSpec::Vertical4,
            &[photo(4, 4, [1, 1, 1])],
            FilterKind::None,
            FrameColor::White,
        )
        .unwrap();
    assert_eq!(strip.preview(600).dimensions(), (200, 600));
    assert_eq!(strip.preview(5000).dimensions(), (600, 1800));
}

#[test]
fn export_names_file_after_the_timestamp() {
    let c = compositor();
    let strip = c
        .render(
            LayoutSpec::Single,
            &[photo(4, 4, [1, 1, 1])],
            FilterKind::None,
            FrameColor::White,
        )
        .unwrap();
    let out = c
        .export_at(&strip, UNIX_EPOCH + Duration::from_millis(1_700_000_000_123))
        .unwrap();
    assert_eq!(out.filename, "fotorek-1700000000123.jpg");
    assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);

    let back = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((back.width(), back.height()), (1200, 1800));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = CompositorConfig {
        export_quality: 0,
        ..CompositorConfig::default()
    };
    assert!(Compositor::new(cfg).is_err());
}
