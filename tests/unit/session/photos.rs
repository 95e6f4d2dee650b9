use super::*;

fn source() -> ImageSource {
    ImageSource::bitmap(image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255])))
}

#[test]
fn session_fills_up_to_layout_capacity() {
    let cfg = CompositorConfig::default();
    let mut s = PhotoSession::new(LayoutSpec::Horizontal2x2, &cfg).unwrap();
    assert_eq!(s.max_photos(), 4);
    for i in 0..4 {
        assert_eq!(s.remaining(), 4 - i);
        s.capture(source(), 1_000 + i as u64).unwrap();
    }
    assert!(s.is_complete());
    assert_eq!(s.remaining(), 0);

    let err = s.capture(source(), 9_999).unwrap_err();
    assert!(matches!(err, FotorekError::SessionFull { max: 4 }));
    assert_eq!(s.photos().len(), 4);
}

#[test]
fn single_layout_holds_one_photo() {
    let mut s = PhotoSession::new(LayoutSpec::Single, &CompositorConfig::default()).unwrap();
    s.capture(source(), 1).unwrap();
    assert!(s.is_complete());
    assert!(s.capture(source(), 2).is_err());
}

#[test]
fn ids_keep_increasing_across_retake_and_reset() {
    let mut s = PhotoSession::new(LayoutSpec::Vertical4, &CompositorConfig::default()).unwrap();
    let a = s.capture(source(), 10).unwrap().id;
    let b = s.capture(source(), 20).unwrap().id;
    assert!(b > a);

    let dropped = s.retake_last().unwrap();
    assert_eq!(dropped.id, b);
    let c = s.capture(source(), 30).unwrap().id;
    assert!(c > b);

    s.reset();
    assert!(s.photos().is_empty());
    assert_eq!(s.remaining(), 4);
    let d = s.capture(source(), 40).unwrap().id;
    assert!(d > c);
}

#[test]
fn retake_on_empty_session_is_none() {
    let mut s = PhotoSession::new(LayoutSpec::Grid2x3, &CompositorConfig::default()).unwrap();
    assert!(s.retake_last().is_none());
}

#[test]
fn request_snapshots_captures_in_order() {
    let mut s = PhotoSession::new(LayoutSpec::Grid2x3, &CompositorConfig::default()).unwrap();
    s.capture(source(), 5).unwrap();
    s.capture(source(), 6).unwrap();

    let req = s.request(FilterKind::Sepia, FrameColor::Purple);
    assert_eq!(req.layout, LayoutSpec::Grid2x3);
    assert_eq!(req.filter, FilterKind::Sepia);
    assert_eq!(req.frame_color, FrameColor::Purple);
    let stamps: Vec<u64> = req.images.iter().map(|i| i.timestamp_ms).collect();
    assert_eq!(stamps, vec![5, 6]);

    s.reset();
    assert_eq!(req.images.len(), 2);
}
