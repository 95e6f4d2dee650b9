use super::*;

#[test]
fn parse_hex_accepts_short_and_long_forms() {
    assert_eq!(Rgba8::parse_hex("#ff00ff").unwrap(), Rgba8::opaque(255, 0, 255));
    assert_eq!(Rgba8::parse_hex("FF00FF").unwrap(), Rgba8::opaque(255, 0, 255));
    assert_eq!(Rgba8::parse_hex("#f0a").unwrap(), Rgba8::opaque(255, 0, 170));
    assert_eq!(
        Rgba8::parse_hex("#10203040").unwrap(),
        Rgba8::new(0x10, 0x20, 0x30, 0x40)
    );
}

#[test]
fn parse_hex_rejects_garbage() {
    for bad in ["", "#", "#ff00f", "#gg0000", "#+f+f+f", "#ffé", "rgb(1,2,3)"] {
        assert!(Rgba8::parse_hex(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn hex_round_trips_through_serde() {
    let c = Rgba8::opaque(0x8b, 0x00, 0x32);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#8b0032\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);

    assert!(serde_json::from_str::<Rgba8>("\"#nothex\"").is_err());
}

#[test]
fn slot_rect_edges_and_containment() {
    let r = SlotRect::new(40, 40, 540, 810);
    assert_eq!(r.right(), 580);
    assert_eq!(r.bottom(), 850);
    assert!(r.contains(40, 40));
    assert!(r.contains(579, 849));
    assert!(!r.contains(580, 100));
    assert!(!r.contains(39, 100));
}
