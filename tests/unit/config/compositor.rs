use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = CompositorConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.padding, 40);
    assert_eq!(cfg.watermark_band_height, 60);
    assert_eq!(cfg.export_quality, 95);
    assert_eq!(cfg.load_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.watermark.text, "FotoRek!");
    assert_eq!(cfg.border.color.to_hex(), "#444444");
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = CompositorConfig::from_json_str(r##"{"padding": 20, "border": {"color": "#000"}}"##)
        .unwrap();
    assert_eq!(cfg.padding, 20);
    assert_eq!(cfg.border.width, 2);
    assert_eq!(cfg.border.color, Rgba8::opaque(0, 0, 0));
    assert_eq!(cfg.export_prefix, "fotorek");
    assert_eq!(cfg.layouts, LayoutTable::default());
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(CompositorConfig::from_json_str(r#"{"export_quality": 0}"#).is_err());
    assert!(CompositorConfig::from_json_str(r#"{"export_quality": 101}"#).is_err());
    assert!(CompositorConfig::from_json_str(r#"{"load_timeout_ms": 0}"#).is_err());
    assert!(CompositorConfig::from_json_str(r#"{"export_prefix": "a/b"}"#).is_err());
    assert!(CompositorConfig::from_json_str(r#"{"padding": 1000}"#).is_err());
    assert!(CompositorConfig::from_json_str("not json").is_err());
}

#[test]
fn geometry_uses_configured_padding() {
    let cfg = CompositorConfig {
        padding: 20,
        ..CompositorConfig::default()
    };
    let g = cfg.geometry(LayoutSpec::Horizontal2x2).unwrap();
    assert_eq!(g.slot_width, 570);
    assert_eq!(g.slot_height, 840);
}
