use std::path::PathBuf;

use fotorek::{
    CapturedImage, CompositionRequest, Compositor, CompositorConfig, FilterKind, FrameColor,
    ImageSource, LayoutSpec,
};
use image::RgbaImage;

fn parse_args() -> anyhow::Result<(LayoutSpec, FilterKind, FrameColor, PathBuf)> {
    let mut args = std::env::args().skip(1);
    let layout = args.next().as_deref().unwrap_or("horizontal-2x2").parse()?;
    let filter = args.next().as_deref().unwrap_or("grayscale").parse()?;
    let frame = args.next().as_deref().unwrap_or("black").parse()?;
    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("fotorek"));
    Ok((layout, filter, frame, out))
}

/// Stand-in for camera frames: diagonal gradients in four hues.
fn synth_capture(index: u32) -> RgbaImage {
    let tint = [[230, 80, 60], [60, 180, 90], [70, 110, 220], [240, 200, 60]][index as usize % 4];
    RgbaImage::from_fn(1280, 720, |x, y| {
        let t = (x + y) * 255 / (1280 + 720);
        image::Rgba([
            (tint[0] * t / 255) as u8,
            (tint[1] * t / 255) as u8,
            (tint[2] * t / 255) as u8,
            255,
        ])
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let (layout, filter, frame, out) = parse_args()?;
    let compositor = Compositor::new(CompositorConfig::default().with_env_overrides())?;
    let slots = compositor.geometry(layout)?.max_slots() as u32;

    let images = (0..slots)
        .map(|i| {
            CapturedImage::new(
                u64::from(i) + 1,
                u64::from(i) * 3_000,
                ImageSource::bitmap(synth_capture(i)),
            )
        })
        .collect();
    let request = CompositionRequest::new(images, layout, filter, frame);

    let strip = compositor.compose(&request).await?;
    let exported = compositor.export(&strip)?;
    let path = exported.write_to_dir(&out)?;
    println!(
        "wrote {} ({}x{}, {} bytes)",
        path.display(),
        strip.width(),
        strip.height(),
        exported.bytes.len()
    );
    Ok(())
}
