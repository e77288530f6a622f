//! Places synthesized images on A4 pages in every mode
//! Run with: cargo run -p pdf-core --example place_images [output.pdf]
//!
//! Set RUST_LOG=debug to see the computed geometry.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pdf_core::{Generator, ImageOptions, Mode, PageSize, Unit};

fn checkerboard(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Rgb([30, 90, 160])
        } else {
            Rgb([240, 240, 240])
        }
    }))
}

fn badge(size: u32) -> DynamicImage {
    let r = size as f32 / 2.0;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, y| {
        let d = ((x as f32 - r).powi(2) + (y as f32 - r).powi(2)).sqrt();
        if d < r {
            Rgba([220, 40, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "place_images.pdf".to_string());

    let mut generator = Generator::new(Unit::Millimeter, PageSize::a4())?;
    let wide = checkerboard(640, 360);
    let tall = checkerboard(300, 900);

    for mode in [Mode::Center, Mode::Fit, Mode::Fill] {
        generator.add_image(&wide, ImageOptions::new(mode))?;
        generator.add_image(&tall, ImageOptions::new(mode))?;
    }
    for scale in [0.5, 1.0, 1.5] {
        generator.add_image(&badge(256), ImageOptions::new(Mode::Center).with_scale(scale))?;
    }
    generator.add_image(&wide, ImageOptions::new(Mode::Fill).with_scale(1.13))?;

    generator.write_file(&output)?;
    println!("Wrote {} pages to {output}", generator.page_count());
    Ok(())
}
