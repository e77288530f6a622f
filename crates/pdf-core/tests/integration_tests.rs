//! Integration tests for pdf-core
//!
//! These tests build complete PDFs from images and read them back with lopdf.

use image::{DynamicImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId};
use pdf_core::{encode_jpeg, Generator, ImageFormat, ImageOptions, Mode, PageSize, PdfError, Unit};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

/// Minimal JPEG header (16x16, RGB); enough to embed without decoding
fn create_test_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, // SOI marker
        0xFF, 0xC0, // SOF0 marker (baseline DCT)
        0x00, 0x11, // Length (17 bytes)
        0x08, // Precision (8 bits)
        0x00, 0x10, // Height (16 pixels)
        0x00, 0x10, // Width (16 pixels)
        0x03, // Number of components (RGB)
        0x01, 0x22, 0x00, // Component 1 (Y, subsampling 2x2)
        0x02, 0x11, 0x01, // Component 2 (Cb, subsampling 2x1)
        0x03, 0x11, 0x01, // Component 3 (Cr, subsampling 2x1)
        0xFF, 0xD9, // EOI marker
    ]
}

/// Create a 16x16 grayscale PNG using the image crate
fn create_test_png() -> Vec<u8> {
    let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(16, 16);
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }))
}

/// Fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdf-core-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    let page = doc.get_dictionary(page_id).unwrap();
    page.get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| match v {
            Object::Integer(i) => *i as f32,
            other => other.as_f32().unwrap(),
        })
        .collect()
}

/// Parse the `w 0 0 h x y cm` operator of a page
fn image_matrix(doc: &Document, page_id: ObjectId) -> [f64; 4] {
    let content = String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap();
    let line = content
        .lines()
        .find(|line| line.ends_with(" cm"))
        .expect("No cm operator");
    let numbers: Vec<f64> = line
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect();
    // w, h, x, y
    [numbers[0], numbers[3], numbers[4], numbers[5]]
}

#[test]
fn test_minimal_jpeg_fit() {
    let mut generator = Generator::new(Unit::Point, PageSize::a4()).expect("Failed to create");
    generator
        .add_image_bytes(&create_test_jpeg(), ImageFormat::Jpeg, ImageOptions::new(Mode::Fit))
        .expect("Failed to add JPEG");

    let bytes = generator.to_bytes().expect("Failed to save PDF");
    let doc = Document::load_mem(&bytes).expect("Failed to reload PDF");
    let page_id = doc.get_pages()[&1];

    let [w, h, x, y] = image_matrix(&doc, page_id);
    assert!((w - 595.28).abs() < 1e-6);
    assert!((h - 595.28).abs() < 1e-6);
    assert!(x.abs() < 1e-6);
    assert!((y - (841.89 - 595.28) / 2.0).abs() < 1e-6);
}

#[test]
fn test_center_png_is_natural_size() {
    let mut generator = Generator::new(Unit::Point, PageSize::a6()).unwrap();
    generator
        .add_image_bytes(&create_test_png(), ImageFormat::Png, ImageOptions::default())
        .unwrap();

    let bytes = generator.to_bytes().unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let [w, h, _, _] = image_matrix(&doc, doc.get_pages()[&1]);
    assert_eq!((w, h), (16.0, 16.0));
}

#[test]
fn test_write_file_all_modes() {
    let dir = scratch_dir("all-modes");
    let jpeg_path = dir.join("photo.jpg");
    let png_path = dir.join("alpha.png");
    std::fs::write(&jpeg_path, encode_jpeg(&gradient(120, 90)).unwrap()).unwrap();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(60, 100, Rgba([10, 20, 30, 128])))
        .save(&png_path)
        .unwrap();

    let mut generator = Generator::new(Unit::Millimeter, PageSize::a4()).unwrap();
    for path in [&jpeg_path, &png_path] {
        generator
            .add_image_file(path, ImageOptions::new(Mode::Fit))
            .expect("Failed to add file");
    }
    for scale in [0.5, 1.0, 1.5] {
        generator
            .add_image(&gradient(200, 150), ImageOptions::new(Mode::Center).with_scale(scale))
            .expect("Failed to add image");
    }
    for path in [&jpeg_path, &png_path] {
        generator
            .add_image_file(path, ImageOptions::new(Mode::Fill))
            .expect("Failed to add file");
    }

    let out = dir.join("out.pdf");
    generator.write_file(&out).expect("Failed to write PDF");

    let doc = Document::load(&out).expect("Failed to reload PDF");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 7);
    for page_id in pages.values() {
        let mb = media_box(&doc, *page_id);
        assert_eq!(mb[0], 0.0);
        assert_eq!(mb[1], 0.0);
        assert!((mb[2] - 595.28).abs() < 0.01, "{mb:?}");
        assert!((mb[3] - 841.89).abs() < 0.01, "{mb:?}");
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fill_stays_on_page() {
    let mut generator = Generator::new(Unit::Point, PageSize::a4()).unwrap();
    generator
        .add_image(&gradient(316, 317), ImageOptions::new(Mode::Fill))
        .unwrap();

    let bytes = generator.to_bytes().unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let [w, h, x, y] = image_matrix(&doc, doc.get_pages()[&1]);

    // One image pixel is about 2.66 pt; truncation may leave less than a pixel
    let pixel = 841.89 / 317.0;
    assert!(x <= 0.0 && x > -pixel, "x = {x}");
    assert!((x + w - 595.28).abs() < pixel, "right = {}", x + w);
    assert!((h - 841.89).abs() < 1e-6);
    assert!(y.abs() < 1e-6);
}

#[test]
fn test_fill_without_crop_overflows() {
    let mut generator = Generator::new(Unit::Point, PageSize::a4())
        .unwrap()
        .with_crop_overflow(false);
    generator
        .add_image(&gradient(316, 317), ImageOptions::new(Mode::Fill))
        .unwrap();

    let bytes = generator.to_bytes().unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let [w, _, x, _] = image_matrix(&doc, doc.get_pages()[&1]);
    assert!(x < -100.0);
    assert!(w > 800.0);
}

#[test]
fn test_write_to_writer() {
    let mut generator = Generator::with_page_size(PageSize::letter().rotate()).unwrap();
    generator
        .add_image(&gradient(10, 10), ImageOptions::new(Mode::Fit))
        .unwrap();

    let mut out = Vec::new();
    generator.write(&mut out).expect("Failed to write");
    let doc = Document::load_mem(&out).unwrap();
    let mb = media_box(&doc, doc.get_pages()[&1]);
    assert!((mb[2] - 792.0).abs() < 0.01);
    assert!((mb[3] - 612.0).abs() < 0.01);
}

#[test]
fn test_unknown_extension_sniffs_content() {
    let dir = scratch_dir("sniff");
    let path = dir.join("scan.dat");
    std::fs::write(&path, create_test_png()).unwrap();

    let mut generator = Generator::new(Unit::Point, PageSize::a5()).unwrap();
    generator
        .add_image_file(&path, ImageOptions::default())
        .expect("Failed to add sniffed PNG");
    assert_eq!(generator.page_count(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unsupported_file() {
    let dir = scratch_dir("unsupported");
    let path = dir.join("notes.txt");
    std::fs::write(&path, "definitely not an image").unwrap();

    let mut generator = Generator::new(Unit::Point, PageSize::a5()).unwrap();
    let result = generator.add_image_file(&path, ImageOptions::default());
    assert!(matches!(result, Err(PdfError::UnsupportedFormat(_))));
    assert_eq!(generator.page_count(), 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_documents_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let mut generator = Generator::new(Unit::Point, PageSize::a6()).unwrap();
                let mut names = Vec::new();
                for _ in 0..=i {
                    names.push(
                        generator
                            .add_image(&gradient(8, 8), ImageOptions::default())
                            .unwrap(),
                    );
                }
                names
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let names = handle.join().unwrap();
        let expected: Vec<String> = (0..=i).map(|n| format!("p4p_image_{n}")).collect();
        assert_eq!(names, expected);
    }
}
