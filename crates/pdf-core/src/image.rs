//! Image handling for PDF pages
//!
//! Probing (format, pixel size, alpha) and conversion of JPEG/PNG data or
//! decoded images into PDF image XObjects.

use crate::{PdfError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::{Cursor, Write};

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// JPEG quality used when re-encoding opaque images
const JPEG_QUALITY: u8 = 90;

/// Embeddable image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Format from a file extension ("jpg", "JPEG", "png", ...)
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(PdfError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Format from a MIME type ("image/jpeg", "image/png")
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok(ImageFormat::Jpeg),
            "image/png" => Ok(ImageFormat::Png),
            _ => Err(PdfError::UnsupportedFormat(mime.to_string())),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 8 {
        return Err(PdfError::ImageError("Image data too short".to_string()));
    }

    // JPEG starts with FF D8 FF
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return Ok(ImageFormat::Jpeg);
    }

    if data[0..8] == PNG_SIGNATURE {
        return Ok(ImageFormat::Png);
    }

    Err(PdfError::UnsupportedFormat("unknown magic bytes".to_string()))
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Pixel size and transparency of an encoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
}

/// Read an image's header without decoding its pixels
///
/// # Arguments
/// * `data` - Encoded image bytes
/// * `format` - Format hint; must match the data
pub fn probe(data: &[u8], format: ImageFormat) -> Result<ImageInfo> {
    let info = match format {
        ImageFormat::Jpeg => {
            let jpeg = get_jpeg_info(data)?;
            ImageInfo {
                width: jpeg.width,
                height: jpeg.height,
                has_alpha: false,
            }
        }
        ImageFormat::Png => get_png_info(data)?,
    };

    if info.width == 0 || info.height == 0 {
        return Err(PdfError::ImageError(format!(
            "Image has no pixels ({} x {})",
            info.width, info.height
        )));
    }
    Ok(info)
}

/// JPEG info including dimensions and color components
#[derive(Debug, Clone, Copy)]
struct JpegInfo {
    width: u32,
    height: u32,
    num_components: u8,
}

/// Get JPEG info from the first SOF segment
fn get_jpeg_info(data: &[u8]) -> Result<JpegInfo> {
    // SOF segment: marker (2), length (2), precision (1), height (2),
    // width (2), number of components (1)
    let mut i = 2;
    while i + 10 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // SOF0..SOF15 except DHT, JPG and DAC
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let num_components = data[i + 9];
            return Ok(JpegInfo {
                width,
                height,
                num_components,
            });
        }

        if i + 4 < data.len() {
            let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            if length < 2 {
                break;
            }
            i += 2 + length;
        } else {
            break;
        }
    }

    Err(PdfError::ImageError("Could not parse JPEG info".to_string()))
}

/// Get PNG dimensions and transparency from the chunk headers
fn get_png_info(data: &[u8]) -> Result<ImageInfo> {
    // Signature (8) + IHDR length (4) + "IHDR" (4) + width (4) + height (4)
    // + bit depth (1) + color type (1)
    if data.len() < 26 {
        return Err(PdfError::ImageError("PNG data too short".to_string()));
    }
    if &data[12..16] != b"IHDR" {
        return Err(PdfError::ImageError(
            "Invalid PNG: IHDR not found".to_string(),
        ));
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);

    // Color types 4 (gray + alpha) and 6 (RGBA) carry an alpha channel;
    // any other type is transparent only with a tRNS chunk before IDAT
    let color_type = data[25];
    let has_alpha = matches!(color_type, 4 | 6) || has_trns_chunk(data);

    Ok(ImageInfo {
        width,
        height,
        has_alpha,
    })
}

fn has_trns_chunk(data: &[u8]) -> bool {
    let mut i = PNG_SIGNATURE.len();
    while i + 8 <= data.len() {
        let length = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        match &data[i + 4..i + 8] {
            b"tRNS" => return true,
            b"IDAT" | b"IEND" => return false,
            _ => {}
        }
        // length + type + data + CRC
        i = match i.checked_add(12 + length) {
            Some(next) => next,
            None => return false,
        };
    }
    false
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space ("DeviceRGB", "DeviceGray", "DeviceCMYK")
    pub color_space: String,
    /// Bits per component
    pub bits_per_component: u8,
    /// PDF filter ("DCTDecode" for JPEG, "FlateDecode" for raw samples)
    pub filter: String,
    /// Encoded image data
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha samples, embedded as the soft mask
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageXObject {
    /// Create XObject from JPEG data
    ///
    /// JPEG data is embedded as-is with the DCTDecode filter.
    pub fn from_jpeg(data: &[u8]) -> Result<Self> {
        let info = get_jpeg_info(data)?;

        let color_space = match info.num_components {
            1 => "DeviceGray",
            4 => "DeviceCMYK",
            _ => "DeviceRGB",
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space: color_space.to_string(),
            bits_per_component: 8,
            filter: "DCTDecode".to_string(),
            data: data.to_vec(),
            soft_mask: None,
        })
    }

    /// Create XObject from PNG data
    ///
    /// PNG samples are decoded and stored losslessly with FlateDecode. An
    /// alpha channel becomes a soft mask.
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let mut reader = ImageReader::new(Cursor::new(data));
        reader.set_format(image::ImageFormat::Png);
        let image = reader.decode()?;
        Self::lossless(&image)
    }

    /// Create XObject from a decoded image
    ///
    /// Images with an alpha channel are stored losslessly with a soft mask;
    /// opaque images are re-encoded as JPEG.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        if image.color().has_alpha() {
            Self::lossless(image)
        } else {
            let jpeg = encode_jpeg(image)?;
            Self::from_jpeg(&jpeg)
        }
    }

    /// Flate-compressed 8-bit samples plus optional soft mask
    fn lossless(image: &DynamicImage) -> Result<Self> {
        let color = image.color();
        let is_gray = !color.has_color();

        let (samples, color_space) = if is_gray {
            (image.to_luma8().into_raw(), "DeviceGray")
        } else {
            (image.to_rgb8().into_raw(), "DeviceRGB")
        };

        let soft_mask = if color.has_alpha() {
            let alpha: Vec<u8> = if is_gray {
                image.to_luma_alpha8().pixels().map(|p| p[1]).collect()
            } else {
                image.to_rgba8().pixels().map(|p| p[3]).collect()
            };
            Some(deflate(&alpha)?)
        } else {
            None
        };

        Ok(Self {
            width: image.width(),
            height: image.height(),
            color_space: color_space.to_string(),
            bits_per_component: 8,
            filter: "FlateDecode".to_string(),
            data: deflate(&samples)?,
            soft_mask,
        })
    }

    /// Convert to lopdf Stream object
    ///
    /// The soft mask, if any, is a separate object; see `soft_mask_stream`.
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = image_dict(self.width, self.height, &self.color_space, &self.filter);
        dict.set("BitsPerComponent", self.bits_per_component as i64);
        dict.set("Length", self.data.len() as i64);
        if self.color_space == "DeviceCMYK" && self.filter == "DCTDecode" {
            // Adobe CMYK JPEGs store inverted samples
            dict.set(
                "Decode",
                Object::Array(
                    [1, 0, 1, 0, 1, 0, 1, 0]
                        .into_iter()
                        .map(Object::Integer)
                        .collect(),
                ),
            );
        }

        Stream::new(dict, self.data.clone())
    }

    /// Soft mask as a DeviceGray image stream
    pub fn soft_mask_stream(&self) -> Option<Stream> {
        self.soft_mask.as_ref().map(|alpha| {
            let mut dict = image_dict(self.width, self.height, "DeviceGray", "FlateDecode");
            dict.set("BitsPerComponent", 8_i64);
            dict.set("Length", alpha.len() as i64);
            Stream::new(dict, alpha.clone())
        })
    }
}

fn image_dict(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", width as i64);
    dict.set("Height", height as i64);
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    dict
}

/// Encode an opaque image as baseline JPEG
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    // The JPEG encoder only takes 8-bit gray or RGB
    let image = if image.color().has_color() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        DynamicImage::ImageLuma8(image.to_luma8())
    };

    let mut buffer = Vec::new();
    image.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))?;
    Ok(buffer)
}

/// Zlib-compress data for the FlateDecode filter
fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Generate operators to draw image at position
///
/// # Arguments
/// * `image_name` - Image resource name (e.g., "p4p_image_0")
/// * `x` - X coordinate in points
/// * `y` - Y coordinate in points (from bottom, PDF coordinates)
/// * `width` - Image width in points
/// * `height` - Image height in points
///
/// # Returns
/// PDF content stream operators as bytes
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    // q / w 0 0 h x y cm / Do / Q
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}
