//! Image-to-page orchestration
//!
//! Ties the layout engine to the document builder: computes where each image
//! goes, crops what would fall off the page, and appends one page per image.

use crate::image::{detect_format, probe, ImageFormat, ImageXObject};
use crate::{PdfDocument, PdfError, Result};
use image::DynamicImage;
use page_layout::{layout, render, CropRect, ImageOptions, PageSize, Placement, Unit};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Builds a PDF with one placed image per page
///
/// # Example
/// ```ignore
/// let mut generator = Generator::new(Unit::Point, PageSize::a4())?;
/// generator.add_image(&image, ImageOptions::new(Mode::Fill))?;
/// let bytes = generator.to_bytes()?;
/// ```
pub struct Generator {
    doc: PdfDocument,
    /// Crop the parts of an image that fall outside the page
    crop_overflow: bool,
}

impl Generator {
    /// Create a generator
    ///
    /// # Arguments
    /// * `unit` - Working unit for all geometry
    /// * `page_size` - Size of every page (any unit)
    pub fn new(unit: Unit, page_size: PageSize) -> Result<Self> {
        Ok(Self {
            doc: PdfDocument::new(unit, page_size)?,
            crop_overflow: true,
        })
    }

    /// Create a generator working in millimeters
    pub fn with_page_size(page_size: PageSize) -> Result<Self> {
        Self::new(Unit::Millimeter, page_size)
    }

    /// Enable or disable cropping of overflowing images (enabled by default)
    ///
    /// Without cropping, the whole image is embedded and the page edge
    /// clips it when viewed.
    pub fn with_crop_overflow(mut self, crop_overflow: bool) -> Self {
        self.crop_overflow = crop_overflow;
        self
    }

    /// Working unit
    pub fn unit(&self) -> Unit {
        self.doc.unit()
    }

    /// Page width and height in the working unit
    pub fn page_size(&self) -> (f64, f64) {
        let size = self.doc.page_size();
        (size.width, size.height)
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    /// Where an image of the given pixel size would go, in the working unit
    pub fn image_layout(
        &self,
        width_px: u32,
        height_px: u32,
        options: &ImageOptions,
    ) -> Result<Placement> {
        Ok(layout(
            self.doc.page_size(),
            self.unit(),
            width_px,
            height_px,
            options,
        )?)
    }

    /// Add a page showing a decoded image
    ///
    /// Images with alpha are embedded losslessly with a soft mask, opaque
    /// images as JPEG.
    ///
    /// # Returns
    /// The image's resource name
    pub fn add_image(&mut self, image: &DynamicImage, options: ImageOptions) -> Result<String> {
        let (placement, crop) = self.plan(image.width(), image.height(), &options)?;

        if crop.must_crop && self.crop_overflow {
            return self.add_cropped(image, &placement, &crop);
        }

        let xobject = ImageXObject::from_dynamic(image)?;
        self.add_placed(&xobject, &placement)
    }

    /// Add a page showing an encoded image
    ///
    /// # Arguments
    /// * `data` - JPEG or PNG bytes
    /// * `format` - Format of `data`
    /// * `options` - Placement mode and scale
    ///
    /// JPEG data is embedded without re-encoding unless it has to be cropped.
    pub fn add_image_bytes(
        &mut self,
        data: &[u8],
        format: ImageFormat,
        options: ImageOptions,
    ) -> Result<String> {
        let info = probe(data, format)?;
        let (placement, crop) = self.plan(info.width, info.height, &options)?;

        if crop.must_crop && self.crop_overflow {
            let image = image::load_from_memory_with_format(data, format.into())?;
            return self.add_cropped(&image, &placement, &crop);
        }

        let xobject = match format {
            ImageFormat::Jpeg => ImageXObject::from_jpeg(data)?,
            ImageFormat::Png => ImageXObject::from_png(data)?,
        };
        self.add_placed(&xobject, &placement)
    }

    /// Add a page showing an image file
    ///
    /// The format comes from the file extension, or from the file's magic
    /// bytes when the extension is missing or unknown.
    pub fn add_image_file<P: AsRef<Path>>(&mut self, path: P, options: ImageOptions) -> Result<String> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let hint = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(ImageFormat::from_extension);
        let format = match hint {
            Some(Ok(format)) => format,
            Some(Err(PdfError::UnsupportedFormat(ext))) => {
                warn!(path = %path.display(), %ext, "Unknown image extension, sniffing content");
                detect_format(&data)?
            }
            Some(Err(e)) => return Err(e),
            None => detect_format(&data)?,
        };

        self.add_image_bytes(&data, format, options)
    }

    /// Write the PDF to any writer
    pub fn write<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.doc.save_to(target)
    }

    /// Write the PDF to a file
    pub fn write_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc.save(path)
    }

    /// Render the PDF to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.doc.to_bytes()
    }

    /// Borrow the underlying document
    pub fn document(&self) -> &PdfDocument {
        &self.doc
    }

    fn plan(
        &self,
        width_px: u32,
        height_px: u32,
        options: &ImageOptions,
    ) -> Result<(Placement, CropRect)> {
        let (placement, crop) = render(
            self.doc.page_size(),
            self.unit(),
            width_px,
            height_px,
            options,
        )?;
        debug!(
            width_px,
            height_px,
            mode = ?options.mode,
            scale = options.effective_scale(),
            x = placement.x,
            y = placement.y,
            width = placement.width,
            height = placement.height,
            must_crop = crop.must_crop,
            "Computed image layout"
        );
        Ok((placement, crop))
    }

    /// Embed only the visible part of `image`, drawn where it sat uncropped
    fn add_cropped(
        &mut self,
        image: &DynamicImage,
        placement: &Placement,
        crop: &CropRect,
    ) -> Result<String> {
        debug!(
            x1 = crop.x1,
            y1 = crop.y1,
            x2 = crop.x2,
            y2 = crop.y2,
            "Cropping image to page"
        );
        let cropped = image.crop_imm(crop.x1, crop.y1, crop.width(), crop.height());
        let visible = crop.visible_placement(placement, image.width(), image.height());

        let xobject = ImageXObject::from_dynamic(&cropped)?;
        self.add_placed(&xobject, &visible)
    }

    fn add_placed(&mut self, xobject: &ImageXObject, placement: &Placement) -> Result<String> {
        self.doc.add_image_page(
            xobject,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        )
    }
}
