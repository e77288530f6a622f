//! PDF Document builder

use crate::image::{generate_image_operators, ImageXObject};
use crate::{PageSize, PdfError, Result, Unit};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of the XObject resource name given to each embedded image
const IMAGE_NAME_PREFIX: &str = "p4p_image_";

/// A PDF built page by page, one image per page
///
/// Geometry passed in is in the document's working unit with the origin at
/// the top-left page corner; it is converted to PDF points (bottom-left
/// origin) when the page is written.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Page objects in order
    page_ids: Vec<ObjectId>,
    /// Working unit of all geometry arguments
    unit: Unit,
    /// Page size in the working unit
    page_size: PageSize,
    /// Index of the next image resource name
    next_image_index: usize,
}

impl PdfDocument {
    /// Create an empty document
    ///
    /// # Arguments
    /// * `unit` - Working unit for page size and placement geometry
    /// * `page_size` - Size of every page (any unit)
    pub fn new(unit: Unit, page_size: PageSize) -> Result<Self> {
        page_size.validate()?;

        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            unit,
            page_size: page_size.convert(unit),
            next_image_index: 0,
        };
        doc.update_page_tree();

        debug!(
            unit = %unit,
            width = doc.page_size.width,
            height = doc.page_size.height,
            "Created PDF document"
        );
        Ok(doc)
    }

    /// Working unit of the document
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Page size in the working unit
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append a page showing `image` at the given position and size
    ///
    /// # Arguments
    /// * `image` - Image XObject to embed
    /// * `x` - Left edge in the working unit (may be negative)
    /// * `y` - Top edge in the working unit, from the top of the page (may be negative)
    /// * `width` - Drawn width in the working unit
    /// * `height` - Drawn height in the working unit
    ///
    /// # Returns
    /// The image's resource name (`p4p_image_0`, `p4p_image_1`, ...)
    pub fn add_image_page(
        &mut self,
        image: &ImageXObject,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<String> {
        let name = format!("{IMAGE_NAME_PREFIX}{}", self.next_image_index);
        self.next_image_index += 1;

        let mut stream = image.to_pdf_stream();
        if let Some(mask) = image.soft_mask_stream() {
            let mask_id = self.inner.add_object(mask);
            stream.dict.set("SMask", Object::Reference(mask_id));
        }
        let image_id = self.inner.add_object(stream);

        let page_width = self.unit.to_points(self.page_size.width);
        let page_height = self.unit.to_points(self.page_size.height);
        let x_pt = self.unit.to_points(x);
        let width_pt = self.unit.to_points(width);
        let height_pt = self.unit.to_points(height);
        // Convert Y coordinate from top-origin to PDF bottom-origin
        let y_pt = page_height - self.unit.to_points(y) - height_pt;

        let operators = generate_image_operators(&name, x_pt, y_pt, width_pt, height_pt);
        let contents_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), operators));

        let mut xobjects = Dictionary::new();
        xobjects.set(name.as_bytes(), Object::Reference(image_id));

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(page_width as f32),
                Object::Real(page_height as f32),
            ],
            "Resources" => dictionary! {
                "XObject" => xobjects,
            },
            "Contents" => contents_id,
        });
        self.page_ids.push(page_id);
        self.update_page_tree();

        info!(
            page = self.page_ids.len(),
            image = %name,
            width_px = image.width,
            height_px = image.height,
            "Added image page"
        );
        debug!(x = x_pt, y = y_pt, width = width_pt, height = height_pt, "Image placement in points");

        Ok(name)
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        info!(path = %path.display(), pages = self.page_count(), "Saved PDF");
        Ok(())
    }

    /// Write the document to any writer
    pub fn save_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.inner
            .save_to(target)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Rewrite the root Pages node from the current page list
    fn update_page_tree(&mut self) {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.inner.objects.insert(self.pages_id, Object::Dictionary(pages));
    }
}
