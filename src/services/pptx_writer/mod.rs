//! Office Open XML presentation writer.
//!
//! Pages are written in order; within a page every element is emitted in the
//! order the layout produced it, so later elements paint over earlier ones.

pub mod inspect;
mod parts;
mod shapes;

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{PageDescriptor, Theme};

pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// English Metric Units per inch.
pub(crate) const EMU_PER_INCH: f64 = 914_400.0;
/// English Metric Units per point.
pub(crate) const EMU_PER_POINT: f64 = 12_700.0;

pub(crate) fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Document-level properties written to `docProps`.
#[derive(Clone, Debug)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub company: String,
    pub producer: String,
    pub created: DateTime<Utc>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            author: String::new(),
            company: String::new(),
            producer: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).to_string(),
            created: Utc::now(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }
}

/// Serializes laid-out pages into a `.pptx` package held in memory.
pub fn serialize(
    pages: &[PageDescriptor],
    theme: &Theme,
    metadata: &DocumentMetadata,
) -> AppResult<Vec<u8>> {
    let mut package = Package::new();
    let count = pages.len();

    package.add("[Content_Types].xml", &parts::content_types(count))?;
    package.add("_rels/.rels", parts::ROOT_RELS)?;
    package.add("docProps/core.xml", &parts::core_properties(metadata)?)?;
    package.add("docProps/app.xml", &parts::app_properties(metadata, count)?)?;
    package.add("ppt/presentation.xml", &parts::presentation(count)?)?;
    package.add("ppt/_rels/presentation.xml.rels", &parts::presentation_rels(count)?)?;
    package.add("ppt/slideMasters/slideMaster1.xml", parts::SLIDE_MASTER)?;
    package.add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        parts::SLIDE_MASTER_RELS,
    )?;
    package.add("ppt/slideLayouts/slideLayout1.xml", parts::SLIDE_LAYOUT)?;
    package.add(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        parts::SLIDE_LAYOUT_RELS,
    )?;
    package.add("ppt/theme/theme1.xml", &parts::theme(theme)?)?;
    package.add("ppt/presProps.xml", parts::PRES_PROPS)?;
    package.add("ppt/viewProps.xml", parts::VIEW_PROPS)?;
    package.add("ppt/tableStyles.xml", parts::TABLE_STYLES)?;

    for (i, page) in pages.iter().enumerate() {
        let number = i + 1;
        package.add(
            &format!("ppt/slides/slide{}.xml", number),
            &shapes::slide(page)?,
        )?;
        package.add(
            &format!("ppt/slides/_rels/slide{}.xml.rels", number),
            parts::SLIDE_RELS,
        )?;
    }

    package.finish()
}

struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl Package {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn add(&mut self, path: &str, content: &str) -> AppResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes()).map_err(|e| {
            AppError::SerializationError(format!("Failed to write part {}: {}", path, e))
        })?;
        Ok(())
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}
