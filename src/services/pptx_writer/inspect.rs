//! Read-only checks on `.pptx` packages, ours or a collaborator's.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use crate::errors::{AppError, AppResult};

static SLIDE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide\d+\.xml$").expect("slide part pattern is valid"));
static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a:t>([^<]*)</a:t>").expect("text run pattern is valid"));

fn open(bytes: &[u8]) -> AppResult<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::SerializationError(format!("Not a presentation package: {}", e)))
}

/// Number of slide parts in the package.
pub fn slide_count(bytes: &[u8]) -> AppResult<usize> {
    let archive = open(bytes)?;
    Ok(archive
        .file_names()
        .filter(|name| SLIDE_PART.is_match(name))
        .count())
}

/// Reads one part as text.
pub fn part(bytes: &[u8], name: &str) -> AppResult<String> {
    let mut archive = open(bytes)?;
    let mut file = archive.by_name(name)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(|e| {
        AppError::SerializationError(format!("Failed to read part {}: {}", name, e))
    })?;
    Ok(content)
}

/// Text runs of slide `number` (1-based), in document order, still XML-escaped.
pub fn slide_text(bytes: &[u8], number: usize) -> AppResult<Vec<String>> {
    let xml = part(bytes, &format!("ppt/slides/slide{}.xml", number))?;
    Ok(TEXT_RUN
        .captures_iter(&xml)
        .map(|caps| caps[1].to_string())
        .collect())
}

/// Checks that bytes look like a presentation with at least one slide.
pub fn ensure_presentation(bytes: &[u8]) -> AppResult<usize> {
    let count = slide_count(bytes)?;
    if count == 0 {
        return Err(AppError::SerializationError(
            "Presentation package contains no slides".to_string(),
        ));
    }
    Ok(count)
}
