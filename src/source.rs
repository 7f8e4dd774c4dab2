//! Opening the source image.
//!
//! An input arrives either as a filesystem path or as a `file://` URL (what a
//! drag source or a desktop launcher hands over). [`resolve_input`] turns both
//! into a path; [`SourceImage::open`] decodes it once and keeps the bitmap in
//! memory together with the path it came from, so the export can derive
//! output filenames from it.
//!
//! A [`Session`] holds at most one source at a time. Opening another image
//! replaces the current one wholesale; exporting requires one to be loaded.

use crate::imaging::{BackendError, ImageBackend};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source image not found: {0}")]
    NotFound(PathBuf),
    #[error("Could not open image: {0}")]
    Decode(#[from] BackendError),
    #[error("Invalid file URL: {0}")]
    InvalidUrl(String),
    #[error("No image loaded")]
    NoImage,
}

const FILE_URL_PREFIX: &str = "file://";

/// Resolve a user-supplied input into a filesystem path.
///
/// `file://` URLs are decoded (percent-escapes included); anything else is
/// taken as a plain path.
pub fn resolve_input(input: &str) -> Result<PathBuf, SourceError> {
    let trimmed = input.trim();
    let is_file_url = trimmed
        .get(..FILE_URL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FILE_URL_PREFIX));
    if !is_file_url {
        return Ok(PathBuf::from(trimmed));
    }
    let url =
        Url::parse(trimmed).map_err(|e| SourceError::InvalidUrl(format!("{trimmed}: {e}")))?;
    url.to_file_path()
        .map_err(|()| SourceError::InvalidUrl(trimmed.to_string()))
}

/// A decoded image and the file it was read from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    pub path: PathBuf,
}

impl SourceImage {
    pub fn open(backend: &impl ImageBackend, path: &Path) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let image = backend.decode(path)?;
        Ok(Self {
            image,
            path: path.to_path_buf(),
        })
    }

    /// Last path component with its extension removed: `art/Icon.png` → `Icon`.
    pub fn base_name(&self) -> String {
        base_name(&self.path)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The currently loaded image, if any.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<SourceImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` and make it the current image.
    ///
    /// On failure the previously loaded image stays current.
    pub fn open(&mut self, backend: &impl ImageBackend, path: &Path) -> Result<(), SourceError> {
        self.current = Some(SourceImage::open(backend, path)?);
        Ok(())
    }

    /// The image an export would read. Fails with [`SourceError::NoImage`]
    /// until one has been opened.
    pub fn current(&self) -> Result<&SourceImage, SourceError> {
        self.current.as_ref().ok_or(SourceError::NoImage)
    }
}
