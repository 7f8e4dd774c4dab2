//! Icon set export.
//!
//! Takes a decoded source image and writes one PNG per catalog entry into a
//! destination directory:
//!
//! ```text
//! Icon.png  ──►  out/
//!                ├── Icon_16x16@1x.png
//!                ├── Icon_16x16@2x.png
//!                ├── ...
//!                └── Icon_512x512@2x.png
//! ```
//!
//! ## Failure
//!
//! The export is fail-fast: the first entry that cannot be rendered or
//! written aborts the rest. Files written before the failure stay on disk;
//! there is no rollback. Existing files with the same name are overwritten.
//!
//! ## Destination
//!
//! The destination is always a directory, never a suggested file name. Output
//! names are derived from the source's base name, so the caller only picks
//! where they go.
//!
//! ## Parallel Processing
//!
//! Entries are independent (distinct output names, read-only source), so with
//! [`ExportOptions::parallel`] they are rendered on the
//! [rayon](https://docs.rs/rayon) pool. The first error still wins, but which
//! other entries completed before it is then unspecified.

use crate::catalog::{ImageSize, Platform};
use crate::imaging::{ImageBackend, RenderConfig, render_icon};
use crate::source::SourceImage;
use image::DynamicImage;
use rayon::prelude::*;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Error generating resized image {file_name}: {detail}")]
    ImageData { file_name: String, detail: String },
    #[error("Error saving file: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings for one export run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub render: RenderConfig,
    pub parallel: bool,
}

/// Everything an export needs to know about its input and output.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub platform: Platform,
    pub image: &'a DynamicImage,
    /// Prefix of every output filename.
    pub base_name: &'a str,
    pub destination: &'a Path,
    pub catalog: &'a [ImageSize],
}

impl<'a> ExportRequest<'a> {
    /// Request for a platform's full catalog, named after the source file.
    pub fn for_platform(
        source: &'a SourceImage,
        base_name: &'a str,
        platform: Platform,
        destination: &'a Path,
    ) -> Self {
        Self {
            platform,
            image: &source.image,
            base_name,
            destination,
            catalog: platform.catalog(),
        }
    }
}

/// Progress events emitted during an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Started {
        platform: Platform,
        destination: PathBuf,
        count: usize,
    },
    FileWritten {
        /// 1-based catalog position.
        index: usize,
        file_name: String,
        width: u32,
        height: u32,
    },
}

/// One file produced by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub file_name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Files produced by a successful export, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub platform: Platform,
    pub destination: PathBuf,
    pub files: Vec<WrittenFile>,
}

/// Export one PNG per catalog entry into `request.destination`.
pub fn export_all(
    backend: &impl ImageBackend,
    request: &ExportRequest<'_>,
    options: &ExportOptions,
    events: Option<Sender<ExportEvent>>,
) -> Result<ExportReport, ExportError> {
    check_destination(request.destination)?;

    if let Some(tx) = &events {
        tx.send(ExportEvent::Started {
            platform: request.platform,
            destination: request.destination.to_path_buf(),
            count: request.catalog.len(),
        })
        .ok();
    }

    let export_entry = |(pos, size): (usize, &ImageSize)| -> Result<WrittenFile, ExportError> {
        let written = export_one(backend, request, size, &options.render)?;
        if let Some(tx) = &events {
            tx.send(ExportEvent::FileWritten {
                index: pos + 1,
                file_name: written.file_name.clone(),
                width: written.width,
                height: written.height,
            })
            .ok();
        }
        Ok(written)
    };

    let files = if options.parallel {
        request
            .catalog
            .par_iter()
            .enumerate()
            .map(export_entry)
            .collect::<Result<Vec<_>, ExportError>>()?
    } else {
        request
            .catalog
            .iter()
            .enumerate()
            .map(export_entry)
            .collect::<Result<Vec<_>, ExportError>>()?
    };

    Ok(ExportReport {
        platform: request.platform,
        destination: request.destination.to_path_buf(),
        files,
    })
}

/// Render, encode and write a single catalog entry.
fn export_one(
    backend: &impl ImageBackend,
    request: &ExportRequest<'_>,
    size: &ImageSize,
    config: &RenderConfig,
) -> Result<WrittenFile, ExportError> {
    let file_name = size.file_name(request.base_name);

    let icon = render_icon(backend, request.image, size, config).map_err(|e| {
        ExportError::ImageData {
            file_name: file_name.clone(),
            detail: e.to_string(),
        }
    })?;
    if icon.png.is_empty() {
        return Err(ExportError::ImageData {
            file_name,
            detail: "encoder produced no data".into(),
        });
    }

    let path = request.destination.join(&file_name);
    std::fs::write(&path, &icon.png).map_err(|source| ExportError::FileWrite {
        path: path.clone(),
        source,
    })?;

    Ok(WrittenFile {
        file_name,
        path,
        width: icon.width,
        height: icon.height,
        bytes: icon.png.len(),
    })
}

/// Reject destinations that are not existing directories before any work.
fn check_destination(destination: &Path) -> Result<(), ExportError> {
    if destination.is_dir() {
        return Ok(());
    }
    let source = if destination.exists() {
        io::Error::new(io::ErrorKind::NotADirectory, "destination is not a directory")
    } else {
        io::Error::new(io::ErrorKind::NotFound, "destination directory does not exist")
    };
    Err(ExportError::FileWrite {
        path: destination.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::imaging::{Density, RustBackend};
    use crate::test_helpers::{dir_file_names, png_dimensions};

    fn request<'a>(
        image: &'a DynamicImage,
        destination: &'a Path,
        platform: Platform,
    ) -> ExportRequest<'a> {
        ExportRequest {
            platform,
            image,
            base_name: "Icon",
            destination,
            catalog: platform.catalog(),
        }
    }

    #[test]
    fn writes_one_file_per_entry() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        let backend = MockBackend::new();

        let report = export_all(
            &backend,
            &request(&image, tmp.path(), Platform::Ios),
            &ExportOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(report.platform, Platform::Ios);
        assert_eq!(report.files.len(), 15);
        assert_eq!(dir_file_names(tmp.path()).len(), 15);
        assert!(tmp.path().join("Icon_83.5x83.5@2x.png").is_file());
        assert!(tmp.path().join("Icon_1024x1024@1x.png").is_file());
    }

    #[test]
    fn report_follows_catalog_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);

        let report = export_all(
            &MockBackend::new(),
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            None,
        )
        .unwrap();

        let widths: Vec<u32> = report.files.iter().map(|f| f.width).collect();
        assert_eq!(widths, [16, 32, 32, 64, 128, 256, 256, 512, 512, 1024]);
        assert_eq!(report.files[1].file_name, "Icon_16x16@2x.png");
    }

    #[test]
    fn empty_encoder_output_is_image_data_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        // 128@1 is the fifth macOS entry
        let backend = MockBackend::with_empty_output_at(128);

        let result = export_all(
            &backend,
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            None,
        );

        match result {
            Err(ExportError::ImageData { file_name, .. }) => {
                assert_eq!(file_name, "Icon_128x128@1x.png")
            }
            other => panic!("expected ImageData error, got {other:?}"),
        }
        // 16@1, 16@2, 32@1, 32@2 written before the failing 128@1
        assert_eq!(dir_file_names(tmp.path()).len(), 4);
        assert_eq!(backend.rendered_widths(), [16, 32, 32, 64, 128]);
    }

    #[test]
    fn backend_failure_is_image_data_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        let backend = MockBackend::with_failure_at(16);

        let result = export_all(
            &backend,
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            None,
        );

        assert!(matches!(result, Err(ExportError::ImageData { .. })));
        assert!(dir_file_names(tmp.path()).is_empty());
        assert_eq!(backend.rendered_widths(), [16]);
    }

    #[test]
    fn write_failure_stops_export_and_keeps_earlier_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        // A directory squatting on the third output name makes that write fail.
        std::fs::create_dir(tmp.path().join("Icon_32x32@1x.png")).unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        let backend = MockBackend::new();

        let result = export_all(
            &backend,
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            None,
        );

        match result {
            Err(ExportError::FileWrite { path, .. }) => {
                assert!(path.ends_with("Icon_32x32@1x.png"))
            }
            other => panic!("expected FileWrite error, got {other:?}"),
        }
        assert_eq!(
            dir_file_names(tmp.path()),
            ["Icon_16x16@1x.png", "Icon_16x16@2x.png", "Icon_32x32@1x.png"]
        );
        assert_eq!(backend.rendered_widths().len(), 3);
    }

    #[test]
    fn missing_destination_fails_before_rendering() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("not-there");
        let image = DynamicImage::new_rgba8(4, 4);
        let backend = MockBackend::new();

        let result = export_all(
            &backend,
            &request(&image, &missing, Platform::Ios),
            &ExportOptions::default(),
            None,
        );

        assert!(matches!(result, Err(ExportError::FileWrite { .. })));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn file_destination_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("Icon.png");
        std::fs::write(&file, b"x").unwrap();
        let image = DynamicImage::new_rgba8(4, 4);

        let result = export_all(
            &MockBackend::new(),
            &request(&image, &file, Platform::Ios),
            &ExportOptions::default(),
            None,
        );

        match result {
            Err(ExportError::FileWrite { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotADirectory)
            }
            other => panic!("expected FileWrite error, got {other:?}"),
        }
    }

    #[test]
    fn error_messages() {
        let data = ExportError::ImageData {
            file_name: "Icon_16x16@1x.png".into(),
            detail: "encoder produced no data".into(),
        };
        assert_eq!(
            data.to_string(),
            "Error generating resized image Icon_16x16@1x.png: encoder produced no data"
        );

        let write = ExportError::FileWrite {
            path: "/x".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(write.to_string(), "Error saving file: permission denied");
    }

    #[test]
    fn events_are_emitted_in_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        let (tx, rx) = std::sync::mpsc::channel();

        export_all(
            &MockBackend::new(),
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            Some(tx),
        )
        .unwrap();

        let events: Vec<ExportEvent> = rx.iter().collect();
        assert_eq!(events.len(), 11);
        assert_eq!(
            events[0],
            ExportEvent::Started {
                platform: Platform::Macos,
                destination: tmp.path().to_path_buf(),
                count: 10
            }
        );
        assert_eq!(
            events[10],
            ExportEvent::FileWritten {
                index: 10,
                file_name: "Icon_512x512@2x.png".into(),
                width: 1024,
                height: 1024,
            }
        );
    }

    #[test]
    fn json_report_names_platform() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);

        let report = export_all(
            &MockBackend::new(),
            &request(&image, tmp.path(), Platform::Macos),
            &ExportOptions::default(),
            None,
        )
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["platform"], "macos");
        assert_eq!(json["files"].as_array().unwrap().len(), 10);
        assert_eq!(json["files"][0]["file_name"], "Icon_16x16@1x.png");
    }

    #[test]
    fn parallel_export_matches_sequential() {
        let seq_dir = tempfile::TempDir::new().unwrap();
        let par_dir = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(4, 4);
        let backend = MockBackend::new();

        let seq = export_all(
            &backend,
            &request(&image, seq_dir.path(), Platform::Ios),
            &ExportOptions::default(),
            None,
        )
        .unwrap();
        let par = export_all(
            &backend,
            &request(&image, par_dir.path(), Platform::Ios),
            &ExportOptions {
                parallel: true,
                ..ExportOptions::default()
            },
            None,
        )
        .unwrap();

        let names = |r: &ExportReport| -> Vec<String> {
            r.files.iter().map(|f| f.file_name.clone()).collect()
        };
        assert_eq!(names(&seq), names(&par));
        assert_eq!(dir_file_names(seq_dir.path()), dir_file_names(par_dir.path()));
    }

    #[test]
    fn real_backend_produces_exact_pixel_sizes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = DynamicImage::new_rgba8(300, 300);
        let options = ExportOptions {
            render: RenderConfig {
                density: Density::new(2.0),
                ..RenderConfig::default()
            },
            parallel: true,
        };

        let report = export_all(
            &RustBackend::new(),
            &request(&image, tmp.path(), Platform::Ios),
            &options,
            None,
        )
        .unwrap();

        for (file, size) in report.files.iter().zip(Platform::Ios.catalog()) {
            assert_eq!(png_dimensions(&file.path), size.pixel_size(), "{}", file.file_name);
        }
    }
}
