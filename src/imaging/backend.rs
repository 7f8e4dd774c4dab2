//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: decode, and render (resize + PNG encode).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, everything
//! statically linked into the binary.

use super::params::ResizeParams;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared across rayon workers during a
/// parallel export.
pub trait ImageBackend: Sync {
    /// Decode an image file into memory.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Resize `image` to exactly `params.width × params.height` and encode it
    /// as PNG. An empty buffer means the encoder produced nothing.
    fn render_png(
        &self,
        image: &DynamicImage,
        params: &ResizeParams,
    ) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{Compression, ResizeFilter};
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
        /// Render calls targeting this width return an empty buffer.
        pub empty_output_width: Option<u32>,
        /// Render calls targeting this width fail outright.
        pub failing_width: Option<u32>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Render {
            width: u32,
            height: u32,
            filter: ResizeFilter,
            compression: Compression,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_empty_output_at(width: u32) -> Self {
            Self {
                empty_output_width: Some(width),
                ..Self::default()
            }
        }

        pub fn with_failure_at(width: u32) -> Self {
            Self {
                failing_width: Some(width),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Widths of every render call, in call order.
        pub fn rendered_widths(&self) -> Vec<u32> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Render { width, .. } => Some(width),
                    _ => None,
                })
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));
            Ok(DynamicImage::new_rgba8(4, 4))
        }

        fn render_png(
            &self,
            _image: &DynamicImage,
            params: &ResizeParams,
        ) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Render {
                width: params.width,
                height: params.height,
                filter: params.filter,
                compression: params.compression,
            });
            if self.failing_width == Some(params.width) {
                return Err(BackendError::ProcessingFailed("mock failure".into()));
            }
            if self.empty_output_width == Some(params.width) {
                return Ok(Vec::new());
            }
            Ok(format!("{}x{}", params.width, params.height).into_bytes())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::new();

        let image = backend.decode(Path::new("/test/image.png")).unwrap();
        assert_eq!((image.width(), image.height()), (4, 4));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_records_render() {
        let backend = MockBackend::new();
        let image = DynamicImage::new_rgba8(8, 8);

        let bytes = backend
            .render_png(
                &image,
                &ResizeParams {
                    width: 64,
                    height: 64,
                    filter: ResizeFilter::Lanczos3,
                    compression: Compression::Best,
                },
            )
            .unwrap();

        assert_eq!(bytes, b"64x64");
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Render {
                width: 64,
                height: 64,
                ..
            }
        ));
    }

    #[test]
    fn mock_empty_output() {
        let backend = MockBackend::with_empty_output_at(32);
        let image = DynamicImage::new_rgba8(8, 8);
        let params = ResizeParams {
            width: 32,
            height: 32,
            filter: ResizeFilter::default(),
            compression: Compression::default(),
        };
        assert!(backend.render_png(&image, &params).unwrap().is_empty());
    }
}
