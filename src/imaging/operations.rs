//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::target_dimensions;
use super::params::{Compression, Density, ResizeFilter, ResizeParams};
use crate::catalog::ImageSize;
use image::DynamicImage;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Rendering settings shared by every icon in one export.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub density: Density,
    pub filter: ResizeFilter,
    pub compression: Compression,
}

/// A rendered, PNG-encoded icon.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Plan a render without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_icon(size: &ImageSize, config: &RenderConfig) -> ResizeParams {
    let (width, height) = target_dimensions(size, config.density);
    ResizeParams {
        width,
        height,
        filter: config.filter,
        compression: config.compression,
    }
}

/// Resize `source` for one catalog entry and encode it as PNG.
pub fn render_icon(
    backend: &impl ImageBackend,
    source: &DynamicImage,
    size: &ImageSize,
    config: &RenderConfig,
) -> Result<RenderedIcon> {
    let params = plan_icon(size, config);
    let png = backend.render_png(source, &params)?;
    Ok(RenderedIcon {
        width: params.width,
        height: params.height,
        png,
    })
}
