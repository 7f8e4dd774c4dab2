//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with format sniffing |
//! | **Resize → PNG** | `resize_exact` (Lanczos3) + `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::target_dimensions;
pub use operations::{RenderConfig, RenderedIcon, plan_icon, render_icon};
pub use params::{Compression, Density, ResizeFilter, ResizeParams};
pub use rust_backend::{RustBackend, supported_input_extensions};
