//! Pure calculation functions for icon dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Density;
use crate::catalog::ImageSize;

/// Size of the logical drawing canvas, in points, for a pixel target.
///
/// A surface with density `d` turns `n` points into `n × d` pixels, so a
/// bitmap of `pixels` pixels needs a canvas of `pixels / d` points.
pub fn canvas_points(pixels: u32, density: Density) -> f64 {
    pixels as f64 / density.value()
}

/// Pixels produced by rasterizing `points` on a surface of the given density.
pub fn rasterize(points: f64, density: Density) -> u32 {
    (points * density.value()).round() as u32
}

/// Final bitmap dimensions for a catalog entry rendered at `density`.
///
/// The canvas is sized in points and rasterized back at the same density, so
/// the result is the entry's pixel size whatever the density is. [`Density`]
/// is bounded, which keeps the round trip exact for every catalog dimension.
///
/// # Examples
/// ```
/// # use appicon_gen::catalog::ImageSize;
/// # use appicon_gen::imaging::{Density, target_dimensions};
/// let size = ImageSize::new(83.5, 2);
/// assert_eq!(target_dimensions(&size, Density::new(1.0)), (167, 167));
/// assert_eq!(target_dimensions(&size, Density::new(2.0)), (167, 167));
/// ```
pub fn target_dimensions(size: &ImageSize, density: Density) -> (u32, u32) {
    let (px_w, px_h) = size.pixel_size();
    let w = rasterize(canvas_points(px_w, density), density);
    let h = rasterize(canvas_points(px_h, density), density);
    (w.max(1), h.max(1))
}
