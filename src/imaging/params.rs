//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the export pipeline (which decides which variants to
//! create) and the [`backend`](super::backend) (which does the pixel work).
//!
//! ## Types
//!
//! - [`Density`] — Logical-to-pixel ratio of the rendering surface (default 1.0).
//! - [`ResizeFilter`] — Interpolation kernel used when scaling.
//! - [`Compression`] — PNG deflate effort.
//! - [`ResizeParams`] — Full specification for one resize + encode.

use serde::{Deserialize, Serialize};

/// Points-to-pixels ratio of the surface an icon is rendered on.
///
/// A headless export has no display, so the ratio is supplied by the caller.
/// Values outside [`Density::MIN`]`..=`[`Density::MAX`] (NaN included) fall
/// back to 1.0 on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f64);

impl Density {
    pub const MIN: f64 = 0.001;
    pub const MAX: f64 = 1000.0;

    pub fn new(value: f64) -> Self {
        Self::try_new(value).unwrap_or_default()
    }

    /// `None` unless `value` lies within `MIN..=MAX`.
    pub fn try_new(value: f64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Interpolation kernel for resizing.
///
/// `Lanczos3` is the high-quality default; the others trade sharpness for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

/// PNG compression effort. Affects file size and encode time, never pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    Fast,
    Default,
    #[default]
    Best,
}

/// Parameters for a single resize-and-encode operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeParams {
    /// Exact output width in pixels.
    pub width: u32,
    /// Exact output height in pixels.
    pub height: u32,
    pub filter: ResizeFilter,
    pub compression: Compression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_rejects_invalid_values() {
        assert_eq!(Density::new(0.0).value(), 1.0);
        assert_eq!(Density::new(-2.0).value(), 1.0);
        assert_eq!(Density::new(f64::NAN).value(), 1.0);
        assert_eq!(Density::new(f64::INFINITY).value(), 1.0);
        assert_eq!(Density::new(2.0).value(), 2.0);
    }

    #[test]
    fn density_outside_bounds_falls_back() {
        assert_eq!(Density::new(1e-310).value(), 1.0);
        assert_eq!(Density::new(1e6).value(), 1.0);
        assert!(Density::try_new(1e-310).is_none());
        assert_eq!(Density::try_new(Density::MIN).map(Density::value), Some(0.001));
        assert_eq!(Density::try_new(Density::MAX).map(Density::value), Some(1000.0));
    }

    #[test]
    fn density_default_is_one() {
        assert_eq!(Density::default().value(), 1.0);
    }

    #[test]
    fn filter_names_are_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            filter: ResizeFilter,
        }
        let w: Wrapper = toml::from_str(r#"filter = "catmull-rom""#).unwrap();
        assert_eq!(w.filter, ResizeFilter::CatmullRom);
    }

    #[test]
    fn defaults_favor_quality() {
        assert_eq!(ResizeFilter::default(), ResizeFilter::Lanczos3);
        assert_eq!(Compression::default(), Compression::Best);
    }
}
