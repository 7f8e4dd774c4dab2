//! Per-platform icon size tables.
//!
//! Every icon variant is described by an [`ImageSize`]: a logical dimension in
//! points and a pixel-density multiplier. The exported bitmap is
//! `dimension × multiplier` pixels on each axis, and its filename carries a
//! suffix that encodes both:
//!
//! ```text
//! Icon_20x20@1x.png      20 × 1  =   20px
//! Icon_83.5x83.5@2x.png  83.5 × 2 = 167px
//! Icon_1024x1024@1x.png  marketing icon
//! ```
//!
//! The tables are compile-time constants. Order is stable so that export
//! output is deterministic, but nothing depends on it: each entry produces an
//! independently named file.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Largest logical dimension a catalog entry may have, in points.
pub const MAX_DIMENSION: f64 = 4096.0;

/// A single icon variant.
///
/// Fields are private so every value goes through [`ImageSize::new`], which
/// guarantees a positive dimension and a multiplier of 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    width: f64,
    height: f64,
    multiplier: u32,
}

impl ImageSize {
    /// A square icon of `dimension` points at `multiplier`x density.
    ///
    /// # Panics
    ///
    /// If `dimension` is not in `(0, MAX_DIMENSION]` or `multiplier` is not
    /// 1, 2 or 3. The static tables are checked at compile time.
    pub const fn new(dimension: f64, multiplier: u32) -> Self {
        assert!(
            dimension > 0.0 && dimension <= MAX_DIMENSION,
            "icon dimension out of range"
        );
        assert!(
            multiplier >= 1 && multiplier <= 3,
            "multiplier must be 1, 2 or 3"
        );
        Self {
            width: dimension,
            height: dimension,
            multiplier,
        }
    }

    /// Logical width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height in points. Always equal to the width for app icons.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel-density multiplier (1, 2 or 3).
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Pixel dimensions `(width, height)` of the rendered bitmap.
    ///
    /// Fractional results are rounded to the nearest pixel. Every built-in
    /// entry lands on a whole number (83.5 × 2 = 167).
    pub fn pixel_size(&self) -> (u32, u32) {
        let m = self.multiplier as f64;
        (
            (self.width * m).round() as u32,
            (self.height * m).round() as u32,
        )
    }

    /// Filename suffix `_{W}x{H}@{M}x`.
    ///
    /// Dimensions print without grouping separators and keep their fractional
    /// part only when there is one: `_1024x1024@1x`, `_83.5x83.5@2x`.
    pub fn file_suffix(&self) -> String {
        format!(
            "_{}x{}@{}x",
            format_dimension(self.width),
            format_dimension(self.height),
            self.multiplier
        )
    }

    /// Output filename for a source with the given base name.
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}{}.png", base_name, self.file_suffix())
    }
}

/// `f64`'s `Display` already omits a trailing `.0` and never groups digits.
fn format_dimension(value: f64) -> String {
    format!("{}", value)
}

/// Target operating system for an icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Macos,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Macos];

    /// The ordered size table for this platform.
    pub fn catalog(self) -> &'static [ImageSize] {
        match self {
            Platform::Ios => IOS_SIZES,
            Platform::Macos => MACOS_SIZES,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Macos => "macOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}' (expected 'ios' or 'macos')")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "macos" | "mac" | "osx" => Ok(Platform::Macos),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// iPhone, iPad and App Store marketing icons.
pub static IOS_SIZES: &[ImageSize] = &[
    ImageSize::new(20.0, 1),
    ImageSize::new(20.0, 2),
    ImageSize::new(20.0, 3),
    ImageSize::new(29.0, 1),
    ImageSize::new(29.0, 2),
    ImageSize::new(29.0, 3),
    ImageSize::new(40.0, 1),
    ImageSize::new(40.0, 2),
    ImageSize::new(40.0, 3),
    ImageSize::new(60.0, 2),
    ImageSize::new(60.0, 3),
    ImageSize::new(76.0, 1),
    ImageSize::new(76.0, 2),
    ImageSize::new(83.5, 2),
    ImageSize::new(1024.0, 1),
];

pub static MACOS_SIZES: &[ImageSize] = &[
    ImageSize::new(16.0, 1),
    ImageSize::new(16.0, 2),
    ImageSize::new(32.0, 1),
    ImageSize::new(32.0, 2),
    ImageSize::new(128.0, 1),
    ImageSize::new(128.0, 2),
    ImageSize::new(256.0, 1),
    ImageSize::new(256.0, 2),
    ImageSize::new(512.0, 1),
    ImageSize::new(512.0, 2),
];
