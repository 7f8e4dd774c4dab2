//! # appicon-gen
//!
//! Export a complete app-icon set from one source image. Drop in a large
//! square artwork, pick a platform, pick a directory, and every size the
//! platform asks for is written as a PNG:
//!
//! ```text
//! appicon-gen export Icon.png --platform macos --out AppIcon/
//!
//! AppIcon/
//! ├── Icon_16x16@1x.png       16px
//! ├── Icon_16x16@2x.png       32px
//! ├── ...
//! └── Icon_512x512@2x.png   1024px
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Per-platform size tables, pixel sizes and filename suffixes |
//! | [`source`] | Opening the input image (paths and `file://` URLs) |
//! | [`export`] | Resize-encode-write loop over a catalog, fail-fast |
//! | [`imaging`] | Pure-Rust decode, exact resize, PNG encode behind a backend trait |
//! | [`config`] | `appicon.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Exact Pixel Sizes
//!
//! Every icon is resized straight to `dimension × multiplier` pixels on both
//! axes. Aspect ratio is not preserved and nothing is padded; icon artwork is
//! square, and the platforms reject icons that are off by a pixel.
//!
//! ## Explicit Density
//!
//! A desktop app sizes its drawing canvas in points and lets the display's
//! backing scale turn them into pixels. There is no display here, so the
//! density is a parameter (default 1.0, bounded to `0.001..=1000`). It never
//! changes the pixel size of the output; see [`imaging::target_dimensions`].
//!
//! ## Directory-Only Destination
//!
//! Output names come from the source file's base name plus a size suffix, so
//! the destination is always a directory. There is no "save as" file name.

pub mod catalog;
pub mod config;
pub mod export;
pub mod imaging;
pub mod output;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;
