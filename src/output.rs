//! CLI output formatting.
//!
//! Every `format_*` function returns display lines instead of printing, so the
//! exact output is unit-testable. The `print_*` wrappers are the only place
//! that writes to stdout.
//!
//! # Output Format
//!
//! ## Export
//!
//! ```text
//! Exporting 10 macOS icons → out/
//!     01 Icon_16x16@1x.png (16×16)
//!     02 Icon_16x16@2x.png (32×32)
//!     ...
//! Wrote 10 files (412.3 KiB) to out/
//! ```
//!
//! ## Sizes
//!
//! ```text
//! iOS (15 sizes)
//!     01 _20x20@1x       20×20 px
//!     ...
//! ```

use crate::catalog::Platform;
use crate::export::{ExportEvent, ExportReport};
use crate::source::SourceImage;

/// Format a 1-based index with zero-padding to two digits.
fn format_index(pos: usize) -> String {
    format!("{:02}", pos)
}

fn format_px(width: u32, height: u32) -> String {
    format!("{}\u{00d7}{}", width, height)
}

// ============================================================================
// Export
// ============================================================================

/// Format a single export progress event as display lines.
pub fn format_export_event(event: &ExportEvent) -> Vec<String> {
    match event {
        ExportEvent::Started {
            platform,
            destination,
            count,
        } => {
            vec![format!(
                "Exporting {} {} icons \u{2192} {}",
                count,
                platform,
                destination.display()
            )]
        }
        ExportEvent::FileWritten {
            index,
            file_name,
            width,
            height,
        } => vec![format!(
            "    {} {} ({})",
            format_index(*index),
            file_name,
            format_px(*width, *height)
        )],
    }
}

/// Summary line after a successful export.
pub fn format_export_summary(report: &ExportReport) -> Vec<String> {
    let total_bytes: usize = report.files.iter().map(|f| f.bytes).sum();
    vec![format!(
        "Wrote {} files ({}) to {}",
        report.files.len(),
        format_bytes(total_bytes),
        report.destination.display()
    )]
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

pub fn print_export_summary(report: &ExportReport) {
    for line in format_export_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Catalog listing
// ============================================================================

/// Format a platform's size table: suffix and resulting pixel size.
pub fn format_catalog(platform: Platform) -> Vec<String> {
    let catalog = platform.catalog();
    let mut lines = vec![format!("{} ({} sizes)", platform, catalog.len())];
    for (idx, size) in catalog.iter().enumerate() {
        let (w, h) = size.pixel_size();
        lines.push(format!(
            "    {} {:<16}{} px",
            format_index(idx + 1),
            size.file_suffix(),
            format_px(w, h)
        ));
    }
    lines
}

pub fn print_catalog(platform: Platform) {
    for line in format_catalog(platform) {
        println!("{}", line);
    }
}

// ============================================================================
// Source check
// ============================================================================

/// Describe a loaded source image.
pub fn format_source(source: &SourceImage) -> Vec<String> {
    let (w, h) = source.dimensions();
    let mut lines = vec![
        source.base_name(),
        format!("    Source: {}", source.path.display()),
        format!("    Size: {} px", format_px(w, h)),
    ];
    if w != h {
        lines.push("    Note: not square, icons will be stretched".to_string());
    }
    lines
}

pub fn print_source(source: &SourceImage) {
    for line in format_source(source) {
        println!("{}", line);
    }
}

/// List the input formats this build can decode.
pub fn format_supported_formats(extensions: &[&str]) -> Vec<String> {
    vec![format!("    Readable formats: {}", extensions.join(", "))]
}

pub fn print_supported_formats(extensions: &[&str]) {
    for line in format_supported_formats(extensions) {
        println!("{}", line);
    }
}
