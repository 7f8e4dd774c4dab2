//! Configuration loading.
//!
//! Settings live in an optional TOML file. Stock defaults are overridden by
//! whatever the file specifies; command-line flags override both.
//!
//! ## Config File Location
//!
//! `--config <FILE>` names the file explicitly. Without it, `appicon.toml` in
//! the current directory is used when present.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! density = 1.0            # points-to-pixels ratio, 0.001 to 1000
//! parallel = false         # render entries on a thread pool
//! compression = "best"     # PNG effort: "fast", "default", "best"
//! filter = "lanczos3"      # "lanczos3", "catmull-rom", "gaussian", "triangle", "nearest"
//!
//! [processing]
//! # max_processes = 4      # worker cap; defaults to the number of CPU cores
//! ```
//!
//! ## Merging
//!
//! The file is merged key-by-key onto the stock defaults at the TOML level
//! (nested tables merge recursively, scalars replace), then deserialized.
//! Unknown keys are rejected so typos surface as errors instead of being
//! silently ignored.

use crate::imaging::{Compression, Density, RenderConfig, ResizeFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "appicon.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Rendering and output settings.
    pub export: ExportConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Density::try_new(self.export.density).is_none() {
            return Err(ConfigError::Validation(format!(
                "export.density must be between {} and {}",
                Density::MIN,
                Density::MAX
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Rendering settings derived from the export section.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            density: Density::new(self.export.density),
            filter: self.export.filter,
            compression: self.export.compression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub density: f64,
    pub parallel: bool,
    pub compression: Compression,
    pub filter: ResizeFilter,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            parallel: false,
            compression: Compression::default(),
            filter: ResizeFilter::default(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Deep-merge `overlay` onto `base`. Tables merge recursively; any other
/// overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, [`CONFIG_FILE_NAME`] in `dir`
/// is used if present, otherwise stock defaults apply.
pub fn load_config(path: Option<&Path>, dir: &Path) -> Result<AppConfig, ConfigError> {
    let overlay = match path {
        Some(p) => Some(load_raw_config(p)?),
        None => {
            let implicit = dir.join(CONFIG_FILE_NAME);
            if implicit.exists() {
                Some(load_raw_config(&implicit)?)
            } else {
                None
            }
        }
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `appicon.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# appicon-gen configuration
# ========================
# Place this file as appicon.toml in the directory you run appicon-gen from,
# or pass it with --config. Every key is optional; command-line flags win.

[export]
# Points-to-pixels ratio of the surface icons are drawn on. Output files are
# always exactly dimension x multiplier pixels regardless of this value.
# Accepted range: 0.001 to 1000.
density = 1.0

# Render catalog entries on a thread pool instead of one after another.
parallel = false

# PNG deflate effort: "fast", "default", "best".
compression = "best"

# Resampling filter: "lanczos3", "catmull-rom", "gaussian", "triangle", "nearest".
filter = "lanczos3"

[processing]
# Maximum parallel workers when export.parallel is on.
# Defaults to the number of CPU cores; larger values are clamped down.
# max_processes = 4
"##
}
