//! Generator configuration.
//!
//! Handles loading, validating, and merging `thumbs.toml`. Configuration is
//! layered: stock defaults are overridden by an optional `thumbs.toml` in the
//! project root, which is in turn overridden by command-line flags.
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── thumbs.toml          # Optional, overrides stock defaults
//! └── images/
//!     ├── fulls/           # Source images
//!     └── thumbs/          # Generated thumbnails
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! fulls_dir = "images/fulls"   # Source directory, relative to the project root
//! thumbs_dir = "images/thumbs" # Destination directory, created if missing
//!
//! [thumbnails]
//! width = 300                  # Bound on both width and height, in pixels
//! quality = 85                 # JPEG quality (1-100)
//! keep_source_extension = true # false writes `<stem>.jpg` instead
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, ThumbnailConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "thumbs.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `thumbs.toml`.
///
/// All fields have defaults; a config file needs only the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Source directory, relative to the project root unless absolute.
    pub fulls_dir: PathBuf,
    /// Destination directory, relative to the project root unless absolute.
    pub thumbs_dir: PathBuf,
    pub thumbnails: ThumbnailsConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fulls_dir: PathBuf::from("images/fulls"),
            thumbs_dir: PathBuf::from("images/thumbs"),
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

/// Thumbnail encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Maximum width and height of a thumbnail.
    pub width: u32,
    /// JPEG encoding quality.
    pub quality: u32,
    /// Keep the source file name even when it is not `.jpg`.
    pub keep_source_extension: bool,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: 300,
            quality: 85,
            keep_source_extension: true,
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.fulls_dir.as_os_str().is_empty() || self.thumbs_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "fulls_dir and thumbs_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Source directory resolved against the project root.
    pub fn fulls_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.fulls_dir)
    }

    /// Destination directory resolved against the project root.
    pub fn thumbs_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.thumbs_dir)
    }

    /// Imaging parameters derived from the `[thumbnails]` section.
    pub fn thumbnail_config(&self) -> ThumbnailConfig {
        ThumbnailConfig {
            max_edge: self.thumbnails.width,
            quality: Quality::new(self.thumbnails.quality),
            keep_source_extension: self.thumbnails.keep_source_extension,
        }
    }
}

/// Join `dir` onto `root`, leaving it as given when the root is the current
/// directory so messages read `images/fulls` rather than `./images/fulls`.
fn resolve(root: &Path, dir: &Path) -> PathBuf {
    if root.as_os_str().is_empty() || root == Path::new(".") {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fulls_dir: Option<PathBuf>,
    pub thumbs_dir: Option<PathBuf>,
    pub width: Option<u32>,
    pub quality: Option<u32>,
}

impl Overrides {
    /// Render the set overrides as a sparse TOML table for [`merge_toml`].
    fn to_toml(&self) -> toml::Value {
        let mut root = toml::map::Map::new();
        if let Some(dir) = &self.fulls_dir {
            root.insert(
                "fulls_dir".into(),
                toml::Value::String(dir.to_string_lossy().into_owned()),
            );
        }
        if let Some(dir) = &self.thumbs_dir {
            root.insert(
                "thumbs_dir".into(),
                toml::Value::String(dir.to_string_lossy().into_owned()),
            );
        }

        let mut thumbnails = toml::map::Map::new();
        if let Some(width) = self.width {
            thumbnails.insert("width".into(), toml::Value::Integer(width.into()));
        }
        if let Some(quality) = self.quality {
            thumbnails.insert("quality".into(), toml::Value::Integer(quality.into()));
        }
        if !thumbnails.is_empty() {
            root.insert("thumbnails".into(), toml::Value::Table(thumbnails));
        }
        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GeneratorConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load `thumbs.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist and `Err` if it exists but
/// is not valid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the effective config for a project root.
///
/// Stock defaults, then `thumbs.toml`, then `overrides`. Unknown keys are
/// rejected and the result is validated.
pub fn load_config(root: &Path, overrides: &Overrides) -> Result<GeneratorConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    if let Some(file) = load_raw_config(root)? {
        merged = merge_toml(merged, file);
    }
    merged = merge_toml(merged, overrides.to_toml());

    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `thumbs.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# thumbgen configuration
# ======================
#
# Place this file in the project root as `thumbs.toml`. Every key is
# optional; omitted keys keep the defaults shown here. Command-line flags
# (--source, --output, --width, --quality) override values from this file.

# Directory holding the full-resolution images, relative to the project root.
# Only its direct entries are scanned; subdirectories are ignored.
fulls_dir = "images/fulls"

# Directory the thumbnails are written to. Created (with parents) if missing.
thumbs_dir = "images/thumbs"

[thumbnails]
# Neither width nor height of a thumbnail exceeds this many pixels.
# Aspect ratio is preserved and smaller images are never enlarged.
width = 300

# JPEG quality, 1 (smallest) to 100 (best).
quality = 85

# Thumbnails are always JPEG-encoded. With `true` they keep the source file
# name, so `logo.png` becomes a JPEG stored as `thumbs/logo.png`. Set to
# `false` to write `thumbs/logo.jpg` instead.
keep_source_extension = true
"##
}
