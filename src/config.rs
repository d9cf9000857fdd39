//! Wall configuration module.
//!
//! Handles loading, validating, and merging `photowall.toml`. Configuration is
//! layered: stock defaults, then the config file, then command-line overrides.
//! Each layer only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! target_ratio = 1.3333333333333333  # Desired grid width / height
//! min_item_height = 80.0             # Lowest row height tried (px)
//! gap = 2.0                          # Space between tiles (px)
//! steps = 30                         # Candidate heights = steps + 1
//! max_height_divisor = 1.2           # Highest row height = width / divisor
//!
//! [pagination]
//! page_size = 10             # Items per page request
//! initial_page = 0           # First page index
//! threshold = 300.0          # Load when the sentinel is this close (px)
//!
//! [sidebar]
//! store_path = "sidebar-modules.json"
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::grid::LayoutParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILE: &str = "photowall.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `photowall.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallConfig {
    /// Grid packing parameters.
    pub layout: LayoutConfig,
    /// Infinite-scroll paging.
    pub pagination: PaginationConfig,
    /// Sidebar module persistence.
    pub sidebar: SidebarConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl WallConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.target_ratio.is_finite() && layout.target_ratio > 0.0) {
            return Err(ConfigError::Validation(
                "layout.target_ratio must be a positive number".into(),
            ));
        }
        if !(layout.min_item_height.is_finite() && layout.min_item_height > 0.0) {
            return Err(ConfigError::Validation(
                "layout.min_item_height must be a positive number".into(),
            ));
        }
        if !(layout.gap.is_finite() && layout.gap >= 0.0) {
            return Err(ConfigError::Validation(
                "layout.gap must not be negative".into(),
            ));
        }
        if !(layout.max_height_divisor.is_finite() && layout.max_height_divisor > 0.0) {
            return Err(ConfigError::Validation(
                "layout.max_height_divisor must be a positive number".into(),
            ));
        }
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Validation(
                "pagination.page_size must be at least 1".into(),
            ));
        }
        if !(self.pagination.threshold.is_finite() && self.pagination.threshold >= 0.0) {
            return Err(ConfigError::Validation(
                "pagination.threshold must not be negative".into(),
            ));
        }
        if self.sidebar.store_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sidebar.store_path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Grid packing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Desired overall grid width / height.
    pub target_ratio: f64,
    /// Lowest candidate row height in pixels.
    pub min_item_height: f64,
    /// Space between tiles in pixels.
    pub gap: f64,
    /// Number of intervals between the lowest and highest candidate height.
    pub steps: u32,
    /// Highest candidate row height is the container width over this.
    pub max_height_divisor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            target_ratio: params.target_ratio,
            min_item_height: params.min_item_height,
            gap: params.gap,
            steps: params.steps,
            max_height_divisor: params.max_height_divisor,
        }
    }
}

impl LayoutConfig {
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            target_ratio: self.target_ratio,
            min_item_height: self.min_item_height,
            gap: self.gap,
            steps: self.steps,
            max_height_divisor: self.max_height_divisor,
        }
    }
}

/// Infinite-scroll paging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Items requested per page.
    pub page_size: usize,
    /// Index of the first page.
    pub initial_page: u32,
    /// Distance in pixels below the viewport at which the sentinel counts
    /// as visible.
    pub threshold: f64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            initial_page: 0,
            threshold: 300.0,
        }
    }
}

/// Sidebar module persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// JSON file holding the saved module list, relative to the working
    /// directory.
    pub store_path: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            store_path: "sidebar-modules.json".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for probing and multi-width layout.
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

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that file and command-line overrides merge onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(WallConfig::default())?)
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

/// Load `photowall.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<WallConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: WallConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `photowall.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<WallConfig, ConfigError> {
    load_config_with(dir, None)
}

/// Like [`load_config`], with a final overlay (typically built from
/// command-line flags) applied after the file.
pub fn load_config_with(
    dir: &Path,
    overrides: Option<toml::Value>,
) -> Result<WallConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file = load_raw_config(dir)?;
    resolve_config(base, file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock `photowall.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photowall configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags such as --target-ratio override this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Grid layout
# ---------------------------------------------------------------------------
[layout]
# Desired overall grid width / height. 4:3 by default.
target_ratio = 1.3333333333333333

# Lowest row height tried, in pixels.
min_item_height = 80.0

# Space between tiles, horizontally and vertically, in pixels.
gap = 2.0

# Candidate row heights are spread evenly between min_item_height and
# width / max_height_divisor; steps + 1 heights are tried.
steps = 30
max_height_divisor = 1.2

# ---------------------------------------------------------------------------
# Infinite scroll
# ---------------------------------------------------------------------------
[pagination]
# Items requested per page. A short page means there is nothing more.
page_size = 10

# Index of the first page.
initial_page = 0

# Load the next page when the sentinel is within this many pixels of the
# bottom of the viewport.
threshold = 300.0

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[sidebar]
# JSON file holding the saved sidebar modules.
store_path = "sidebar-modules.json"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for image probing and multi-width layout.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
