//! Application configuration for sidenav.
//!
//! User config lives at `~/.sidenav/sidenav.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SidenavError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sidenav.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sidenav";

/// Lines searched backward from a group-open marker for its title.
pub const DEFAULT_TITLE_LOOKBEHIND: usize = 20;

/// Lines (current one included) joined to resolve an entry's anchor.
pub const DEFAULT_ANCHOR_LOOKAHEAD: usize = 10;

/// Lines searched forward from an entry for a nested group-open marker.
pub const DEFAULT_CHILDREN_LOOKAHEAD: usize = 50;

// ---------------------------------------------------------------------------
// Config structs (matching sidenav.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scan window sizes.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Marker classes recognized in the sidebar markup.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Navigation envelope settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[scan]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Backward window for group titles.
    #[serde(default = "default_title_lookbehind")]
    pub title_lookbehind: usize,

    /// Forward window for entry anchors.
    #[serde(default = "default_anchor_lookahead")]
    pub anchor_lookahead: usize,

    /// Forward window for nested group detection.
    #[serde(default = "default_children_lookahead")]
    pub children_lookahead: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            title_lookbehind: DEFAULT_TITLE_LOOKBEHIND,
            anchor_lookahead: DEFAULT_ANCHOR_LOOKAHEAD,
            children_lookahead: DEFAULT_CHILDREN_LOOKAHEAD,
        }
    }
}

fn default_title_lookbehind() -> usize {
    DEFAULT_TITLE_LOOKBEHIND
}
fn default_anchor_lookahead() -> usize {
    DEFAULT_ANCHOR_LOOKAHEAD
}
fn default_children_lookahead() -> usize {
    DEFAULT_CHILDREN_LOOKAHEAD
}

/// `[markers]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Class prefix that carries the depth of a list, e.g. `ul-` in `ul-2`.
    #[serde(default = "default_group_class_prefix")]
    pub group_class_prefix: String,

    /// Class identifying a navigation entry `<li>`.
    #[serde(default = "default_leaf_class")]
    pub leaf_class: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            group_class_prefix: default_group_class_prefix(),
            leaf_class: default_leaf_class(),
        }
    }
}

fn default_group_class_prefix() -> String {
    "ul-".into()
}
fn default_leaf_class() -> String {
    "td-sidebar-nav__section-title".into()
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Language tag of the single emitted language entry.
    #[serde(default = "default_language")]
    pub language: String,

    /// Name of the tab holding the groups.
    #[serde(default = "default_tab")]
    pub tab: String,

    /// Title of the placeholder group emitted when nothing was found.
    #[serde(default = "default_group")]
    pub default_group: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tab: default_tab(),
            default_group: default_group(),
        }
    }
}

fn default_language() -> String {
    "en".into()
}
fn default_tab() -> String {
    "Platform".into()
}
fn default_group() -> String {
    "Documentation".into()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Reject settings that would make extraction meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.markers.group_class_prefix.trim().is_empty() {
            return Err(SidenavError::config("markers.group_class_prefix must not be empty"));
        }
        if self.markers.leaf_class.trim().is_empty() {
            return Err(SidenavError::config("markers.leaf_class must not be empty"));
        }
        if self.scan.anchor_lookahead == 0 {
            return Err(SidenavError::config(
                "scan.anchor_lookahead must cover at least the entry's own line",
            ));
        }
        if self.export.default_group.trim().is_empty() {
            return Err(SidenavError::config("export.default_group must not be empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sidenav/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SidenavError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sidenav/sidenav.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SidenavError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        SidenavError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SidenavError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SidenavError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SidenavError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
