//! Shared types, error model, and configuration for sidenav.
//!
//! This crate is the foundation depended on by the other sidenav crates.
//! It provides:
//! - [`SidenavError`]: the unified error type
//! - Domain types ([`NavigationItem`], [`Group`], [`NavNode`], [`NavigationDocument`])
//! - Configuration ([`AppConfig`], [`ScanConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_ANCHOR_LOOKAHEAD, DEFAULT_CHILDREN_LOOKAHEAD, DEFAULT_TITLE_LOOKBEHIND,
    ExportConfig, MarkerConfig, ScanConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, SidenavError};
pub use types::{
    Group, INDEX_PAGE, LanguageNav, NavNode, Navigation, NavigationDocument, NavigationItem, Tab,
};
