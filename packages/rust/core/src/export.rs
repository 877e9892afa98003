//! Navigation envelope export.
//!
//! Wraps the top-level nodes in the site configuration envelope:
//! `navigation → languages[] → tabs[] → groups[]`.

use tracing::debug;

use sidenav_shared::{
    ExportConfig, Group, LanguageNav, NavNode, Navigation, NavigationDocument, Result, Tab,
};

/// Wrap the tree in a single-language, single-tab navigation document.
///
/// An empty tree yields one empty default group so consumers always find an
/// addressable group.
pub fn export_navigation(root: Vec<NavNode>, config: &ExportConfig) -> NavigationDocument {
    let groups = if root.is_empty() {
        debug!(group = %config.default_group, "no navigation found, emitting default group");
        vec![NavNode::Group(Group::new(config.default_group.clone()))]
    } else {
        root
    };

    NavigationDocument {
        navigation: Navigation {
            global: serde_json::Map::new(),
            languages: vec![LanguageNav {
                language: config.language.clone(),
                tabs: vec![Tab {
                    tab: config.tab.clone(),
                    groups,
                }],
            }],
        },
    }
}

/// Serialize a navigation document as JSON.
pub fn to_json(document: &NavigationDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}
