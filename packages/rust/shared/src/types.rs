//! Core domain types for sidebar navigation reconstruction.

use serde::{Deserialize, Serialize};

/// Path used when a link target normalizes to nothing (e.g. `href="/"`).
pub const INDEX_PAGE: &str = "index";

// ---------------------------------------------------------------------------
// NavigationItem
// ---------------------------------------------------------------------------

/// A single navigation entry recovered from the flat markup, before nesting.
///
/// Items are produced in document order by the extractor and consumed once
/// by the hierarchy builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    /// Normalized link target. `None` for items synthesized from a bare
    /// group-open marker that no entry claimed.
    pub href: Option<String>,
    /// Human-readable label, entity-decoded and whitespace-collapsed.
    pub title: String,
    /// Effective nesting level.
    pub depth: usize,
    /// Whether this item opens a nested group.
    pub has_children: bool,
    /// Strictly increasing position in the document.
    pub source_order: usize,
    /// Label of the innermost open group, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_title: Option<String>,
}

// ---------------------------------------------------------------------------
// Tree nodes
// ---------------------------------------------------------------------------

/// A titled group of navigation nodes.
///
/// `children` keeps document order; nothing ever re-sorts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "group")]
    pub title: String,
    #[serde(rename = "pages", default)]
    pub children: Vec<NavNode>,
}

impl Group {
    /// An empty group with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }
}

/// A node in the navigation tree: either a nested group or a page path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavNode {
    Group(Group),
    Page(String),
}

impl NavNode {
    /// Returns the group if this node is one.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Page(_) => None,
        }
    }

    /// Returns the page path if this node is a leaf.
    pub fn as_page(&self) -> Option<&str> {
        match self {
            Self::Group(_) => None,
            Self::Page(path) => Some(path),
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation envelope
// ---------------------------------------------------------------------------

/// Root of the site navigation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDocument {
    pub navigation: Navigation,
}

/// The `navigation` object: global links plus per-language tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Global navigation links; always emitted as an empty object.
    #[serde(default)]
    pub global: serde_json::Map<String, serde_json::Value>,
    pub languages: Vec<LanguageNav>,
}

/// Tabs for a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageNav {
    pub language: String,
    pub tabs: Vec<Tab>,
}

/// A named tab holding an ordered list of top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub tab: String,
    pub groups: Vec<NavNode>,
}
