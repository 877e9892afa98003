//! Build statistics and a compact textual outline of the navigation tree.

use std::fmt::Write as _;

use sidenav_shared::NavNode;

use crate::extract::Extraction;

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationStats {
    /// Items produced by extraction (entries plus unclaimed lists).
    pub items_discovered: usize,
    /// Markers dropped during extraction.
    pub skipped_markers: usize,
    /// Closing markers with nothing to close.
    pub unbalanced_closes: usize,
    /// Nodes directly under the tab.
    pub top_level_nodes: usize,
    /// Groups directly under the tab.
    pub top_level_groups: usize,
    /// Groups at any depth.
    pub groups: usize,
    /// Pages at any depth.
    pub pages: usize,
}

impl NavigationStats {
    /// Collect stats for a built tree and the extraction that produced it.
    pub fn collect(root: &[NavNode], extraction: &Extraction) -> Self {
        let mut stats = Self {
            items_discovered: extraction.items.len(),
            skipped_markers: extraction.skipped,
            unbalanced_closes: extraction.unbalanced_closes,
            top_level_nodes: root.len(),
            top_level_groups: root.iter().filter(|n| n.as_group().is_some()).count(),
            ..Self::default()
        };
        stats.count(root);
        stats
    }

    /// Groups plus pages at any depth.
    pub fn total_nodes(&self) -> usize {
        self.groups + self.pages
    }

    fn count(&mut self, nodes: &[NavNode]) {
        for node in nodes {
            match node {
                NavNode::Group(group) => {
                    self.groups += 1;
                    self.count(&group.children);
                }
                NavNode::Page(_) => self.pages += 1,
            }
        }
    }
}

/// Nested levels show at most this many entries.
const NESTED_PREVIEW_ITEMS: usize = 2;

/// Levels below the top that are expanded.
const PREVIEW_DEPTH: usize = 2;

/// Render a short outline: `max_items` entries at the top level, fewer below.
pub fn render_preview(nodes: &[NavNode], max_items: usize) -> String {
    let mut out = String::new();
    write_preview(&mut out, nodes, 0, max_items);
    out
}

fn write_preview(out: &mut String, nodes: &[NavNode], indent: usize, max_items: usize) {
    let prefix = "  ".repeat(indent);

    for (i, node) in nodes.iter().take(max_items).enumerate() {
        match node {
            NavNode::Group(group) => {
                let _ = writeln!(
                    out,
                    "{prefix}{}. Group: {} ({} items)",
                    i + 1,
                    group.title,
                    group.children.len()
                );
                if indent < PREVIEW_DEPTH {
                    write_preview(out, &group.children, indent + 1, NESTED_PREVIEW_ITEMS);
                }
            }
            NavNode::Page(path) => {
                let _ = writeln!(out, "{prefix}{}. Page: {path}", i + 1);
            }
        }
    }

    if nodes.len() > max_items {
        let _ = writeln!(out, "{prefix}... ({} more items)", nodes.len() - max_items);
    }
}
