//! Navigation item extraction from a flattened sidebar document.
//!
//! The sidebar arrives as rendered HTML where nesting is only visible through
//! depth-tagged list classes (`<ul class="ul-2 …">`) and closing `</ul>` tags.
//! Extraction walks the document once, line by line, and emits a flat,
//! source-ordered list of [`NavigationItem`]s. Labels and link targets are
//! resolved with bounded lookahead/lookbehind over the line array, so a
//! malformed entry costs at most one skipped item.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use sidenav_shared::{MarkerConfig, NavigationItem, Result, ScanConfig, SidenavError};

use crate::paths::{clean_label, normalize_href, title_from_path};

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Anchor with `href` first and an explicit element `id`, wrapping a `<span>` label.
static STRICT_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a href="([^"]+)"[^>]*id="([^"]*)"[^>]*>\s*<span[^>]*>(.*?)</span>\s*</a>"#)
        .expect("strict anchor regex")
});

/// Anchor with `href` anywhere in the tag, wrapping a `<span>` label.
static LOOSE_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]*href="([^"]+)"[^>]*>\s*<span[^>]*>(.*?)</span>\s*</a>"#)
        .expect("loose anchor regex")
});

/// Any anchor with an `href`, label or not.
static BARE_ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a[^>]*href="([^"]+)""#).expect("bare anchor regex"));

/// Single-line anchor used as a group heading.
static GROUP_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="[^"]+[^>]*>\s*<span[^>]*>(.*?)</span>\s*</a>"#)
        .expect("group title regex")
});

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Compiled structural markers for one sidebar dialect.
#[derive(Debug, Clone)]
pub struct Markers {
    group_open: Regex,
    leaf: Regex,
}

impl Markers {
    /// Compile the marker patterns for the configured class names.
    pub fn new(config: &MarkerConfig) -> Result<Self> {
        let group_open = Regex::new(&format!(
            r#"<ul class="{}(\d+)[^"]*""#,
            regex::escape(config.group_class_prefix.trim())
        ))
        .map_err(|e| SidenavError::config(format!("invalid group_class_prefix: {e}")))?;

        let leaf = Regex::new(&format!(
            r#"<li[^>]*class="[^"]*{}[^"]*""#,
            regex::escape(config.leaf_class.trim())
        ))
        .map_err(|e| SidenavError::config(format!("invalid leaf_class: {e}")))?;

        Ok(Self { group_open, leaf })
    }

    /// Whether the line carries a group-open marker, parsable or not.
    pub fn is_group_open(&self, line: &str) -> bool {
        self.group_open.is_match(line)
    }

    /// Depth carried by a group-open marker on this line.
    ///
    /// `None` when there is no marker or its depth does not fit a `usize`.
    pub fn group_open_depth(&self, line: &str) -> Option<usize> {
        self.group_open
            .captures(line)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Whether the line closes a group.
    pub fn is_group_close(&self, line: &str) -> bool {
        line.contains("</ul>")
    }

    /// Whether the line starts a navigation entry.
    pub fn is_leaf(&self, line: &str) -> bool {
        self.leaf.is_match(line)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Output of one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Items in document order.
    pub items: Vec<NavigationItem>,
    /// Markers dropped because no link (or no depth) could be resolved.
    pub skipped: usize,
    /// `</ul>` tags seen with no open group to close.
    pub unbalanced_closes: usize,
}

/// A group-open marker that has not been closed yet.
#[derive(Debug)]
struct OpenGroup {
    /// Depth written on the marker itself.
    depth: usize,
    title: String,
    /// Whether a preceding entry already represents this group.
    claimed: bool,
}

/// A link target and label resolved for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Anchor {
    pub href: String,
    pub title: String,
}

/// Walk the document once and collect navigation items.
///
/// Entries that own a nested list become group items; a nested list that no
/// entry claims becomes a group item of its own, titled from the nearest
/// anchor above it. Item depth is the marker depth plus the number of open
/// unclaimed groups, so the contents of such a group always sit one level
/// below it.
#[instrument(skip_all, fields(bytes = document.len()))]
pub fn extract_items(document: &str, markers: &Markers, scan: &ScanConfig) -> Extraction {
    let lines: Vec<&str> = document.lines().map(str::trim).collect();

    let mut extraction = Extraction::default();
    let mut open: Vec<OpenGroup> = Vec::new();
    let mut current_depth = 0;
    // Line of the nested list found by the last entry's forward scan.
    let mut claimed_line: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        if markers.is_group_open(line) {
            match markers.group_open_depth(line) {
                Some(depth) => {
                    current_depth = depth;
                    let title = find_group_title(&lines, index, scan.title_lookbehind);
                    let claimed = claimed_line == Some(index);

                    if claimed {
                        claimed_line = None;
                    } else {
                        extraction.items.push(NavigationItem {
                            href: None,
                            title: title.clone(),
                            depth: depth + unclaimed_count(&open),
                            has_children: true,
                            source_order: extraction.items.len(),
                            parent_group_title: open.last().map(|g| g.title.clone()),
                        });
                    }

                    open.push(OpenGroup {
                        depth,
                        title,
                        claimed,
                    });
                }
                None => {
                    warn!(line = index + 1, "group marker depth out of range, skipping");
                    extraction.skipped += 1;
                }
            }
        }

        if markers.is_group_close(line) {
            if open.pop().is_none() {
                warn!(line = index + 1, "closing marker without an open group");
                extraction.unbalanced_closes += 1;
            }
            current_depth = open.last().map_or(0, |g| g.depth);
        }

        if markers.is_leaf(line) {
            let Some(anchor) = resolve_anchor(&lines, index, scan.anchor_lookahead) else {
                warn!(line = index + 1, "navigation entry without a link, skipping");
                extraction.skipped += 1;
                continue;
            };

            let child_line = find_child_group(
                &lines,
                index,
                current_depth,
                markers,
                scan.children_lookahead,
            );
            if child_line.is_some() {
                claimed_line = child_line;
            }

            extraction.items.push(NavigationItem {
                href: Some(anchor.href),
                title: anchor.title,
                depth: current_depth + unclaimed_count(&open),
                has_children: child_line.is_some(),
                source_order: extraction.items.len(),
                parent_group_title: open.last().map(|g| g.title.clone()),
            });
        }
    }

    if !open.is_empty() {
        debug!(unclosed = open.len(), "document ended with open groups");
    }

    debug!(
        items = extraction.items.len(),
        skipped = extraction.skipped,
        unbalanced_closes = extraction.unbalanced_closes,
        "extraction complete"
    );

    extraction
}

fn unclaimed_count(open: &[OpenGroup]) -> usize {
    open.iter().filter(|g| !g.claimed).count()
}

// ---------------------------------------------------------------------------
// Bounded scans
// ---------------------------------------------------------------------------

/// Search backward from a group-open marker for the label of the nearest anchor.
///
/// Falls back to a synthetic `Group at line N` (1-based) so every group has a label.
pub(crate) fn find_group_title(lines: &[&str], marker_line: usize, window: usize) -> String {
    let lower = marker_line.saturating_sub(window);

    for line in lines[lower..marker_line].iter().rev() {
        if let Some(caps) = GROUP_TITLE_RE.captures(line) {
            let title = clean_label(&caps[1]);
            if !title.is_empty() {
                return title;
            }
        }
    }

    format!("Group at line {}", marker_line + 1)
}

/// Resolve an entry's link and label from its line and the following ones.
///
/// Tries the strict `href … id` form first, then any anchor with a `<span>`
/// label, then a bare anchor whose label is derived from the path.
pub(crate) fn resolve_anchor(lines: &[&str], start: usize, window: usize) -> Option<Anchor> {
    let end = start.saturating_add(window).min(lines.len());
    let combined = lines[start..end].join(" ");

    let (href, label) = if let Some(caps) = STRICT_ANCHOR_RE.captures(&combined) {
        (caps[1].to_string(), clean_label(&caps[3]))
    } else if let Some(caps) = LOOSE_ANCHOR_RE.captures(&combined) {
        (caps[1].to_string(), clean_label(&caps[2]))
    } else {
        let caps = BARE_ANCHOR_RE.captures(&combined)?;
        (caps[1].to_string(), String::new())
    };

    let href = normalize_href(&href);
    let title = if label.is_empty() {
        title_from_path(&href)
    } else {
        label
    };

    Some(Anchor { href, title })
}

/// Search forward from an entry for a list one level deeper than `depth`.
///
/// Stops at the next entry or at any closing marker. Returns the line of the
/// nested list.
pub(crate) fn find_child_group(
    lines: &[&str],
    entry_line: usize,
    depth: usize,
    markers: &Markers,
    window: usize,
) -> Option<usize> {
    let end = entry_line.saturating_add(window).min(lines.len());

    for (index, line) in lines.iter().enumerate().take(end).skip(entry_line) {
        if markers.group_open_depth(line) == Some(depth + 1) {
            return Some(index);
        }
        if (index > entry_line && markers.is_leaf(line)) || markers.is_group_close(line) {
            return None;
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::new(&MarkerConfig::default()).expect("default markers")
    }

    fn extract(doc: &str) -> Extraction {
        extract_items(doc, &markers(), &ScanConfig::default())
    }

    fn entry(href: &str, title: &str) -> String {
        format!(
            "<li class=\"td-sidebar-nav__section-title\">\n<a href=\"{href}\" id=\"m-{title}\"><span>{title}</span></a>"
        )
    }

    #[test]
    fn markers_parse_depth() {
        let m = markers();
        assert_eq!(m.group_open_depth(r#"<ul class="ul-2 foldable">"#), Some(2));
        assert_eq!(m.group_open_depth(r#"<ul class="ul-10">"#), Some(10));
        assert_eq!(m.group_open_depth(r#"<ul class="nav ul-1">"#), None);
        assert_eq!(m.group_open_depth(r#"<ul class="ul-">"#), None);
    }

    #[test]
    fn markers_out_of_range_depth_is_open_without_depth() {
        let m = markers();
        let line = r#"<ul class="ul-99999999999999999999999">"#;
        assert!(m.is_group_open(line));
        assert_eq!(m.group_open_depth(line), None);
    }

    #[test]
    fn markers_respect_custom_classes() {
        let config = MarkerConfig {
            group_class_prefix: "level-".into(),
            leaf_class: "nav-entry".into(),
        };
        let m = Markers::new(&config).unwrap();
        assert_eq!(m.group_open_depth(r#"<ul class="level-3">"#), Some(3));
        assert!(m.is_leaf(r#"<li id="x" class="item nav-entry active">"#));
        assert!(!m.is_leaf(r#"<li class="td-sidebar-nav__section-title">"#));
    }

    #[test]
    fn group_title_found_backward() {
        let lines = vec![
            r#"<a href="/guides/" class="x"><span class="">Guides &amp; Tips</span></a>"#,
            "<div>",
            r#"<ul class="ul-1">"#,
        ];
        assert_eq!(find_group_title(&lines, 2, 20), "Guides & Tips");
    }

    #[test]
    fn group_title_synthetic_outside_window() {
        let mut lines = vec![r#"<a href="/far/"><span>Far</span></a>"#];
        lines.extend(std::iter::repeat_n("<div></div>", 5));
        lines.push(r#"<ul class="ul-1">"#);
        assert_eq!(find_group_title(&lines, 6, 3), "Group at line 7");
        assert_eq!(find_group_title(&lines, 6, 6), "Far");
    }

    #[test]
    fn anchor_strict_pattern_spanning_lines() {
        let lines = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<a href="/docs/intro/" class="td-sidebar-link" id="m-docsintro">"#,
            r#"<span class="">Intro</span></a>"#,
        ];
        let anchor = resolve_anchor(&lines, 0, 10).unwrap();
        assert_eq!(anchor.href, "docs/intro");
        assert_eq!(anchor.title, "Intro");
    }

    #[test]
    fn anchor_loose_pattern_without_id() {
        let lines = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<a class="td-sidebar-link" href="/">"#,
            r#"<span>Home</span>"#,
            "</a>",
        ];
        let anchor = resolve_anchor(&lines, 0, 10).unwrap();
        assert_eq!(anchor.href, "index");
        assert_eq!(anchor.title, "Home");
    }

    #[test]
    fn anchor_without_label_gets_path_title() {
        let lines = vec![r#"<li class="td-sidebar-nav__section-title"><a href="/guides/getting-started/">Getting started</a>"#];
        let anchor = resolve_anchor(&lines, 0, 10).unwrap();
        assert_eq!(anchor.href, "guides/getting-started");
        assert_eq!(anchor.title, "Getting Started");
    }

    #[test]
    fn anchor_outside_window_is_unresolved() {
        let lines = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            "<div>",
            r#"<a href="/late/" id="late"><span>Late</span></a>"#,
        ];
        assert!(resolve_anchor(&lines, 0, 2).is_none());
        assert!(resolve_anchor(&lines, 0, 3).is_some());
    }

    #[test]
    fn children_detected_at_next_depth() {
        let m = markers();
        let lines = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<a href="/a/" id="a"><span>A</span></a>"#,
            r#"<ul class="ul-1">"#,
        ];
        assert_eq!(find_child_group(&lines, 0, 0, &m, 50), Some(2));
        assert_eq!(find_child_group(&lines, 0, 1, &m, 50), None);
    }

    #[test]
    fn children_scan_stops_at_sibling_or_close() {
        let m = markers();
        let sibling = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<ul class="ul-1">"#,
        ];
        assert_eq!(find_child_group(&sibling, 0, 0, &m, 50), None);

        let close = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            "</ul>",
            r#"<ul class="ul-1">"#,
        ];
        assert_eq!(find_child_group(&close, 0, 0, &m, 50), None);
    }

    #[test]
    fn children_scan_does_not_confuse_ul_10_with_ul_1() {
        let m = markers();
        let lines = vec![
            r#"<li class="td-sidebar-nav__section-title">"#,
            r#"<ul class="ul-10">"#,
        ];
        assert_eq!(find_child_group(&lines, 0, 0, &m, 50), None);
    }

    #[test]
    fn children_beyond_window_are_missed() {
        // Known approximation: a nested list further away than the window
        // leaves its owner classified as a plain page.
        let m = markers();
        let mut lines = vec![r#"<li class="td-sidebar-nav__section-title">"#];
        lines.extend(std::iter::repeat_n("<div></div>", 60));
        lines.push(r#"<ul class="ul-1">"#);
        assert_eq!(find_child_group(&lines, 0, 0, &m, 50), None);
        assert_eq!(find_child_group(&lines, 0, 0, &m, 100), Some(61));
    }

    #[test]
    fn unclaimed_group_emits_item() {
        let doc = format!(
            "<a href=\"/guides/\"><span>Guides</span></a>\n<ul class=\"ul-0\">\n{}\n</li>\n{}\n</li>\n</ul>",
            entry("/guides/a", "A"),
            entry("/guides/b", "B"),
        );
        let extraction = extract(&doc);
        let items = &extraction.items;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Guides");
        assert_eq!(items[0].href, None);
        assert!(items[0].has_children);
        assert_eq!(items[0].depth, 0);

        assert_eq!(items[1].href.as_deref(), Some("guides/a"));
        assert_eq!(items[1].depth, 1);
        assert!(!items[1].has_children);
        assert_eq!(items[1].parent_group_title.as_deref(), Some("Guides"));
        assert_eq!(items[2].href.as_deref(), Some("guides/b"));
    }

    #[test]
    fn claimed_group_does_not_emit_item() {
        let doc = format!(
            "{}\n<ul class=\"ul-1\">\n{}\n</li>\n</ul>\n</li>",
            entry("/docs/", "Docs"),
            entry("/docs/a/", "A"),
        );
        let extraction = extract(&doc);
        let items = &extraction.items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Docs");
        assert!(items[0].has_children);
        assert_eq!(items[0].depth, 0);
        assert_eq!(items[1].title, "A");
        assert_eq!(items[1].depth, 1);
        assert_eq!(items[1].parent_group_title.as_deref(), Some("Docs"));
    }

    #[test]
    fn unresolvable_entry_is_skipped_and_counted() {
        let doc = format!(
            "<li class=\"td-sidebar-nav__section-title\">\n<span>No link</span>\n</li>\n{}",
            entry("/kept/", "Kept")
        );
        // The unresolved entry's window reaches the next entry's anchor, so
        // shrink it to the entry's own lines.
        let scan = ScanConfig {
            anchor_lookahead: 3,
            ..ScanConfig::default()
        };
        let extraction = extract_items(&doc, &markers(), &scan);
        assert_eq!(extraction.skipped, 1);
        assert_eq!(extraction.items.len(), 1);
        assert_eq!(extraction.items[0].href.as_deref(), Some("kept"));
    }

    #[test]
    fn stray_close_is_counted() {
        let extraction = extract("</ul>\n</ul>");
        assert_eq!(extraction.unbalanced_closes, 2);
        assert!(extraction.items.is_empty());
    }

    #[test]
    fn source_order_strictly_increases() {
        let doc = format!(
            "{}\n<ul class=\"ul-1\">\n{}\n</li>\n{}\n</li>\n</ul>\n</li>\n{}\n</li>",
            entry("/a/", "A"),
            entry("/a/b/", "B"),
            entry("/a/c/", "C"),
            entry("/d/", "D"),
        );
        let extraction = extract(&doc);
        let orders: Vec<usize> = extraction.items.iter().map(|i| i.source_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_document_yields_nothing() {
        let extraction = extract("");
        assert!(extraction.items.is_empty());
        assert_eq!(extraction.skipped, 0);
    }
}
