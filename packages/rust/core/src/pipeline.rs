//! End-to-end build: sidebar markup → items → tree → navigation document.
//!
//! One call processes one document with no state carried between calls.

use tracing::{info, instrument};

use sidenav_shared::{AppConfig, NavigationDocument, NavigationItem, Result};

use crate::export::export_navigation;
use crate::extract::{Markers, extract_items};
use crate::hierarchy::build_tree;
use crate::summary::NavigationStats;

/// Result of [`build_navigation`].
#[derive(Debug, Clone)]
pub struct NavigationBuild {
    /// The exported navigation envelope.
    pub document: NavigationDocument,
    /// The flat items the tree was built from.
    pub items: Vec<NavigationItem>,
    /// Counts for progress output.
    pub stats: NavigationStats,
}

/// Build the navigation document for one sidebar.
///
/// Fails only on invalid configuration; unparsable markers are skipped and
/// counted in [`NavigationStats`].
#[instrument(skip_all, fields(bytes = markup.len()))]
pub fn build_navigation(markup: &str, config: &AppConfig) -> Result<NavigationBuild> {
    config.validate()?;
    let markers = Markers::new(&config.markers)?;

    let extraction = extract_items(markup, &markers, &config.scan);
    let tree = build_tree(&extraction.items);
    let stats = NavigationStats::collect(&tree, &extraction);

    info!(
        items = stats.items_discovered,
        groups = stats.groups,
        pages = stats.pages,
        skipped = stats.skipped_markers,
        "navigation built"
    );

    Ok(NavigationBuild {
        document: export_navigation(tree, &config.export),
        items: extraction.items,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidenav_shared::{Group, NavNode};

    fn groups(build: &NavigationBuild) -> &[NavNode] {
        &build.document.navigation.languages[0].tabs[0].groups
    }

    fn entry(href: &str, title: &str) -> String {
        format!(
            "<li class=\"td-sidebar-nav__section-title\" id=\"m-{title}-li\">\n\
             <a href=\"{href}\" class=\"td-sidebar-link\" id=\"m-{title}\"><span class=\"\">{title}</span></a>"
        )
    }

    #[test]
    fn single_group_with_two_pages() {
        let markup = format!(
            "<a href=\"/guides/\"><span>Guides</span></a>\n\
             <ul class=\"ul-0\">\n{}\n</li>\n{}\n</li>\n</ul>",
            entry("/guides/a", "A"),
            entry("/guides/b", "B"),
        );
        let build = build_navigation(&markup, &AppConfig::default()).unwrap();
        assert_eq!(
            groups(&build),
            &[NavNode::Group(Group {
                title: "Guides".into(),
                children: vec![
                    NavNode::Page("guides/a".into()),
                    NavNode::Page("guides/b".into()),
                ],
            })]
        );
    }

    #[test]
    fn entry_without_link_is_dropped() {
        let markup = format!(
            "<ul class=\"ul-0\">\n{}\n</li>\n<li class=\"td-sidebar-nav__section-title\">\n<span>Broken</span>\n</li>\n</ul>",
            entry("/ok/", "Ok"),
        );
        let build = build_navigation(&markup, &AppConfig::default()).unwrap();
        assert_eq!(build.stats.skipped_markers, 1);
        // One unclaimed list plus the resolvable entry.
        assert_eq!(build.stats.items_discovered, 2);
        assert_eq!(build.stats.pages, 1);
    }

    #[test]
    fn two_level_groups() {
        let markup = "\
<a href=\"/outer/\"><span>Outer</span></a>
<ul class=\"ul-0\">
<a href=\"/outer/inner/\"><span>Inner</span></a>
<ul class=\"ul-1\">
<li class=\"td-sidebar-nav__section-title\"><a href=\"/outer/inner/leaf/\" id=\"leaf\"><span>Leaf</span></a></li>
</ul>
</ul>";
        let build = build_navigation(markup, &AppConfig::default()).unwrap();
        let top = groups(&build);
        assert_eq!(top.len(), 1);
        let outer = top[0].as_group().unwrap();
        assert_eq!(outer.title, "Outer");
        assert_eq!(outer.children.len(), 1);
        let inner = outer.children[0].as_group().unwrap();
        assert_eq!(inner.title, "Inner");
        assert_eq!(inner.children, vec![NavNode::Page("outer/inner/leaf".into())]);
    }

    #[test]
    fn no_markers_yields_default_group() {
        for markup in ["", "<html><body><p>Nothing here</p></body></html>"] {
            let build = build_navigation(markup, &AppConfig::default()).unwrap();
            assert_eq!(
                groups(&build),
                &[NavNode::Group(Group::new("Documentation"))]
            );
            assert_eq!(build.stats.items_discovered, 0);
        }
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let markup = std::fs::read_to_string("../../../fixtures/html/sidebar.fixture.html")
            .expect("read fixture");
        let config = AppConfig::default();
        let first = build_navigation(&markup, &config).unwrap();
        let second = build_navigation(&markup, &config).unwrap();
        assert_eq!(first.document, second.document);
        assert_eq!(first.items, second.items);
    }

    #[test]
    fn sidebar_fixture_structure() {
        let markup = std::fs::read_to_string("../../../fixtures/html/sidebar.fixture.html")
            .expect("read fixture");
        let build = build_navigation(&markup, &AppConfig::default()).unwrap();
        let expected: NavigationDocument = serde_json::from_str(
            &std::fs::read_to_string("../../../fixtures/json/navigation.fixture.json")
                .expect("read expected navigation"),
        )
        .expect("parse expected navigation");

        assert_eq!(build.document, expected);
        assert_eq!(build.stats.items_discovered, 6);
        assert_eq!(build.stats.skipped_markers, 1);
        // The root list's class does not start with the depth prefix, so its
        // closing tag has nothing to close.
        assert_eq!(build.stats.unbalanced_closes, 1);
    }

    #[test]
    fn siblings_preserve_source_order() {
        let markup = std::fs::read_to_string("../../../fixtures/html/sidebar.fixture.html")
            .expect("read fixture");
        let build = build_navigation(&markup, &AppConfig::default()).unwrap();

        // Pages under the same group appear in the same relative order as
        // their items.
        fn check(nodes: &[NavNode], items: &[NavigationItem]) {
            let positions: Vec<usize> = nodes
                .iter()
                .filter_map(NavNode::as_page)
                .map(|page| {
                    items
                        .iter()
                        .find(|item| item.href.as_deref() == Some(page))
                        .map(|item| item.source_order)
                        .expect("page comes from an item")
                })
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
            for group in nodes.iter().filter_map(NavNode::as_group) {
                check(&group.children, items);
            }
        }

        check(groups(&build), &build.items);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.markers.leaf_class = String::new();
        assert!(build_navigation("", &config).is_err());
    }

    #[test]
    fn export_settings_are_applied() {
        let mut config = AppConfig::default();
        config.export.tab = "Reference".into();
        config.export.language = "de".into();
        let build = build_navigation("", &config).unwrap();
        let language = &build.document.navigation.languages[0];
        assert_eq!(language.language, "de");
        assert_eq!(language.tabs[0].tab, "Reference");
    }
}
