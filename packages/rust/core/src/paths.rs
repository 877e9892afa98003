//! Link target normalization and path-derived labels.

use sidenav_shared::INDEX_PAGE;

/// Normalize a sidebar link target into a page path.
///
/// Leading and trailing slashes are stripped; a target that is only slashes
/// (the site root) becomes [`INDEX_PAGE`].
pub fn normalize_href(href: &str) -> String {
    let cleaned = href.trim().trim_matches('/');

    if cleaned.is_empty() {
        return INDEX_PAGE.to_string();
    }

    cleaned.to_string()
}

/// Extract a human-readable title from a page path.
///
/// Used when an entry has a link but no label text.
pub fn title_from_path(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);

    if segment == INDEX_PAGE {
        return "Overview".to_string();
    }

    let title = segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.collect::<String>())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}

/// Decode HTML entities and collapse runs of whitespace into single spaces.
pub fn clean_label(raw: &str) -> String {
    html_escape::decode_html_entities(raw.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
