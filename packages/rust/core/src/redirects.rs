//! `_redirects` table conversion.
//!
//! Parses a whitespace-separated redirect table (`source destination [status]`,
//! one rule per line) into `{source, destination}` pairs for the site
//! configuration, rewriting wildcard syntax on the way.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use sidenav_shared::Result;

/// A single redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub source: String,
    pub destination: String,
}

/// Parsed redirect rules plus the number of malformed lines skipped.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    pub redirects: Vec<Redirect>,
    pub skipped: usize,
}

/// Parse a `_redirects` file body.
///
/// Blank lines and `#` comments are ignored. Lines with fewer than two fields
/// are skipped with a warning. A status code, if present, is dropped.
#[instrument(skip_all, fields(bytes = content.len()))]
pub fn parse_redirects(content: &str) -> RedirectTable {
    let mut table = RedirectTable::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(source), Some(destination)) = (parts.next(), parts.next()) else {
            warn!(line = index + 1, content = line, "redirect has insufficient parts");
            table.skipped += 1;
            continue;
        };

        table.redirects.push(rewrite_wildcards(source, destination));
    }

    debug!(
        redirects = table.redirects.len(),
        skipped = table.skipped,
        "redirect table parsed"
    );

    table
}

/// Translate `*` / `:splat` wildcards into `:slug*` path parameters.
fn rewrite_wildcards(source: &str, destination: &str) -> Redirect {
    if !source.contains('*') && !destination.contains(":splat") {
        return Redirect {
            source: source.to_string(),
            destination: destination.to_string(),
        };
    }

    let source = if let Some(prefix) = source.strip_suffix('*') {
        format!("{prefix}:slug*")
    } else if let Some(prefix) = source.strip_suffix('_') {
        format!("{prefix}*")
    } else {
        source.to_string()
    };

    Redirect {
        source,
        destination: destination.replace(":splat", ":slug*"),
    }
}

/// Serialize redirect rules as a pretty JSON array.
pub fn redirects_to_json(redirects: &[Redirect]) -> Result<String> {
    Ok(serde_json::to_string_pretty(redirects)?)
}
