//! Sidebar navigation reconstruction for sidenav.
//!
//! This crate turns a rendered documentation sidebar into a nested
//! navigation document in three stages: item extraction
//! ([`extract`]), tree building ([`hierarchy`]) and envelope export
//! ([`export`]). [`pipeline::build_navigation`] runs all three.
//! The crate never touches the filesystem; callers pass document text in
//! and get values back.

pub mod export;
pub mod extract;
pub mod hierarchy;
pub mod paths;
pub mod pipeline;
pub mod redirects;
pub mod summary;

pub use pipeline::{NavigationBuild, build_navigation};
