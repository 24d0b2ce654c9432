//! The resolved site: canonical URLs and the cross-referenced content graph.

pub mod document;
pub mod graph;
pub mod links;

pub use document::{Document, ResolvedPage, Tag};
pub use graph::{ContentGraph, GraphBuilder, GraphError, TagEntry};
pub use links::{LinkResolver, SiteLinks};
