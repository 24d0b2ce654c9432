//! Small helpers shared across the pipeline.

pub mod date;
pub mod minify;
pub mod slug;
