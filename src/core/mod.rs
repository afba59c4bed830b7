//! Core module - Business logic
//!
//! Leaves first: dates and line classification, extraction, categorization,
//! grouping, rendering. `pipeline` wires them to the files of a run.

pub mod categorizer;
pub mod classifier;
pub mod date;
pub mod extractor;
pub mod gate;
pub mod grouping;
pub mod pipeline;
pub mod processed;
pub mod render;
pub mod source;
pub mod staging;
