//! Scene → world asset export
//!
//! One forward pass per scene:
//! 1. `classify` types a node by its name (and light kind)
//! 2. `extract` builds the entity record, converting Y-up to Z-up
//! 3. the pipeline groups records into a `WorldAsset`
//!
//! A node that fails (malformed name, non-finite transform) is skipped with a
//! warning and listed in the report. The pass itself never aborts.

mod classify;
mod convert;
mod error;
mod extract;
mod pipeline;

pub use classify::{classify, Classification, ClassifyError};
pub use convert::*;
pub use error::ExportError;
pub use extract::extract;
pub use pipeline::{export_node, export_scene, export_to_writer, ExportReport, SkippedNode};
