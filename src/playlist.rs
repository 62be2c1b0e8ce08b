//! Track store: playlist entries, their revocable sources, and the
//! ingestor that turns selected files into tracks.

mod ingest;
mod model;
mod source;

pub use ingest::{ingest, parse_selection};
pub use model::*;
pub use source::{SourceHandle, SourceId, SourceRegistry};
