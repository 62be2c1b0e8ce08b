use std::path::PathBuf;

use super::source::SourceHandle;

/// Artist shown for every added file; tags are not read on add.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A playlist entry: display metadata plus the source it plays from.
#[derive(Debug)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub path: PathBuf,
    pub source: SourceHandle,
}
