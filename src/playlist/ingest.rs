use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::UploadSettings;

use super::model::{Track, UNKNOWN_ARTIST};
use super::source::SourceRegistry;

pub(super) fn is_audio_file(path: &Path, settings: &UploadSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand a directory into the audio files it contains, sorted by file name.
fn files_in_dir(dir: &Path, settings: &UploadSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, settings))
        .collect()
}

/// Turn a user selection into tracks, one per accepted audio file, in selection order.
///
/// A directory stands for every audio file inside it. Content is not
/// inspected; an undecodable file still becomes a track.
pub fn ingest(
    paths: &[PathBuf],
    settings: &UploadSettings,
    registry: &SourceRegistry,
) -> Vec<Track> {
    let mut files: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(files_in_dir(path, settings));
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                files.push(path.clone());
            } else {
                log::info!("skipping non-audio file {}", path.display());
            }
        } else {
            log::warn!("cannot add {}: no such file or directory", path.display());
        }
    }

    let tracks: Vec<Track> = files
        .into_iter()
        .map(|path| {
            let title = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let source = registry.mint(&path);
            Track {
                title,
                artist: UNKNOWN_ARTIST.to_string(),
                path,
                source,
            }
        })
        .collect();

    log::info!("ingested {} track(s)", tracks.len());
    tracks
}

/// Split a prompt line into paths. Entries are separated by `;`, and a
/// leading `~/` is expanded against `$HOME`.
pub fn parse_selection(input: &str) -> Vec<PathBuf> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix("~/") {
            Some(rest) => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(rest))
                .unwrap_or_else(|| PathBuf::from(s)),
            None => PathBuf::from(s),
        })
        .collect()
}
