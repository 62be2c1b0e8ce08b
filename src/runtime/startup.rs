use std::path::PathBuf;

use crate::app::App;
use crate::media::MediaElement;

/// Add whatever was named on the command line before the UI comes up.
pub fn add_initial_paths(app: &mut App, media: &mut dyn MediaElement, args: &[PathBuf]) {
    if args.is_empty() {
        return;
    }
    let added = app.add_paths(args, media);
    log::info!("added {added} track(s) from the command line");
}
