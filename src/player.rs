//! The playlist player: state model, transport, playback observer and the
//! time formatter used by the view.

mod format;
mod model;
mod observer;

pub use format::format_time;
pub use model::*;
pub use observer::PlaybackObserver;

#[cfg(test)]
mod tests;
