//! Media element: the playback primitive behind the player.
//!
//! `MediaElement` is the seam the player model talks to. `RodioElement`
//! implements it by forwarding commands to a background thread that owns the
//! `rodio` output stream and reports progress through `MediaEvent`s.

mod element;
mod sink;
mod thread;
mod types;

pub use element::{MediaElement, RodioElement};
pub use types::MediaEvent;
