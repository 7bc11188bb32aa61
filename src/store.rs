//! Playback state store: the single authoritative holder of playback intent
//! and position.
//!
//! The runtime owns one `PlaybackStore` for the whole session and lends it to
//! the transport controller, every mounted waveform view and the UI. Readers
//! detect changes by comparing `revision()` values between frames.

mod state;

pub use state::*;

#[cfg(test)]
mod tests;
