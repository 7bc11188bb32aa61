//! Transport controller: applies the playback store's intent to a media
//! element and feeds the element's clock back into the store.
//!
//! `MediaElement` is the seam between the two; `RodioElement` is the real
//! implementation used by the binary.

mod controller;
mod element;
mod rodio_element;

pub use controller::TransportController;
pub use element::{MediaElement, MediaEvent, PlaybackError};
pub use rodio_element::RodioElement;

#[cfg(test)]
mod tests;
