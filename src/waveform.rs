//! Waveform data and rendering.
//!
//! Every track gets an instant synthetic profile keyed by its id. A view with
//! analysis enabled also fetches and decodes the audio in the background and
//! cross-fades to the real peak profile once it arrives.

mod analysis;
mod blend;
mod frame;
mod peaks;
mod playhead;
mod surface;
mod synthetic;
mod view;
mod widget;

pub use blend::WaveformPhase;
pub use view::{ViewOptions, WaveformView};
pub use widget::WaveformCanvas;
