use thiserror::Error;

/// Notifications produced by a media element's own clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Duration became known for the bound source.
    LoadedMetadata,
    /// Playback position moved.
    TimeUpdate,
    /// Playback reached the end of the source.
    Ended,
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no source is bound")]
    NoSource,

    #[error("source could not be loaded: {0}")]
    LoadFailed(String),

    #[error("failed to decode source: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
}

/// Something that plays one source at a time and reports its position.
///
/// Times are in seconds. `duration` is `None` until the source's metadata is
/// known.
pub trait MediaElement {
    /// Bind a new source, stopping whatever was bound before.
    fn set_source(&mut self, url: &str);

    /// Start or resume playback. May be refused.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn duration(&self) -> Option<f64>;

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Drain events accumulated since the previous call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
