use std::sync::Arc;

use crate::catalog::{Track, TrackId};

/// Upper bound of the normalized position scale.
pub const PROGRESS_MAX: f64 = 100.0;

/// Playback intent and position shared by every consumer.
#[derive(Debug, Clone)]
pub struct PlaybackStore {
    current_track: Option<Arc<Track>>,
    is_playing: bool,
    volume: f32,
    progress: f64,
    seek_time: Option<f64>,
    revision: u64,
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlaybackStore {
    pub fn new(volume: f32) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            volume: clamp_volume(volume).unwrap_or(1.0),
            progress: 0.0,
            seek_time: None,
            revision: 0,
        }
    }

    /// Same track toggles play/pause; a different track replaces the current
    /// one, starts playing and rewinds progress.
    pub fn play_track(&mut self, track: &Arc<Track>) {
        if self.is_active(track.id) {
            self.toggle_play();
            return;
        }

        self.current_track = Some(Arc::clone(track));
        self.is_playing = true;
        self.progress = 0.0;
        self.seek_time = None;
        self.bump();
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        self.bump();
    }

    /// Store a volume clamped to [0, 1]. NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        let Some(v) = clamp_volume(volume) else {
            return;
        };
        if v != self.volume {
            self.volume = v;
            self.bump();
        }
    }

    pub fn change_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    /// Store a normalized position clamped to [0, 100]. NaN is ignored.
    pub fn set_progress(&mut self, progress: f64) {
        let Some(p) = clamp_percent(progress) else {
            return;
        };
        if p != self.progress {
            self.progress = p;
            self.bump();
        }
    }

    /// Record or clear a one-shot seek request, in percent.
    ///
    /// Requests made while nothing is loaded are dropped.
    pub fn set_seek_time(&mut self, seek: Option<f64>) {
        let seek = match seek {
            Some(t) => {
                if self.current_track.is_none() {
                    return;
                }
                match clamp_percent(t) {
                    Some(t) => Some(t),
                    None => return,
                }
            }
            None => None,
        };
        if seek != self.seek_time {
            self.seek_time = seek;
            self.bump();
        }
    }

    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.current_track.as_ref()
    }

    pub fn current_track_id(&self) -> Option<TrackId> {
        self.current_track.as_ref().map(|t| t.id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn seek_time(&self) -> Option<f64> {
        self.seek_time
    }

    /// True when `id` is the track currently loaded, playing or not.
    pub fn is_active(&self, id: TrackId) -> bool {
        self.current_track_id() == Some(id)
    }

    /// Changes every time an accessor would return something different.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn clamp_volume(v: f32) -> Option<f32> {
    (!v.is_nan()).then(|| v.clamp(0.0, 1.0))
}

fn clamp_percent(p: f64) -> Option<f64> {
    (!p.is_nan()).then(|| p.clamp(0.0, PROGRESS_MAX))
}
