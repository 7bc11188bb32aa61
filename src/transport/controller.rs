use crate::catalog::TrackId;
use crate::store::{PROGRESS_MAX, PlaybackStore};

use super::element::{MediaElement, MediaEvent};

/// Drives one `MediaElement` from the playback store.
///
/// Call `tick` once per loop iteration. Each tick applies, in order: source
/// rebinding, play/pause intent, volume, a pending seek; then it drains the
/// element's events and writes the position back into the store.
pub struct TransportController<E: MediaElement> {
    element: E,
    bound: Option<TrackId>,
    applied_playing: Option<bool>,
    applied_volume: Option<f32>,
}

impl<E: MediaElement> TransportController<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            bound: None,
            applied_playing: None,
            applied_volume: None,
        }
    }

    pub fn tick(&mut self, store: &mut PlaybackStore) {
        self.sync_source(store);
        self.sync_play_state(store);
        self.sync_volume(store);
        self.apply_pending_seek(store);
        self.drain_events(store);
    }

    /// Elapsed seconds of the bound source.
    pub fn current_time(&self) -> f64 {
        if self.bound.is_some() {
            self.element.current_time()
        } else {
            0.0
        }
    }

    /// Duration of the bound source, once known and usable.
    pub fn duration(&self) -> Option<f64> {
        self.bound?;
        valid_duration(self.element.duration())
    }

    #[cfg(test)]
    pub fn element(&self) -> &E {
        &self.element
    }

    #[cfg(test)]
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    fn sync_source(&mut self, store: &PlaybackStore) {
        let Some(track) = store.current_track() else {
            if self.bound.take().is_some() {
                self.element.pause();
            }
            return;
        };
        if self.bound == Some(track.id) {
            return;
        }

        log::info!("loading track {} ({})", track.id, track.mp3_url);
        self.element.set_source(&track.mp3_url);
        self.bound = Some(track.id);
        self.applied_playing = None;
    }

    fn sync_play_state(&mut self, store: &PlaybackStore) {
        if self.bound.is_none() {
            return;
        }
        let want = store.is_playing();
        if self.applied_playing == Some(want) {
            return;
        }

        if want {
            // a refused start leaves the store's intent untouched
            if let Err(e) = self.element.play() {
                log::warn!("playback did not start: {}", e);
            }
        } else {
            self.element.pause();
        }
        self.applied_playing = Some(want);
    }

    fn sync_volume(&mut self, store: &PlaybackStore) {
        let volume = store.volume();
        if self.applied_volume != Some(volume) {
            self.element.set_volume(volume);
            self.applied_volume = Some(volume);
        }
    }

    fn apply_pending_seek(&mut self, store: &mut PlaybackStore) {
        let Some(percent) = store.seek_time() else {
            return;
        };
        if self.bound.is_none() {
            store.set_seek_time(None);
            return;
        }
        // unknown duration: keep the request for a later tick
        let Some(duration) = valid_duration(self.element.duration()) else {
            return;
        };

        let target = percent / PROGRESS_MAX * duration;
        log::debug!("seeking to {:.2}s ({:.1}%)", target, percent);
        self.element.set_current_time(target);
        store.set_progress(percent);
        store.set_seek_time(None);
    }

    fn drain_events(&mut self, store: &mut PlaybackStore) {
        let mut metadata_arrived = false;

        for event in self.element.poll_events() {
            match event {
                MediaEvent::LoadedMetadata => {
                    metadata_arrived = true;
                    self.write_position(store);
                }
                MediaEvent::TimeUpdate => self.write_position(store),
                MediaEvent::Ended => {
                    log::debug!("track {:?} ended", self.bound);
                    if store.is_playing() {
                        store.toggle_play();
                    }
                    // rewind the element too so the clock agrees with progress
                    self.element.set_current_time(0.0);
                    store.set_progress(0.0);
                    self.applied_playing = Some(store.is_playing());
                }
            }
        }

        if metadata_arrived {
            self.apply_pending_seek(store);
        }
    }

    fn write_position(&self, store: &mut PlaybackStore) {
        if store.seek_time().is_some() {
            return;
        }
        if let Some(duration) = valid_duration(self.element.duration()) {
            store.set_progress(self.element.current_time() / duration * PROGRESS_MAX);
        }
    }
}

fn valid_duration(d: Option<f64>) -> Option<f64> {
    d.filter(|d| d.is_finite() && *d > 0.0)
}
