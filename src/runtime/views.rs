use std::sync::Arc;

use crate::app::App;
use crate::config::WaveformSettings;
use crate::fetch::AudioFetcher;
use crate::store::PlaybackStore;
use crate::waveform::{ViewOptions, WaveformView};

/// The two mounted waveform instances.
pub struct Views {
    /// Player bar: follows the current track, accepts seeking.
    pub player: WaveformView,
    /// Detail pane: follows the selected track.
    pub preview: WaveformView,
}

impl Views {
    pub fn new(settings: &WaveformSettings, fetcher: Arc<dyn AudioFetcher>) -> Self {
        let player = WaveformView::new(
            settings.clone(),
            ViewOptions {
                interactive: true,
                analysis: settings.player_analysis,
            },
            Arc::clone(&fetcher),
        );
        let preview = WaveformView::new(
            settings.clone(),
            ViewOptions {
                interactive: false,
                analysis: settings.preview_analysis,
            },
            fetcher,
        );
        Self { player, preview }
    }

    /// Mount, rebind or unmount each view to match the app and store.
    pub fn bind(&mut self, app: &App, store: &PlaybackStore) {
        match store.current_track() {
            Some(t) => self.player.set_track(Some(Arc::clone(t))),
            None => self.player.unmount(),
        }
        match app.selected_track() {
            Some(t) => self.preview.set_track(Some(Arc::clone(t))),
            None => self.preview.unmount(),
        }
    }

    pub fn poll_analysis(&mut self) -> bool {
        // both must be polled
        let a = self.player.poll_analysis();
        let b = self.preview.poll_analysis();
        a || b
    }

    /// Run one frame of each view. Returns true when anything needs drawing.
    pub fn frame(&mut self, store: &PlaybackStore, now_ms: f64) -> bool {
        let a = self.player.frame(store, now_ms);
        let b = self.preview.frame(store, now_ms);
        a || b
    }

    pub fn animating(&self) -> bool {
        self.player.is_animating() || self.preview.is_animating()
    }
}
