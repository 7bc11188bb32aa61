use std::sync::Arc;

use ratatui::layout::Rect;

use crate::catalog::Track;
use crate::config::WaveformSettings;
use crate::fetch::AudioFetcher;
use crate::store::{PROGRESS_MAX, PlaybackStore};

use super::analysis::spawn_analysis;
use super::blend::{WaveformData, WaveformPhase};
use super::frame::FrameHandle;
use super::playhead::Playhead;
use super::surface::{Pixel, Surface, bar_height_px};
use super::synthetic::synthetic_profile;

#[derive(Debug, Copy, Clone, Default)]
pub struct ViewOptions {
    /// Accept click/drag seeking while showing the current track.
    pub interactive: bool,
    /// Fetch and decode audio for a real profile.
    pub analysis: bool,
}

/// One mounted waveform: a track, its amplitude data and its own render loop.
///
/// Several views may show the same track; they only share the store.
pub struct WaveformView {
    settings: WaveformSettings,
    options: ViewOptions,
    fetcher: Arc<dyn AudioFetcher>,

    track: Option<Arc<Track>>,
    data: Option<WaveformData>,
    playhead: Playhead,
    frame: FrameHandle,
    surface: Surface,

    seen_revision: Option<u64>,
    active: bool,
    pulse: f32,
    last_area: Option<Rect>,
}

impl WaveformView {
    pub fn new(settings: WaveformSettings, options: ViewOptions, fetcher: Arc<dyn AudioFetcher>) -> Self {
        let playhead = Playhead::new(settings.smoothing, settings.snap_epsilon);
        Self {
            settings,
            options,
            fetcher,
            track: None,
            data: None,
            playhead,
            frame: FrameHandle::default(),
            surface: Surface::default(),
            seen_revision: None,
            active: false,
            pulse: 1.0,
            last_area: None,
        }
    }

    /// Bind (or rebind) the view. A different track resets everything.
    pub fn set_track(&mut self, track: Option<Arc<Track>>) {
        let same = match (&self.track, &track) {
            (Some(a), Some(b)) => a.id == b.id,
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }

        self.data = track.as_ref().map(|t| {
            let synthetic = synthetic_profile(
                t.id,
                self.settings.synthetic_points,
                self.settings.synthetic_style,
            );
            let mut data = WaveformData::new(synthetic, self.settings.blend_steps);
            if self.options.analysis {
                log::debug!("requesting waveform analysis for track {}", t.id);
                data.start_fetch(spawn_analysis(
                    Arc::clone(&self.fetcher),
                    t.mp3_url.clone(),
                    self.settings.analysis_blocks,
                ));
            }
            data
        });
        self.track = track;
        self.playhead.snap(0.0);
        self.seen_revision = None;
        self.active = false;
        self.pulse = 1.0;
        self.frame.reset();
        self.frame.request();
    }

    /// Stop the loop and drop any in-flight analysis.
    pub fn unmount(&mut self) {
        self.frame.cancel();
        self.data = None;
        self.track = None;
        self.last_area = None;
    }

    #[cfg(test)]
    pub fn track(&self) -> Option<&Arc<Track>> {
        self.track.as_ref()
    }

    pub fn phase(&self) -> Option<&WaveformPhase> {
        self.data.as_ref().map(|d| d.phase())
    }

    pub fn blend_factor(&self) -> f32 {
        self.data.as_ref().map(|d| d.blend_factor()).unwrap_or(0.0)
    }

    pub fn playhead(&self) -> f64 {
        self.playhead.value()
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn last_area(&self) -> Option<Rect> {
        self.last_area
    }

    /// Picks up a finished analysis. Returns true when a redraw is due.
    pub fn poll_analysis(&mut self) -> bool {
        let changed = self.data.as_mut().map(|d| d.poll()).unwrap_or(false);
        if changed {
            self.frame.request();
        }
        changed
    }

    /// Whether the next `frame` call would do anything.
    pub fn wants_frame(&self, store: &PlaybackStore) -> bool {
        self.track.is_some()
            && !self.frame.is_cancelled()
            && (self.frame.is_pending() || self.seen_revision != Some(store.revision()))
    }

    /// True while the view keeps requesting frames on its own.
    pub fn is_animating(&self) -> bool {
        self.frame.is_pending()
    }

    /// Run one frame of this view's loop against the current store state.
    ///
    /// Returns true when the view changed and needs to be drawn. The loop only
    /// keeps itself alive while its track is playing or a blend is running.
    pub fn frame(&mut self, store: &PlaybackStore, now_ms: f64) -> bool {
        if !self.wants_frame(store) {
            return false;
        }
        self.frame.take();
        self.seen_revision = Some(store.revision());

        let Some(track) = &self.track else {
            return false;
        };
        self.active = store.is_active(track.id);
        let playing = self.active && store.is_playing();
        let target = if self.active { store.progress() } else { 0.0 };

        let easing = self.playhead.advance(target, playing);
        let blending = self.data.as_mut().map(|d| d.advance()).unwrap_or(false);

        self.pulse = if playing {
            1.0 + (now_ms / self.settings.pulse_period_ms).sin() as f32 * self.settings.pulse_depth
        } else {
            1.0
        };

        if playing || blending || easing {
            self.frame.request();
        }
        true
    }

    /// Interactive seek at terminal column `column`.
    ///
    /// Only honored by interactive views showing the current track.
    pub fn seek_at(&mut self, store: &mut PlaybackStore, column: u16) -> bool {
        if !self.options.interactive {
            return false;
        }
        let (Some(track), Some(area)) = (&self.track, self.last_area) else {
            return false;
        };
        if !store.is_active(track.id) || area.width == 0 {
            return false;
        }

        let span = area.width.saturating_sub(1).max(1) as f64;
        let offset = column.saturating_sub(area.x).min(area.width - 1) as f64;
        // same granularity as a 0..100 range input with step 0.1
        let percent = ((offset / span * PROGRESS_MAX) * 10.0).round() / 10.0;

        store.set_progress(percent);
        store.set_seek_time(Some(percent));
        self.playhead.snap(percent);
        self.frame.request();
        true
    }

    /// Rasterize the current state into the surface for a `area`-sized widget.
    pub fn paint(&mut self, area: Rect) {
        self.last_area = Some(area);
        self.surface.resize(area.width, area.height);
        self.surface.clear();

        let Some(data) = &self.data else {
            return;
        };

        let bar_width = self.settings.bar_width.max(1);
        let pitch = bar_width.saturating_add(self.settings.bar_gap);
        let width = self.surface.width();
        let bars = (width / pitch) as usize;
        if bars == 0 {
            return;
        }

        let heights: Vec<u16> = (0..bars)
            .map(|i| {
                bar_height_px(
                    data.amplitude(i, bars),
                    self.pulse,
                    self.surface.height(),
                    self.settings.height_scale,
                    self.settings.min_bar_height,
                )
            })
            .collect();

        let draw = |surface: &mut Surface, paint: Pixel, clip_x: u16| {
            for (i, h) in heights.iter().enumerate() {
                let x = i as u16 * pitch;
                surface.fill_bar(x, bar_width, *h, paint, clip_x);
            }
        };

        draw(&mut self.surface, Pixel::Muted, width);
        if self.active {
            let clip = (self.playhead.value() / PROGRESS_MAX * width as f64).round() as u16;
            draw(&mut self.surface, Pixel::Accent, clip.min(width));
        }
    }
}
