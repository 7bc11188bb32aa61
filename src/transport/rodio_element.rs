//! `MediaElement` backed by a `rodio` output stream.
//!
//! Source bytes are fetched on a loader thread so the event loop never blocks
//! on the network. Each load (and each seek) builds a fresh paused `Sink`.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::fetch::AudioFetcher;

use super::element::{MediaElement, MediaEvent, PlaybackError};

struct Loaded {
    bytes: Arc<[u8]>,
    duration: Option<f64>,
}

enum LoadState {
    Empty,
    Loading(Receiver<Result<Loaded, String>>),
    Ready,
    Failed(String),
}

pub struct RodioElement {
    stream: OutputStream,
    fetcher: Arc<dyn AudioFetcher>,
    state: LoadState,
    bytes: Option<Arc<[u8]>>,
    sink: Option<Sink>,
    duration: Option<f64>,
    // position the current sink started from
    seek_base: Duration,
    volume: f32,
    want_playing: bool,
    ended: bool,
    events: Vec<MediaEvent>,
}

impl RodioElement {
    pub fn open(fetcher: Arc<dyn AudioFetcher>) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped, which would tear the TUI
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            fetcher,
            state: LoadState::Empty,
            bytes: None,
            sink: None,
            duration: None,
            seek_base: Duration::ZERO,
            volume: 1.0,
            want_playing: false,
            ended: false,
            events: Vec::new(),
        })
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Replace the sink with one positioned at `start`, keeping the pause state.
    fn rebuild_sink(&mut self, start: Duration) -> Result<(), PlaybackError> {
        let Some(bytes) = self.bytes.clone() else {
            return Err(PlaybackError::NoSource);
        };
        self.stop_sink();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);

        let mut source = Decoder::new(Cursor::new(Arc::clone(&bytes)))?;
        if self.duration.is_none() {
            self.duration = source.total_duration().map(|d| d.as_secs_f64());
        }
        if start.is_zero() {
            sink.append(source);
        } else {
            match source.try_seek(start) {
                Ok(()) => sink.append(source),
                Err(e) => {
                    log::debug!("seek unsupported ({}), skipping ahead instead", e);
                    let fresh = Decoder::new(Cursor::new(bytes))?;
                    sink.append(fresh.skip_duration(start));
                }
            }
        }

        if self.want_playing {
            sink.play();
        }
        self.sink = Some(sink);
        self.seek_base = start;
        self.ended = false;
        Ok(())
    }

    fn finish_loading(&mut self, result: Result<Loaded, String>) {
        match result {
            Ok(loaded) => {
                self.bytes = Some(loaded.bytes);
                self.duration = loaded.duration;
                match self.rebuild_sink(Duration::ZERO) {
                    Ok(()) => {
                        self.state = LoadState::Ready;
                        self.events.push(MediaEvent::LoadedMetadata);
                    }
                    Err(e) => {
                        log::warn!("cannot play source: {}", e);
                        self.state = LoadState::Failed(e.to_string());
                    }
                }
            }
            Err(msg) => {
                log::warn!("cannot load source: {}", msg);
                self.state = LoadState::Failed(msg);
            }
        }
    }

    fn poll_loader(&mut self) {
        let LoadState::Loading(rx) = &self.state else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => self.finish_loading(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.state = LoadState::Failed("loader exited".to_string());
            }
        }
    }
}

impl MediaElement for RodioElement {
    fn set_source(&mut self, url: &str) {
        self.stop_sink();
        self.bytes = None;
        self.duration = None;
        self.seek_base = Duration::ZERO;
        self.want_playing = false;
        self.ended = false;
        self.events.clear();

        // replacing the receiver abandons any load still in flight
        let (tx, rx) = mpsc::channel();
        let fetcher = Arc::clone(&self.fetcher);
        let url = url.to_string();
        thread::spawn(move || {
            let result = fetcher
                .fetch(&url)
                .map(|bytes| {
                    let duration = probe_duration(&bytes);
                    Loaded {
                        bytes: Arc::from(bytes),
                        duration,
                    }
                })
                .map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.state = LoadState::Loading(rx);
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match &self.state {
            LoadState::Empty => return Err(PlaybackError::NoSource),
            LoadState::Failed(msg) => return Err(PlaybackError::LoadFailed(msg.clone())),
            // honored once loading completes
            LoadState::Loading(_) => {
                self.want_playing = true;
                return Ok(());
            }
            LoadState::Ready => {}
        }

        self.want_playing = true;
        let finished = self.sink.as_ref().map(|s| s.empty()).unwrap_or(true);
        if finished {
            // replay from the start, like an ended audio element
            return self.rebuild_sink(Duration::ZERO);
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.want_playing = false;
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn current_time(&self) -> f64 {
        let pos = match &self.sink {
            Some(sink) => (self.seek_base + sink.get_pos()).as_secs_f64(),
            None => self.seek_base.as_secs_f64(),
        };
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    fn set_current_time(&mut self, secs: f64) {
        let start = Duration::from_secs_f64(secs.max(0.0));
        if let Err(e) = self.rebuild_sink(start) {
            log::warn!("seek to {:.2}s failed: {}", secs, e);
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.poll_loader();

        if let Some(sink) = &self.sink {
            if self.want_playing && !self.ended {
                if sink.empty() {
                    self.ended = true;
                    self.want_playing = false;
                    self.events.push(MediaEvent::Ended);
                } else {
                    self.events.push(MediaEvent::TimeUpdate);
                }
            }
        }

        std::mem::take(&mut self.events)
    }
}

fn probe_duration(bytes: &[u8]) -> Option<f64> {
    let probe = Probe::new(Cursor::new(bytes)).guess_file_type().ok()?;
    let tagged = probe.read().ok()?;
    let secs = tagged.properties().duration().as_secs_f64();
    (secs > 0.0).then_some(secs)
}
