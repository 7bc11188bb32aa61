//! Real amplitude profile: fetch, decode channel 0, reduce to block peaks.
//!
//! Work runs on its own thread per request. The result travels back over a
//! channel; dropping the `AnalysisHandle` abandons it.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::fetch::{AudioFetcher, FetchError, extension_hint};

use super::peaks::peak_profile;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("cannot decode audio: {0}")]
    Decode(#[from] SymphoniaError),

    #[error("no decodable audio track")]
    NoTrack,

    #[error("decoded audio too short: {samples} samples for {blocks} blocks")]
    TooShort { samples: usize, blocks: usize },

    #[error("analysis worker exited without a result")]
    Abandoned,
}

pub type AnalysisResult = Result<Vec<f32>, AnalysisError>;

/// Pending result of one `spawn_analysis` call.
#[derive(Debug)]
pub struct AnalysisHandle {
    rx: Receiver<AnalysisResult>,
}

impl AnalysisHandle {
    /// Non-blocking: `None` while the worker is still busy.
    pub fn try_take(&self) -> Option<AnalysisResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AnalysisError::Abandoned)),
        }
    }

    #[cfg(test)]
    pub(crate) fn resolved(result: AnalysisResult) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    #[cfg(test)]
    pub(crate) fn pending() -> (mpsc::Sender<AnalysisResult>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

pub fn spawn_analysis(fetcher: Arc<dyn AudioFetcher>, url: String, blocks: usize) -> AnalysisHandle {
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("waveform-analysis".into())
        .spawn(move || {
            let result = analyze(fetcher.as_ref(), &url, blocks);
            // receiver gone means the view moved on
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        log::warn!("failed to spawn analysis worker: {}", e);
    }

    AnalysisHandle { rx }
}

pub fn analyze(fetcher: &dyn AudioFetcher, url: &str, blocks: usize) -> AnalysisResult {
    let bytes = fetcher.fetch(url)?;
    let samples = decode_channel0(bytes, extension_hint(url).as_deref())?;
    peak_profile(&samples, blocks).ok_or(AnalysisError::TooShort {
        samples: samples.len(),
        blocks,
    })
}

/// Decode the whole stream and keep the first channel's samples.
pub fn decode_channel0(bytes: Vec<u8>, ext: Option<&str>) -> Result<Vec<f32>, AnalysisError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = ext {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(AnalysisError::NoTrack)?;
    let track_id = track.id;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut buf_frames: u64 = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) if samples.is_empty() => return Err(e.into()),
            Err(e) => {
                log::debug!("stopping decode early: {}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                log::debug!("skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count().max(1);
        let frames = decoded.capacity() as u64;
        if sample_buf.is_none() || frames > buf_frames {
            sample_buf = Some(SampleBuffer::new(frames, spec));
            buf_frames = frames;
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend(buf.samples().iter().step_by(channels).copied());
        }
    }

    Ok(samples)
}
