use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/soundshelf/config.toml` or `~/.config/soundshelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOUNDSHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub waveform: WaveformSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub fetch: FetchSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, in [0, 1].
    pub initial_volume: f32,
    /// Amount added or removed by a single volume key press.
    pub volume_step: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntheticStyle {
    /// Parabolic build/fade envelope.
    #[serde(alias = "envelope")]
    Plain,
    /// Stepped intro/build/drop/outro energy curve.
    #[serde(alias = "sections", alias = "section-energy")]
    Sectioned,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// Number of points in the synthetic profile.
    pub synthetic_points: usize,
    pub synthetic_style: SyntheticStyle,
    /// Number of peak blocks computed from decoded audio.
    pub analysis_blocks: usize,
    /// Frames needed to cross-fade from synthetic to real data.
    pub blend_steps: u32,
    /// Fraction of the remaining distance the playhead moves per frame.
    pub smoothing: f64,
    /// Distance (in percent) under which the smoothed playhead snaps to its target.
    pub snap_epsilon: f64,
    /// Bar width in columns.
    pub bar_width: u16,
    /// Gap between bars in columns.
    pub bar_gap: u16,
    /// Minimum bar height in half-cell pixels.
    pub min_bar_height: u16,
    /// Share of the surface height a full-amplitude bar occupies.
    pub height_scale: f32,
    /// Depth of the "breathing" modulation while playing (0 disables it).
    pub pulse_depth: f32,
    /// Divisor applied to wall-clock milliseconds before taking the sine.
    pub pulse_period_ms: f64,
    /// Whether the player bar fetches and decodes audio for a real profile.
    pub player_analysis: bool,
    /// Whether the detail pane preview does the same.
    pub preview_analysis: bool,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            synthetic_points: 100,
            synthetic_style: SyntheticStyle::Plain,
            analysis_blocks: 80,
            blend_steps: 20,
            smoothing: 0.2,
            snap_epsilon: 0.01,
            bar_width: 1,
            bar_gap: 1,
            min_bar_height: 2,
            height_scale: 0.8,
            pulse_depth: 0.1,
            pulse_period_ms: 150.0,
            player_analysis: true,
            preview_analysis: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percent of the track to scrub when pressing `H` / `L`.
    pub scrub_percent: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_percent: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the muted bar color starts with the dark palette.
    pub dark_mode: bool,
    /// Poll interval while any waveform is animating.
    pub frame_interval_ms: u64,
    /// Poll interval while everything is static.
    pub idle_poll_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ royalty-free music, ready to license ~ ".to_string(),
            dark_mode: true,
            frame_interval_ms: 16,
            idle_poll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog file or directory used when no argument is given.
    pub path: Option<PathBuf>,
    /// File extensions to treat as audio when scanning a directory.
    pub extensions: Vec<String>,
    /// Whether to recurse into subdirectories when scanning.
    pub recursive: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            recursive: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Largest audio body accepted from a remote source.
    pub max_bytes: u64,
    /// Global request timeout; 0 disables it.
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024 * 1024,
            timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// Log file; `None` uses the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
