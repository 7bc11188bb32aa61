use std::{env, path::PathBuf};

use super::schema::Settings;

/// Upper bound for `waveform.bar_width` and `waveform.bar_gap`, in columns.
const MAX_BAR_SPAN: u16 = 64;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `SOUNDSHELF__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SOUNDSHELF")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if !(self.audio.volume_step > 0.0 && self.audio.volume_step <= 1.0) {
            return Err("audio.volume_step must be within (0, 1]".to_string());
        }
        let wf = &self.waveform;
        if wf.synthetic_points == 0 {
            return Err("waveform.synthetic_points must be >= 1".to_string());
        }
        if wf.analysis_blocks == 0 {
            return Err("waveform.analysis_blocks must be >= 1".to_string());
        }
        if wf.blend_steps == 0 {
            return Err("waveform.blend_steps must be >= 1".to_string());
        }
        if !(wf.smoothing > 0.0 && wf.smoothing <= 1.0) {
            return Err("waveform.smoothing must be within (0, 1]".to_string());
        }
        if wf.bar_width == 0 || wf.bar_width > MAX_BAR_SPAN {
            return Err(format!("waveform.bar_width must be within [1, {MAX_BAR_SPAN}]"));
        }
        if wf.bar_gap > MAX_BAR_SPAN {
            return Err(format!("waveform.bar_gap must be <= {MAX_BAR_SPAN}"));
        }
        if wf.min_bar_height == 0 {
            return Err("waveform.min_bar_height must be >= 1".to_string());
        }
        if !(wf.height_scale > 0.0 && wf.height_scale <= 1.0) {
            return Err("waveform.height_scale must be within (0, 1]".to_string());
        }
        if wf.pulse_period_ms <= 0.0 {
            return Err("waveform.pulse_period_ms must be > 0".to_string());
        }
        if !(self.controls.scrub_percent > 0.0 && self.controls.scrub_percent <= 100.0) {
            return Err("controls.scrub_percent must be within (0, 100]".to_string());
        }
        if self.ui.frame_interval_ms == 0 || self.ui.idle_poll_ms == 0 {
            return Err("ui poll intervals must be >= 1ms".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SOUNDSHELF_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SOUNDSHELF_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/soundshelf/config.toml`
/// or `~/.config/soundshelf/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("soundshelf").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/soundshelf/soundshelf.log`
/// or `~/.local/state/soundshelf/soundshelf.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("soundshelf").join("soundshelf.log"))
}
