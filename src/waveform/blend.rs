use super::analysis::{AnalysisError, AnalysisHandle};

/// Where a view's amplitude data stands for its current track.
#[derive(Debug)]
pub enum WaveformPhase {
    /// Synthetic data only; nothing requested.
    Idle,
    /// Real data requested; still synthetic.
    Fetching(AnalysisHandle),
    /// Cross-fading toward the real profile.
    Blending { real: Vec<f32>, step: u32 },
    /// Real profile fully shown.
    Settled { real: Vec<f32> },
    /// Analysis failed; synthetic for the rest of this track's life.
    Unavailable,
}

/// Synthetic profile plus whatever real data has arrived for one track.
#[derive(Debug)]
pub struct WaveformData {
    synthetic: Vec<f32>,
    phase: WaveformPhase,
    steps: u32,
}

impl WaveformData {
    pub fn new(synthetic: Vec<f32>, steps: u32) -> Self {
        Self {
            synthetic,
            phase: WaveformPhase::Idle,
            steps: steps.max(1),
        }
    }

    pub fn phase(&self) -> &WaveformPhase {
        &self.phase
    }

    #[cfg(test)]
    pub fn synthetic(&self) -> &[f32] {
        &self.synthetic
    }

    pub fn real(&self) -> Option<&[f32]> {
        match &self.phase {
            WaveformPhase::Blending { real, .. } | WaveformPhase::Settled { real } => Some(real),
            _ => None,
        }
    }

    /// Idle -> Fetching. Ignored in any other phase.
    pub fn start_fetch(&mut self, handle: AnalysisHandle) -> bool {
        if !matches!(self.phase, WaveformPhase::Idle) {
            return false;
        }
        self.phase = WaveformPhase::Fetching(handle);
        true
    }

    /// Check the in-flight analysis. Returns true when the phase changed.
    pub fn poll(&mut self) -> bool {
        let WaveformPhase::Fetching(handle) = &self.phase else {
            return false;
        };
        match handle.try_take() {
            Some(result) => {
                self.resolve(result);
                true
            }
            None => false,
        }
    }

    fn resolve(&mut self, result: Result<Vec<f32>, AnalysisError>) {
        self.phase = match result {
            Ok(real) if !real.is_empty() => {
                log::debug!("real waveform ready ({} blocks)", real.len());
                WaveformPhase::Blending { real, step: 0 }
            }
            Ok(_) => {
                log::warn!("waveform analysis produced no data");
                WaveformPhase::Unavailable
            }
            Err(e) => {
                log::warn!("waveform analysis failed: {}", e);
                WaveformPhase::Unavailable
            }
        };
    }

    /// Move the cross-fade one step. Returns true while still blending.
    pub fn advance(&mut self) -> bool {
        let phase = std::mem::replace(&mut self.phase, WaveformPhase::Idle);
        self.phase = match phase {
            WaveformPhase::Blending { real, step } => {
                let step = step.saturating_add(1);
                if step >= self.steps {
                    WaveformPhase::Settled { real }
                } else {
                    WaveformPhase::Blending { real, step }
                }
            }
            other => other,
        };
        self.is_blending()
    }

    pub fn is_blending(&self) -> bool {
        matches!(self.phase, WaveformPhase::Blending { .. })
    }

    /// 0 is all synthetic, 1 is all real.
    pub fn blend_factor(&self) -> f32 {
        match &self.phase {
            WaveformPhase::Blending { step, .. } => (*step as f32 / self.steps as f32).min(1.0),
            WaveformPhase::Settled { .. } => 1.0,
            _ => 0.0,
        }
    }

    /// Amplitude for bar `bar` of `bars`, picked by proportional index from
    /// each source and mixed by the blend factor.
    pub fn amplitude(&self, bar: usize, bars: usize) -> f32 {
        let synthetic = sample_at(&self.synthetic, bar, bars);
        let Some(real) = self.real() else {
            return synthetic;
        };
        let t = self.blend_factor();
        synthetic + (sample_at(real, bar, bars) - synthetic) * t
    }
}

fn sample_at(data: &[f32], bar: usize, bars: usize) -> f32 {
    if bars == 0 || data.is_empty() {
        return 0.1;
    }
    let idx = bar * data.len() / bars;
    data.get(idx).copied().unwrap_or(0.1)
}
