/// Drawn playhead position, eased toward the store's progress.
#[derive(Debug, Clone)]
pub struct Playhead {
    value: f64,
    smoothing: f64,
    snap_epsilon: f64,
}

impl Playhead {
    pub fn new(smoothing: f64, snap_epsilon: f64) -> Self {
        Self {
            value: 0.0,
            smoothing: smoothing.clamp(f64::MIN_POSITIVE, 1.0),
            snap_epsilon: snap_epsilon.max(0.0),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move toward `target`. Without `animate` the value jumps straight there.
    ///
    /// Returns true while the value is still short of the target.
    pub fn advance(&mut self, target: f64, animate: bool) -> bool {
        let diff = target - self.value;
        if !animate || diff.abs() <= self.snap_epsilon {
            self.value = target;
            return false;
        }
        self.value += diff * self.smoothing;
        true
    }

    pub fn snap(&mut self, value: f64) {
        self.value = value;
    }
}
