use crate::catalog::TrackId;
use crate::config::SyntheticStyle;

/// Sine-hash in [0, 1). Reproducible, not random in any statistical sense.
pub fn seeded(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// Cosmetic amplitude profile derived only from the track id.
///
/// Identical ids always produce identical output. The shape imitates a piece
/// of music (build up, fade out) and says nothing about the actual audio.
pub fn synthetic_profile(track_id: TrackId, points: usize, style: SyntheticStyle) -> Vec<f32> {
    let seed = track_id as f64 * 999.0;
    let n = points as f64;

    (0..points)
        .map(|i| {
            let fi = i as f64;
            let n1 = (fi * 0.2).sin();
            let n2 = (fi * 0.5).cos() * 0.5;
            let noise = seeded(seed + fi) * 0.5;
            let raw = (n1 + n2 + noise).abs();

            let (shaped, ceiling) = match style {
                SyntheticStyle::Plain => (raw * envelope(fi, n), 0.9),
                SyntheticStyle::Sectioned => (raw * section_energy(fi / n), 1.0),
            };

            let mut val = shaped.clamp(0.1, ceiling);
            if i % 4 == 0 && val > 0.4 {
                val = (val * 1.2).min(1.0);
            }
            val as f32
        })
        .collect()
}

/// Parabola that is 0 at both ends and 1 in the middle.
fn envelope(i: f64, n: f64) -> f64 {
    1.0 - ((2.0 * i / n) - 1.0).powi(2)
}

/// Stepped intensity for a position in [0, 1):
/// intro, build, drop, breakdown, second drop, outro.
fn section_energy(pos: f64) -> f64 {
    match pos {
        p if p < 0.10 => 0.35,
        p if p < 0.25 => 0.6,
        p if p < 0.45 => 1.0,
        p if p < 0.55 => 0.5,
        p if p < 0.85 => 0.95,
        _ => 0.3,
    }
}
