/// Reduce `samples` to `blocks` peak values normalized so the loudest is 1.0.
///
/// Blocks are equal length; trailing samples that don't fill a block are
/// dropped. Returns `None` when there are fewer samples than blocks.
/// Silence stays all zeros.
pub fn peak_profile(samples: &[f32], blocks: usize) -> Option<Vec<f32>> {
    if blocks == 0 || samples.len() < blocks {
        return None;
    }

    let block_len = samples.len() / blocks;
    let mut peaks: Vec<f32> = samples
        .chunks_exact(block_len)
        .take(blocks)
        .map(|block| block.iter().fold(0.0f32, |m, s| m.max(s.abs())))
        .collect();

    let max = peaks.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for p in &mut peaks {
            *p /= max;
        }
    }
    Some(peaks)
}
