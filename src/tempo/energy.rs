//! Short-time energy over fixed, non-overlapping windows.

/// Window length in samples for a window of `window_seconds` at `sample_rate`.
///
/// Returns 0 when the rate is too low (or the duration too small) to fit a
/// single sample; callers treat that as "too short".
pub fn window_length(sample_rate: u32, window_seconds: f64) -> usize {
    let len = (sample_rate as f64 * window_seconds).round();
    if len.is_finite() && len >= 1.0 {
        len as usize
    } else {
        0
    }
}

/// Mean squared amplitude of each complete window. A trailing partial window
/// is dropped.
pub fn window_energies(samples: &[f32], window_len: usize) -> Vec<f32> {
    if window_len == 0 {
        return Vec::new();
    }

    samples
        .chunks_exact(window_len)
        .map(|window| window.iter().map(|s| s * s).sum::<f32>() / window_len as f32)
        .collect()
}
