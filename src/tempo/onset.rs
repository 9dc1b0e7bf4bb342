//! Onset detection against a trailing moving average of window energy.

use super::params::TempoParams;

/// Find energy spikes and return their timestamps in seconds, ascending.
///
/// Window `i` is an onset when it has at least `lookback_windows` predecessors,
/// a successor, exceeds `spike_ratio` times the mean of the previous
/// `lookback_windows` energies, and is a strict local maximum.
pub fn detect_onsets(
    energies: &[f32],
    window_len: usize,
    sample_rate: u32,
    params: &TempoParams,
) -> Vec<f64> {
    let lookback = params.lookback_windows;
    if lookback == 0 || sample_rate == 0 || energies.len() < lookback.saturating_add(2) {
        return Vec::new();
    }

    let mut onsets = Vec::new();

    for i in lookback..energies.len() - 1 {
        let energy = energies[i];
        let trailing = energies[i - lookback..i].iter().sum::<f32>() / lookback as f32;

        if energy > params.spike_ratio * trailing
            && energy > energies[i - 1]
            && energy > energies[i + 1]
        {
            onsets.push((i * window_len) as f64 / sample_rate as f64);
        }
    }

    onsets
}
