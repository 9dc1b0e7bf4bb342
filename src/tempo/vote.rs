//! Inter-onset interval voting with octave folding.

use std::collections::BTreeMap;

use super::params::TempoParams;

/// BPM → vote count. Ordered so that iteration is deterministic.
pub type Tally = BTreeMap<u32, u32>;

/// Fold a raw BPM into `[min_bpm, max_bpm]` by doubling or halving, then round.
///
/// Returns `None` when the value is not a positive finite number or the folded
/// value still falls outside the range.
pub fn fold_bpm(raw: f64, min_bpm: u32, max_bpm: u32) -> Option<u32> {
    if !(raw.is_finite() && raw > 0.0) || min_bpm == 0 {
        return None;
    }

    let (min, max) = (min_bpm as f64, max_bpm as f64);
    let mut bpm = raw;
    while bpm < min {
        bpm *= 2.0;
    }
    while bpm > max {
        bpm /= 2.0;
    }

    let bpm = bpm.round();
    (min..=max).contains(&bpm).then_some(bpm as u32)
}

/// Turn consecutive onset intervals into folded BPM votes.
///
/// Intervals outside `(min_interval, max_interval]` are treated as noise.
pub fn tally_votes(onsets: &[f64], params: &TempoParams) -> Tally {
    let mut tally = Tally::new();

    for pair in onsets.windows(2) {
        let interval = pair[1] - pair[0];
        if interval <= params.min_interval || interval > params.max_interval {
            continue;
        }

        let raw = (60.0 / interval).round();
        if let Some(bpm) = fold_bpm(raw, params.min_bpm, params.max_bpm) {
            *tally.entry(bpm).or_insert(0) += 1;
        }
    }

    tally
}
