//! Bucket grouping and plurality selection.

use super::params::TempoParams;
use super::vote::Tally;

/// Merge neighbouring BPM votes into buckets of `bucket_width`.
///
/// Each key maps to `round(key / width) * width`, which absorbs the ±1 BPM
/// jitter introduced by window quantization. Buckets never leave
/// `[min_bpm, max_bpm]`; with a range aligned to the width (see
/// [`TempoParams::validate`]) the clamp is a no-op.
pub fn group_votes(tally: &Tally, params: &TempoParams) -> Tally {
    let width = params.bucket_width.max(1) as f64;
    let (min, max) = (params.min_bpm, params.max_bpm.max(params.min_bpm));
    let mut groups = Tally::new();

    for (&bpm, &votes) in tally {
        let bucket = ((bpm as f64 / width).round() * width) as u32;
        *groups.entry(bucket.clamp(min, max)).or_insert(0) += votes;
    }

    groups
}

/// Bucket with the most votes. Ties go to the lowest bucket.
pub fn pick_winner(groups: &Tally) -> Option<u32> {
    let mut winner: Option<(u32, u32)> = None;

    // BTreeMap iterates ascending; only a strictly larger count replaces
    for (&bucket, &votes) in groups {
        match winner {
            Some((_, best)) if votes <= best => {}
            _ if votes == 0 => {}
            _ => winner = Some((bucket, votes)),
        }
    }

    winner.map(|(bucket, _)| bucket)
}
