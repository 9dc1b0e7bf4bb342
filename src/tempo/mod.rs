//! Tempo estimation from a mono sample buffer.
//!
//! The pipeline is linear and runs to completion in one pass:
//!
//! ```text
//! samples -> window energies -> onset times -> folded BPM votes -> buckets -> BPM
//! ```
//!
//! Nothing here allocates shared state or touches I/O, so independent buffers
//! can be analyzed concurrently without coordination.

pub mod energy;
pub mod onset;
pub mod params;
pub mod resolve;
pub mod vote;

use serde::Serialize;

pub use params::{ParamsError, TempoParams};
pub use vote::Tally;

/// Returned when the tempo could not be determined. Never a valid detection.
pub const UNDETERMINED: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Detected,
    /// Not enough windows to fill the trailing average
    TooShort,
    TooFewOnsets,
    /// Onsets were found but no interval survived filtering and folding
    NoVotes,
}

/// Result of one analysis run, with the intermediate counts that led to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoReport {
    /// Estimated tempo, or [`UNDETERMINED`]
    pub bpm: u32,
    pub outcome: Outcome,
    /// Length of the energy sequence
    pub windows: usize,
    pub onsets: usize,
    /// Votes that survived interval filtering and folding
    pub votes: u32,
    /// Grouped tally, ascending by bucket
    pub groups: Tally,
}

impl TempoReport {
    fn undetermined(outcome: Outcome, windows: usize, onsets: usize) -> Self {
        Self {
            bpm: UNDETERMINED,
            outcome,
            windows,
            onsets,
            votes: 0,
            groups: Tally::new(),
        }
    }

    pub fn is_detected(&self) -> bool {
        self.outcome == Outcome::Detected
    }
}

/// Estimate the tempo of `samples` with the default tuning.
///
/// Returns a BPM in `[60, 180]`, or [`UNDETERMINED`] (0) when the buffer is too
/// short or too sparse. Never panics, whatever the input.
///
/// ```
/// let silence = vec![0.0f32; 44100 * 5];
/// assert_eq!(tempotag::analyze(&silence, 44100), tempotag::UNDETERMINED);
/// ```
pub fn analyze(samples: &[f32], sample_rate: u32) -> u32 {
    analyze_with(samples, sample_rate, &TempoParams::default()).bpm
}

/// Run the full pipeline with explicit parameters.
pub fn analyze_with(samples: &[f32], sample_rate: u32, params: &TempoParams) -> TempoReport {
    let window_len = energy::window_length(sample_rate, params.window_seconds);
    let energies = energy::window_energies(samples, window_len);
    log::debug!(
        "{} samples at {} Hz -> {} windows of {} samples",
        samples.len(),
        sample_rate,
        energies.len(),
        window_len
    );

    // Needs the lookback plus the window being tested and its successor
    if energies.len() < params.lookback_windows.saturating_add(2) {
        log::debug!(
            "Too short for a {}-window lookback, tempo undetermined",
            params.lookback_windows
        );
        return TempoReport::undetermined(Outcome::TooShort, energies.len(), 0);
    }

    let onsets = onset::detect_onsets(&energies, window_len, sample_rate, params);
    log::debug!("Detected {} onsets", onsets.len());

    if onsets.len() < params.min_onsets {
        log::debug!(
            "Fewer than {} onsets, tempo undetermined",
            params.min_onsets
        );
        return TempoReport::undetermined(Outcome::TooFewOnsets, energies.len(), onsets.len());
    }

    let tally = vote::tally_votes(&onsets, params);
    let votes: u32 = tally.values().sum();
    let groups = resolve::group_votes(&tally, params);

    let (bpm, outcome) = match resolve::pick_winner(&groups) {
        Some(bpm) => (bpm, Outcome::Detected),
        None => (UNDETERMINED, Outcome::NoVotes),
    };
    log::debug!("{} votes in {} buckets -> {} BPM", votes, groups.len(), bpm);

    TempoReport {
        bpm,
        outcome,
        windows: energies.len(),
        onsets: onsets.len(),
        votes,
        groups,
    }
}
