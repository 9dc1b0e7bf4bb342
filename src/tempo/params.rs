use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("window_seconds must be a positive number, got {0}")]
    WindowSeconds(f64),
    #[error("lookback_windows must be at least 1")]
    Lookback,
    #[error("spike_ratio must be a positive number, got {0}")]
    SpikeRatio(f32),
    #[error("min_onsets must be at least 2, got {0}")]
    MinOnsets(usize),
    #[error("interval bounds must satisfy 0 <= min_interval < max_interval, got {min}..{max}")]
    Interval { min: f64, max: f64 },
    #[error("bpm range {min}..={max} must span at least one octave")]
    BpmRange { min: u32, max: u32 },
    #[error("bucket_width must be at least 1")]
    BucketWidth,
    #[error("bpm range {min}..={max} must start and end on a multiple of bucket_width {width}")]
    BucketAlignment { min: u32, max: u32, width: u32 },
}

/// Tunable constants of the tempo pipeline.
///
/// The defaults are the reference tuning. Bucket width and the ascending
/// tie-break are empirical choices; keep them fixed if results must be
/// reproducible across deployments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TempoParams {
    /// Energy window duration in seconds
    pub window_seconds: f64,
    /// Number of trailing windows averaged for the onset threshold (~1s)
    pub lookback_windows: usize,
    /// Energy must exceed the trailing average by this factor
    pub spike_ratio: f32,
    /// Fewer onsets than this and the track is undetermined
    pub min_onsets: usize,
    /// Exclusive lower bound on inter-onset intervals (seconds)
    pub min_interval: f64,
    /// Inclusive upper bound on inter-onset intervals (seconds)
    pub max_interval: f64,
    pub min_bpm: u32,
    pub max_bpm: u32,
    /// Width of the vote grouping buckets in BPM
    pub bucket_width: u32,
}

impl Default for TempoParams {
    fn default() -> Self {
        Self {
            window_seconds: 0.023,
            lookback_windows: 43,
            spike_ratio: 1.5,
            min_onsets: 4,
            min_interval: 0.1,
            max_interval: 2.0,
            min_bpm: 60,
            max_bpm: 180,
            bucket_width: 2,
        }
    }
}

impl TempoParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.window_seconds.is_finite() && self.window_seconds > 0.0) {
            return Err(ParamsError::WindowSeconds(self.window_seconds));
        }
        if self.lookback_windows == 0 {
            return Err(ParamsError::Lookback);
        }
        if !(self.spike_ratio.is_finite() && self.spike_ratio > 0.0) {
            return Err(ParamsError::SpikeRatio(self.spike_ratio));
        }
        if self.min_onsets < 2 {
            return Err(ParamsError::MinOnsets(self.min_onsets));
        }
        if !(self.min_interval >= 0.0 && self.min_interval < self.max_interval)
            || !self.max_interval.is_finite()
        {
            return Err(ParamsError::Interval {
                min: self.min_interval,
                max: self.max_interval,
            });
        }
        // Folding halves/doubles, so the range has to contain a full octave
        if self.min_bpm == 0 || self.max_bpm < self.min_bpm.saturating_mul(2) {
            return Err(ParamsError::BpmRange {
                min: self.min_bpm,
                max: self.max_bpm,
            });
        }
        if self.bucket_width == 0 {
            return Err(ParamsError::BucketWidth);
        }
        // Edge votes round to the nearest bucket, which must stay in range
        if self.min_bpm % self.bucket_width != 0 || self.max_bpm % self.bucket_width != 0 {
            return Err(ParamsError::BucketAlignment {
                min: self.min_bpm,
                max: self.max_bpm,
                width: self.bucket_width,
            });
        }
        Ok(())
    }
}
