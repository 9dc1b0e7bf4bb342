use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::tempo::TempoReport;

/// Outcome of tagging one file: either a tempo report or the reason the file
/// never reached the analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub path: String,
    pub sample_rate: Option<u32>,
    pub duration_seconds: Option<f32>,
    pub tempo: Option<TempoReport>,
    pub error: Option<String>,
}

impl TrackReport {
    pub fn analyzed(path: &Path, sample_rate: u32, duration_seconds: f32, tempo: TempoReport) -> Self {
        Self {
            path: path.display().to_string(),
            sample_rate: Some(sample_rate),
            duration_seconds: Some(duration_seconds),
            tempo: Some(tempo),
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &anyhow::Error) -> Self {
        Self {
            path: path.display().to_string(),
            sample_rate: None,
            duration_seconds: None,
            tempo: None,
            // Alternate form includes the context chain
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl fmt::Display for TrackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tempo, &self.error) {
            (_, Some(err)) => write!(f, "{}: error: {}", self.path, err),
            (Some(tempo), None) if tempo.is_detected() => {
                write!(f, "{}: {} BPM", self.path, tempo.bpm)
            }
            _ => write!(
                f,
                "{}: tempo not detected, please enter manually",
                self.path
            ),
        }
    }
}
