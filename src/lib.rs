//! Tempo tagging for uploaded tracks.
//!
//! [`analyze`] takes a decoded mono buffer and returns an integer BPM in
//! `[60, 180]`, or [`UNDETERMINED`] when there is not enough rhythmic signal.
//! The [`audio`] module decodes files into such buffers and [`report`] formats
//! per-track results for the command-line tagger.

pub mod audio;
pub mod config;
pub mod report;
pub mod tempo;

pub use tempo::{analyze, analyze_with, Outcome, TempoParams, TempoReport, UNDETERMINED};
