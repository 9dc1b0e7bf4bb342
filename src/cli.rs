use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tempotag", about = "Estimate and tag the tempo (BPM) of audio tracks")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG, AAC)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Config file (defaults to tempotag.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds of audio analyzed from the start of each track
    #[arg(long, default_value_t = 60.0)]
    pub max_seconds: f32,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Number of tracks analyzed in parallel (defaults to the CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Onset threshold as a multiple of the trailing average energy
    #[arg(long)]
    pub spike_ratio: Option<f32>,

    /// Trailing average length in energy windows
    #[arg(long)]
    pub lookback: Option<usize>,
}
