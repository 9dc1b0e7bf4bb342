mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;

use cli::Cli;
use tempotag::audio::decode::decode_audio;
use tempotag::config::{self, Config};
use tempotag::report::TrackReport;
use tempotag::tempo::{analyze_with, TempoParams};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect tempotag.toml / global config
    let mut cfg = Config::default();
    if let Some(path) = cli.config.clone().or_else(config::find_config) {
        match config::load_config(&path) {
            Ok(loaded) => {
                log::info!("Loaded config from {}", path.display());
                cfg = loaded;
            }
            Err(err) => log::warn!("Failed to load config from {}: {:#}", path.display(), err),
        }
    }

    // Merge: config values apply only when CLI is at its default
    if cli.max_seconds == config::default_max_seconds() {
        cli.max_seconds = cfg.decode.max_seconds;
    }
    let mut params = cfg.tempo;
    if let Some(ratio) = cli.spike_ratio {
        params.spike_ratio = ratio;
    }
    if let Some(lookback) = cli.lookback {
        params.lookback_windows = lookback;
    }
    params.validate().context("Invalid tempo parameters")?;

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let pb = if cli.inputs.len() > 1 && !cli.json {
        let pb = ProgressBar::new(cli.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tracks ({eta} remaining)")
                .context("Invalid progress template")?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reports: Vec<TrackReport> = cli
        .inputs
        .par_iter()
        .map(|path| {
            let report = tag_track(path, cli.max_seconds, &params);
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
            report
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report);
        }
    }

    let failed = reports.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} tracks could not be decoded", failed, reports.len());
    }
    Ok(())
}

fn tag_track(path: &Path, max_seconds: f32, params: &TempoParams) -> TrackReport {
    let audio = match decode_audio(path, Some(max_seconds)) {
        Ok(audio) => audio,
        Err(err) => {
            log::error!("{}: {:#}", path.display(), err);
            return TrackReport::failed(path, &err);
        }
    };

    let tempo = analyze_with(&audio.samples, audio.sample_rate, params);
    if tempo.is_detected() {
        log::info!("{}: {} BPM ({} onsets, {} votes)", path.display(), tempo.bpm, tempo.onsets, tempo.votes);
    } else {
        log::info!("{}: tempo undetermined ({:?})", path.display(), tempo.outcome);
    }

    TrackReport::analyzed(path, audio.sample_rate, audio.duration(), tempo)
}
