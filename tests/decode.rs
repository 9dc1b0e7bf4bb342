use std::path::{Path, PathBuf};

use tempotag::audio::decode_audio;
use tempotag::report::TrackReport;
use tempotag::{analyze_with, TempoParams};

/// Write interleaved 16-bit PCM as a canonical RIFF/WAVE file.
fn write_wav(path: &Path, sample_rate: u32, channels: u16, interleaved: &[i16]) {
    let data_len = (interleaved.len() * 2) as u32;
    let block_align = channels * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(path, bytes).unwrap();
}

fn temp_wav(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tempotag-{}-{}.wav", name, std::process::id()))
}

/// Stereo click train with the click on both channels.
fn stereo_clicks(bpm: f64, seconds: f64, sample_rate: u32) -> Vec<i16> {
    let frames = (seconds * sample_rate as f64) as usize;
    let mut interleaved = vec![0i16; frames * 2];
    let mut k = 0;
    loop {
        let pos = (k as f64 * 60.0 / bpm * sample_rate as f64).round() as usize;
        if pos >= frames {
            break;
        }
        interleaved[pos * 2] = i16::MAX;
        interleaved[pos * 2 + 1] = i16::MAX;
        k += 1;
    }
    interleaved
}

#[test]
fn decodes_and_downmixes_stereo() {
    let path = temp_wav("downmix");
    write_wav(&path, 44100, 2, &[16384, 0, 16384, 16384, -16384, -16384, 0, 0]);

    let audio = decode_audio(&path, None).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(audio.sample_rate, 44100);
    assert_eq!(audio.samples.len(), 4);
    assert!((audio.samples[0] - 0.25).abs() < 1e-3);
    assert!((audio.samples[1] - 0.5).abs() < 1e-3);
    assert!((audio.samples[2] + 0.5).abs() < 1e-3);
    assert_eq!(audio.samples[3], 0.0);
}

#[test]
fn truncates_to_max_seconds() {
    let path = temp_wav("truncate");
    write_wav(&path, 8000, 1, &vec![100i16; 8000 * 3]);

    let audio = decode_audio(&path, Some(1.5)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(audio.samples.len(), 12000);
    assert!((audio.duration() - 1.5).abs() < 1e-6);
}

#[test]
fn missing_file_is_an_error() {
    let err = decode_audio(Path::new("/nonexistent/track.wav"), None)
        .err()
        .expect("decoding a missing file must fail");
    assert!(format!("{:#}", err).contains("Failed to open audio file"));
}

#[test]
fn garbage_file_is_an_error() {
    let path = temp_wav("garbage");
    std::fs::write(&path, b"definitely not audio").unwrap();
    let result = decode_audio(&path, None);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn decoded_click_train_is_tagged() {
    let path = temp_wav("clicks");
    write_wav(&path, 44100, 2, &stereo_clicks(120.0, 10.0, 44100));

    let audio = decode_audio(&path, Some(60.0)).unwrap();
    std::fs::remove_file(&path).ok();

    let tempo = analyze_with(&audio.samples, audio.sample_rate, &TempoParams::default());
    assert_eq!(tempo.bpm, 120);

    let report = TrackReport::analyzed(&path, audio.sample_rate, audio.duration(), tempo);
    assert_eq!(report.to_string(), format!("{}: 120 BPM", path.display()));
}
