use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded mono PCM, ready for analysis.
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn duration(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Container reader positioned on the first decodable track.
struct OpenTrack {
    reader: Box<dyn FormatReader>,
    params: CodecParameters,
    track_id: u32,
    channels: usize,
    sample_rate: u32,
}

fn open_track(path: &Path) -> Result<OpenTrack> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let reader = symphonia::default::get_probe()
        .format(&hint, stream, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe audio format")?
        .format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio tracks found")?;

    let track_id = track.id;
    let params = track.codec_params.clone();
    let sample_rate = params.sample_rate.context("Unknown sample rate")?;
    let channels = params.channels.map_or(1, |c| c.count()).max(1);

    Ok(OpenTrack {
        track_id,
        reader,
        params,
        channels,
        sample_rate,
    })
}

/// Number of mono samples kept for a `max_seconds` bound, if any.
fn sample_limit(max_seconds: Option<f32>, sample_rate: u32) -> Option<usize> {
    max_seconds
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(|s| (s as f64 * sample_rate as f64).round() as usize)
}

/// Average each interleaved frame into one sample and append it to `out`.
fn append_mono(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    let scale = 1.0 / channels as f32;
    out.extend(
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() * scale),
    );
}

fn is_end_of_stream(err: &SymphoniaError) -> bool {
    matches!(err, SymphoniaError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
}

/// Decode the first audio track of `path` to mono, keeping at most
/// `max_seconds` of audio from the start.
pub fn decode_audio(path: &Path, max_seconds: Option<f32>) -> Result<AudioData> {
    let OpenTrack {
        mut reader,
        params,
        track_id,
        channels,
        sample_rate,
    } = open_track(path)?;
    let limit = sample_limit(max_seconds, sample_rate);

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let mut mono: Vec<f32> = Vec::new();

    while limit.map_or(true, |max| mono.len() < max) {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(err) if is_end_of_stream(&err) => break,
            Err(err) => return Err(err).context("Failed to read audio packet"),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(err)) => {
                log::debug!("Skipping undecodable packet: {}", err);
                continue;
            }
            Err(err) => return Err(err).context("Failed to decode audio packet"),
        };

        let mut buf = SampleBuffer::<f32>::new(decoded.frames() as u64, *decoded.spec());
        buf.copy_interleaved_ref(decoded);
        append_mono(&mut mono, buf.samples(), channels);
    }

    if let Some(max) = limit.filter(|&max| mono.len() > max) {
        log::warn!(
            "{}: keeping the first {:.1}s of audio",
            path.display(),
            max as f32 / sample_rate as f32
        );
        mono.truncate(max);
    }

    let audio = AudioData {
        samples: mono,
        sample_rate,
    };
    log::info!(
        "Decoded {}: {} samples, {}Hz, {:.1}s",
        path.display(),
        audio.samples.len(),
        sample_rate,
        audio.duration()
    );

    Ok(audio)
}
