//! WAV decoding, mono downmix, and resampling to the canonical format.

use std::path::Path;

use parlance_common::{ParlanceError, ParlanceResult};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::convert;

/// Sample rate required by both the diarization and whisper models.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Normalized in-memory audio: mono f32 at [`TARGET_SAMPLE_RATE`].
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Duration of the buffer in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Convert to 16-bit samples (the representation pyannote expects).
    pub fn to_i16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s * 32767.0).clamp(-32768.0, 32767.0) as i16)
            .collect()
    }
}

/// Load an audio file and normalize it to mono f32 at 16 kHz.
///
/// Non-WAV containers are converted through `ffmpeg` into a temporary WAV
/// first. Unreadable or corrupt input fails with `UnsupportedFormat`.
pub fn load(path: &Path) -> ParlanceResult<AudioBuffer> {
    if !path.exists() {
        return Err(ParlanceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);

    if is_wav {
        return decode_wav(path);
    }

    // Hold the temp dir until decoding finishes.
    let temp_dir = tempfile::tempdir()?;
    let wav_path = convert::convert_to_wav(path, temp_dir.path())?;
    decode_wav(&wav_path)
}

/// Decode a WAV file, downmix to mono, and resample to 16 kHz.
pub fn decode_wav(path: &Path) -> ParlanceResult<AudioBuffer> {
    let mut reader = hound::WavReader::open(path).map_err(|e| {
        ParlanceError::unsupported_format(format!("{}: {}", path.display(), e))
    })?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| ParlanceError::unsupported_format(e.to_string()))?,
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<_, _>>()
            .map_err(|e| ParlanceError::unsupported_format(e.to_string()))?,
        (hound::SampleFormat::Int, bits) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| ParlanceError::unsupported_format(e.to_string()))?
        }
    };

    let mono = downmix(&samples, spec.channels as usize);

    tracing::debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        duration_secs = mono.len() as f64 / spec.sample_rate as f64,
        "Decoded WAV"
    );

    let samples = resample(&mono, spec.sample_rate, TARGET_SAMPLE_RATE)?;
    Ok(AudioBuffer {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
    })
}

/// Average interleaved channels into a mono signal.
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Sinc-interpolated resampling of a mono signal.
pub fn resample(input: &[f32], from_rate: u32, to_rate: u32) -> ParlanceResult<Vec<f32>> {
    if input.is_empty() || from_rate == to_rate {
        return Ok(input.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, input.len(), 1)
        .map_err(|e| ParlanceError::unsupported_format(format!("resampler setup: {e}")))?;

    let waves_out = resampler
        .process(&[input.to_vec()], None)
        .map_err(|e| ParlanceError::unsupported_format(format!("resampling: {e}")))?;

    tracing::debug!(
        from_rate,
        to_rate,
        in_samples = input.len(),
        out_samples = waves_out[0].len(),
        "Resampled audio"
    );

    Ok(waves_out.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, frames: usize) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let value = ((i as f32 * 0.05).sin() * 8000.0) as i16;
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_native_rate_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");
        write_test_wav(&path, TARGET_SAMPLE_RATE, 1, 16_000);

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(buffer.samples.len(), 16_000);
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stereo_is_downmixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, TARGET_SAMPLE_RATE, 2, 8_000);

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.samples.len(), 8_000);
    }

    #[test]
    fn test_low_rate_input_is_upsampled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("8k.wav");
        write_test_wav(&path, 8_000, 1, 8_000);

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.sample_rate, TARGET_SAMPLE_RATE);
        // One second in, roughly one second out.
        let duration = buffer.duration_secs();
        assert!((duration - 1.0).abs() < 0.05, "duration was {duration}");
    }

    #[test]
    fn test_corrupt_wav_is_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            parlance_common::ParlanceError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = load(Path::new("/nonexistent/nope.wav")).unwrap_err();
        assert!(matches!(
            err,
            parlance_common::ParlanceError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_to_i16_clamps() {
        let buffer = AudioBuffer {
            samples: vec![0.0, 1.5, -1.5],
            sample_rate: TARGET_SAMPLE_RATE,
        };
        let ints = buffer.to_i16();
        assert_eq!(ints[0], 0);
        assert_eq!(ints[1], 32767);
        assert_eq!(ints[2], -32768);
    }
}
