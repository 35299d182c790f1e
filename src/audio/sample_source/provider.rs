// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::path::Path;

use tracing::{debug, info};

use super::decoder::{decode_file, DecodedAudio};
use super::error::DecodeError;
use crate::audio::{AudioBuffer, TargetFormat};

/// Decodes named sample resources into buffers.
pub trait SampleProvider: Send + Sync {
    /// Decodes the sample at the given path into the provider's target format.
    fn decode(&self, path: &Path) -> Result<AudioBuffer, DecodeError>;
}

/// Decodes sample files from disk with symphonia and converts them into a
/// single target format so they can be mixed without further conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaSampleProvider {
    format: TargetFormat,
}

impl SymphoniaSampleProvider {
    /// Creates a new provider decoding into the given format.
    pub fn new(format: TargetFormat) -> Self {
        Self { format }
    }

    /// Remaps interleaved samples to a new channel count. Each target channel
    /// averages the source channels that fold onto it, so mono is duplicated
    /// and extra channels are mixed down.
    fn convert_channels(samples: &[f32], source_channels: u16, target_channels: u16) -> Vec<f32> {
        let source = source_channels as usize;
        let target = target_channels as usize;
        if source == target || source == 0 || target == 0 {
            return samples.to_vec();
        }

        let frames = samples.len() / source;
        let mut output = Vec::with_capacity(frames * target);
        for frame in samples.chunks_exact(source) {
            for channel in 0..target {
                if source < target {
                    output.push(frame[channel % source]);
                } else {
                    let folded: Vec<f32> = frame
                        .iter()
                        .skip(channel)
                        .step_by(target)
                        .copied()
                        .collect();
                    output.push(folded.iter().sum::<f32>() / folded.len() as f32);
                }
            }
        }
        output
    }

    /// Transcodes samples from one sample rate to another using linear interpolation.
    /// Linear interpolation is sufficient for short one-shot samples.
    fn transcode_samples(
        samples: &[f32],
        channel_count: u16,
        source_rate: u32,
        target_rate: u32,
    ) -> Vec<f32> {
        let ratio = target_rate as f64 / source_rate as f64;
        let channels = channel_count as usize;
        let source_frames = samples.len() / channels;
        let target_frames = (source_frames as f64 * ratio).ceil() as usize;

        let mut output = Vec::with_capacity(target_frames * channels);

        for target_frame in 0..target_frames {
            let source_pos = target_frame as f64 / ratio;
            let source_frame = source_pos.floor() as usize;
            let frac = source_pos.fract() as f32;

            for channel in 0..channels {
                let idx0 = source_frame * channels + channel;
                let idx1 = (source_frame + 1) * channels + channel;

                let s0 = samples.get(idx0).copied().unwrap_or(0.0);
                let s1 = samples.get(idx1).copied().unwrap_or(s0);

                output.push(s0 + (s1 - s0) * frac);
            }
        }

        output
    }

    fn convert(&self, decoded: DecodedAudio) -> AudioBuffer {
        let target_channels = self.format.channel_count;
        let target_rate = self.format.sample_rate;

        let samples = Self::convert_channels(&decoded.samples, decoded.channel_count, target_channels);
        let samples = if decoded.sample_rate != target_rate {
            debug!(
                source_rate = decoded.sample_rate,
                target_rate, "Transcoding sample"
            );
            Self::transcode_samples(&samples, target_channels, decoded.sample_rate, target_rate)
        } else {
            samples
        };

        AudioBuffer::new(samples, target_channels, target_rate)
    }
}

impl SampleProvider for SymphoniaSampleProvider {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, DecodeError> {
        info!(path = ?path, "Loading sample into memory");

        let decoded = decode_file(path)?;
        let source_channels = decoded.channel_count;
        let source_rate = decoded.sample_rate;
        let buffer = self.convert(decoded);

        info!(
            path = ?path,
            channels = source_channels,
            sample_rate = source_rate,
            duration_ms = buffer.duration().as_millis() as u64,
            memory_kb = buffer.memory_size() / 1024,
            "Sample loaded"
        );

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::audio::write_wav_f32;

    #[test]
    fn test_transcode_samples() {
        let source_rate = 44100;
        let target_rate = 48000;
        let source_samples: Vec<f32> = (0..4410)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / source_rate as f32).sin())
            .collect();

        let result = SymphoniaSampleProvider::transcode_samples(
            &source_samples,
            1,
            source_rate,
            target_rate,
        );

        let expected_len = (4410.0_f64 * 48000.0 / 44100.0).ceil() as usize;
        assert_eq!(result.len(), expected_len);
    }

    #[test]
    fn test_transcode_stereo_preserves_channels() {
        let source_samples = vec![1.0f32, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];

        let result = SymphoniaSampleProvider::transcode_samples(&source_samples, 2, 44100, 48000);

        assert!(result.len() >= 8);
        assert_eq!(result.len() % 2, 0);
        assert!((result[0] - 1.0).abs() < 0.1);
        assert!((result[1] - (-1.0)).abs() < 0.1);
    }

    #[test]
    fn test_convert_channels_mono_to_stereo() {
        let result = SymphoniaSampleProvider::convert_channels(&[0.1, 0.2, 0.3], 1, 2);
        assert_eq!(result, vec![0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
    }

    #[test]
    fn test_convert_channels_stereo_to_mono() {
        let result = SymphoniaSampleProvider::convert_channels(&[1.0, 0.0, 0.5, 0.5], 2, 1);
        assert_eq!(result, vec![0.5, 0.5]);
    }

    #[test]
    fn test_convert_channels_quad_to_stereo() {
        let result =
            SymphoniaSampleProvider::convert_channels(&[1.0, 0.0, 0.0, 1.0], 4, 2);
        assert_eq!(result, vec![0.5, 0.5]);
    }

    #[test]
    fn test_decode_converts_to_target_format() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("mono.wav");
        write_wav_f32(&path, &[0.5; 100], 1, 22050).unwrap();

        let provider = SymphoniaSampleProvider::new(TargetFormat::new(44100, 2).unwrap());
        let buffer = provider.decode(&path).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.frames(), 200);
        assert!(buffer.samples().iter().all(|s| (*s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_decode_missing_file() {
        let provider = SymphoniaSampleProvider::default();
        let result = provider.decode(Path::new("/nonexistent/high1.flac"));
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }
}
