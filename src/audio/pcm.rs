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
use super::buffer::AudioBuffer;
use super::error::AudioError;
use super::format::TargetFormat;
use super::AudioService;

/// In-memory implementation of [`AudioService`] over interleaved f32 buffers.
///
/// All buffers passed to one service are expected to share its [`TargetFormat`];
/// overlaying a buffer in any other format is an error rather than a silent resample.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmAudioService {
    format: TargetFormat,
}

impl PcmAudioService {
    /// Creates a new service mixing in the given format.
    pub fn new(format: TargetFormat) -> Self {
        Self { format }
    }

    /// Returns the format this service mixes in.
    pub fn format(&self) -> TargetFormat {
        self.format
    }

    fn check_format(&self, canvas: &AudioBuffer, sample: &AudioBuffer) -> Result<(), AudioError> {
        if canvas.channel_count() != sample.channel_count()
            || canvas.sample_rate() != sample.sample_rate()
        {
            return Err(AudioError::FormatMismatch {
                canvas_channels: canvas.channel_count(),
                canvas_rate: canvas.sample_rate(),
                sample_channels: sample.channel_count(),
                sample_rate: sample.sample_rate(),
            });
        }
        Ok(())
    }

    /// The format a buffer is actually in, which may differ from the service's.
    fn format_of(buffer: &AudioBuffer) -> TargetFormat {
        TargetFormat {
            sample_rate: buffer.sample_rate(),
            channel_count: buffer.channel_count(),
        }
    }

    /// Loudness of a run of samples in dBFS. Digital silence is negative infinity.
    fn rms_dbfs(samples: &[f32]) -> f64 {
        if samples.is_empty() {
            return f64::NEG_INFINITY;
        }
        let sum_squares: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
        let rms = (sum_squares / samples.len() as f64).sqrt();
        if rms == 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * rms.log10()
        }
    }
}

impl AudioService for PcmAudioService {
    fn silence(&self, duration_ms: u64) -> Result<AudioBuffer, AudioError> {
        let frames = self.format.ms_to_frames(duration_ms);
        let channels = self.format.channel_count as usize;
        Ok(AudioBuffer::new(
            vec![0.0; frames * channels],
            self.format.channel_count,
            self.format.sample_rate,
        ))
    }

    fn overlay(
        &self,
        mut canvas: AudioBuffer,
        sample: &AudioBuffer,
        position_ms: u64,
    ) -> Result<AudioBuffer, AudioError> {
        self.check_format(&canvas, sample)?;

        let channels = canvas.channel_count() as usize;
        let start_frame = position_ms * u64::from(canvas.sample_rate()) / 1000;
        let start = start_frame as usize * channels;
        if start >= canvas.samples().len() {
            return Ok(canvas);
        }

        let destination = &mut canvas.samples_mut()[start..];
        for (mixed, source) in destination.iter_mut().zip(sample.samples()) {
            *mixed += source;
        }

        Ok(canvas)
    }

    fn trim_silence(
        &self,
        buffer: AudioBuffer,
        threshold_db: f64,
        padding_ms: u64,
    ) -> Result<AudioBuffer, AudioError> {
        let channels = buffer.channel_count() as usize;
        if buffer.is_empty() || channels == 0 || buffer.sample_rate() == 0 {
            return Ok(buffer);
        }

        // Loudness is measured per millisecond, on the same grid overlay positions use.
        let format = Self::format_of(&buffer);
        let frames = buffer.frames();
        let frame_at = |ms: u64| format.ms_to_frames(ms).min(frames);
        let total_ms = (frames as u64 * 1000).div_ceil(u64::from(buffer.sample_rate()));

        let loud: Vec<u64> = (0..total_ms)
            .filter(|&ms| {
                let (start, end) = (frame_at(ms), frame_at(ms + 1));
                end > start
                    && Self::rms_dbfs(&buffer.samples()[start * channels..end * channels])
                        > threshold_db
            })
            .collect();

        let (Some(&first), Some(&last)) = (loud.first(), loud.last()) else {
            return Ok(AudioBuffer::empty(
                buffer.channel_count(),
                buffer.sample_rate(),
            ));
        };

        let start_frame = frame_at(first.saturating_sub(padding_ms));
        let end_frame = frame_at(last + 1 + padding_ms);

        if start_frame == 0 && end_frame == frames {
            return Ok(buffer);
        }

        Ok(AudioBuffer::new(
            buffer.samples()[start_frame * channels..end_frame * channels].to_vec(),
            buffer.channel_count(),
            buffer.sample_rate(),
        ))
    }

    fn length(&self, buffer: &AudioBuffer) -> u64 {
        if buffer.sample_rate() == 0 {
            return 0;
        }
        Self::format_of(buffer).frames_to_ms(buffer.frames())
    }

    fn gain(&self, buffer: &AudioBuffer, db: f64) -> AudioBuffer {
        if db == 0.0 {
            return buffer.clone();
        }
        let factor = 10f64.powf(db / 20.0) as f32;
        AudioBuffer::new(
            buffer.samples().iter().map(|s| s * factor).collect(),
            buffer.channel_count(),
            buffer.sample_rate(),
        )
    }
}
