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

use super::error::AudioError;

/// Default sample rate for decoded samples and mixing canvases.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default channel count for decoded samples and mixing canvases.
pub const DEFAULT_CHANNEL_COUNT: u16 = 2;

/// The PCM format every sample is decoded into and every canvas is mixed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channel_count: u16,
}

impl TargetFormat {
    /// Creates a new TargetFormat
    pub fn new(sample_rate: u32, channel_count: u16) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidFormat(
                "Sample rate must be greater than 0".to_string(),
            ));
        }
        if channel_count == 0 {
            return Err(AudioError::InvalidFormat(
                "Channel count must be greater than 0".to_string(),
            ));
        }

        Ok(TargetFormat {
            sample_rate,
            channel_count,
        })
    }

    /// Converts a duration in milliseconds to a frame count at this sample rate.
    pub fn ms_to_frames(&self, ms: u64) -> usize {
        (ms * u64::from(self.sample_rate) / 1000) as usize
    }

    /// Converts a frame count to whole milliseconds at this sample rate.
    pub fn frames_to_ms(&self, frames: usize) -> u64 {
        frames as u64 * 1000 / u64::from(self.sample_rate)
    }
}

impl Default for TargetFormat {
    /// Creates a default target format (44.1kHz stereo)
    fn default() -> Self {
        TargetFormat {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_format_new() {
        let format = TargetFormat::new(48000, 1).unwrap();
        assert_eq!(format.sample_rate, 48000);
        assert_eq!(format.channel_count, 1);
    }

    #[test]
    fn test_target_format_new_invalid() {
        assert!(TargetFormat::new(0, 2).is_err());
        assert!(TargetFormat::new(44100, 0).is_err());
    }

    #[test]
    fn test_target_format_default() {
        let format = TargetFormat::default();
        assert_eq!(format.sample_rate, 44100);
        assert_eq!(format.channel_count, 2);
    }

    #[test]
    fn test_ms_frame_conversions() {
        let format = TargetFormat::new(44100, 2).unwrap();
        assert_eq!(format.ms_to_frames(1000), 44100);
        assert_eq!(format.ms_to_frames(10), 441);
        assert_eq!(format.frames_to_ms(44100), 1000);
        // Partial milliseconds are truncated.
        assert_eq!(format.frames_to_ms(440), 9);
    }
}
