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

use std::{error::Error, fs::File, path::Path};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::AudioBuffer;

/// Writes interleaved 32-bit float samples to a WAV file.
pub fn write_wav_f32(
    path: &Path,
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    write_wav(path, samples, channels, sample_rate, 32, SampleFormat::Float)
}

/// Writes interleaved 16-bit integer samples to a WAV file.
pub fn write_wav_i16(
    path: &Path,
    samples: &[i16],
    channels: u16,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    write_wav(path, samples, channels, sample_rate, 16, SampleFormat::Int)
}

fn write_wav<S: hound::Sample + Copy>(
    path: &Path,
    samples: &[S],
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<(), Box<dyn Error>> {
    let mut writer = WavWriter::new(
        File::create(path)?,
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        },
    )?;

    for sample in samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;

    Ok(())
}

/// A mono buffer at 1 kHz holding `length_ms` frames of a constant level.
/// One frame per millisecond keeps offsets in tests easy to read.
pub fn tone_ms(length_ms: usize, level: f32) -> AudioBuffer {
    AudioBuffer::new(vec![level; length_ms], 1, 1000)
}
