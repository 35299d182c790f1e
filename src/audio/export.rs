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

//! WAV export of finished jingles.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::info;

use super::buffer::AudioBuffer;
use super::error::AudioError;

fn wav_spec(buffer: &AudioBuffer) -> WavSpec {
    WavSpec {
        channels: buffer.channel_count(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Encodes the buffer as a 32-bit float WAV into the given writer.
pub fn write_wav<W: Write + Seek>(buffer: &AudioBuffer, writer: W) -> Result<(), AudioError> {
    let mut wav_writer = WavWriter::new(writer, wav_spec(buffer))?;
    for sample in buffer.samples() {
        wav_writer.write_sample(*sample)?;
    }
    wav_writer.finalize()?;
    Ok(())
}

/// Encodes the buffer as WAV bytes.
pub fn to_wav_bytes(buffer: &AudioBuffer) -> Result<Vec<u8>, AudioError> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(buffer, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Writes the buffer to a WAV file at the given path.
pub fn export_wav_file(buffer: &AudioBuffer, path: &Path) -> Result<(), AudioError> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_wav(buffer, file)?;
    info!(
        path = ?path,
        channels = buffer.channel_count(),
        sample_rate = buffer.sample_rate(),
        duration_ms = buffer.duration().as_millis() as u64,
        "Exported jingle"
    );
    Ok(())
}
