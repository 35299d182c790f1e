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
use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer as PlanarBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use super::error::DecodeError;

/// A fully decoded audio file in its native format.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved samples scaled to [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Number of channels.
    pub channel_count: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

/// Decodes an entire audio file (WAV, FLAC, MP3, etc.) into memory.
/// This uses symphonia to decode; no resampling or channel conversion happens here.
pub fn decode_file(path: &Path) -> Result<DecodedAudio, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create a hint to help the format registry guess the format
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();
    let probed = get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|source| DecodeError::Audio {
            path: path.to_path_buf(),
            source,
        })?;
    let mut format_reader = probed.format;

    let track = format_reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::SampleConversionFailed {
            path: path.to_path_buf(),
            reason: "No audio track found".to_string(),
        })?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let sample_rate = params
        .sample_rate
        .ok_or_else(|| DecodeError::SampleConversionFailed {
            path: path.to_path_buf(),
            reason: "Sample rate not specified".to_string(),
        })?;

    let decoder_opts: DecoderOptions = Default::default();
    let mut decoder = get_codecs()
        .make(&params, &decoder_opts)
        .map_err(|source| DecodeError::Audio {
            path: path.to_path_buf(),
            source,
        })?;

    // A channel count of 0 means "unspecified"; the first decoded packet settles it.
    let mut channel_count = params.channels.map(|c| c.count() as u16).unwrap_or(0);
    let mut samples = Vec::new();

    while let Some((decoded, channels)) =
        read_and_decode_next_packet(format_reader.as_mut(), decoder.as_mut(), track_id, path)?
    {
        if channel_count == 0 {
            channel_count = channels as u16;
        }
        samples.extend_from_slice(&decoded);
    }

    if channel_count == 0 {
        return Err(DecodeError::SampleConversionFailed {
            path: path.to_path_buf(),
            reason: "Channels not specified".to_string(),
        });
    }

    Ok(DecodedAudio {
        samples,
        channel_count,
        sample_rate,
    })
}

/// Reads and decodes the next packet for the given track. Handles ResetRequired by
/// resetting the decoder and retrying. Returns `Ok(Some((samples, channels)))` when
/// a packet was decoded and `Ok(None)` at the end of the stream.
fn read_and_decode_next_packet(
    format_reader: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
    track_id: u32,
    path: &Path,
) -> Result<Option<(Vec<f32>, usize)>, DecodeError> {
    loop {
        let packet = match format_reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Ok(None);
            }
            // Some readers report the end of the stream as a decode error.
            Err(SymphoniaError::DecodeError(_)) => return Ok(None),
            Err(source) => {
                return Err(DecodeError::Audio {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if packet.track_id() != track_id {
            continue;
        }

        // A packet the codec rejects fails the whole sample.
        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                decoder.decode(&packet).map_err(|source| DecodeError::Audio {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Err(source) => {
                return Err(DecodeError::Audio {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let (samples, channels) = decode_buffer_to_f32(decoded);
        if channels > 0 && !samples.is_empty() {
            return Ok(Some((samples, channels)));
        }
    }
}

/// Converts a decoded AudioBufferRef to interleaved f32 samples and returns the
/// channel count as observed in the decoded buffer.
fn decode_buffer_to_f32(decoded: AudioBufferRef) -> (Vec<f32>, usize) {
    match decoded {
        AudioBufferRef::F32(buf) => interleave_planar_samples(&buf, |sample| sample),
        AudioBufferRef::F64(buf) => interleave_planar_samples(&buf, |sample| sample as f32),
        AudioBufferRef::S8(buf) => interleave_planar_samples(&buf, scale_s8),
        AudioBufferRef::S16(buf) => interleave_planar_samples(&buf, scale_s16),
        AudioBufferRef::S24(buf) => {
            interleave_planar_samples(&buf, |sample| scale_s24(sample.inner()))
        }
        AudioBufferRef::S32(buf) => interleave_planar_samples(&buf, scale_s32),
        AudioBufferRef::U8(buf) => interleave_planar_samples(&buf, scale_u8),
        AudioBufferRef::U16(buf) => interleave_planar_samples(&buf, scale_u16),
        AudioBufferRef::U24(buf) => {
            interleave_planar_samples(&buf, |sample| scale_u24(sample.inner()))
        }
        AudioBufferRef::U32(buf) => interleave_planar_samples(&buf, scale_u32),
    }
}

fn interleave_planar_samples<T, F>(buf: &PlanarBuffer<T>, convert: F) -> (Vec<f32>, usize)
where
    T: symphonia::core::sample::Sample,
    F: Fn(T) -> f32,
{
    let frames = buf.frames();
    let channels = buf.spec().channels.count();
    let planes = buf.planes();
    let mut samples = Vec::with_capacity(frames * channels);
    for frame_idx in 0..frames {
        for plane in planes.planes().iter().take(channels) {
            samples.push(convert(plane[frame_idx]));
        }
    }
    (samples, channels)
}

#[inline]
fn scale_s8(sample: i8) -> f32 {
    sample as f32 / (1i64 << 7) as f32
}

#[inline]
fn scale_s16(sample: i16) -> f32 {
    sample as f32 / (1i64 << 15) as f32
}

#[inline]
fn scale_s24(sample: i32) -> f32 {
    sample as f32 / (1i64 << 23) as f32
}

#[inline]
fn scale_s32(sample: i32) -> f32 {
    sample as f32 / (1i64 << 31) as f32
}

#[inline]
fn scale_u8(sample: u8) -> f32 {
    (sample as f32 / u8::MAX as f32) * 2.0 - 1.0
}

#[inline]
fn scale_u16(sample: u16) -> f32 {
    (sample as f32 / u16::MAX as f32) * 2.0 - 1.0
}

#[inline]
fn scale_u24(sample: u32) -> f32 {
    let max = (1u32 << 24) - 1;
    (sample as f32 / max as f32) * 2.0 - 1.0
}

#[inline]
fn scale_u32(sample: u32) -> f32 {
    (sample as f32 / u32::MAX as f32) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::audio::{write_wav_f32, write_wav_i16};

    #[test]
    fn test_scaling_helpers() {
        assert_eq!(scale_s16(0), 0.0);
        assert_eq!(scale_s16(i16::MIN), -1.0);
        assert!((scale_s16(i16::MAX) - 1.0).abs() < 1e-4);
        assert_eq!(scale_s8(-128), -1.0);
        assert_eq!(scale_s24(-(1 << 23)), -1.0);
        assert_eq!(scale_s32(i32::MIN), -1.0);
        assert_eq!(scale_u8(0), -1.0);
        assert_eq!(scale_u8(u8::MAX), 1.0);
        assert_eq!(scale_u16(u16::MAX), 1.0);
        assert_eq!(scale_u24((1 << 24) - 1), 1.0);
        assert_eq!(scale_u32(0), -1.0);
    }

    #[test]
    fn test_decode_float_wav() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("float.wav");
        write_wav_f32(&path, &[0.0, 0.5, -0.5, 0.25, 1.0, -1.0], 2, 22050).unwrap();

        let decoded = decode_file(&path).unwrap();

        assert_eq!(decoded.channel_count, 2);
        assert_eq!(decoded.sample_rate, 22050);
        assert_eq!(decoded.samples, vec![0.0, 0.5, -0.5, 0.25, 1.0, -1.0]);
    }

    #[test]
    fn test_decode_int_wav_is_scaled() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("int.wav");
        write_wav_i16(&path, &[0, 16384, -16384, i16::MIN], 1, 8000).unwrap();

        let decoded = decode_file(&path).unwrap();

        assert_eq!(decoded.channel_count, 1);
        assert_eq!(decoded.sample_rate, 8000);
        assert_eq!(decoded.samples, vec![0.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn test_missing_file() {
        let result = decode_file(Path::new("/nonexistent/sample.flac"));
        match result {
            Err(DecodeError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/sample.flac"))
            }
            other => panic!("expected IO error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("garbage.wav");
        std::fs::write(&path, b"this is not audio at all").unwrap();

        let result = decode_file(&path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().path(), path.as_path());
    }

    /// Writes a mono IMA ADPCM WAV holding two 36 byte blocks. The container is
    /// valid but the second block's step index is out of range, which only the
    /// codec notices.
    fn write_corrupt_adpcm_wav(path: &Path) {
        let mut data = Vec::new();
        for step_index in [0u8, 200] {
            data.extend_from_slice(&0i16.to_le_bytes());
            data.push(step_index);
            data.push(0);
            data.extend_from_slice(&[0x11; 32]);
        }

        let mut fmt = Vec::new();
        fmt.extend_from_slice(&0x0011u16.to_le_bytes());
        fmt.extend_from_slice(&1u16.to_le_bytes());
        fmt.extend_from_slice(&8000u32.to_le_bytes());
        fmt.extend_from_slice(&4055u32.to_le_bytes());
        fmt.extend_from_slice(&36u16.to_le_bytes());
        fmt.extend_from_slice(&4u16.to_le_bytes());
        fmt.extend_from_slice(&2u16.to_le_bytes());
        fmt.extend_from_slice(&65u16.to_le_bytes());

        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&((4 + 8 + fmt.len() + 8 + data.len()) as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&(fmt.len() as u32).to_le_bytes());
        wav.extend_from_slice(&fmt);
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data.len() as u32).to_le_bytes());
        wav.extend_from_slice(&data);

        std::fs::write(path, wav).unwrap();
    }

    #[test]
    fn test_corrupt_packet_fails_the_sample() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("corrupt.wav");
        write_corrupt_adpcm_wav(&path);

        match decode_file(&path) {
            Err(DecodeError::Audio { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected a decode failure, got {:?}", other),
        }
    }
}
