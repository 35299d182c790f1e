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
/// Error types for mixing, export and playback.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error(
        "Format mismatch: canvas is {canvas_channels}ch@{canvas_rate}Hz, sample is {sample_channels}ch@{sample_rate}Hz"
    )]
    FormatMismatch {
        canvas_channels: u16,
        canvas_rate: u32,
        sample_channels: u16,
        sample_rate: u32,
    },

    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
