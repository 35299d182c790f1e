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

//! Audio buffers and the services the jingle engine mixes with.
//!
//! The engine never touches PCM data directly. Everything it needs (silence,
//! overlay, trimming, measuring, gain) goes through [`AudioService`] so that
//! alternative implementations can be swapped in.

pub mod buffer;
pub mod error;
pub mod export;
pub mod format;
pub mod pcm;
pub mod player;
pub mod sample_source;

pub use buffer::AudioBuffer;
pub use error::AudioError;
pub use format::TargetFormat;
pub use pcm::PcmAudioService;

/// Mixing and measuring primitives used by the jingle engine.
pub trait AudioService: Send + Sync {
    /// Creates a silent buffer of the given duration.
    fn silence(&self, duration_ms: u64) -> Result<AudioBuffer, AudioError>;

    /// Additively mixes `sample` into `canvas` starting at `position_ms`.
    /// The canvas keeps its length; anything past its end is dropped.
    fn overlay(
        &self,
        canvas: AudioBuffer,
        sample: &AudioBuffer,
        position_ms: u64,
    ) -> Result<AudioBuffer, AudioError>;

    /// Removes leading and trailing audio quieter than `threshold_db` (dBFS),
    /// leaving `padding_ms` of context on either side.
    fn trim_silence(
        &self,
        buffer: AudioBuffer,
        threshold_db: f64,
        padding_ms: u64,
    ) -> Result<AudioBuffer, AudioError>;

    /// Duration of the buffer in whole milliseconds.
    fn length(&self, buffer: &AudioBuffer) -> u64;

    /// Applies a gain in decibels.
    fn gain(&self, buffer: &AudioBuffer, db: f64) -> AudioBuffer;
}
