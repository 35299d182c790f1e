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
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::DecodeError;
use super::provider::SampleProvider;
use crate::audio::AudioBuffer;

/// A sample provider that serves buffers already held in memory.
/// Useful for testing and for embedding samples in a binary.
#[derive(Debug, Default)]
pub struct MemorySampleProvider {
    samples: HashMap<PathBuf, AudioBuffer>,
    decodes: AtomicUsize,
}

impl MemorySampleProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a buffer under the given path.
    pub fn with_sample<P: Into<PathBuf>>(mut self, path: P, buffer: AudioBuffer) -> Self {
        self.samples.insert(path.into(), buffer);
        self
    }

    /// Returns how many times `decode` has been called.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl SampleProvider for MemorySampleProvider {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, DecodeError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.samples
            .get(path)
            .cloned()
            .ok_or_else(|| DecodeError::NotFound(path.to_path_buf()))
    }
}
