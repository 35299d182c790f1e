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
use std::sync::Arc;

use super::error::ResourceError;
use super::profile::Instrument;
use crate::audio::AudioBuffer;

/// An instrument together with its decoded, volume-adjusted sample set.
/// The sample set is never empty.
#[derive(Debug, Clone)]
pub struct ResolvedInstrument<'a> {
    instrument: &'a Instrument,
    samples: Arc<[AudioBuffer]>,
    longest: usize,
}

impl<'a> ResolvedInstrument<'a> {
    pub(super) fn new(
        instrument: &'a Instrument,
        samples: Arc<[AudioBuffer]>,
    ) -> Result<Self, ResourceError> {
        let longest = longest_index(&samples)
            .ok_or_else(|| ResourceError::Empty(instrument.name().to_string()))?;
        Ok(Self {
            instrument,
            samples,
            longest,
        })
    }

    /// The profile these samples belong to.
    pub fn instrument(&self) -> &'a Instrument {
        self.instrument
    }

    /// The samples in resolution order.
    pub fn samples(&self) -> &[AudioBuffer] {
        &self.samples
    }

    /// The sample with the greatest duration. Ties go to the earliest sample.
    pub fn longest_sample(&self) -> &AudioBuffer {
        &self.samples[self.longest]
    }

    /// Returns true if both resolutions hold the same cached sample set.
    pub fn shares_samples_with(&self, other: &ResolvedInstrument<'_>) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

fn longest_index(samples: &[AudioBuffer]) -> Option<usize> {
    let mut longest: Option<usize> = None;
    for (index, sample) in samples.iter().enumerate() {
        match longest {
            Some(current) if samples[current].frames() >= sample.frames() => {}
            _ => longest = Some(index),
        }
    }
    longest
}
