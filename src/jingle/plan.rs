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
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::bucket::Bucket;
use crate::instrument::{ConfigurationError, Timing};

/// A candidate note position and the samples placed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    offset_ms: u64,
    bucket: Bucket,
}

impl Slot {
    /// Offset of the slot from the start of the jingle.
    pub fn offset_ms(&self) -> u64 {
        self.offset_ms
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }
}

/// Everything decided about one jingle before any audio is mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JinglePlan {
    length_ms: u64,
    pulse_interval_ms: u64,
    note_count: u64,
    slots: Vec<Slot>,
}

/// Spread of the requested note count around one note per slot.
///
/// Wide pulse ranges allow a wide range of note densities. A degenerate or
/// inverted range yields 0, which makes the draw always hit the slot count.
pub fn note_count_deviation(length_ms: u64, min_pulse_ms: u64, max_pulse_ms: u64) -> f64 {
    if min_pulse_ms == 0 || max_pulse_ms == 0 {
        return 0.0;
    }
    let length = length_ms as f64;
    let deviation = length / min_pulse_ms as f64 - length / max_pulse_ms as f64;
    if deviation.is_finite() && deviation > 0.0 {
        deviation
    } else {
        0.0
    }
}

impl JinglePlan {
    /// Draws a plan for an instrument with `sample_count` resolved samples.
    ///
    /// The draws happen in a fixed order (length, pulse interval, note count,
    /// then a slot and a sample per requested note), so the same generator state
    /// always yields the same plan.
    pub fn draw<R: Rng + ?Sized>(
        timing: &Timing,
        sample_count: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        timing.validate()?;
        if sample_count == 0 {
            return Err(ConfigurationError::EmptySampleSet);
        }

        let length_ms = rng.gen_range(timing.min_length_ms()..timing.max_length_ms());
        // Very short jingles still get a slot after time 0.
        let pulse_interval_ms = rng
            .gen_range(timing.min_pulse_interval_ms()..timing.max_pulse_interval_ms())
            .min(length_ms - 1);

        let mut slots: Vec<Slot> = (0..length_ms)
            .step_by(pulse_interval_ms as usize)
            .map(|offset_ms| Slot {
                offset_ms,
                bucket: Bucket::new(timing.max_polyphony()),
            })
            .collect();

        let target = slots.len() as f64;
        let deviation = note_count_deviation(
            length_ms,
            timing.min_pulse_interval_ms(),
            timing.max_pulse_interval_ms(),
        );
        let drawn = match Normal::new(target, deviation) {
            Ok(normal) => normal.sample(rng),
            Err(_) => target,
        };
        let note_count = (drawn.round().max(0.0) as u64).max(u64::from(timing.min_notes()));

        // Slots and samples are drawn with replacement. Inserts into a full
        // bucket or of a sample already in the bucket are dropped, so fewer
        // notes than requested may be placed.
        for _ in 0..note_count {
            let slot = rng.gen_range(0..slots.len());
            let sample = rng.gen_range(0..sample_count);
            slots[slot].bucket.insert(sample);
        }

        Ok(Self {
            length_ms,
            pulse_interval_ms,
            note_count,
            slots,
        })
    }

    /// The drawn jingle length, before trimming.
    pub fn length_ms(&self) -> u64 {
        self.length_ms
    }

    pub fn pulse_interval_ms(&self) -> u64 {
        self.pulse_interval_ms
    }

    /// The number of notes requested. An upper bound on the notes placed.
    pub fn note_count(&self) -> u64 {
        self.note_count
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The number of notes that actually made it into a bucket.
    pub fn placed_notes(&self) -> usize {
        self.slots.iter().map(|slot| slot.bucket.len()).sum()
    }
}
