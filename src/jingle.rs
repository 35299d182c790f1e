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

//! The jingle synthesis engine.
//!
//! Given an instrument and a seed, the engine draws a jingle length and pulse
//! interval, lays out time slots, scatters randomly chosen samples into
//! per-slot buckets bounded by the instrument's polyphony, mixes everything
//! onto a silent canvas and trims the result.

mod bucket;
mod engine;
mod error;
mod plan;
mod seed;

pub use bucket::Bucket;
pub use engine::{Synthesizer, SILENCE_THRESHOLD_DB, TRIM_PADDING_MS};
pub use error::JingleError;
pub use plan::{note_count_deviation, JinglePlan, Slot};
pub use seed::{random_seed, rng_for_seed, seed_value};
