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

//! Instrument profiles.
//!
//! An [`Instrument`] is pure configuration: timing bounds, a polyphony limit,
//! a volume trim and a declaration of where its samples live. Resolving it
//! through a [`SampleProvider`](crate::audio::sample_source::SampleProvider)
//! yields a [`ResolvedInstrument`] holding the decoded sample set. Decoding
//! happens at most once per instrument, even under concurrent resolution.

mod catalog;
mod error;
mod profile;
mod resolved;

pub use catalog::InstrumentCatalog;
pub use error::{ConfigurationError, ResourceError};
pub use profile::{
    Instrument, SampleSource, Timing, DEFAULT_MAX_LENGTH_MS, DEFAULT_MAX_POLYPHONY,
    DEFAULT_MAX_PULSE_INTERVAL_MS, DEFAULT_MIN_LENGTH_MS, DEFAULT_MIN_NOTES,
    DEFAULT_MIN_PULSE_INTERVAL_MS,
};
pub use resolved::ResolvedInstrument;
