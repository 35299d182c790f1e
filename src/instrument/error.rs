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
use crate::audio::sample_source::DecodeError;

/// An instrument profile whose bounds cannot produce a jingle.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Instrument name must not be empty")]
    EmptyName,

    #[error("Instrument {0} declares no samples")]
    NoSamples(String),

    #[error("min_length must be at least 2ms, got {0}ms")]
    LengthTooShort(u64),

    #[error("min_length ({min}ms) must be less than max_length ({max}ms)")]
    InvalidLengthRange { min: u64, max: u64 },

    #[error("min_pulse_interval must be greater than 0")]
    ZeroPulseInterval,

    #[error("min_pulse_interval ({min}ms) must be less than max_pulse_interval ({max}ms)")]
    InvalidPulseRange { min: u64, max: u64 },

    #[error("max_polyphony must be at least 1")]
    ZeroPolyphony,

    #[error("volume_adjustment must be a finite number of decibels, got {0}")]
    InvalidVolume(f64),

    #[error("Duplicate instrument name {0}")]
    DuplicateName(String),

    #[error("The instrument catalog is empty")]
    EmptyCatalog,

    #[error("Cannot plan a jingle without samples")]
    EmptySampleSet,
}

/// The samples of an instrument could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Instrument {0} resolved to no samples")]
    Empty(String),

    #[error("Invalid sample glob {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Unreadable path matched by {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
