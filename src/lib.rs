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
//! Procedurally composed notification jingles.
//!
//! An [`instrument::Instrument`] describes a sampled instrument and the timing
//! bounds of its jingles. The [`jingle::Synthesizer`] turns an instrument and
//! an optional seed into an [`audio::AudioBuffer`]; the same seed always
//! yields the same jingle.

pub mod audio;
pub mod config;
pub mod instrument;
pub mod jingle;
#[cfg(test)]
mod testutil;
