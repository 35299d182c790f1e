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

//! Decoding of instrument samples into in-memory buffers.

pub mod decoder;
pub mod error;
pub mod memory;
pub mod provider;

pub use decoder::{decode_file, DecodedAudio};
pub use error::DecodeError;
pub use memory::MemorySampleProvider;
pub use provider::{SampleProvider, SymphoniaSampleProvider};
