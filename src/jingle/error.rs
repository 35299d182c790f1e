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
use crate::audio::AudioError;
use crate::instrument::{ConfigurationError, ResourceError};

/// Failure of a synthesis call. Errors from sample resolution and from the
/// audio service pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum JingleError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Plan places sample {index} but only {available} samples are resolved")]
    UnknownSample { index: usize, available: usize },
}
