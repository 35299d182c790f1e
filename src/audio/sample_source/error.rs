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
use std::path::PathBuf;

/// Error types for sample decoding
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio file error in {}: {source}", path.display())]
    Audio {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    #[error("Sample conversion failed for {}: {reason}", path.display())]
    SampleConversionFailed { path: PathBuf, reason: String },

    #[error("No sample available at {}", .0.display())]
    NotFound(PathBuf),
}

impl DecodeError {
    /// The sample path this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DecodeError::Io { path, .. }
            | DecodeError::Audio { path, .. }
            | DecodeError::SampleConversionFailed { path, .. } => path,
            DecodeError::NotFound(path) => path,
        }
    }
}
