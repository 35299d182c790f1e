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
use crate::instrument::ConfigurationError;

/// Typed error for config load/parse failures so callers can distinguish
/// e.g. file-not-found from an invalid instrument without string matching.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config load/parse error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid instrument {name}: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ConfigurationError,
    },

    #[error("Instrument {0} must set exactly one of files or glob")]
    SampleSource(String),

    #[error("Invalid catalog: {0}")]
    Catalog(#[source] ConfigurationError),

    #[error("Invalid decode format: {0}")]
    Format(#[from] AudioError),

    #[error("Unknown instrument {0}")]
    UnknownInstrument(String),

    #[error("Unable to write catalog: {0}")]
    Serialize(#[from] serde_yml::Error),
}
