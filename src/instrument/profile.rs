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
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::error::{ConfigurationError, ResourceError};
use super::resolved::ResolvedInstrument;
use crate::audio::sample_source::SampleProvider;
use crate::audio::{AudioBuffer, AudioService};

pub const DEFAULT_MIN_LENGTH_MS: u64 = 1000;
pub const DEFAULT_MAX_LENGTH_MS: u64 = 1500;
pub const DEFAULT_MIN_NOTES: u32 = 4;
pub const DEFAULT_MAX_POLYPHONY: usize = 3;
pub const DEFAULT_MIN_PULSE_INTERVAL_MS: u64 = 100;
pub const DEFAULT_MAX_PULSE_INTERVAL_MS: u64 = 500;

/// Where an instrument's samples come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// An explicit, ordered list of sample files.
    Files(Vec<PathBuf>),
    /// A filesystem glob pattern. Matches resolve in sorted path order.
    Glob(String),
}

impl SampleSource {
    /// Returns true if the source declares nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            SampleSource::Files(files) => files.is_empty(),
            SampleSource::Glob(pattern) => pattern.trim().is_empty(),
        }
    }

    /// Expands the source into the ordered list of sample paths.
    pub fn paths(&self) -> Result<Vec<PathBuf>, ResourceError> {
        match self {
            SampleSource::Files(files) => Ok(files.clone()),
            SampleSource::Glob(pattern) => {
                let matches = glob::glob(pattern).map_err(|source| ResourceError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                matches
                    .map(|entry| {
                        entry.map_err(|source| ResourceError::Glob {
                            pattern: pattern.clone(),
                            source,
                        })
                    })
                    .collect()
            }
        }
    }
}

/// Timing bounds for the jingles an instrument produces. All durations are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    min_length_ms: u64,
    max_length_ms: u64,
    min_notes: u32,
    max_polyphony: usize,
    min_pulse_interval_ms: u64,
    max_pulse_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            min_length_ms: DEFAULT_MIN_LENGTH_MS,
            max_length_ms: DEFAULT_MAX_LENGTH_MS,
            min_notes: DEFAULT_MIN_NOTES,
            max_polyphony: DEFAULT_MAX_POLYPHONY,
            min_pulse_interval_ms: DEFAULT_MIN_PULSE_INTERVAL_MS,
            max_pulse_interval_ms: DEFAULT_MAX_PULSE_INTERVAL_MS,
        }
    }
}

impl Timing {
    /// Sets the jingle length range, `[min, max)`.
    pub fn with_length(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.min_length_ms = min_ms;
        self.max_length_ms = max_ms;
        self
    }

    /// Sets the floor on the number of notes requested.
    pub fn with_min_notes(mut self, min_notes: u32) -> Self {
        self.min_notes = min_notes;
        self
    }

    /// Sets the maximum number of notes sounding at one slot.
    pub fn with_max_polyphony(mut self, max_polyphony: usize) -> Self {
        self.max_polyphony = max_polyphony;
        self
    }

    /// Sets the pulse interval range, `[min, max)`.
    pub fn with_pulse_interval(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.min_pulse_interval_ms = min_ms;
        self.max_pulse_interval_ms = max_ms;
        self
    }

    pub fn min_length_ms(&self) -> u64 {
        self.min_length_ms
    }

    pub fn max_length_ms(&self) -> u64 {
        self.max_length_ms
    }

    pub fn min_notes(&self) -> u32 {
        self.min_notes
    }

    pub fn max_polyphony(&self) -> usize {
        self.max_polyphony
    }

    pub fn min_pulse_interval_ms(&self) -> u64 {
        self.min_pulse_interval_ms
    }

    pub fn max_pulse_interval_ms(&self) -> u64 {
        self.max_pulse_interval_ms
    }

    /// Checks that the bounds describe non-empty draw ranges.
    ///
    /// A zero-width pulse range (`min == max`) is rejected here rather than
    /// treated as a constant, since both ranges are half-open.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        // The pulse interval is clamped to length - 1, which must stay positive.
        if self.min_length_ms < 2 {
            return Err(ConfigurationError::LengthTooShort(self.min_length_ms));
        }
        if self.min_length_ms >= self.max_length_ms {
            return Err(ConfigurationError::InvalidLengthRange {
                min: self.min_length_ms,
                max: self.max_length_ms,
            });
        }
        if self.min_pulse_interval_ms == 0 {
            return Err(ConfigurationError::ZeroPulseInterval);
        }
        if self.min_pulse_interval_ms >= self.max_pulse_interval_ms {
            return Err(ConfigurationError::InvalidPulseRange {
                min: self.min_pulse_interval_ms,
                max: self.max_pulse_interval_ms,
            });
        }
        if self.max_polyphony == 0 {
            return Err(ConfigurationError::ZeroPolyphony);
        }
        Ok(())
    }
}

/// An immutable instrument profile. The decoded sample set is cached on first
/// resolution and shared by every later resolution.
pub struct Instrument {
    name: String,
    source: SampleSource,
    timing: Timing,
    volume_adjustment_db: f64,
    samples: OnceCell<Arc<[AudioBuffer]>>,
}

impl Instrument {
    /// Creates a new instrument, rejecting bounds that cannot produce a jingle.
    pub fn new(
        name: &str,
        source: SampleSource,
        timing: Timing,
        volume_adjustment_db: f64,
    ) -> Result<Self, ConfigurationError> {
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if source.is_empty() {
            return Err(ConfigurationError::NoSamples(name.to_string()));
        }
        if !volume_adjustment_db.is_finite() {
            return Err(ConfigurationError::InvalidVolume(volume_adjustment_db));
        }
        timing.validate()?;

        Ok(Self {
            name: name.to_string(),
            source,
            timing,
            volume_adjustment_db,
            samples: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &SampleSource {
        &self.source
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The gain applied to every sample at resolution time, in decibels.
    pub fn volume_adjustment_db(&self) -> f64 {
        self.volume_adjustment_db
    }

    /// Returns true once the sample set has been decoded.
    pub fn is_resolved(&self) -> bool {
        self.samples.get().is_some()
    }

    /// Resolves the instrument's samples, decoding them on the first call only.
    ///
    /// Concurrent first calls block until a single decode pass publishes its
    /// result. A failed resolution caches nothing, so a later call retries.
    pub fn resolve(
        &self,
        provider: &dyn SampleProvider,
        audio: &dyn AudioService,
    ) -> Result<ResolvedInstrument<'_>, ResourceError> {
        let samples = self
            .samples
            .get_or_try_init(|| self.load_samples(provider, audio))?;
        ResolvedInstrument::new(self, Arc::clone(samples))
    }

    fn load_samples(
        &self,
        provider: &dyn SampleProvider,
        audio: &dyn AudioService,
    ) -> Result<Arc<[AudioBuffer]>, ResourceError> {
        let paths = self.source.paths()?;
        if paths.is_empty() {
            return Err(ResourceError::Empty(self.name.clone()));
        }

        let mut samples = Vec::with_capacity(paths.len());
        for path in &paths {
            debug!(instrument = %self.name, path = ?path, "Decoding sample");
            let buffer = provider.decode(path)?;
            samples.push(audio.gain(&buffer, self.volume_adjustment_db));
        }

        info!(
            instrument = %self.name,
            samples = samples.len(),
            volume_adjustment_db = self.volume_adjustment_db,
            "Resolved instrument samples"
        );

        Ok(samples.into())
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrument")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("timing", &self.timing)
            .field("volume_adjustment_db", &self.volume_adjustment_db)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
