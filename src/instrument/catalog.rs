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
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::ConfigurationError;
use super::profile::{Instrument, SampleSource, Timing};

/// An immutable registry of instruments, built once at startup and passed by
/// reference to whatever needs to look instruments up.
#[derive(Debug)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    /// Creates a catalog. Names must be unique and at least one instrument is required.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, ConfigurationError> {
        if instruments.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let mut names = HashSet::new();
        for instrument in &instruments {
            if !names.insert(instrument.name()) {
                return Err(ConfigurationError::DuplicateName(
                    instrument.name().to_string(),
                ));
            }
        }

        Ok(Self { instruments })
    }

    /// The stock instrument set. Sample files are `<name><n>.flac` in `sounds_dir`.
    pub fn builtin(sounds_dir: &Path) -> Result<Self, ConfigurationError> {
        let defaults = Timing::default();
        let entries = [
            ("high", 6, defaults.with_pulse_interval(130, 500), -3.0),
            ("metal", 5, defaults.with_pulse_interval(200, 500), -5.0),
            ("rhodes", 9, defaults.with_pulse_interval(180, 500), -1.0),
            ("tiny", 6, defaults.with_pulse_interval(120, 500), 0.0),
            (
                "tuna",
                5,
                defaults
                    .with_length(1500, 3000)
                    .with_min_notes(3)
                    .with_max_polyphony(2)
                    .with_pulse_interval(1000, 4000),
                -3.0,
            ),
            ("wood", 6, defaults, 0.0),
        ];

        let instruments = entries
            .into_iter()
            .map(|(name, count, timing, volume)| {
                let files: Vec<PathBuf> = (1..=count)
                    .map(|n| sounds_dir.join(format!("{}{}.flac", name, n)))
                    .collect();
                Instrument::new(name, SampleSource::Files(files), timing, volume)
            })
            .collect::<Result<Vec<Instrument>, ConfigurationError>>()?;

        Self::new(instruments)
    }

    /// Looks an instrument up by name.
    pub fn get(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name() == name)
    }

    /// Picks an instrument uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Instrument> {
        self.instruments.choose(rng)
    }

    /// Instrument names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|i| i.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
