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
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::instrument::{
    Instrument, SampleSource, Timing, DEFAULT_MAX_LENGTH_MS, DEFAULT_MAX_POLYPHONY,
    DEFAULT_MAX_PULSE_INTERVAL_MS, DEFAULT_MIN_LENGTH_MS, DEFAULT_MIN_NOTES,
    DEFAULT_MIN_PULSE_INTERVAL_MS,
};

/// A YAML representation of an instrument.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct InstrumentDefinition {
    /// The unique name of the instrument.
    name: String,

    /// Sample files. Relative paths resolve against the sounds directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    files: Option<Vec<String>>,

    /// A glob matching the sample files. Relative patterns resolve against the
    /// directory holding the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    glob: Option<String>,

    #[serde(default = "default_min_length")]
    min_length: u64,

    #[serde(default = "default_max_length")]
    max_length: u64,

    #[serde(default = "default_min_notes")]
    min_notes: u32,

    #[serde(default = "default_max_polyphony")]
    max_polyphony: usize,

    #[serde(default = "default_min_pulse_interval")]
    min_pulse_interval: u64,

    #[serde(default = "default_max_pulse_interval")]
    max_pulse_interval: u64,

    /// Gain applied to every sample, in decibels.
    #[serde(default)]
    volume_adjustment: f64,
}

fn default_min_length() -> u64 {
    DEFAULT_MIN_LENGTH_MS
}

fn default_max_length() -> u64 {
    DEFAULT_MAX_LENGTH_MS
}

fn default_min_notes() -> u32 {
    DEFAULT_MIN_NOTES
}

fn default_max_polyphony() -> usize {
    DEFAULT_MAX_POLYPHONY
}

fn default_min_pulse_interval() -> u64 {
    DEFAULT_MIN_PULSE_INTERVAL_MS
}

fn default_max_pulse_interval() -> u64 {
    DEFAULT_MAX_PULSE_INTERVAL_MS
}

impl InstrumentDefinition {
    /// Describes an existing instrument. File paths under `sounds_dir` are
    /// written relative to it.
    pub fn from_instrument(instrument: &Instrument, sounds_dir: &Path) -> Self {
        let (files, glob) = match instrument.source() {
            SampleSource::Files(paths) => (
                Some(
                    paths
                        .iter()
                        .map(|path| {
                            path.strip_prefix(sounds_dir)
                                .unwrap_or(path)
                                .to_string_lossy()
                                .into_owned()
                        })
                        .collect(),
                ),
                None,
            ),
            SampleSource::Glob(pattern) => (None, Some(pattern.clone())),
        };
        let timing = instrument.timing();

        Self {
            name: instrument.name().to_string(),
            files,
            glob,
            min_length: timing.min_length_ms(),
            max_length: timing.max_length_ms(),
            min_notes: timing.min_notes(),
            max_polyphony: timing.max_polyphony(),
            min_pulse_interval: timing.min_pulse_interval_ms(),
            max_pulse_interval: timing.max_pulse_interval_ms(),
            volume_adjustment: instrument.volume_adjustment_db(),
        }
    }

    /// Gets the name of the instrument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds the validated instrument.
    pub fn to_instrument(
        &self,
        sounds_dir: &Path,
        base_dir: &Path,
    ) -> Result<Instrument, ConfigError> {
        let source = match (&self.files, &self.glob) {
            (Some(files), None) => SampleSource::Files(
                files
                    .iter()
                    .map(|file| resolve_path(sounds_dir, Path::new(file)))
                    .collect(),
            ),
            (None, Some(pattern)) => {
                let pattern = if Path::new(pattern).is_absolute() {
                    pattern.clone()
                } else {
                    base_dir.join(pattern).to_string_lossy().into_owned()
                };
                SampleSource::Glob(pattern)
            }
            _ => return Err(ConfigError::SampleSource(self.name.clone())),
        };

        let timing = Timing::default()
            .with_length(self.min_length, self.max_length)
            .with_min_notes(self.min_notes)
            .with_max_polyphony(self.max_polyphony)
            .with_pulse_interval(self.min_pulse_interval, self.max_pulse_interval);

        Instrument::new(&self.name, source, timing, self.volume_adjustment).map_err(|source| {
            ConfigError::Invalid {
                name: self.name.clone(),
                source,
            }
        })
    }
}

/// Joins `path` onto `base` unless it is already absolute.
pub(super) fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod test {
    use config::{Config, File, FileFormat};

    use super::*;
    use crate::instrument::ConfigurationError;

    fn parse(yaml: &str) -> InstrumentDefinition {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let definition = parse(
            r#"
            name: wood
            files: [wood1.flac, wood2.flac]
            "#,
        );
        let instrument = definition
            .to_instrument(Path::new("/sounds"), Path::new("/catalogs"))
            .unwrap();

        assert_eq!(instrument.name(), "wood");
        assert_eq!(instrument.timing(), &Timing::default());
        assert_eq!(instrument.volume_adjustment_db(), 0.0);
        assert_eq!(
            instrument.source(),
            &SampleSource::Files(vec![
                PathBuf::from("/sounds/wood1.flac"),
                PathBuf::from("/sounds/wood2.flac"),
            ])
        );
    }

    #[test]
    fn test_all_fields() {
        let definition = parse(
            r#"
            name: tuna
            files: [tuna1.flac, /elsewhere/tuna2.flac]
            min_length: 1500
            max_length: 3000
            min_notes: 3
            max_polyphony: 2
            min_pulse_interval: 1000
            max_pulse_interval: 4000
            volume_adjustment: -3
            "#,
        );
        let instrument = definition
            .to_instrument(Path::new("/sounds"), Path::new("/catalogs"))
            .unwrap();

        let timing = instrument.timing();
        assert_eq!(timing.min_length_ms(), 1500);
        assert_eq!(timing.max_length_ms(), 3000);
        assert_eq!(timing.min_notes(), 3);
        assert_eq!(timing.max_polyphony(), 2);
        assert_eq!(timing.min_pulse_interval_ms(), 1000);
        assert_eq!(timing.max_pulse_interval_ms(), 4000);
        assert_eq!(instrument.volume_adjustment_db(), -3.0);
        assert_eq!(
            instrument.source(),
            &SampleSource::Files(vec![
                PathBuf::from("/sounds/tuna1.flac"),
                PathBuf::from("/elsewhere/tuna2.flac"),
            ])
        );
    }

    #[test]
    fn test_relative_glob_uses_catalog_dir() {
        let definition = parse(
            r#"
            name: high
            glob: "sounds/high*.flac"
            "#,
        );
        let instrument = definition
            .to_instrument(Path::new("/sounds"), Path::new("/catalogs"))
            .unwrap();

        assert_eq!(
            instrument.source(),
            &SampleSource::Glob("/catalogs/sounds/high*.flac".to_string())
        );
    }

    #[test]
    fn test_files_and_glob_are_exclusive() {
        let both = parse(
            r#"
            name: high
            files: [high1.flac]
            glob: "high*.flac"
            "#,
        );
        assert!(matches!(
            both.to_instrument(Path::new("/sounds"), Path::new("/catalogs")),
            Err(ConfigError::SampleSource(name)) if name == "high"
        ));

        let neither = parse("name: high");
        assert!(matches!(
            neither.to_instrument(Path::new("/sounds"), Path::new("/catalogs")),
            Err(ConfigError::SampleSource(_))
        ));
    }

    #[test]
    fn test_invalid_timing_is_rejected() {
        let definition = parse(
            r#"
            name: broken
            files: [a.flac]
            min_pulse_interval: 300
            max_pulse_interval: 300
            "#,
        );

        let err = definition
            .to_instrument(Path::new("/sounds"), Path::new("/catalogs"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: ConfigurationError::InvalidPulseRange { min: 300, max: 300 },
                ..
            }
        ));
    }

    #[test]
    fn test_from_instrument_relativizes_files() {
        let instrument = Instrument::new(
            "metal",
            SampleSource::Files(vec![
                PathBuf::from("/sounds/metal1.flac"),
                PathBuf::from("/other/metal2.flac"),
            ]),
            Timing::default().with_pulse_interval(200, 500),
            -5.0,
        )
        .unwrap();

        let definition = InstrumentDefinition::from_instrument(&instrument, Path::new("/sounds"));
        assert_eq!(definition.name(), "metal");
        assert_eq!(
            definition.files,
            Some(vec![
                "metal1.flac".to_string(),
                "/other/metal2.flac".to_string()
            ])
        );
        assert_eq!(definition.glob, None);
        assert_eq!(definition.min_pulse_interval, 200);
        assert_eq!(definition.volume_adjustment, -5.0);
    }
}
