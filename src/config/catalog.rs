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

use config::{Config, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ConfigError;
use super::instrument::{resolve_path, InstrumentDefinition};
use crate::audio::format::{DEFAULT_CHANNEL_COUNT, DEFAULT_SAMPLE_RATE};
use crate::audio::TargetFormat;
use crate::instrument::InstrumentCatalog;

/// The YAML representation of an instrument catalog.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct CatalogFile {
    /// The instruments in the catalog.
    instruments: Vec<InstrumentDefinition>,

    /// The directory relative sample files live in. Relative to the catalog file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sounds_dir: Option<String>,

    /// The sample rate samples are decoded to.
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,

    /// The channel count samples are decoded to.
    #[serde(default = "default_channels")]
    channels: u16,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNEL_COUNT
}

impl CatalogFile {
    /// Parse a catalog from a YAML file.
    pub fn deserialize(path: &Path) -> Result<CatalogFile, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<CatalogFile>()?)
    }

    /// Describes an existing catalog whose samples live in `sounds_dir`.
    pub fn from_catalog(
        catalog: &InstrumentCatalog,
        sounds_dir: &Path,
        format: TargetFormat,
    ) -> CatalogFile {
        CatalogFile {
            instruments: catalog
                .iter()
                .map(|instrument| InstrumentDefinition::from_instrument(instrument, sounds_dir))
                .collect(),
            sounds_dir: Some(sounds_dir.to_string_lossy().into_owned()),
            sample_rate: format.sample_rate,
            channels: format.channel_count,
        }
    }

    /// Renders the catalog as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Gets the instrument definitions.
    pub fn instruments(&self) -> &[InstrumentDefinition] {
        &self.instruments
    }

    /// The format samples are decoded to.
    pub fn format(&self) -> Result<TargetFormat, ConfigError> {
        Ok(TargetFormat::new(self.sample_rate, self.channels)?)
    }

    /// The sounds directory, resolved against `base_dir`. Defaults to `base_dir` itself.
    pub fn sounds_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.sounds_dir {
            Some(sounds_dir) => resolve_path(base_dir, Path::new(sounds_dir)),
            None => base_dir.to_path_buf(),
        }
    }

    /// Builds the validated catalog.
    pub fn to_catalog(
        &self,
        sounds_dir: &Path,
        base_dir: &Path,
    ) -> Result<InstrumentCatalog, ConfigError> {
        let instruments = self
            .instruments
            .iter()
            .map(|definition| definition.to_instrument(sounds_dir, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        InstrumentCatalog::new(instruments).map_err(ConfigError::Catalog)
    }
}

/// A validated catalog together with the format its samples decode to.
#[derive(Debug)]
pub struct LoadedCatalog {
    catalog: InstrumentCatalog,
    format: TargetFormat,
    sounds_dir: PathBuf,
}

impl LoadedCatalog {
    /// The built-in instruments, decoded at the default format.
    pub fn builtin(sounds_dir: &Path) -> Result<LoadedCatalog, ConfigError> {
        Ok(LoadedCatalog {
            catalog: InstrumentCatalog::builtin(sounds_dir).map_err(ConfigError::Catalog)?,
            format: TargetFormat::default(),
            sounds_dir: sounds_dir.to_path_buf(),
        })
    }

    /// Gets the catalog.
    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    /// Gets the decode format.
    pub fn format(&self) -> TargetFormat {
        self.format
    }

    /// Gets the directory relative sample files were resolved against.
    pub fn sounds_dir(&self) -> &Path {
        &self.sounds_dir
    }

    /// Describes this catalog in its YAML form.
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile::from_catalog(&self.catalog, &self.sounds_dir, self.format)
    }
}

/// Loads a catalog file. `sounds_dir` overrides the directory named in the file.
pub fn load_catalog(path: &Path, sounds_dir: Option<&Path>) -> Result<LoadedCatalog, ConfigError> {
    let file = CatalogFile::deserialize(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let sounds_dir = match sounds_dir {
        Some(sounds_dir) => sounds_dir.to_path_buf(),
        None => file.sounds_dir(base_dir),
    };

    let catalog = file.to_catalog(&sounds_dir, base_dir)?;
    info!(
        path = ?path,
        instruments = catalog.len(),
        sounds_dir = ?sounds_dir,
        "Loaded instrument catalog"
    );

    Ok(LoadedCatalog {
        catalog,
        format: file.format()?,
        sounds_dir,
    })
}

#[cfg(test)]
mod test {
    use std::fs;

    use config::FileFormat;

    use super::*;
    use crate::instrument::{ConfigurationError, SampleSource};

    fn parse(yaml: &str) -> CatalogFile {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_load_resolves_relative_sounds_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(
            &path,
            r#"
instruments:
  - name: wood
    files: [wood1.flac]
  - name: tuna
    files: [tuna1.flac]
    max_polyphony: 2
sounds_dir: sounds
sample_rate: 22050
channels: 1
"#,
        )
        .unwrap();

        let loaded = load_catalog(&path, None).unwrap();

        assert_eq!(loaded.catalog().len(), 2);
        assert_eq!(loaded.sounds_dir(), dir.path().join("sounds"));
        assert_eq!(loaded.format(), TargetFormat::new(22050, 1).unwrap());
        assert_eq!(
            loaded.catalog().get("wood").unwrap().source(),
            &SampleSource::Files(vec![dir.path().join("sounds").join("wood1.flac")])
        );
        assert_eq!(
            loaded.catalog().get("tuna").unwrap().timing().max_polyphony(),
            2
        );
    }

    #[test]
    fn test_sounds_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(
            &path,
            "instruments:\n  - name: wood\n    files: [wood1.flac]\nsounds_dir: sounds\n",
        )
        .unwrap();

        let loaded = load_catalog(&path, Some(Path::new("/override"))).unwrap();

        assert_eq!(loaded.sounds_dir(), Path::new("/override"));
        assert_eq!(loaded.format(), TargetFormat::default());
        assert_eq!(
            loaded.catalog().get("wood").unwrap().source(),
            &SampleSource::Files(vec![PathBuf::from("/override/wood1.flac")])
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("missing.yaml"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_duplicate_names() {
        let file = parse(
            r#"
            instruments:
              - name: wood
                files: [wood1.flac]
              - name: wood
                files: [wood2.flac]
            "#,
        );

        let err = file
            .to_catalog(Path::new("/sounds"), Path::new("/"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(ConfigurationError::DuplicateName(name)) if name == "wood"
        ));
    }

    #[test]
    fn test_invalid_format() {
        let file = parse(
            r#"
            instruments:
              - name: wood
                files: [wood1.flac]
            channels: 0
            "#,
        );
        assert!(matches!(file.format(), Err(ConfigError::Format(_))));
    }

    #[test]
    fn test_sounds_dir_defaults_to_catalog_dir() {
        let file = parse(
            r#"
            instruments:
              - name: wood
                files: [wood1.flac]
            "#,
        );
        assert_eq!(file.sounds_dir(Path::new("/catalogs")), Path::new("/catalogs"));
        assert_eq!(file.instruments().len(), 1);
    }

    #[test]
    fn test_builtin_dump_reloads() {
        let builtin = LoadedCatalog::builtin(Path::new("/usr/share/jingle/sounds")).unwrap();
        let yaml = builtin.to_file().to_yaml().unwrap();

        let reloaded = parse(&yaml);
        let sounds_dir = reloaded.sounds_dir(Path::new("/elsewhere"));
        assert_eq!(sounds_dir, Path::new("/usr/share/jingle/sounds"));
        assert_eq!(reloaded.format().unwrap(), TargetFormat::default());

        let catalog = reloaded.to_catalog(&sounds_dir, Path::new("/")).unwrap();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            builtin.catalog().names().collect::<Vec<_>>()
        );
        for instrument in builtin.catalog().iter() {
            let reloaded = catalog.get(instrument.name()).unwrap();
            assert_eq!(reloaded.timing(), instrument.timing());
            assert_eq!(reloaded.source(), instrument.source());
            assert_eq!(
                reloaded.volume_adjustment_db(),
                instrument.volume_adjustment_db()
            );
        }
    }
}
