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
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{crate_version, Parser, Subcommand};
use jingle::audio::export::export_wav_file;
use jingle::audio::player::{ExternalPlayer, DEFAULT_PLAYER_COMMAND};
use jingle::audio::sample_source::SymphoniaSampleProvider;
use jingle::audio::PcmAudioService;
use jingle::config::{load_catalog, ConfigError, LoadedCatalog};
use jingle::jingle::{random_seed, Synthesizer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Where the built-in instruments look for their samples.
const DEFAULT_SOUNDS_DIR: &str = "sounds";

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "Procedurally composes short notification jingles."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the available instruments.
    List {
        /// A YAML instrument catalog. The built-in instruments are used if absent.
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Composes a jingle and plays it or writes it to a WAV file.
    Play {
        /// The instrument to play. Chosen at random if absent.
        #[arg(short, long)]
        instrument: Option<String>,
        /// The seed to compose from. A random seed is generated if absent.
        #[arg(short, long)]
        seed: Option<String>,
        /// Writes the jingle to this WAV file instead of playing it.
        #[arg(short, long)]
        output_file: Option<PathBuf>,
        /// A YAML instrument catalog. The built-in instruments are used if absent.
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// The directory holding the sample files.
        #[arg(long)]
        sounds_dir: Option<PathBuf>,
        /// The command the WAV data is piped to.
        #[arg(short, long, default_value = DEFAULT_PLAYER_COMMAND)]
        player: String,
        /// Prints the parameters the jingle was composed with.
        #[arg(short, long)]
        debug: bool,
    },
    /// Prints the built-in catalog as YAML.
    DumpCatalog {
        /// The directory holding the sample files.
        #[arg(long)]
        sounds_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Commands::Play { debug: true, .. });
    init_tracing(debug)?;

    match cli.command {
        Commands::List { catalog } => {
            let loaded = catalog_for(catalog.as_deref(), None)?;
            for name in loaded.catalog().names() {
                println!("{}", name);
            }
        }
        Commands::Play {
            instrument,
            seed,
            output_file,
            catalog,
            sounds_dir,
            player,
            debug: _,
        } => {
            let loaded = catalog_for(catalog.as_deref(), sounds_dir.as_deref())?;
            let mut rng = rand::thread_rng();

            let instrument = match instrument {
                Some(name) => loaded
                    .catalog()
                    .get(&name)
                    .ok_or(ConfigError::UnknownInstrument(name))?,
                None => loaded
                    .catalog()
                    .choose(&mut rng)
                    .ok_or("the instrument catalog is empty")?,
            };
            let seed = seed.unwrap_or_else(|| random_seed(&mut rng));
            eprintln!("{} \"{}\"", instrument.name(), seed);

            let format = loaded.format();
            let synthesizer = Synthesizer::new(
                Arc::new(PcmAudioService::new(format)),
                Arc::new(SymphoniaSampleProvider::new(format)),
            );
            let jingle = synthesizer.synthesize(instrument, Some(&seed))?;

            match output_file {
                Some(path) => export_wav_file(&jingle, &path)?,
                None => {
                    let player = ExternalPlayer::from_command_line(&player)
                        .ok_or("the player command is empty")?;
                    info!(player = %player, "Playing jingle");
                    let status = player.play(&jingle)?;
                    if !status.success() {
                        return Err(format!("{} exited with {}", player, status).into());
                    }
                }
            }
        }
        Commands::DumpCatalog { sounds_dir } => {
            let sounds_dir = sounds_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SOUNDS_DIR));
            let loaded = LoadedCatalog::builtin(&sounds_dir)?;
            print!("{}", loaded.to_file().to_yaml()?);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for listings and catalog dumps.
fn init_tracing(debug: bool) -> Result<(), Box<dyn Error>> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if debug {
        filter = filter.add_directive("jingle::diagnostics=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Loads the given catalog file, or the built-in catalog when there is none.
fn catalog_for(
    catalog: Option<&Path>,
    sounds_dir: Option<&Path>,
) -> Result<LoadedCatalog, ConfigError> {
    match catalog {
        Some(path) => load_catalog(path, sounds_dir),
        None => LoadedCatalog::builtin(sounds_dir.unwrap_or_else(|| Path::new(DEFAULT_SOUNDS_DIR))),
    }
}
