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

//! Playback of finished jingles through an external player process.

use std::fmt;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info, warn};

use super::buffer::AudioBuffer;
use super::error::AudioError;
use super::export;

/// The player used when none is configured. Reads a WAV stream from stdin.
pub const DEFAULT_PLAYER_COMMAND: &str = "mplayer -";

/// An external program that plays a WAV stream written to its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
}

impl ExternalPlayer {
    /// Creates a player from a program and its arguments.
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Parses a whitespace separated command line, e.g. `mplayer -`.
    /// Returns None if the command line is empty.
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }

    /// Streams the buffer to the player and waits for it to exit.
    pub fn play(&self, buffer: &AudioBuffer) -> Result<ExitStatus, AudioError> {
        let bytes = export::to_wav_bytes(buffer)?;

        debug!(player = %self, bytes = bytes.len(), "Spawning player");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Dropping stdin closes the pipe so the player sees end of stream.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&bytes),
            None => Ok(()),
        };

        // The child is reaped even when it stopped reading early.
        let status = child.wait()?;
        info!(player = %self, status = %status, "Player exited");
        if let Err(e) = written {
            warn!(player = %self, err = %e, "Player did not take the whole stream");
            return Err(e.into());
        }
        Ok(status)
    }
}

impl Default for ExternalPlayer {
    fn default() -> Self {
        Self::new("mplayer", &["-"])
    }
}

impl fmt::Display for ExternalPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
