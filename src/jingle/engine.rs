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
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use super::error::JingleError;
use super::plan::JinglePlan;
use super::seed::rng_for_seed;
use crate::audio::sample_source::SampleProvider;
use crate::audio::{AudioBuffer, AudioService};
use crate::instrument::{ConfigurationError, Instrument, ResolvedInstrument, ResourceError};

/// Anything quieter than this (dBFS) at either end of a jingle is trimmed.
pub const SILENCE_THRESHOLD_DB: f64 = -70.0;

/// Silence kept on either side of the audible part of a jingle.
pub const TRIM_PADDING_MS: u64 = 250;

/// Composes jingles from instrument samples.
///
/// The synthesizer itself is stateless; the only state shared between calls is
/// each instrument's cached sample set. Every call builds its own generator.
pub struct Synthesizer {
    audio: Arc<dyn AudioService>,
    provider: Arc<dyn SampleProvider>,
}

impl Synthesizer {
    /// Creates a new synthesizer mixing with `audio` and decoding with `provider`.
    pub fn new(audio: Arc<dyn AudioService>, provider: Arc<dyn SampleProvider>) -> Self {
        Self { audio, provider }
    }

    /// Resolves the instrument's samples through this synthesizer's services.
    pub fn resolve<'a>(
        &self,
        instrument: &'a Instrument,
    ) -> Result<ResolvedInstrument<'a>, ResourceError> {
        instrument.resolve(self.provider.as_ref(), self.audio.as_ref())
    }

    /// Composes one jingle. The same instrument and seed always produce the
    /// same buffer; without a seed the jingle is different every time.
    pub fn synthesize(
        &self,
        instrument: &Instrument,
        seed: Option<&str>,
    ) -> Result<AudioBuffer, JingleError> {
        let resolved = self.resolve(instrument)?;
        let mut rng = rng_for_seed(seed);
        let plan = self.plan(&resolved, &mut rng)?;

        debug!(
            target: "jingle::diagnostics",
            seed = seed.unwrap_or("<random>"),
            length_ms = plan.length_ms(),
            instrument = instrument.name(),
            slots = plan.slot_count(),
            pulse_interval_ms = plan.pulse_interval_ms(),
            note_count = plan.note_count(),
            placed_notes = plan.placed_notes(),
            "Planned jingle"
        );

        let jingle = self.render(&resolved, &plan)?;
        info!(
            instrument = instrument.name(),
            duration_ms = self.audio.length(&jingle),
            "Synthesized jingle"
        );
        Ok(jingle)
    }

    /// Draws a plan for the resolved instrument without mixing anything.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        resolved: &ResolvedInstrument<'_>,
        rng: &mut R,
    ) -> Result<JinglePlan, ConfigurationError> {
        JinglePlan::draw(
            resolved.instrument().timing(),
            resolved.samples().len(),
            rng,
        )
    }

    /// Mixes a plan onto a silent canvas and trims the result.
    ///
    /// The canvas is padded by the longest sample so the last note is never cut off.
    /// A plan referencing samples the instrument doesn't have is an error.
    pub fn render(
        &self,
        resolved: &ResolvedInstrument<'_>,
        plan: &JinglePlan,
    ) -> Result<AudioBuffer, JingleError> {
        let padding_ms = self.audio.length(resolved.longest_sample());
        let mut canvas = self.audio.silence(plan.length_ms() + padding_ms)?;

        for slot in plan.slots() {
            for index in slot.bucket().iter() {
                let sample = resolved.samples().get(index).ok_or_else(|| {
                    JingleError::UnknownSample {
                        index,
                        available: resolved.samples().len(),
                    }
                })?;
                canvas = self.audio.overlay(canvas, sample, slot.offset_ms())?;
            }
        }

        Ok(self
            .audio
            .trim_silence(canvas, SILENCE_THRESHOLD_DB, TRIM_PADDING_MS)?)
    }
}
