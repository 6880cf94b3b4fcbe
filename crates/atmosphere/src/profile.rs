use std::iter::FusedIterator;

use crate::{AtmosphereModel, AtmosphericState};

/// Lazily evaluated altitude profile. Cloning yields an independent cursor, and
/// [`AltitudeProfile::restart`] rewinds to sea level.
#[derive(Debug, Clone)]
pub struct AltitudeProfile<'a> {
    model: &'a AtmosphereModel,
    step_m: f64,
    len: usize,
    cursor: usize,
}

impl<'a> AltitudeProfile<'a> {
    pub(crate) fn new(model: &'a AtmosphereModel, len: usize, step_m: f64) -> Self {
        Self {
            model,
            step_m,
            len,
            cursor: 0,
        }
    }

    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    /// Altitude of the last sample (m).
    pub fn last_altitude_m(&self) -> f64 {
        self.len.saturating_sub(1) as f64 * self.step_m
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for AltitudeProfile<'_> {
    type Item = AtmosphericState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }
        // multiply rather than accumulate so the last sample lands exactly on the grid
        let altitude = self.cursor as f64 * self.step_m;
        self.cursor += 1;
        Some(self.model.state_at(altitude))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AltitudeProfile<'_> {}

impl FusedIterator for AltitudeProfile<'_> {}
