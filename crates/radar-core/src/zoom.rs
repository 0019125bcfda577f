// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Discrete range selection in fixed steps.

use log::debug;

use crate::error::RadarError;

/// Display range in nautical miles, always a multiple of `step` within
/// `[step, max]`. Unset until the first batch or zoom, reading as one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeState {
    step: u32,
    max: u32,
    range: Option<u32>,
}

impl RangeState {
    pub fn new(step: u32, max: u32) -> Result<Self, RadarError> {
        if step == 0 || max < step || max % step != 0 {
            return Err(RadarError::InvalidRange { step, max });
        }
        Ok(Self {
            step,
            max,
            range: None,
        })
    }

    /// Current range. Before the first aircraft batch this is one step.
    #[must_use]
    pub fn range(&self) -> u32 {
        self.range.unwrap_or(self.step)
    }

    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.range.is_some()
    }

    /// Pick the smallest step multiple covering the farthest distance below
    /// `max`. Only the first call has an effect.
    pub fn initialize<I>(&mut self, distances: I)
    where
        I: IntoIterator<Item = f64>,
    {
        if self.range.is_some() {
            return;
        }
        let step = f64::from(self.step);
        let max = f64::from(self.max);
        let farthest = distances
            .into_iter()
            .filter(|d| *d > 0.0 && *d < max)
            .fold(0.0_f64, f64::max);

        let range = if farthest > step {
            // farthest < max, so the quotient is bounded by max / step
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "bounded by max / step")]
            let steps = (farthest / step).ceil() as u32;
            steps * self.step
        } else {
            self.step
        };
        debug!("Initial range {} NM (farthest contact {:.1} NM)", range, farthest);
        self.range = Some(range);
    }

    /// Step the range down. Fails at one step.
    pub fn zoom_in(&mut self) -> bool {
        let range = self.range();
        if range <= self.step {
            return false;
        }
        self.range = Some(range - self.step);
        true
    }

    /// Step the range up. Fails at the maximum.
    ///
    /// A successful zoom fixes the range, so a later first batch no longer
    /// picks one.
    pub fn zoom_out(&mut self) -> bool {
        let range = self.range();
        if range >= self.max {
            return false;
        }
        self.range = Some(range + self.step);
        true
    }
}
