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

//! Two-finger pinch recognition over raw pointer contacts.
//!
//! The recognizer is an explicit state object: feed it pointer lifecycle
//! events from whatever event source the host has, and it answers with a zoom
//! intent when the distance between two active contacts changes by more than
//! the threshold since the previous move. The baseline rolls forward on every
//! evaluated move, so a slow continuous pinch yields a series of single steps.

use log::debug;

use crate::geodesy::ScreenPoint;

/// Identifier of a pointer or touch contact as reported by the event source.
pub type PointerId = u64;

/// What a pinch asks the range state machine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomIntent {
    /// Fingers spreading.
    In,
    /// Fingers closing.
    Out,
}

#[derive(Debug, Clone, Default)]
pub struct PinchRecognizer {
    contacts: Vec<(PointerId, ScreenPoint)>,
    baseline: Option<f64>,
    threshold: f64,
}

impl PinchRecognizer {
    /// `threshold` is the dead zone in pixels around the baseline.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            contacts: Vec::new(),
            baseline: None,
            threshold,
        }
    }

    /// A contact went down (or an existing one was re-reported).
    pub fn pointer_down(&mut self, id: PointerId, position: ScreenPoint) {
        match self.contacts.iter_mut().find(|(cid, _)| *cid == id) {
            Some(contact) => contact.1 = position,
            None => self.contacts.push((id, position)),
        }
        self.settle();
    }

    /// A contact moved. Returns a zoom intent when two contacts are active and
    /// their separation left the dead zone around the baseline.
    pub fn pointer_move(&mut self, id: PointerId, position: ScreenPoint) -> Option<ZoomIntent> {
        if let Some(contact) = self.contacts.iter_mut().find(|(cid, _)| *cid == id) {
            contact.1 = position;
        }
        let [(_, a), (_, b)] = self.contacts.as_slice() else {
            return None;
        };
        let separation = a.distance_to(*b);

        let intent = match self.baseline.filter(|b| *b > 0.0) {
            Some(baseline) if separation > baseline + self.threshold => Some(ZoomIntent::In),
            Some(baseline) if separation < baseline - self.threshold => Some(ZoomIntent::Out),
            _ => None,
        };
        self.baseline = Some(separation);

        if let Some(intent) = intent {
            debug!("Pinch {:?} at separation {:.1}px", intent, separation);
        }
        intent
    }

    /// A contact lifted, was cancelled, or left the surface.
    pub fn pointer_up(&mut self, id: PointerId) {
        self.contacts.retain(|(cid, _)| *cid != id);
        self.settle();
    }

    fn settle(&mut self) {
        if self.contacts.len() != 2 {
            self.baseline = None;
        }
    }

    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Separation recorded at the last evaluated move, if any.
    #[must_use]
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }
}
