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

//! Screen-space anchors of everything drawn in the last render pass.

use crate::geodesy::ScreenPoint;

/// One rendered entity: where it was drawn and what it links to.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord {
    pub point: ScreenPoint,
    /// Navigation handle for the entity (a detail page URL).
    pub action: String,
    /// Human readable summary, shown on hover.
    pub text: String,
}

/// Hit-test records in render order. Later records sit on top.
#[derive(Debug, Clone, Default)]
pub struct HitRegistry {
    records: Vec<HitRecord>,
    tolerance: f64,
}

impl HitRegistry {
    /// `tolerance` is the per-axis pixel distance that still counts as a hit.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            records: Vec::new(),
            tolerance,
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn push(&mut self, record: HitRecord) {
        self.records.push(record);
    }

    /// Topmost record whose anchor lies within the tolerance box around `(x, y)`.
    #[must_use]
    pub fn resolve(&self, x: f64, y: f64) -> Option<&HitRecord> {
        self.records.iter().rev().find(|r| {
            (x - r.point.x).abs() <= self.tolerance && (y - r.point.y).abs() <= self.tolerance
        })
    }

    #[must_use]
    pub fn records(&self) -> &[HitRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: f64, y: f64, action: &str) -> HitRecord {
        HitRecord {
            point: ScreenPoint::new(x, y),
            action: action.to_string(),
            text: action.to_uppercase(),
        }
    }

    #[test]
    fn test_latest_record_wins() {
        let mut registry = HitRegistry::new(4.0);
        registry.push(record(100.0, 100.0, "first"));
        registry.push(record(100.0, 100.0, "second"));
        assert_eq!(registry.resolve(100.0, 100.0).unwrap().action, "second");
    }

    #[test]
    fn test_box_tolerance_is_per_axis() {
        let mut registry = HitRegistry::new(4.0);
        registry.push(record(100.0, 100.0, "a"));
        // Corner of the box is farther than 4px radially but still a hit
        assert!(registry.resolve(104.0, 96.0).is_some());
        assert!(registry.resolve(104.5, 100.0).is_none());
        assert!(registry.resolve(100.0, 95.9).is_none());
    }

    #[test]
    fn test_clear() {
        let mut registry = HitRegistry::new(4.0);
        registry.push(record(1.0, 1.0, "a"));
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.resolve(1.0, 1.0).is_none());
    }
}
