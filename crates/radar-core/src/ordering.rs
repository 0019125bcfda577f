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

//! Bearing/distance assignment, paint-order sorting and range eligibility.
//!
//! Paint order is draw order: the first entity is drawn underneath everything
//! after it. Sorting puts entities without a position first, then farthest to
//! nearest, so that close traffic occludes distant traffic and wins hit tests.

use std::cmp::Ordering;

use log::debug;

use crate::entity::{Polar, Positioned};
use crate::geodesy::{bearing_distance, metres_to_nm, GeoPoint};

/// Attach bearing/distance relative to `site` to every entity with usable
/// coordinates and, unless `preserve_order`, sort for painting.
///
/// Entities without coordinates pass through untouched.
#[must_use]
pub fn assign<T: Positioned>(site: GeoPoint, mut entities: Vec<T>, preserve_order: bool) -> Vec<T> {
    let mut skipped = 0usize;
    for entity in &mut entities {
        match entity.position() {
            Some(position) => {
                let bd = bearing_distance(site, position);
                entity.set_polar(Polar {
                    bearing: bd.bearing,
                    distance: metres_to_nm(bd.distance),
                });
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("{} of {} entities have no usable position", skipped, entities.len());
    }

    if !preserve_order {
        entities.sort_by(|a, b| paint_order(a.polar(), b.polar()));
    }
    entities
}

/// Comparator for paint order: no distance first, then descending distance.
#[must_use]
pub fn paint_order(a: Option<Polar>, b: Option<Polar>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.distance.total_cmp(&a.distance),
    }
}

/// Aircraft and airports are drawn only strictly inside the range.
#[must_use]
pub fn in_range(polar: Option<Polar>, range: f64) -> bool {
    polar.is_some_and(|p| p.distance < range)
}

/// A shape segment is drawn when either end lies on or inside the range, so
/// lines crossing the outer ring still reach it.
#[must_use]
pub fn segment_in_range(a: Option<Polar>, b: Option<Polar>, range: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.distance.min(b.distance) <= range,
        _ => false,
    }
}
