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

//! Geodesic bearing/distance and the flat screen projection used by the display.
//!
//! Bearings are degrees clockwise from true north. Geodesic distances come back
//! in metres on a spherical earth; entity code converts them to nautical miles
//! with [`metres_to_nm`].

use std::f64::consts::PI;

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.77;

/// Nautical miles per kilometre.
pub const NM_PER_KM: f64 = 0.539_956_803_5;

/// A geodetic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Both components are usable numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// Pixel position on the drawing surface, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean pixel distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Result of [`bearing_distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingDistance {
    /// Initial course in degrees, `[0, 360)`, NaN when the points coincide.
    pub bearing: f64,
    /// Great-circle distance in metres.
    pub distance: f64,
}

/// Degrees to radians, evaluated as `deg * PI / 180`.
#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Radians to degrees, evaluated as `rad * 180 / PI`.
#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Convert metres to nautical miles.
#[must_use]
pub fn metres_to_nm(metres: f64) -> f64 {
    metres / 1000.0 * NM_PER_KM
}

/// Initial bearing and haversine distance from `start` to `end`.
#[must_use]
pub fn bearing_distance(start: GeoPoint, end: GeoPoint) -> BearingDistance {
    let phi1 = to_radians(start.lat);
    let phi2 = to_radians(end.lat);
    let delta_phi = to_radians(end.lat - start.lat);
    let delta_lambda = to_radians(end.lon - start.lon);

    let mut bearing = to_degrees((delta_lambda.sin() * phi2.cos()).atan2(
        phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos(),
    ));

    let half_phi = (delta_phi / 2.0).sin();
    let half_lambda = (delta_lambda / 2.0).sin();
    let a = half_phi * half_phi + phi1.cos() * phi2.cos() * half_lambda * half_lambda;
    let distance = EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    while bearing < 0.0 {
        bearing += 360.0;
    }

    BearingDistance {
        bearing: if distance > 0.0 { bearing % 360.0 } else { f64::NAN },
        distance,
    }
}

/// Point `distance` pixels from `origin` along `bearing`, with 0° up and 90° right.
///
/// Flat local projection; only meaningful for on-screen distances.
#[must_use]
pub fn point_at_bearing_distance(origin: ScreenPoint, bearing: f64, distance: f64) -> ScreenPoint {
    let theta = to_radians(bearing);
    ScreenPoint {
        x: origin.x + theta.sin() * distance,
        y: origin.y - theta.cos() * distance,
    }
}

/// Inverse of [`point_at_bearing_distance`]: bearing in `[0, 360)` and pixel
/// distance of `point` as seen from `origin`.
#[must_use]
pub fn bearing_distance_of_point(origin: ScreenPoint, point: ScreenPoint) -> (f64, f64) {
    let dx = point.x - origin.x;
    let dy = origin.y - point.y;
    let mut bearing = to_degrees(dx.atan2(dy));
    if bearing < 0.0 {
        bearing += 360.0;
    }
    (bearing % 360.0, dx.hypot(dy))
}
