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

//! Styling and sizing constants for the radar display.
//!
//! [`RadarStyle`] is an immutable value handed to the view at construction.
//! Every colour, glyph size and interaction tolerance is a named field, so
//! instances can be themed independently and loaded from a config file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque RGB colour, serialised as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    pub const GREEN: Self = Self(0x00, 0xff, 0x00);
    pub const RED: Self = Self(0xff, 0x00, 0x00);
    pub const YELLOW: Self = Self(0xff, 0xff, 0x00);
    pub const ORANGE_RED: Self = Self(0xff, 0x45, 0x00);
    pub const DARK_GREEN: Self = Self(0x00, 0xaa, 0x00);
    pub const DIM_GREEN: Self = Self(0x00, 0x77, 0x00);
    pub const GREY: Self = Self(0x44, 0x44, 0x44);

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(format!("invalid colour '{hex}'"));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(format!("invalid colour '{hex}'")),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|e| format!("invalid colour '{hex}': {e}"))
        };
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Display constants. `Default` gives the classic green-on-black scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarStyle {
    pub color_background: Rgb,
    pub color_aircraft: Rgb,
    /// Squawk 7500.
    pub color_aircraft_hijack: Rgb,
    /// Squawk 7600.
    pub color_aircraft_radio_failure: Rgb,
    /// Squawk 7700.
    pub color_aircraft_emergency: Rgb,
    pub color_airport: Rgb,
    pub color_graticule: Rgb,
    pub color_shape: Rgb,

    /// Aircraft glyph length along the track, in pixels.
    pub length_aircraft_axial: f64,
    /// Aircraft glyph wingspan, in pixels.
    pub length_aircraft_lateral: f64,
    pub width_aircraft: f64,
    /// Glyph multiplier for light and small aircraft.
    pub scale_aircraft_small: f64,
    /// Glyph multiplier for large aircraft.
    pub scale_aircraft_large: f64,

    pub width_lines: f64,
    /// Graticule dash and gap length.
    pub dash_graticule: f64,
    /// Rings at multiples of this many NM are drawn solid.
    pub solid_ring_interval: u32,

    pub size_airport: f64,
    /// Outline width drawn in the background colour around glyphs and text.
    pub size_stroke: f64,
    pub size_text: f64,
    /// Per-axis hit-test tolerance in pixels.
    pub size_hover: f64,

    /// Fraction of the width at each edge where aircraft labels stop centring.
    pub label_band_aircraft: f64,
    /// Same as `label_band_aircraft`, for airport labels.
    pub label_band_airport: f64,

    /// Pinch dead zone in pixels.
    pub min_pinch_delta: f64,
    /// Ring spacing and zoom increment in NM.
    pub step_range: u32,
    pub max_range: u32,
}

impl Default for RadarStyle {
    fn default() -> Self {
        Self {
            color_background: Rgb::BLACK,
            color_aircraft: Rgb::GREEN,
            color_aircraft_hijack: Rgb::RED,
            color_aircraft_radio_failure: Rgb::YELLOW,
            color_aircraft_emergency: Rgb::ORANGE_RED,
            color_airport: Rgb::DARK_GREEN,
            color_graticule: Rgb::DIM_GREEN,
            color_shape: Rgb::GREY,
            length_aircraft_axial: 8.0,
            length_aircraft_lateral: 6.0,
            width_aircraft: 2.0,
            scale_aircraft_small: 0.75,
            scale_aircraft_large: 1.25,
            width_lines: 1.0,
            dash_graticule: 4.0,
            solid_ring_interval: 100,
            size_airport: 2.0,
            size_stroke: 2.0,
            size_text: 10.0,
            size_hover: 4.0,
            label_band_aircraft: 0.1,
            label_band_airport: 0.05,
            min_pinch_delta: 3.0,
            step_range: 50,
            max_range: 300,
        }
    }
}
