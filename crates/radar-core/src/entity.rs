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

//! Entities positioned around the radar site.
//!
//! Aircraft and airports arrive in the dump1090 / OurAirports shapes and keep
//! their domain fields as passthrough data. The engine only reads the derived
//! [`Polar`] position, the resolved [`Category`] and the squawk.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geodesy::GeoPoint;

/// Position relative to the site: bearing in degrees, distance in nautical miles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub bearing: f64,
    pub distance: f64,
}

/// Anything the engine can place on the scope.
pub trait Positioned {
    /// Geodetic position, if the record carries usable coordinates.
    fn position(&self) -> Option<GeoPoint>;

    /// Bearing/distance from the site, set by [`crate::ordering::assign`].
    fn polar(&self) -> Option<Polar>;

    fn set_polar(&mut self, polar: Polar);
}

/// ADS-B emitter category, resolved once when a record is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Light,
    Small,
    Large,
    High,
    Heavy,
    HighPerformance,
    Rotorcraft,
    #[default]
    Unknown,
}

impl Category {
    /// Resolve a category code such as `"A3"`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A1" => Self::Light,
            "A2" => Self::Small,
            "A3" => Self::Large,
            "A4" => Self::High,
            "A5" => Self::Heavy,
            "A6" => Self::HighPerformance,
            "A7" => Self::Rotorcraft,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::Light => Some("A1"),
            Self::Small => Some("A2"),
            Self::Large => Some("A3"),
            Self::High => Some("A4"),
            Self::Heavy => Some("A5"),
            Self::HighPerformance => Some("A6"),
            Self::Rotorcraft => Some("A7"),
            Self::Unknown => None,
        }
    }

    /// Human readable name, `None` for unknown codes.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Light => Some("Light"),
            Self::Small => Some("Small"),
            Self::Large => Some("Large"),
            Self::High => Some("High"),
            Self::Heavy => Some("Heavy"),
            Self::HighPerformance => Some("High Performance"),
            Self::Rotorcraft => Some("Rotorcraft"),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_rotary(self) -> bool {
        self == Self::Rotorcraft
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().unwrap_or_default().to_string()
    }
}

/// Reserved transponder codes that signal an abnormal situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquawkAlert {
    /// 7500
    Hijack,
    /// 7600
    RadioFailure,
    /// 7700
    Emergency,
}

impl SquawkAlert {
    #[must_use]
    pub fn from_squawk(squawk: &str) -> Option<Self> {
        match squawk.trim().parse::<u16>().ok()? {
            7500 => Some(Self::Hijack),
            7600 => Some(Self::RadioFailure),
            7700 => Some(Self::Emergency),
            _ => None,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Hijack => "Hijacked",
            Self::RadioFailure => "Radio Failure",
            Self::Emergency => "Emergency",
        }
    }
}

/// Accept JSON numbers and numeric strings; anything else (e.g. `"ground"`) is absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Squawks show up as strings or bare numbers depending on the decoder.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?
        .map(|code| Category::from_code(&code))
        .unwrap_or_default())
}

fn usable(lon: Option<f64>, lat: Option<f64>) -> Option<GeoPoint> {
    let point = GeoPoint::new(lon?, lat?);
    point.is_finite().then_some(point)
}

/// One aircraft as reported by the receiver (dump1090 `aircraft.json` layout).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// ICAO 24-bit address (hex string).
    #[serde(default)]
    pub hex: String,
    /// Callsign as transmitted, possibly padded with spaces.
    #[serde(default)]
    pub flight: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub squawk: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    /// Barometric altitude in feet.
    #[serde(default, alias = "alt_baro", deserialize_with = "lenient_number")]
    pub altitude: Option<f64>,
    /// Vertical rate in feet per minute.
    #[serde(default, alias = "baro_rate", deserialize_with = "lenient_number")]
    pub vert_rate: Option<f64>,
    /// Track over ground in degrees.
    #[serde(default, deserialize_with = "lenient_number")]
    pub track: Option<f64>,
    /// Ground speed in knots.
    #[serde(default, alias = "gs", deserialize_with = "lenient_number")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub messages: Option<f64>,
    /// Seconds since the last message, as of the batch time.
    #[serde(default, deserialize_with = "lenient_number")]
    pub seen: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rssi: Option<f64>,
    #[serde(skip)]
    pub polar: Option<Polar>,
}

impl Aircraft {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn at(mut self, lon: f64, lat: f64) -> Self {
        self.lon = Some(lon);
        self.lat = Some(lat);
        self
    }

    /// Trimmed callsign, `None` when blank.
    #[must_use]
    pub fn callsign(&self) -> Option<&str> {
        self.flight
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    #[must_use]
    pub fn squawk_alert(&self) -> Option<SquawkAlert> {
        self.squawk.as_deref().and_then(SquawkAlert::from_squawk)
    }
}

impl Positioned for Aircraft {
    fn position(&self) -> Option<GeoPoint> {
        usable(self.lon, self.lat)
    }

    fn polar(&self) -> Option<Polar> {
        self.polar
    }

    fn set_polar(&mut self, polar: Polar) {
        self.polar = Some(polar);
    }
}

/// An airport marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(default)]
    pub icao: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(skip)]
    pub polar: Option<Polar>,
}

impl Airport {
    #[must_use]
    pub fn new(icao: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            icao: icao.into(),
            lon: Some(lon),
            lat: Some(lat),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Positioned for Airport {
    fn position(&self) -> Option<GeoPoint> {
        usable(self.lon, self.lat)
    }

    fn polar(&self) -> Option<Polar> {
        self.polar
    }

    fn set_polar(&mut self, polar: Polar) {
        self.polar = Some(polar);
    }
}

/// A polyline vertex. Parsed from `[lon, lat]` or `{"lon":…, "lat":…}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Option<GeoPoint>,
    pub polar: Option<Polar>,
}

impl Vertex {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            position: usable(Some(lon), Some(lat)),
            polar: None,
        }
    }

    /// Read a vertex out of loosely typed JSON. Unreadable input yields a
    /// vertex without coordinates rather than an error.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let (lon, lat) = match value {
            serde_json::Value::Array(pair) if pair.len() == 2 => {
                (pair[0].as_f64(), pair[1].as_f64())
            }
            serde_json::Value::Object(map) => (
                map.get("lon").and_then(serde_json::Value::as_f64),
                map.get("lat").and_then(serde_json::Value::as_f64),
            ),
            _ => (None, None),
        };
        Self {
            position: usable(lon, lat),
            polar: None,
        }
    }
}

impl Positioned for Vertex {
    fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    fn polar(&self) -> Option<Polar> {
        self.polar
    }

    fn set_polar(&mut self, polar: Polar) {
        self.polar = Some(polar);
    }
}

/// Ordered vertices of a polyline. Vertex order is geometry and never sorted.
pub type Shape = Vec<Vertex>;
