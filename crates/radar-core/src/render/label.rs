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

//! Label placement and the hover summaries attached to hit-test records.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::entity::{Aircraft, Airport, Polar};
use crate::geodesy::ScreenPoint;
use crate::surface::TextAlign;

const AIRPORT_URL: &str = "https://flightaware.com/live/airport/";
const AIRCRAFT_URL: &str = "https://flightaware.com/live/modes/";

/// Where a label goes relative to its entity.
///
/// Points in the upper half get their label below them, points in the lower
/// half above, and labels near the left or right edge are aligned inward.
#[must_use]
pub fn label_anchor(
    point: ScreenPoint,
    surface: (f64, f64),
    offset_below: f64,
    offset_above: f64,
    band: f64,
) -> (ScreenPoint, TextAlign) {
    let (width, height) = surface;
    let dy = if point.y < height / 2.0 {
        offset_below
    } else {
        -offset_above
    };
    let align = if point.x < width * band {
        TextAlign::Left
    } else if point.x < width * (1.0 - band) {
        TextAlign::Center
    } else {
        TextAlign::Right
    };
    (ScreenPoint::new(point.x, point.y + dy), align)
}

/// Distance with two decimals under 10 NM, one otherwise, trailing zero fraction dropped.
#[must_use]
pub fn format_distance(nm: f64) -> String {
    let precision: usize = if nm < 10.0 { 2 } else { 1 };
    let text = format!("{nm:.precision$}");
    match text.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole.to_string(),
        _ => text,
    }
}

/// Round to an integer and group thousands with commas.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation, reason = "display only")]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_bearing(bearing: f64) -> String {
    if bearing.is_finite() {
        // + 0.0 folds a negative zero into 0
        format!("{}\u{b0}", bearing.round() % 360.0 + 0.0)
    } else {
        "-".to_string()
    }
}

fn polar_line(polar: Polar) -> String {
    format!(
        "Bearing: {}, Distance:{}NM",
        format_bearing(polar.bearing),
        format_distance(polar.distance)
    )
}

#[must_use]
pub fn airport_action(airport: &Airport) -> String {
    format!("{AIRPORT_URL}{}", airport.icao)
}

#[must_use]
pub fn aircraft_action(aircraft: &Aircraft) -> String {
    format!("{AIRCRAFT_URL}{}/redirect", aircraft.hex)
}

#[must_use]
pub fn airport_summary(airport: &Airport, polar: Polar) -> String {
    let mut text = String::new();
    if let Some(name) = airport.name.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(name);
        text.push_str(" - ");
    }
    text.push_str(&airport.icao);
    text.push('\n');
    text.push_str(&polar_line(polar));
    text
}

/// Multi-line summary of an aircraft. `as_of` is when the batch was captured;
/// the "ago" figure adds the time elapsed since then to the reported `seen`.
#[must_use]
pub fn aircraft_summary(
    aircraft: &Aircraft,
    polar: Polar,
    as_of: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    let mut text = match aircraft.callsign() {
        Some(flight) => format!("{flight} [{}]", aircraft.hex),
        None => aircraft.hex.clone(),
    };

    // write! into a String cannot fail
    if let Some(squawk) = aircraft.squawk.as_deref() {
        let _ = write!(text, ", Squawk: {squawk}");
        if let Some(alert) = aircraft.squawk_alert() {
            let _ = write!(text, "\n* {}", alert.description());
        }
    }
    if let Some(name) = aircraft.category.name() {
        let _ = write!(text, "\nCategory: {name}");
    }
    if let (Some(lon), Some(lat)) = (aircraft.lon, aircraft.lat) {
        let _ = write!(text, "\n{lon:.5}\u{b0}, {lat:.5}\u{b0}");
    }
    if let Some(altitude) = aircraft.altitude {
        let _ = write!(text, ", {}ft", group_thousands(altitude));
        match aircraft.vert_rate {
            Some(rate) if rate < 0.0 => text.push('\u{25be}'),
            Some(rate) if rate > 0.0 => text.push('\u{25b4}'),
            _ => {}
        }
    }
    if let Some(track) = aircraft.track {
        let _ = write!(text, "\nTrack: {}", format_bearing(track));
    }
    if let Some(speed) = aircraft.speed {
        let sep = if aircraft.track.is_some() { ", " } else { "\n" };
        let _ = write!(text, "{sep}Speed: {}Kts", group_thousands(speed));
    }
    text.push('\n');
    text.push_str(&polar_line(polar));
    if let Some(messages) = aircraft.messages {
        let _ = write!(text, "\nMessages: {}", group_thousands(messages));
    }
    if let Some(seen) = aircraft.seen {
        #[allow(clippy::cast_precision_loss, reason = "millisecond deltas are small")]
        let elapsed = (now - as_of).num_milliseconds() as f64 / 1000.0;
        let sep = if aircraft.messages.is_some() { ", " } else { "\n" };
        let _ = write!(text, "{sep}Ago: {}s", group_thousands(seen + elapsed));
    }
    if let Some(rssi) = aircraft.rssi {
        let _ = write!(text, "\nRSSI: {rssi}dBm");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Category;
    use chrono::Duration;

    const SIZE: (f64, f64) = (500.0, 500.0);

    #[test]
    fn test_label_flips_at_midline() {
        let (above_mid, _) = label_anchor(ScreenPoint::new(250.0, 100.0), SIZE, 14.0, 6.0, 0.1);
        let (below_mid, _) = label_anchor(ScreenPoint::new(250.0, 400.0), SIZE, 14.0, 6.0, 0.1);
        assert!((above_mid.y - 114.0).abs() < f64::EPSILON);
        assert!((below_mid.y - 394.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_label_alignment_bands() {
        let align = |x| label_anchor(ScreenPoint::new(x, 100.0), SIZE, 14.0, 6.0, 0.1).1;
        assert_eq!(align(20.0), TextAlign::Left);
        assert_eq!(align(50.0), TextAlign::Center);
        assert_eq!(align(449.0), TextAlign::Center);
        assert_eq!(align(450.0), TextAlign::Right);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(5.0), "5");
        assert_eq!(format_distance(5.5), "5.50");
        assert_eq!(format_distance(192.708), "192.7");
        assert_eq!(format_distance(12.02), "12");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(35_000.0), "35,000");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
        assert_eq!(group_thousands(-1500.0), "-1,500");
    }

    #[test]
    fn test_airport_summary() {
        let airport = Airport::new("VIDP", 77.1003, 28.5562).with_name("Indira Gandhi International");
        let polar = Polar {
            bearing: 5.51,
            distance: 308.06,
        };
        assert_eq!(
            airport_summary(&airport, polar),
            "Indira Gandhi International - VIDP\nBearing: 6\u{b0}, Distance:308.1NM"
        );
        assert_eq!(airport_action(&airport), "https://flightaware.com/live/airport/VIDP");
    }

    #[test]
    fn test_aircraft_summary() {
        let mut aircraft = Aircraft::new("800c1b").at(78.9012, 21.0987);
        aircraft.flight = Some("AIC101 ".to_string());
        aircraft.squawk = Some("7500".to_string());
        aircraft.category = Category::Heavy;
        aircraft.altitude = Some(35_000.0);
        aircraft.vert_rate = Some(-64.0);
        aircraft.track = Some(123.0);
        aircraft.speed = Some(452.0);
        aircraft.messages = Some(1234.0);
        aircraft.seen = Some(1.0);
        aircraft.rssi = Some(-12.5);
        let polar = Polar {
            bearing: 136.65,
            distance: 192.71,
        };
        let as_of = Utc::now();
        let now = as_of + Duration::seconds(2);

        let text = aircraft_summary(&aircraft, polar, as_of, now);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "AIC101 [800c1b], Squawk: 7500",
                "* Hijacked",
                "Category: Heavy",
                "78.90120\u{b0}, 21.09870\u{b0}, 35,000ft\u{25be}",
                "Track: 123\u{b0}, Speed: 452Kts",
                "Bearing: 137\u{b0}, Distance:192.7NM",
                "Messages: 1,234, Ago: 3s",
                "RSSI: -12.5dBm",
            ]
        );
        assert_eq!(
            aircraft_action(&aircraft),
            "https://flightaware.com/live/modes/800c1b/redirect"
        );
    }

    #[test]
    fn test_minimal_aircraft_summary() {
        let aircraft = Aircraft::new("abc123");
        let polar = Polar {
            bearing: f64::NAN,
            distance: 0.0,
        };
        let now = Utc::now();
        assert_eq!(
            aircraft_summary(&aircraft, polar, now, now),
            "abc123\nBearing: -, Distance:0NM"
        );
    }
}
