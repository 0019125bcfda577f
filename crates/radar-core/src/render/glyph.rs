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

//! Aircraft glyph geometry.

use crate::entity::{Aircraft, Category, SquawkAlert};
use crate::geodesy::{point_at_bearing_distance, ScreenPoint};
use crate::style::{RadarStyle, Rgb};
use crate::surface::{DrawingSurface, LineCap, Stroke};

/// Shape of a single aircraft on the scope, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// No track known.
    Dot { center: ScreenPoint, radius: f64 },
    /// Fuselage along the track with a wing bar across the tail end.
    FixedWing {
        axial: [ScreenPoint; 2],
        lateral: [ScreenPoint; 2],
        width: f64,
    },
    /// Fuselage along the track with a rotor disc behind the centre.
    Rotary {
        axial: [ScreenPoint; 2],
        rotor: ScreenPoint,
        rotor_radius: f64,
        width: f64,
    },
}

/// Size multiplier for a category tier.
#[must_use]
pub fn category_scale(category: Category, style: &RadarStyle) -> f64 {
    match category {
        Category::Light | Category::Small => style.scale_aircraft_small,
        Category::Large => style.scale_aircraft_large,
        _ => 1.0,
    }
}

#[must_use]
pub fn aircraft_color(aircraft: &Aircraft, style: &RadarStyle) -> Rgb {
    match aircraft.squawk_alert() {
        Some(SquawkAlert::Hijack) => style.color_aircraft_hijack,
        Some(SquawkAlert::RadioFailure) => style.color_aircraft_radio_failure,
        Some(SquawkAlert::Emergency) => style.color_aircraft_emergency,
        None => style.color_aircraft,
    }
}

/// Build the glyph for an aircraft drawn at `center`.
#[must_use]
pub fn aircraft_glyph(
    center: ScreenPoint,
    track: Option<f64>,
    category: Category,
    style: &RadarStyle,
) -> Glyph {
    let scale = category_scale(category, style);
    let axial_len = style.length_aircraft_axial * scale;
    let lateral_len = style.length_aircraft_lateral * scale;
    let width = style.width_aircraft * scale;

    let Some(track) = track.filter(|t| t.is_finite()) else {
        return Glyph::Dot {
            center,
            radius: width,
        };
    };

    let nose = point_at_bearing_distance(center, track, axial_len / 2.0);
    let tail = point_at_bearing_distance(center, track + 180.0, axial_len / 2.0);

    if category.is_rotary() {
        Glyph::Rotary {
            axial: [nose, tail],
            rotor: point_at_bearing_distance(center, track + 180.0, axial_len - lateral_len),
            rotor_radius: lateral_len / 2.0,
            width,
        }
    } else {
        Glyph::FixedWing {
            axial: [nose, tail],
            lateral: [
                point_at_bearing_distance(tail, track + 90.0, lateral_len / 2.0),
                point_at_bearing_distance(tail, track + 270.0, lateral_len / 2.0),
            ],
            width,
        }
    }
}

/// Paint a glyph twice: a background-coloured outline, then the glyph itself.
pub fn draw_glyph<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    glyph: &Glyph,
    color: Rgb,
    style: &RadarStyle,
) {
    let passes = [
        (style.color_background, style.size_stroke, LineCap::Square),
        (color, 0.0, LineCap::Butt),
    ];
    for (pass_color, extra, cap) in passes {
        match *glyph {
            Glyph::Dot { center, radius } => {
                surface.fill_circle(center, radius + extra, pass_color);
            }
            Glyph::FixedWing {
                axial,
                lateral,
                width,
            } => {
                let stroke = Stroke::new(pass_color, width + extra).with_cap(cap);
                surface.stroke_path(&[axial], stroke);
                surface.stroke_path(&[lateral], stroke);
            }
            Glyph::Rotary {
                axial,
                rotor,
                rotor_radius,
                width,
            } => {
                surface.stroke_path(&[axial], Stroke::new(pass_color, width + extra).with_cap(cap));
                surface.fill_circle(rotor, rotor_radius + extra, pass_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: ScreenPoint = ScreenPoint::new(100.0, 100.0);

    fn close(a: ScreenPoint, x: f64, y: f64) -> bool {
        (a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9
    }

    #[test]
    fn test_no_track_draws_dot() {
        let style = RadarStyle::default();
        let glyph = aircraft_glyph(CENTER, None, Category::Large, &style);
        assert_eq!(
            glyph,
            Glyph::Dot {
                center: CENTER,
                radius: 2.5
            }
        );
    }

    #[test]
    fn test_fixed_wing_heading_north() {
        let style = RadarStyle::default();
        let Glyph::FixedWing {
            axial,
            lateral,
            width,
        } = aircraft_glyph(CENTER, Some(0.0), Category::Heavy, &style)
        else {
            panic!("expected fixed wing glyph");
        };
        assert!(close(axial[0], 100.0, 96.0));
        assert!(close(axial[1], 100.0, 104.0));
        assert!(close(lateral[0], 103.0, 104.0));
        assert!(close(lateral[1], 97.0, 104.0));
        assert!((width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_small_aircraft_are_scaled_down() {
        let style = RadarStyle::default();
        let Glyph::FixedWing { axial, width, .. } =
            aircraft_glyph(CENTER, Some(90.0), Category::Light, &style)
        else {
            panic!("expected fixed wing glyph");
        };
        assert!((axial[0].distance_to(axial[1]) - 6.0).abs() < 1e-9);
        assert!((width - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotorcraft_glyph() {
        let style = RadarStyle::default();
        let Glyph::Rotary {
            rotor, rotor_radius, ..
        } = aircraft_glyph(CENTER, Some(0.0), Category::Rotorcraft, &style)
        else {
            panic!("expected rotary glyph");
        };
        // Rotor sits axial - lateral = 2px behind the centre
        assert!(close(rotor, 100.0, 102.0));
        assert!((rotor_radius - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_emergency_colors() {
        let style = RadarStyle::default();
        let mut aircraft = Aircraft::new("abc123");
        assert_eq!(aircraft_color(&aircraft, &style), style.color_aircraft);
        aircraft.squawk = Some("7600".to_string());
        assert_eq!(aircraft_color(&aircraft, &style), style.color_aircraft_radio_failure);
        aircraft.squawk = Some("7700".to_string());
        assert_eq!(aircraft_color(&aircraft, &style), style.color_aircraft_emergency);
        aircraft.squawk = Some("7500".to_string());
        assert_eq!(aircraft_color(&aircraft, &style), style.color_aircraft_hijack);
    }
}
