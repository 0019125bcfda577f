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

//! Render composition: one full pass over the scene onto a [`DrawingSurface`].
//!
//! Layers, bottom to top: background, shapes, the mask outside the outer ring,
//! graticule, airports, aircraft. Airports and aircraft are visited in their
//! stored (paint) order and each one drawn also gets a hit-test record.

pub mod glyph;
pub mod label;

use chrono::{DateTime, Utc};

use crate::entity::{Aircraft, Airport, Polar, Shape};
use crate::geodesy::{point_at_bearing_distance, ScreenPoint};
use crate::hit_test::{HitRecord, HitRegistry};
use crate::ordering::{in_range, segment_in_range};
use crate::style::RadarStyle;
use crate::surface::{DrawingSurface, Stroke, TextStyle};

use glyph::{aircraft_color, aircraft_glyph, draw_glyph};
use label::{aircraft_action, aircraft_summary, airport_action, airport_summary, label_anchor};

/// Everything a render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub aircraft: &'a [Aircraft],
    pub airports: &'a [Airport],
    pub shapes: &'a [Shape],
    /// Display range in NM.
    pub range: u32,
    /// When the aircraft batch was captured.
    pub as_of: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Surface geometry shared by every layer of a pass.
#[derive(Debug, Clone, Copy)]
struct Frame {
    size: (f64, f64),
    mid: ScreenPoint,
    /// Radius of the outer ring in pixels.
    radius: f64,
    /// Pixels per NM.
    scale: f64,
    range: f64,
}

impl Frame {
    fn new(size: (f64, f64), range: u32) -> Self {
        let (width, height) = size;
        let radius = width.min(height) / 2.0;
        let range = f64::from(range.max(1));
        Self {
            size,
            mid: ScreenPoint::new(width / 2.0, height / 2.0),
            radius,
            scale: radius / range,
            range,
        }
    }

    fn project(&self, polar: Polar) -> ScreenPoint {
        // Bearing is undefined at the site itself
        if polar.distance == 0.0 {
            return self.mid;
        }
        point_at_bearing_distance(self.mid, polar.bearing, polar.distance * self.scale)
    }
}

/// Run one render pass. `hits` is cleared and refilled in paint order.
pub fn compose<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
    style: &RadarStyle,
    hits: &mut HitRegistry,
) {
    hits.clear();
    surface.clear();
    let frame = Frame::new(surface.size(), scene.range);
    let (width, height) = frame.size;

    surface.fill_rect(
        ScreenPoint::new(0.0, 0.0),
        ScreenPoint::new(width, height),
        style.color_background,
    );

    draw_shapes(surface, scene.shapes, &frame, style);
    surface.fill_outside_circle(frame.mid, frame.radius, style.color_background);
    draw_graticule(surface, scene.range, &frame, style);
    draw_airports(surface, scene.airports, &frame, style, hits);
    draw_aircraft(surface, scene, &frame, style, hits);
}

fn draw_shapes<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    shapes: &[Shape],
    frame: &Frame,
    style: &RadarStyle,
) {
    let stroke = Stroke::new(style.color_shape, style.width_lines);
    for shape in shapes {
        let segments: Vec<[ScreenPoint; 2]> = shape
            .windows(2)
            .filter_map(|pair| match (pair[0].polar, pair[1].polar) {
                (Some(a), Some(b)) if segment_in_range(Some(a), Some(b), frame.range) => {
                    Some([frame.project(a), frame.project(b)])
                }
                _ => None,
            })
            .collect();
        if !segments.is_empty() {
            surface.stroke_path(&segments, stroke);
        }
    }
}

fn draw_graticule<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    range: u32,
    frame: &Frame,
    style: &RadarStyle,
) {
    let dashed = Stroke::new(style.color_graticule, style.width_lines)
        .dashed(style.dash_graticule, style.dash_graticule);

    let diameters: Vec<[ScreenPoint; 2]> = [0.0, 45.0, 90.0, 135.0]
        .into_iter()
        .map(|bearing| {
            [
                point_at_bearing_distance(frame.mid, bearing, frame.radius),
                point_at_bearing_distance(frame.mid, bearing + 180.0, frame.radius),
            ]
        })
        .collect();
    surface.stroke_path(&diameters, dashed);

    let solid = Stroke::new(style.color_graticule, style.width_lines);
    let step = style.step_range.max(1);
    let mut ring = step;
    while ring <= range {
        let stroke = if ring.checked_rem(style.solid_ring_interval) == Some(0) {
            solid
        } else {
            dashed
        };
        surface.stroke_circle(frame.mid, f64::from(ring) * frame.scale, stroke);
        ring += step;
    }
}

fn draw_airports<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    airports: &[Airport],
    frame: &Frame,
    style: &RadarStyle,
    hits: &mut HitRegistry,
) {
    let text_style = TextStyle {
        size: style.size_text,
        fill: style.color_airport,
        outline: style.color_background,
        outline_width: style.size_stroke,
    };
    for airport in airports {
        let Some(polar) = airport.polar.filter(|p| in_range(Some(*p), frame.range)) else {
            continue;
        };
        let point = frame.project(polar);
        hits.push(HitRecord {
            point,
            action: airport_action(airport),
            text: airport_summary(airport, polar),
        });

        surface.fill_circle(point, style.size_airport + style.size_stroke, style.color_background);
        surface.fill_circle(point, style.size_airport, style.color_airport);

        let (anchor, align) = label_anchor(
            point,
            frame.size,
            style.size_text + 2.0,
            4.0,
            style.label_band_airport,
        );
        surface.text(anchor, align, &airport.icao, text_style);
    }
}

fn draw_aircraft<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
    frame: &Frame,
    style: &RadarStyle,
    hits: &mut HitRegistry,
) {
    for aircraft in scene.aircraft {
        let Some(polar) = aircraft.polar.filter(|p| in_range(Some(*p), frame.range)) else {
            continue;
        };
        let point = frame.project(polar);
        let color = aircraft_color(aircraft, style);
        hits.push(HitRecord {
            point,
            action: aircraft_action(aircraft),
            text: aircraft_summary(aircraft, polar, scene.as_of, scene.now),
        });

        let glyph = aircraft_glyph(point, aircraft.track, aircraft.category, style);
        draw_glyph(surface, &glyph, color, style);

        if let Some(flight) = aircraft.callsign() {
            let (anchor, align) = label_anchor(
                point,
                frame.size,
                style.size_text + 4.0,
                6.0,
                style.label_band_aircraft,
            );
            let text_style = TextStyle {
                size: style.size_text,
                fill: color,
                outline: style.color_background,
                outline_width: style.size_stroke,
            };
            surface.text(anchor, align, flight, text_style);
        }
    }
}
