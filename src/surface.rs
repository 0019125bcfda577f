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

//! egui backend for the radar's drawing surface.
//!
//! The view draws only when its data or range changes, while egui repaints
//! every frame. [`EguiSurface`] therefore records each pass as a display list
//! and replays it onto a [`egui::Painter`] on every frame.

use std::f64::consts::TAU;

use eframe::egui;
use radar_core::{DrawingSurface, LineCap, Rgb, ScreenPoint, Stroke, TextAlign, TextStyle};

/// Segments used to approximate dashed circles and the blanking ring.
const CIRCLE_SEGMENTS: usize = 180;

#[derive(Debug, Clone, PartialEq)]
enum PaintCommand {
    Rect { min: ScreenPoint, max: ScreenPoint, color: Rgb },
    Disc { center: ScreenPoint, radius: f64, color: Rgb },
    Ring { center: ScreenPoint, radius: f64, stroke: Stroke },
    Path { segments: Vec<[ScreenPoint; 2]>, stroke: Stroke },
    Outside { center: ScreenPoint, radius: f64, color: Rgb },
    Text { anchor: ScreenPoint, align: TextAlign, text: String, style: TextStyle },
}

/// A retained drawing surface sized to the radar canvas.
#[derive(Debug, Default)]
pub struct EguiSurface {
    width: f64,
    height: f64,
    commands: Vec<PaintCommand>,
}

impl EguiSurface {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            commands: Vec::new(),
        }
    }

    /// Track the canvas size. Returns true when it changed and a redraw is due.
    pub fn resize(&mut self, size: egui::Vec2) -> bool {
        let (width, height) = (f64::from(size.x), f64::from(size.y));
        if (width - self.width).abs() < 0.5 && (height - self.height).abs() < 0.5 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Replay the last pass with the surface origin at `rect.min`.
    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        let painter = painter.with_clip_rect(rect);
        let at = |p: ScreenPoint| to_pos(rect.min, p);

        for command in &self.commands {
            match command {
                PaintCommand::Rect { min, max, color } => {
                    painter.rect_filled(egui::Rect::from_min_max(at(*min), at(*max)), 0.0, to_color(*color));
                }
                PaintCommand::Disc { center, radius, color } => {
                    painter.circle_filled(at(*center), to_f32(*radius), to_color(*color));
                }
                PaintCommand::Ring { center, radius, stroke } => match stroke.dash {
                    Some((dash, gap)) => {
                        let points: Vec<egui::Pos2> =
                            circle_points(*center, *radius, CIRCLE_SEGMENTS).into_iter().map(at).collect();
                        painter.extend(egui::Shape::dashed_line(&points, to_stroke(*stroke), to_f32(dash), to_f32(gap)));
                    }
                    None => {
                        painter.circle_stroke(at(*center), to_f32(*radius), to_stroke(*stroke));
                    }
                },
                PaintCommand::Path { segments, stroke } => {
                    for segment in segments {
                        let [from, to] = capped(*segment, *stroke);
                        match stroke.dash {
                            Some((dash, gap)) => painter.extend(egui::Shape::dashed_line(
                                &[at(from), at(to)],
                                to_stroke(*stroke),
                                to_f32(dash),
                                to_f32(gap),
                            )),
                            None => {
                                painter.line_segment([at(from), at(to)], to_stroke(*stroke));
                            }
                        }
                    }
                }
                PaintCommand::Outside { center, radius, color } => {
                    let outer = self.width.hypot(self.height);
                    painter.add(egui::Shape::mesh(annulus(rect.min, *center, *radius, outer, to_color(*color))));
                }
                PaintCommand::Text { anchor, align, text, style } => {
                    let font = egui::FontId::monospace(to_f32(style.size));
                    let align = match align {
                        TextAlign::Left => egui::Align2::LEFT_BOTTOM,
                        TextAlign::Center => egui::Align2::CENTER_BOTTOM,
                        TextAlign::Right => egui::Align2::RIGHT_BOTTOM,
                    };
                    let pos = at(*anchor);
                    if style.outline_width > 0.0 {
                        let w = to_f32(style.outline_width);
                        for (dx, dy) in [(-w, -w), (0.0, -w), (w, -w), (-w, 0.0), (w, 0.0), (-w, w), (0.0, w), (w, w)] {
                            painter.text(pos + egui::vec2(dx, dy), align, text, font.clone(), to_color(style.outline));
                        }
                    }
                    painter.text(pos, align, text, font, to_color(style.fill));
                }
            }
        }
    }
}

impl DrawingSurface for EguiSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn is_supported(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, min: ScreenPoint, max: ScreenPoint, color: Rgb) {
        self.commands.push(PaintCommand::Rect { min, max, color });
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb) {
        self.commands.push(PaintCommand::Disc { center, radius, color });
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f64, stroke: Stroke) {
        self.commands.push(PaintCommand::Ring { center, radius, stroke });
    }

    fn stroke_path(&mut self, segments: &[[ScreenPoint; 2]], stroke: Stroke) {
        if !segments.is_empty() {
            self.commands.push(PaintCommand::Path {
                segments: segments.to_vec(),
                stroke,
            });
        }
    }

    fn fill_outside_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb) {
        self.commands.push(PaintCommand::Outside { center, radius, color });
    }

    fn text(&mut self, anchor: ScreenPoint, align: TextAlign, text: &str, style: TextStyle) {
        self.commands.push(PaintCommand::Text {
            anchor,
            align,
            text: text.to_owned(),
            style,
        });
    }
}

#[allow(clippy::cast_possible_truncation, reason = "screen coordinates fit in f32")]
fn to_f32(value: f64) -> f32 {
    value as f32
}

fn to_pos(origin: egui::Pos2, point: ScreenPoint) -> egui::Pos2 {
    origin + egui::vec2(to_f32(point.x), to_f32(point.y))
}

fn to_color(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}

fn to_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(to_f32(stroke.width), to_color(stroke.color))
}

/// Extend a segment by half the stroke width at both ends for square caps.
fn capped(segment: [ScreenPoint; 2], stroke: Stroke) -> [ScreenPoint; 2] {
    let [from, to] = segment;
    let length = from.distance_to(to);
    if stroke.cap != LineCap::Square || length == 0.0 {
        return segment;
    }
    let half = stroke.width / 2.0;
    let (ux, uy) = ((to.x - from.x) / length, (to.y - from.y) / length);
    [
        ScreenPoint::new(from.x - ux * half, from.y - uy * half),
        ScreenPoint::new(to.x + ux * half, to.y + uy * half),
    ]
}

/// Closed polyline around a circle; the first point is repeated at the end.
#[allow(clippy::cast_precision_loss, reason = "segment counts are small")]
fn circle_points(center: ScreenPoint, radius: f64, segments: usize) -> Vec<ScreenPoint> {
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            ScreenPoint::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Filled ring between `inner` and `outer` radii.
fn annulus(origin: egui::Pos2, center: ScreenPoint, inner: f64, outer: f64, color: egui::Color32) -> egui::epaint::Mesh {
    let mut mesh = egui::epaint::Mesh::default();
    let inner_points = circle_points(center, inner, CIRCLE_SEGMENTS);
    let outer_points = circle_points(center, outer.max(inner), CIRCLE_SEGMENTS);

    for (a, b) in inner_points.iter().zip(&outer_points) {
        mesh.colored_vertex(to_pos(origin, *a), color);
        mesh.colored_vertex(to_pos(origin, *b), color);
    }
    for i in 0..CIRCLE_SEGMENTS {
        let Ok(base) = u32::try_from(i * 2) else {
            break;
        };
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }
    mesh
}
