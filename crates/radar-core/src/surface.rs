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

//! The drawing surface the render pipeline paints onto.
//!
//! The engine never touches pixels itself. Hosts implement [`DrawingSurface`]
//! over whatever 2D backend they have; coordinates are surface-local pixels
//! with the origin at the top-left corner.

use crate::geodesy::ScreenPoint;
use crate::style::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    /// Extends each end by half the line width.
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    /// Dash and gap lengths, `None` for a solid line.
    pub dash: Option<(f64, f64)>,
    pub cap: LineCap,
}

impl Stroke {
    #[must_use]
    pub fn new(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
            cap: LineCap::Butt,
        }
    }

    #[must_use]
    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// Text is outlined first, then filled on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub fill: Rgb,
    pub outline: Rgb,
    pub outline_width: f64,
}

/// 2D primitives consumed by [`crate::render`].
pub trait DrawingSurface {
    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);

    /// Whether the backend can draw at all. Checked once at view construction.
    fn is_supported(&self) -> bool {
        true
    }

    /// Start of a new pass. Backends that keep a display list drop it here.
    fn clear(&mut self) {}

    fn fill_rect(&mut self, min: ScreenPoint, max: ScreenPoint, color: Rgb);

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb);

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f64, stroke: Stroke);

    /// Stroke one path made of disjoint `[from, to]` segments.
    fn stroke_path(&mut self, segments: &[[ScreenPoint; 2]], stroke: Stroke);

    /// Fill everything outside the circle.
    fn fill_outside_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb);

    /// Draw `text` with its baseline at `anchor.y`, aligned horizontally on `anchor.x`.
    fn text(&mut self, anchor: ScreenPoint, align: TextAlign, text: &str, style: TextStyle);
}

#[cfg(test)]
pub(crate) mod recorder {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        FillRect {
            min: ScreenPoint,
            max: ScreenPoint,
            color: Rgb,
        },
        FillCircle {
            center: ScreenPoint,
            radius: f64,
            color: Rgb,
        },
        StrokeCircle {
            center: ScreenPoint,
            radius: f64,
            stroke: Stroke,
        },
        StrokePath {
            segments: Vec<[ScreenPoint; 2]>,
            stroke: Stroke,
        },
        FillOutsideCircle {
            center: ScreenPoint,
            radius: f64,
            color: Rgb,
        },
        Text {
            anchor: ScreenPoint,
            align: TextAlign,
            text: String,
            style: TextStyle,
        },
    }

    /// Records every primitive instead of drawing it.
    #[derive(Debug, Clone)]
    pub(crate) struct Recorder {
        pub width: f64,
        pub height: f64,
        pub supported: bool,
        pub calls: Vec<DrawCall>,
    }

    impl Recorder {
        pub(crate) fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                supported: true,
                calls: Vec::new(),
            }
        }

        pub(crate) fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawingSurface for Recorder {
        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn is_supported(&self) -> bool {
            self.supported
        }

        fn fill_rect(&mut self, min: ScreenPoint, max: ScreenPoint, color: Rgb) {
            self.calls.push(DrawCall::FillRect { min, max, color });
        }

        fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb) {
            self.calls.push(DrawCall::FillCircle {
                center,
                radius,
                color,
            });
        }

        fn stroke_circle(&mut self, center: ScreenPoint, radius: f64, stroke: Stroke) {
            self.calls.push(DrawCall::StrokeCircle {
                center,
                radius,
                stroke,
            });
        }

        fn stroke_path(&mut self, segments: &[[ScreenPoint; 2]], stroke: Stroke) {
            self.calls.push(DrawCall::StrokePath {
                segments: segments.to_vec(),
                stroke,
            });
        }

        fn fill_outside_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb) {
            self.calls.push(DrawCall::FillOutsideCircle {
                center,
                radius,
                color,
            });
        }

        fn text(&mut self, anchor: ScreenPoint, align: TextAlign, text: &str, style: TextStyle) {
            self.calls.push(DrawCall::Text {
                anchor,
                align,
                text: text.to_string(),
                style,
            });
        }
    }
}
