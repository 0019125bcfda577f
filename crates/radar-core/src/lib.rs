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

//! Geometry and interaction engine for a range-ring radar display.
//!
//! The engine places aircraft, airports and reference outlines around a
//! fixed site on a flat polar projection, draws them through a small
//! [`DrawingSurface`] abstraction, and turns clicks, hovers, wheel steps and
//! two-finger pinches into entity actions or range changes.
//!
//! - **Geodesy**: spherical bearing/distance and the screen projection
//! - **Entities**: aircraft, airports and shape vertices with their polar position
//! - **Rendering**: layered composition into any [`DrawingSurface`]
//! - **Interaction**: hit registry, range stepping and pinch recognition
//!
//! # Quick Start
//!
//! ```
//! use radar_core::{
//!     Aircraft, DrawingSurface, GeoPoint, RadarStyle, RadarView, Rgb, ScreenPoint, Stroke,
//!     TextAlign, TextStyle,
//! };
//!
//! struct Blank;
//!
//! impl DrawingSurface for Blank {
//!     fn size(&self) -> (f64, f64) {
//!         (600.0, 600.0)
//!     }
//!     fn fill_rect(&mut self, _: ScreenPoint, _: ScreenPoint, _: Rgb) {}
//!     fn fill_circle(&mut self, _: ScreenPoint, _: f64, _: Rgb) {}
//!     fn stroke_circle(&mut self, _: ScreenPoint, _: f64, _: Stroke) {}
//!     fn stroke_path(&mut self, _: &[[ScreenPoint; 2]], _: Stroke) {}
//!     fn fill_outside_circle(&mut self, _: ScreenPoint, _: f64, _: Rgb) {}
//!     fn text(&mut self, _: ScreenPoint, _: TextAlign, _: &str, _: TextStyle) {}
//! }
//!
//! let mut view = RadarView::new(Blank, GeoPoint::new(76.54, 23.45), RadarStyle::default())
//!     .expect("valid site");
//! view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
//! view.draw();
//!
//! assert_eq!(view.range(), 200);
//! assert!(view.zoom_in());
//! assert_eq!(view.range(), 150);
//! ```

pub mod entity;
pub mod error;
pub mod geodesy;
pub mod gesture;
pub mod hit_test;
pub mod ordering;
pub mod render;
pub mod style;
pub mod surface;
pub mod view;
pub mod zoom;

pub use entity::{Aircraft, Airport, Category, Polar, Positioned, Shape, SquawkAlert, Vertex};
pub use error::RadarError;
pub use geodesy::{BearingDistance, GeoPoint, ScreenPoint};
pub use gesture::{PinchRecognizer, PointerId, ZoomIntent};
pub use hit_test::{HitRecord, HitRegistry};
pub use style::{RadarStyle, Rgb};
pub use surface::{DrawingSurface, LineCap, Stroke, TextAlign, TextStyle};
pub use view::{ClickHandler, RadarView};
pub use zoom::RangeState;
