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

//! The radar display: entity state, range, hit testing and input handling
//! around a single drawing surface.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entity::{Aircraft, Airport, Polar, Positioned, Shape, Vertex};
use crate::error::{json_kind, RadarError};
use crate::geodesy::{bearing_distance_of_point, GeoPoint, ScreenPoint};
use crate::gesture::{PinchRecognizer, PointerId, ZoomIntent};
use crate::hit_test::{HitRecord, HitRegistry};
use crate::ordering::assign;
use crate::render::{compose, Scene};
use crate::style::RadarStyle;
use crate::surface::DrawingSurface;
use crate::zoom::RangeState;

/// Called with the surface point of a click that hit nothing.
pub type ClickHandler = Box<dyn FnMut(ScreenPoint)>;

/// A radar scope centred on a fixed site.
///
/// Entity collections are owned by the view and replaced wholesale by the
/// setters; getters hand out read-only slices. Nothing is drawn until
/// [`RadarView::draw`] is called, except that a successful zoom redraws.
pub struct RadarView<S> {
    surface: S,
    site: GeoPoint,
    style: RadarStyle,
    range: RangeState,
    aircraft: Vec<Aircraft>,
    aircraft_as_of: DateTime<Utc>,
    airports: Vec<Airport>,
    shapes: Vec<Shape>,
    hits: HitRegistry,
    pinch: PinchRecognizer,
    on_click: Option<ClickHandler>,
}

impl<S> std::fmt::Debug for RadarView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarView")
            .field("site", &self.site)
            .field("range", &self.range)
            .field("aircraft", &self.aircraft.len())
            .field("airports", &self.airports.len())
            .field("shapes", &self.shapes.len())
            .field("hits", &self.hits.len())
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> RadarView<S> {
    /// Create a view drawing onto `surface`, centred on `site`.
    pub fn new(surface: S, site: GeoPoint, style: RadarStyle) -> Result<Self, RadarError> {
        if !surface.is_supported() {
            return Err(RadarError::SurfaceUnsupported(
                "surface reports no drawing support".to_string(),
            ));
        }
        if !site.is_finite() {
            return Err(RadarError::InvalidSite(format!(
                "longitude {} / latitude {} are not numbers",
                site.lon, site.lat
            )));
        }
        let range = RangeState::new(style.step_range, style.max_range)?;
        info!(
            "Radar view at {:.4}, {:.4} (step {} NM, max {} NM)",
            site.lat, site.lon, style.step_range, style.max_range
        );

        Ok(Self {
            surface,
            site,
            range,
            aircraft: Vec::new(),
            aircraft_as_of: Utc::now(),
            airports: Vec::new(),
            shapes: Vec::new(),
            hits: HitRegistry::new(style.size_hover),
            pinch: PinchRecognizer::new(style.min_pinch_delta),
            on_click: None,
            style,
        })
    }

    #[must_use]
    pub fn site(&self) -> GeoPoint {
        self.site
    }

    #[must_use]
    pub fn style(&self) -> &RadarStyle {
        &self.style
    }

    /// Current range in NM.
    #[must_use]
    pub fn range(&self) -> u32 {
        self.range.range()
    }

    /// Replace the aircraft. `as_of` is when the batch was captured (default now).
    ///
    /// The first batch also picks the initial range.
    pub fn set_aircrafts(&mut self, aircraft: Vec<Aircraft>, as_of: Option<DateTime<Utc>>) {
        self.aircraft_as_of = as_of.unwrap_or_else(Utc::now);
        self.aircraft = assign(self.site, aircraft, false);
        self.range
            .initialize(self.aircraft.iter().filter_map(|a| a.polar().map(|p| p.distance)));
        debug!("{} aircraft, range {} NM", self.aircraft.len(), self.range());
    }

    /// Like [`RadarView::set_aircrafts`], from a JSON array of aircraft objects.
    pub fn set_aircrafts_json(
        &mut self,
        value: &Value,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<(), RadarError> {
        let aircraft = parse_list(value, "aircraft")?;
        self.set_aircrafts(aircraft, as_of);
        Ok(())
    }

    pub fn set_airports(&mut self, airports: Vec<Airport>) {
        self.airports = assign(self.site, airports, false);
        debug!("{} airports", self.airports.len());
    }

    pub fn set_airports_json(&mut self, value: &Value) -> Result<(), RadarError> {
        let airports = parse_list(value, "airport")?;
        self.set_airports(airports);
        Ok(())
    }

    /// Replace the reference shapes. Vertex order is kept as given.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes
            .into_iter()
            .map(|shape| assign(self.site, shape, true))
            .collect();
        debug!("{} shapes", self.shapes.len());
    }

    /// Shapes from `[[[lon, lat], …], …]`. Elements that are not vertex lists are dropped.
    pub fn set_shapes_json(&mut self, value: &Value) -> Result<(), RadarError> {
        let Value::Array(items) = value else {
            return Err(RadarError::InvalidArgument {
                expected: "array",
                got: json_kind(value),
            });
        };
        let mut shapes = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Array(vertices) => shapes.push(vertices.iter().map(Vertex::from_json).collect()),
                other => warn!("Ignoring shape that is a {}, not a vertex list", json_kind(other)),
            }
        }
        self.set_shapes(shapes);
        Ok(())
    }

    /// Aircraft in paint order (farthest first). Do not rely on them staying
    /// valid across the next `set_aircrafts`.
    #[must_use]
    pub fn aircrafts(&self) -> &[Aircraft] {
        &self.aircraft
    }

    #[must_use]
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Topmost entity drawn at surface point `(x, y)` in the last pass.
    #[must_use]
    pub fn resolve(&self, x: f64, y: f64) -> Option<&HitRecord> {
        self.hits.resolve(x, y)
    }

    pub fn set_on_click(&mut self, handler: impl FnMut(ScreenPoint) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    /// Render a full pass onto the surface.
    pub fn draw(&mut self) {
        let scene = Scene {
            aircraft: &self.aircraft,
            airports: &self.airports,
            shapes: &self.shapes,
            range: self.range.range(),
            as_of: self.aircraft_as_of,
            now: Utc::now(),
        };
        compose(&mut self.surface, &scene, &self.style, &mut self.hits);
    }

    /// Step the range in; redraws on success.
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.range.zoom_in();
        if changed {
            debug!("Zoomed in to {} NM", self.range());
            self.draw();
        }
        changed
    }

    /// Step the range out; redraws on success.
    pub fn zoom_out(&mut self) -> bool {
        let changed = self.range.zoom_out();
        if changed {
            debug!("Zoomed out to {} NM", self.range());
            self.draw();
        }
        changed
    }

    /// Handle a click. Returns the entity's action when one was hit, otherwise
    /// hands the point to the click handler.
    pub fn click(&mut self, point: ScreenPoint) -> Option<String> {
        if let Some(record) = self.hits.resolve(point.x, point.y) {
            info!("Clicked {}", record.action);
            return Some(record.action.clone());
        }
        if let Some(handler) = self.on_click.as_mut() {
            handler(point);
        }
        None
    }

    /// Summary text of whatever is under the pointer.
    #[must_use]
    pub fn hover(&self, point: ScreenPoint) -> Option<&str> {
        self.hits
            .resolve(point.x, point.y)
            .map(|r| r.text.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn pointer_down(&mut self, id: PointerId, point: ScreenPoint) {
        self.pinch.pointer_down(id, point);
    }

    /// Returns whether the move changed the range.
    pub fn pointer_move(&mut self, id: PointerId, point: ScreenPoint) -> bool {
        match self.pinch.pointer_move(id, point) {
            Some(ZoomIntent::In) => self.zoom_in(),
            Some(ZoomIntent::Out) => self.zoom_out(),
            None => false,
        }
    }

    /// Pointer lifted, cancelled, or left the surface.
    pub fn pointer_up(&mut self, id: PointerId) {
        self.pinch.pointer_up(id);
    }

    /// Scroll wheel: negative `delta_y` (away from the user) zooms in.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        if delta_y < 0.0 {
            self.zoom_in()
        } else {
            self.zoom_out()
        }
    }

    /// Bearing and NM distance from the site of a surface point at the current range.
    #[must_use]
    pub fn polar_at(&self, point: ScreenPoint) -> Polar {
        let (width, height) = self.surface.size();
        let mid = ScreenPoint::new(width / 2.0, height / 2.0);
        let scale = (width.min(height) / 2.0) / f64::from(self.range());
        let (bearing, pixels) = bearing_distance_of_point(mid, point);
        Polar {
            bearing,
            distance: if scale > 0.0 { pixels / scale } else { 0.0 },
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Deserialize every element of a JSON array, skipping elements that are not
/// records at all. Missing fields are fine.
fn parse_list<T: DeserializeOwned>(value: &Value, what: &str) -> Result<Vec<T>, RadarError> {
    let Value::Array(items) = value else {
        return Err(RadarError::InvalidArgument {
            expected: "array",
            got: json_kind(value),
        });
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match T::deserialize(item) {
            Ok(entity) => out.push(entity),
            Err(e) => warn!("Skipping unreadable {} record: {}", what, e),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recorder::Recorder;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SITE: GeoPoint = GeoPoint::new(76.54, 23.45);

    fn view() -> RadarView<Recorder> {
        RadarView::new(Recorder::new(500.0, 500.0), SITE, RadarStyle::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_site() {
        let err = RadarView::new(
            Recorder::new(500.0, 500.0),
            GeoPoint::new(f64::NAN, 23.45),
            RadarStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RadarError::InvalidSite(_)));
    }

    #[test]
    fn test_rejects_unsupported_surface() {
        let mut surface = Recorder::new(500.0, 500.0);
        surface.supported = false;
        let err = RadarView::new(surface, SITE, RadarStyle::default()).unwrap_err();
        assert!(matches!(err, RadarError::SurfaceUnsupported(_)));
    }

    #[test]
    fn test_rejects_off_grid_range_limits() {
        let style = RadarStyle {
            max_range: 310,
            ..RadarStyle::default()
        };
        let err = RadarView::new(Recorder::new(500.0, 500.0), SITE, style).unwrap_err();
        assert_eq!(err, RadarError::InvalidRange { step: 50, max: 310 });
    }

    #[test]
    fn test_reference_scenario_sets_range() {
        let mut view = view();
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);

        let polar = view.aircrafts()[0].polar.unwrap();
        assert!(polar.distance > 0.0 && polar.distance.is_finite());
        assert!((0.0..360.0).contains(&polar.bearing));
        assert_eq!(view.range(), 200);
    }

    #[test]
    fn test_empty_batch_defaults_to_one_step() {
        let mut view = view();
        view.set_aircrafts(Vec::new(), None);
        assert_eq!(view.range(), 50);
        assert!(!view.zoom_in());
        assert!(view.zoom_out());
        assert_eq!(view.range(), 100);
    }

    #[test]
    fn test_zoom_without_aircraft_source() {
        let mut view = view();
        view.set_airports(vec![Airport::new("VIDP", 77.1003, 28.5562)]);
        view.set_shapes(vec![vec![Vertex::new(80.0, 20.0), Vertex::new(76.6, 23.5)]]);
        view.draw();
        assert_eq!(view.range(), 50);

        assert!(view.zoom_out());
        assert!(view.wheel(10.0));
        assert_eq!(view.range(), 150);
        assert!(view.wheel(-10.0));
        assert_eq!(view.range(), 100);

        // A later first batch keeps the range the user chose
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
        assert_eq!(view.range(), 100);
    }

    #[test]
    fn test_json_ingest_requires_array() {
        let mut view = view();
        let err = view.set_aircrafts_json(&json!({"aircraft": []}), None).unwrap_err();
        assert_eq!(
            err,
            RadarError::InvalidArgument {
                expected: "array",
                got: "object"
            }
        );
        assert!(view.set_airports_json(&json!("VIDP")).is_err());
        assert!(view.set_shapes_json(&json!(null)).is_err());
    }

    #[test]
    fn test_json_ingest_tolerates_bad_records() {
        let mut view = view();
        view.set_aircrafts_json(
            &json!([
                {"hex": "aaa111", "lon": 76.6, "lat": 23.5},
                {"hex": "bbb222"},
                42,
                {"hex": "ccc333", "lon": 78.0, "lat": 22.0}
            ]),
            None,
        )
        .unwrap();
        let hexes: Vec<&str> = view.aircrafts().iter().map(|a| a.hex.as_str()).collect();
        assert_eq!(hexes, vec!["bbb222", "ccc333", "aaa111"]);
    }

    #[test]
    fn test_shapes_keep_vertex_order() {
        let mut view = view();
        view.set_shapes_json(&json!([
            [[80.0, 20.0], [76.6, 23.5], {"lon": 78.0, "lat": 22.0}],
            "not a shape"
        ]))
        .unwrap();
        assert_eq!(view.shapes().len(), 1);
        let shape = &view.shapes()[0];
        assert_eq!(shape[0].position, Some(GeoPoint::new(80.0, 20.0)));
        assert_eq!(shape[2].position, Some(GeoPoint::new(78.0, 22.0)));
        assert!(shape.iter().all(|v| v.polar.is_some()));
    }

    #[test]
    fn test_zoom_redraws_only_on_change() {
        let mut view = view();
        view.set_aircrafts(Vec::new(), None);
        assert!(!view.zoom_in());
        assert!(view.surface().calls.is_empty());

        assert!(view.zoom_out());
        assert!(!view.surface().calls.is_empty());
    }

    #[test]
    fn test_click_resolves_entity_or_calls_handler() {
        let mut view = view();
        view.set_airports(vec![Airport::new("VABP", 77.3374, 23.2875)]);
        view.set_aircrafts(Vec::new(), None);
        view.zoom_out();
        view.draw();

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        view.set_on_click(move |pt| sink.borrow_mut().push(pt));

        let anchor = view.airports()[0].polar.unwrap();
        assert!(anchor.distance < 100.0);
        let record_point = view.hits.records()[0].point;

        let action = view.click(record_point);
        assert_eq!(action.as_deref(), Some("https://flightaware.com/live/airport/VABP"));
        assert!(clicked.borrow().is_empty());

        assert!(view.click(ScreenPoint::new(1.0, 1.0)).is_none());
        assert_eq!(clicked.borrow().as_slice(), &[ScreenPoint::new(1.0, 1.0)]);
    }

    #[test]
    fn test_hover_returns_summary() {
        let mut view = view();
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
        view.draw();
        let point = view.hits.records()[0].point;
        let text = view.hover(point).unwrap();
        assert!(text.starts_with("800c1b"));
        assert!(text.contains("Distance:192.7NM"));
        assert!(view.hover(ScreenPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_pinch_drives_range_within_bounds() {
        let mut view = view();
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
        assert_eq!(view.range(), 200);

        view.pointer_down(1, ScreenPoint::new(200.0, 250.0));
        view.pointer_down(2, ScreenPoint::new(300.0, 250.0));
        assert!(!view.pointer_move(2, ScreenPoint::new(300.0, 250.0)));
        for (i, x) in [310.0, 320.0, 330.0, 340.0, 350.0].into_iter().enumerate() {
            let zoomed = view.pointer_move(2, ScreenPoint::new(x, 250.0));
            // 200 -> 150 -> 100 -> 50, then saturated
            assert_eq!(zoomed, i < 3);
        }
        assert_eq!(view.range(), 50);

        view.pointer_up(2);
        view.pointer_down(2, ScreenPoint::new(350.0, 250.0));
        // Fresh baseline after the pair was broken
        assert!(!view.pointer_move(2, ScreenPoint::new(300.0, 250.0)));
        assert!(view.pointer_move(2, ScreenPoint::new(290.0, 250.0)));
        assert_eq!(view.range(), 100);
    }

    #[test]
    fn test_wheel_direction() {
        let mut view = view();
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
        assert!(view.wheel(-120.0));
        assert_eq!(view.range(), 150);
        assert!(view.wheel(120.0));
        assert_eq!(view.range(), 200);
    }

    #[test]
    fn test_polar_at_inverts_projection() {
        let mut view = view();
        view.set_aircrafts(vec![Aircraft::new("800c1b").at(78.9012, 21.0987)], None);
        view.draw();
        let expected = view.aircrafts()[0].polar.unwrap();
        let point = view.hits.records()[0].point;
        let polar = view.polar_at(point);
        assert!((polar.bearing - expected.bearing).abs() < 1e-6);
        assert!((polar.distance - expected.distance).abs() < 1e-6);
    }

    #[test]
    fn test_setters_replace_state() {
        let mut view = view();
        view.set_airports(vec![Airport::new("VIDP", 77.1003, 28.5562), Airport::new("VABP", 77.3374, 23.2875)]);
        assert_eq!(view.airports().len(), 2);
        view.set_airports(vec![Airport::new("VIDP", 77.1003, 28.5562)]);
        assert_eq!(view.airports().len(), 1);
    }
}
