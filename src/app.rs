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

//! The desktop window: feeds files into the radar view and routes egui input
//! to it.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Instant, SystemTime};

use eframe::egui;
use log::{info, warn};
use radar_core::{RadarError, RadarView, ScreenPoint, ZoomIntent};

use crate::config::AppConfig;
use crate::data;
use crate::surface::EguiSurface;

/// Accumulated `log2` zoom factor that makes one range step.
const ZOOM_STEP_LOG2: f32 = 0.25;

/// Turns egui's per-frame zoom factor (trackpad pinch, ctrl+scroll) into
/// discrete range steps.
#[derive(Debug, Default)]
struct ZoomAccumulator {
    level: f32,
}

impl ZoomAccumulator {
    fn feed(&mut self, zoom_delta: f32) -> Option<ZoomIntent> {
        if !zoom_delta.is_finite() || zoom_delta <= 0.0 {
            return None;
        }
        // zoom_delta > 1.0 means zoom in
        self.level += zoom_delta.log2();
        if self.level >= ZOOM_STEP_LOG2 {
            self.level = 0.0;
            Some(ZoomIntent::In)
        } else if self.level <= -ZOOM_STEP_LOG2 {
            self.level = 0.0;
            Some(ZoomIntent::Out)
        } else {
            None
        }
    }
}

pub struct RadarApp {
    view: RadarView<EguiSurface>,
    config: AppConfig,
    aircraft_modified: Option<SystemTime>,
    last_reload_check: Instant,
    /// Last click that hit nothing, in surface coordinates
    empty_click: Rc<Cell<Option<ScreenPoint>>>,
    zoom: ZoomAccumulator,
    status: String,
}

impl std::fmt::Debug for RadarApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarApp")
            .field("view", &self.view)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl RadarApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self, RadarError> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let surface = EguiSurface::new(config.window_width, config.window_height);
        let mut view = RadarView::new(surface, config.site(), config.style.clone())?;

        let empty_click = Rc::new(Cell::new(None));
        let sink = Rc::clone(&empty_click);
        view.set_on_click(move |point| sink.set(Some(point)));

        if let Some(path) = &config.airports_path {
            match data::load_airports(path) {
                Ok(airports) => view.set_airports(airports),
                Err(e) => warn!("Failed to load airports from {}: {}", path.display(), e),
            }
        }
        if let Some(path) = &config.shapes_path {
            let loaded = data::load_shapes(path).map_err(|e| e.to_string()).and_then(|shapes| {
                view.set_shapes_json(&shapes).map_err(|e| e.to_string())
            });
            if let Err(e) = loaded {
                warn!("Failed to load shapes from {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            view,
            config,
            aircraft_modified: None,
            last_reload_check: Instant::now(),
            empty_click,
            zoom: ZoomAccumulator::default(),
            status: String::new(),
        };
        app.reload_aircraft();
        app.view.draw();
        Ok(app)
    }

    fn aircraft_path(&self) -> Option<&PathBuf> {
        self.config.aircraft_path.as_ref()
    }

    /// Re-read the aircraft file if it changed since the last read.
    /// Returns true when new aircraft were taken in.
    fn reload_aircraft(&mut self) -> bool {
        let Some(path) = self.aircraft_path().cloned() else {
            return false;
        };
        let modified = data::modified(&path);
        if modified.is_some() && modified == self.aircraft_modified {
            return false;
        }

        match data::load_aircraft(&path) {
            Ok(snapshot) => match self.view.set_aircrafts_json(&snapshot.aircraft, snapshot.as_of) {
                Ok(()) => {
                    self.aircraft_modified = modified;
                    info!("Loaded {} aircraft", self.view.aircrafts().len());
                    true
                }
                Err(e) => {
                    warn!("Ignoring {}: {}", path.display(), e);
                    self.aircraft_modified = modified;
                    false
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                false
            }
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                self.view.zoom_out();
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                self.view.zoom_in();
            }
            ui.label(
                egui::RichText::new(format!("RANGE {} NM", self.view.range()))
                    .monospace()
                    .color(egui::Color32::from_rgb(100, 200, 100)),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!("CONTACTS {}", self.view.aircrafts().len()))
                    .monospace()
                    .color(egui::Color32::from_rgb(150, 150, 150)),
            );
            if !self.status.is_empty() {
                ui.separator();
                ui.label(egui::RichText::new(&self.status).monospace());
            }
        });
    }

    fn draw_scope(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let local = |pos: egui::Pos2| {
            ScreenPoint::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
        };

        if self.view.surface_mut().resize(rect.size()) {
            self.view.draw();
        }

        let events = ui.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                match phase {
                    egui::TouchPhase::Start => self.view.pointer_down(id.0, local(pos)),
                    egui::TouchPhase::Move => {
                        self.view.pointer_move(id.0, local(pos));
                    }
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => self.view.pointer_up(id.0),
                }
            }
        }

        if response.hovered() {
            let (scroll, zoom_delta, touching) =
                ui.input(|i| (i.raw_scroll_delta, i.zoom_delta(), i.any_touches()));
            if (zoom_delta - 1.0).abs() > 0.001 {
                // Touch pinches already arrive as contacts above
                if !touching {
                    match self.zoom.feed(zoom_delta) {
                        Some(ZoomIntent::In) => {
                            self.view.zoom_in();
                        }
                        Some(ZoomIntent::Out) => {
                            self.view.zoom_out();
                        }
                        None => {}
                    }
                }
            } else if scroll.y != 0.0 {
                // egui reports wheel-up as positive
                self.view.wheel(-f64::from(scroll.y));
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(url) = self.view.click(local(pos)) {
                    if let Err(e) = webbrowser::open(&url) {
                        warn!("Failed to open {}: {}", url, e);
                    }
                } else if let Some(point) = self.empty_click.take() {
                    let polar = self.view.polar_at(point);
                    self.status = format!("{:03.0}° {:.1} NM", polar.bearing, polar.distance);
                }
            }
        }

        self.view.surface().paint(&painter, rect);

        let tooltip = response
            .hover_pos()
            .and_then(|pos| self.view.hover(local(pos)))
            .map(str::to_owned);
        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(egui::RichText::new(text).monospace());
        }
    }
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let interval = self.config.reload_interval();
        if self.last_reload_check.elapsed() >= interval {
            self.last_reload_check = Instant::now();
            if self.reload_aircraft() {
                self.view.draw();
            }
        }
        if self.aircraft_path().is_some() {
            ctx.request_repaint_after(interval);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let background = self.view.style().color_background;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(background.0, background.1, background.2)))
            .show(ctx, |ui| {
                self.draw_scope(ui);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_accumulates_to_one_step() {
        let mut zoom = ZoomAccumulator::default();
        // 1.05^4 is about 2^0.28
        assert_eq!(zoom.feed(1.05), None);
        assert_eq!(zoom.feed(1.05), None);
        assert_eq!(zoom.feed(1.05), None);
        assert_eq!(zoom.feed(1.05), Some(ZoomIntent::In));
        assert_eq!(zoom.feed(1.05), None);
    }

    #[test]
    fn test_zoom_out_and_direction_change() {
        let mut zoom = ZoomAccumulator::default();
        assert_eq!(zoom.feed(0.8), Some(ZoomIntent::Out));
        assert_eq!(zoom.feed(1.1), None);
        assert_eq!(zoom.feed(0.9), None);
        assert_eq!(zoom.feed(1.0), None);
    }

    #[test]
    fn test_zoom_ignores_degenerate_factors() {
        let mut zoom = ZoomAccumulator::default();
        assert_eq!(zoom.feed(0.0), None);
        assert_eq!(zoom.feed(f32::NAN), None);
        assert_eq!(zoom.feed(f32::INFINITY), None);
    }
}
