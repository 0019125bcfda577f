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

//! Application configuration management.
//!
//! Settings are persisted with confy as TOML under the application name.
//! Missing fields fall back to their defaults, so older files keep loading
//! as new settings are added.

use std::path::PathBuf;
use std::time::Duration;

use radar_core::{GeoPoint, RadarStyle};
use serde::{Deserialize, Serialize};

/// Name used for the config directory and file.
pub const APP_NAME: &str = "radar-view";
const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Configuration schema version
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Receiver site longitude (degrees)
    #[serde(default = "default_site_longitude")]
    pub site_longitude: f64,

    /// Receiver site latitude (degrees)
    #[serde(default = "default_site_latitude")]
    pub site_latitude: f64,

    /// dump1090 `aircraft.json`
    #[serde(default)]
    pub aircraft_path: Option<PathBuf>,

    /// OurAirports `airports.csv` or a JSON airport list
    #[serde(default)]
    pub airports_path: Option<PathBuf>,

    /// JSON list of outlines
    #[serde(default)]
    pub shapes_path: Option<PathBuf>,

    /// How often the aircraft file is checked for changes (milliseconds)
    #[serde(default = "default_reload_interval_ms")]
    pub reload_interval_ms: u64,

    #[serde(default = "default_window_width")]
    pub window_width: f32,

    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Colours, glyph sizes and range limits
    #[serde(default)]
    pub style: RadarStyle,
}

fn default_config_version() -> u32 {
    1
}

fn default_site_longitude() -> f64 {
    -118.4081
}

fn default_site_latitude() -> f64 {
    33.9425
}

fn default_reload_interval_ms() -> u64 {
    1000
}

fn default_window_width() -> f32 {
    800.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            site_longitude: default_site_longitude(),
            site_latitude: default_site_latitude(),
            aircraft_path: None,
            airports_path: None,
            shapes_path: None,
            reload_interval_ms: default_reload_interval_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            style: RadarStyle::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, writing defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    #[must_use]
    pub fn site(&self) -> GeoPoint {
        GeoPoint::new(self.site_longitude, self.site_latitude)
    }

    #[must_use]
    pub fn reload_interval(&self) -> Duration {
        Duration::from_millis(self.reload_interval_ms.max(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"site_longitude": 76.54, "site_latitude": 23.45, "style": {"max_range": 250}}"#,
        )
        .unwrap();
        assert_eq!(config.site(), GeoPoint::new(76.54, 23.45));
        assert_eq!(config.reload_interval_ms, 1000);
        assert_eq!(config.style.max_range, 250);
        assert_eq!(config.style.step_range, 50);
        assert!(config.aircraft_path.is_none());
    }

    #[test]
    fn test_reload_interval_has_floor() {
        let config = AppConfig {
            reload_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.reload_interval(), Duration::from_millis(100));
    }
}
