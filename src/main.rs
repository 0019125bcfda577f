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

//! Radar View: a range-ring radar scope for dump1090 aircraft data.

mod app;
mod config;
mod data;
mod surface;

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::app::RadarApp;
use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Command line overrides for the persisted configuration.
#[derive(Parser, Debug)]
#[command(name = "radar-view", version, about = "Range-ring radar display for ADS-B traffic")]
struct Cli {
    /// Site longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Site latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// dump1090 aircraft.json to watch
    #[arg(long)]
    aircraft: Option<PathBuf>,

    /// OurAirports airports.csv (or a .json airport list)
    #[arg(long)]
    airports: Option<PathBuf>,

    /// JSON outlines to draw under the traffic
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// Write the overrides back to the config file
    #[arg(long)]
    save: bool,

    /// Print the config file location and exit
    #[arg(long)]
    print_config_path: bool,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(lon) = self.lon {
            config.site_longitude = lon;
        }
        if let Some(lat) = self.lat {
            config.site_latitude = lat;
        }
        if self.aircraft.is_some() {
            config.aircraft_path = self.aircraft;
        }
        if self.airports.is_some() {
            config.airports_path = self.airports;
        }
        if self.shapes.is_some() {
            config.shapes_path = self.shapes;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.print_config_path {
        println!("{}", AppConfig::get_config_path()?.display());
        return Ok(());
    }

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    let save = cli.save;
    cli.apply(&mut config);
    if save {
        config.save()?;
        info!("Saved configuration to {}", AppConfig::get_config_path()?.display());
    }

    info!(
        "Starting radar view at {}, {}",
        config.site_latitude, config.site_longitude
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Radar View"),
        ..Default::default()
    };

    eframe::run_native(
        "Radar View",
        options,
        Box::new(move |cc| Ok(Box::new(RadarApp::new(cc, config)?))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "radar-view",
            "--lon",
            "-118.4081",
            "--lat",
            "33.9425",
            "--aircraft",
            "/run/dump1090/aircraft.json",
        ]);
        let mut config = AppConfig {
            shapes_path: Some(PathBuf::from("coast.json")),
            ..AppConfig::default()
        };
        cli.apply(&mut config);

        assert!((config.site_longitude + 118.4081).abs() < 1e-9);
        assert!((config.site_latitude - 33.9425).abs() < 1e-9);
        assert_eq!(config.aircraft_path, Some(PathBuf::from("/run/dump1090/aircraft.json")));
        assert_eq!(config.shapes_path, Some(PathBuf::from("coast.json")));
    }
}
