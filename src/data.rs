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

//! Loading radar inputs from disk.
//!
//! - Aircraft: dump1090 `aircraft.json` (`{"now": …, "aircraft": […]}`) or a bare list
//! - Airports: OurAirports `airports.csv`, or a JSON list of airport records
//! - Shapes: JSON list of outlines, each a list of `[lon, lat]` vertices

use chrono::{DateTime, Utc};
use log::{info, warn};
use radar_core::Airport;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

/// One aircraft file read: the untyped list plus the receiver's capture time.
#[derive(Debug, Clone)]
pub struct AircraftSnapshot {
    pub aircraft: Value,
    pub as_of: Option<DateTime<Utc>>,
}

/// Airport row from OurAirports
#[derive(Debug, Deserialize)]
struct OurAirportsRow {
    ident: String,

    #[serde(rename = "type", default)]
    airport_type: String,

    #[serde(default)]
    name: String,

    latitude_deg: Option<f64>,

    longitude_deg: Option<f64>,
}

/// Read an aircraft file.
pub fn load_aircraft<P: AsRef<Path>>(path: P) -> Result<AircraftSnapshot, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    parse_aircraft(BufReader::new(file))
}

fn parse_aircraft<R: Read>(reader: R) -> Result<AircraftSnapshot, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Object(mut map) => {
            let as_of = map.get("now").and_then(Value::as_f64).and_then(timestamp);
            let aircraft = map.remove("aircraft").unwrap_or(Value::Null);
            Ok(AircraftSnapshot { aircraft, as_of })
        }
        aircraft => Ok(AircraftSnapshot { aircraft, as_of: None }),
    }
}

#[allow(clippy::cast_possible_truncation, reason = "epoch milliseconds fit in i64")]
fn timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    seconds
        .is_finite()
        .then(|| DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64))
        .flatten()
}

/// Load airports from an OurAirports CSV, or a JSON list when the file ends in `.json`.
pub fn load_airports<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let airports = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        serde_json::from_reader(reader)?
    } else {
        parse_airports_csv(reader)?
    };
    info!("Loaded {} airports from {}", airports.len(), path.display());
    Ok(airports)
}

fn parse_airports_csv<R: Read>(reader: R) -> Result<Vec<Airport>, Box<dyn std::error::Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut airports = Vec::new();
    for result in csv_reader.deserialize() {
        let row: OurAirportsRow = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping airport row: {}", e);
                continue;
            }
        };
        if row.airport_type == "closed" {
            continue;
        }
        airports.push(Airport {
            icao: row.ident,
            name: (!row.name.is_empty()).then_some(row.name),
            lon: row.longitude_deg,
            lat: row.latitude_deg,
            polar: None,
        });
    }
    Ok(airports)
}

/// Load shapes as untyped JSON; the view validates the layout.
pub fn load_shapes<P: AsRef<Path>>(path: P) -> Result<Value, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let value = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    info!("Loaded shapes from {}", path.display());
    Ok(value)
}

/// Modification time, if the file exists and the platform reports one.
pub fn modified<P: AsRef<Path>>(path: P) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
