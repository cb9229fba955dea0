/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! decoder for IGC flight recorder files (glider/paraglider track logs).
//! The main entry points are `parse` and `parse_file`, which turn IGC text into a `FlightDocument`

use std::{fs, path::Path};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub mod errors;
use errors::{DecodeError, Result};

pub mod manufacturers;
pub mod datetime;
pub mod extensions;

pub mod records;
use records::{DataSample, Fix, Task};

pub mod oz;
use oz::ObservationZoneOverride;

pub mod parser;
pub use parser::{parse, parse_file};

/// decoding policy. The default is strict, i.e. the first malformed record aborts the decode
#[derive(Debug,Clone,Default,Deserialize,Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// record per-line failures in `FlightDocument::errors` and keep going
    pub lenient: bool,
}

impl ParseOptions {
    pub fn lenient ()->Self { ParseOptions{ lenient: true } }
    pub fn strict ()->Self { ParseOptions{ lenient: false } }
}

/// everything we got out of an IGC file
#[derive(Debug,Clone,Serialize)]
pub struct FlightDocument {
    pub date: NaiveDate,
    pub num_flight: Option<u32>,

    pub pilot: Option<String>,
    pub copilot: Option<String>,

    pub glider_type: Option<String>,
    pub registration: Option<String>,
    pub callsign: Option<String>,
    pub competition_class: Option<String>,

    pub logger_id: Option<String>,
    pub logger_manufacturer: String,
    pub logger_type: Option<String>,
    pub firmware_version: Option<String>,
    pub hardware_version: Option<String>,

    pub task: Option<Task>,

    pub fixes: Vec<Fix>,
    pub data_records: Vec<DataSample>,
    pub oz_records: Vec<ObservationZoneOverride>,

    pub security: Option<String>,

    /// non-fatal decode failures (lenient mode only)
    pub errors: Vec<DecodeError>,
}

impl FlightDocument {
    pub fn to_json (&self)->serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn oz_record (&self, index: i32)->Option<&ObservationZoneOverride> {
        self.oz_records.iter().find( |oz| oz.index == index)
    }
}

/// read a RON config file
pub fn load_config<C: DeserializeOwned> (path: impl AsRef<Path>)->Result<C> {
    let bytes = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( &bytes)? )
}
