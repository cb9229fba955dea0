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

//! observation zone overrides from L records. There are two (vendor) dialects:
//!
//!   LLXVOZ=1,Style=1,R1=500m,A1=180,R2=0m,A2=0,A12=123.4,Line=0,Autonext=1,Lat=5111359N,Lon=00101899W
//!   LNAVOZN=1,Style=2,R1=0.5km,A1=45
//!
//! The first one always defines a complete zone, the second one updates (or creates) the zone with the given index.
//! Index 0 is the start, the last index is the finish

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::errors::{DecodeError, RecordKind, malformed};
use crate::records::{parse_latitude, parse_longitude};

lazy_static! {
    static ref RE_LXVOZ: Regex = Regex::new(r"^LLXVOZ=(-?[0-9]+)").unwrap();
    static ref RE_NAVOZN: Regex = Regex::new(r"^LNAVOZN=(-?[0-9]+)").unwrap();
    static ref RE_OZ_LAT: Regex = Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]+)([NS])$").unwrap();
    static ref RE_OZ_LON: Regex = Regex::new(r"^([0-9]{3})([0-9]{2})([0-9]+)([EW])$").unwrap();
}

/// zone geometry as declared in the file. Distances are in meters, angles in degrees
#[derive(Debug,Clone,Default,PartialEq,Serialize)]
pub struct ObservationZoneOverride {
    pub index: i32,
    pub style: i32,
    pub r1: f64,
    pub a1: f64,
    pub r2: f64,
    pub a2: f64,
    pub a12: f64,
    pub line: bool,
    pub autonext: bool,
    pub elevation: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ObservationZoneOverride {
    pub fn new (index: i32)->Self {
        ObservationZoneOverride { index, ..Default::default() }
    }

    pub fn set (&mut self, field: OzField) {
        match field {
            OzField::Style(v) => self.style = v,
            OzField::R1(v) => self.r1 = v,
            OzField::A1(v) => self.a1 = v,
            OzField::R2(v) => self.r2 = v,
            OzField::A2(v) => self.a2 = v,
            OzField::A12(v) => self.a12 = v,
            OzField::Line(v) => self.line = v,
            OzField::Autonext(v) => self.autonext = v,
            OzField::Elevation(v) => self.elevation = Some(v),
            OzField::Latitude(v) => self.latitude = v,
            OzField::Longitude(v) => self.longitude = v,
        }
    }
}

/// a single decoded `Key=Value` pair
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum OzField {
    Style(i32),
    R1(f64),
    A1(f64),
    R2(f64),
    A2(f64),
    A12(f64),
    Line(bool),
    Autonext(bool),
    Elevation(i32),
    Latitude(f64),
    Longitude(f64),
}

#[derive(Debug,Clone,PartialEq)]
pub enum OzUpdate {
    /// replace (or add) the complete zone
    Replace(ObservationZoneOverride),
    /// set the given fields of the zone with this index, creating it if it does not exist yet
    Merge { index: i32, fields: Vec<OzField> },
}

impl OzUpdate {
    pub fn index (&self)->i32 {
        match self {
            OzUpdate::Replace(oz) => oz.index,
            OzUpdate::Merge{index,..} => *index,
        }
    }

    /// apply to a collection that is ordered by first appearance of each index
    pub fn apply_to (self, zones: &mut Vec<ObservationZoneOverride>) {
        match self {
            OzUpdate::Replace(oz) => {
                if let Some(existing) = zones.iter_mut().find( |z| z.index == oz.index) {
                    *existing = oz;
                } else {
                    zones.push(oz);
                }
            }
            OzUpdate::Merge{index, fields} => {
                let pos = match zones.iter().position( |z| z.index == index) {
                    Some(pos) => pos,
                    None => { zones.push( ObservationZoneOverride::new(index)); zones.len()-1 }
                };
                let zone = &mut zones[pos];
                for f in fields { zone.set(f) }
            }
        }
    }
}

/// decode an L record. Returns `Ok(None)` for L records that are not zone declarations
pub fn parse_oz_record (line: &str, line_number: usize)->Result<Option<OzUpdate>,DecodeError> {
    if let Some(caps) = RE_LXVOZ.captures(line) {
        let index: i32 = caps[1].parse().map_err( |_| malformed( RecordKind::ObservationZone, line_number, line))?;
        let mut oz = ObservationZoneOverride::new(index);
        for f in parse_fields( line, line_number)? { oz.set(f) }
        Ok( Some( OzUpdate::Replace(oz)))

    } else if let Some(caps) = RE_NAVOZN.captures(line) {
        let index: i32 = caps[1].parse().map_err( |_| malformed( RecordKind::ObservationZone, line_number, line))?;
        let fields = parse_fields( line, line_number)?;
        Ok( Some( OzUpdate::Merge{ index, fields }))

    } else {
        Ok(None)
    }
}

fn parse_fields (line: &str, line_number: usize)->Result<Vec<OzField>,DecodeError> {
    let err = || malformed( RecordKind::ObservationZone, line_number, line);
    let mut fields = Vec::new();

    for part in line.split(',').skip(1) { // first part is the dialect tag and index
        let Some((key,value)) = part.split_once('=') else { continue };
        let value = value.trim();

        let field = match key.trim() {
            "Style" => OzField::Style( value.parse().map_err( |_| err())?),
            "R1" => OzField::R1( parse_distance(value).ok_or_else(err)?),
            "R2" => OzField::R2( parse_distance(value).ok_or_else(err)?),
            "A1" => OzField::A1( value.parse().map_err( |_| err())?),
            "A2" => OzField::A2( value.parse().map_err( |_| err())?),
            "A12" => OzField::A12( value.parse().map_err( |_| err())?),
            "Line" => OzField::Line( value == "1"),
            "Autonext" => OzField::Autonext( value == "1"),
            "Elev" => OzField::Elevation( parse_elevation(value).ok_or_else(err)?),
            "Lat" => {
                let caps = RE_OZ_LAT.captures(value).ok_or_else(err)?;
                OzField::Latitude( parse_latitude( &caps[1], &caps[2], &caps[3], &caps[4]).ok_or_else(err)?)
            }
            "Lon" => {
                let caps = RE_OZ_LON.captures(value).ok_or_else(err)?;
                OzField::Longitude( parse_longitude( &caps[1], &caps[2], &caps[3], &caps[4]).ok_or_else(err)?)
            }
            _ => continue // unknown keys are ignored
        };
        fields.push(field);
    }

    Ok(fields)
}

/// distances are given as "500m" or "1.5km"
pub fn parse_distance (s: &str)->Option<f64> {
    if let Some(km) = s.strip_suffix("km") {
        km.trim().parse::<f64>().ok().map( |v| v * 1000.0)
    } else {
        strip_unit(s).parse().ok()
    }
}

/// elevations are integral meters with a unit letter. Fractional values are truncated
pub fn parse_elevation (s: &str)->Option<i32> {
    strip_unit(s).parse::<f64>().ok()
        .filter( |v| v.is_finite())
        .map( |v| v.trunc() as i32)
}

fn strip_unit (s: &str)->&str {
    s.trim_end_matches( |c: char| c.is_ascii_alphabetic()).trim()
}
