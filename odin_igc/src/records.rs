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

//! the typed IGC records and their (single line) decoders.
//!
//! IGC as documented in the FAI "Technical Specification for IGC-approved GNSS Flight Recorders", Appendix A
//!
//! Record examples:
//!   AXCSAAA FLIGHT:1
//!   HFDTEDATE:160525,01
//!   HFPLTPILOTINCHARGE: Jane_Doe
//!   I023638FXA3941ENL
//!   B1101355206343N00006198WA0058700558012038
//!   C160525095532000000000002Task
//!   C5111359N00101899WStart
//!
//! Each decoder gets the trimmed line and the 1-based line number for error reporting

use std::{collections::BTreeMap, fmt};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::datetime::{parse_ddmmyy, parse_hhmmss, utc_datetime, TimestampResolver};
use crate::errors::{DecodeError, RecordKind, malformed};
use crate::extensions::ExtensionTable;
use crate::manufacturers::lookup_manufacturer;

lazy_static! {
    static ref RE_A: Regex = Regex::new(r"^A([A-Za-z0-9_]{3})([A-Za-z0-9_]{3,}?)(?:FLIGHT:([0-9]+)|:(.+))?$").unwrap();
    static ref RE_A_SHORT: Regex = Regex::new(r"^A([A-Za-z0-9_]{3})(.+)?$").unwrap();
    static ref RE_HFDTE: Regex = Regex::new(r"^HFDTE(?:DATE:)?([0-9]{2})([0-9]{2})([0-9]{2})(?:,?([0-9]{2}))?").unwrap();
    static ref RE_TEXT_HEADER: Regex = Regex::new(r"^H[FOP]([A-Z0-9]{3})(?:.*?:(.*)|(.*))$").unwrap();
    static ref RE_B: Regex = Regex::new(
        r"^B([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{3})([NS])([0-9]{3})([0-9]{2})([0-9]{3})([EW])([AV])(-[0-9]{4}|[0-9]{5})(-[0-9]{4}|[0-9]{5})"
    ).unwrap();
    static ref RE_K: Regex = Regex::new(r"^K([0-9]{2})([0-9]{2})([0-9]{2})").unwrap();
    static ref RE_TASK: Regex = Regex::new(
        r"^C([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{4})([-0-9]{2})(.*)"
    ).unwrap();
    static ref RE_TASKPOINT: Regex = Regex::new(r"^C([0-9]{2})([0-9]{2})([0-9]{3,6})([NS])([0-9]{3})([0-9]{2})([0-9]{3,6})([EW])(.*)").unwrap();
}

/// the text headers we know about, with the replacement char for '_'
pub const TEXT_HEADERS: &[(&str, char)] = &[
    ("PLT", ' '), // pilot in charge
    ("CM2", ' '), // second crew member
    ("GTY", ' '), // glider type
    ("GID", '-'), // glider registration
    ("CID", ' '), // competition id (callsign)
    ("CCL", ' '), // competition class
    ("FTY", ' '), // logger type
    ("RFW", ' '), // firmware version
    ("RHW", ' '), // hardware version
];

/* #region A record *****************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct FlightMetadata {
    pub manufacturer_code: String,
    pub manufacturer: String,
    pub logger_id: Option<String>,
    pub flight_number: Option<u32>,
    pub additional_data: Option<String>,
}

pub fn parse_metadata (line: &str, line_number: usize)->Result<FlightMetadata,DecodeError> {
    if let Some(caps) = RE_A.captures(line) {
        let manufacturer_code = caps[1].to_string();
        let manufacturer = lookup_manufacturer( &manufacturer_code).to_string();
        let logger_id = Some( caps[2].to_string());
        let flight_number = caps.get(3).and_then( |m| m.as_str().parse().ok());
        let additional_data = caps.get(4).map( |m| m.as_str().to_string());
        return Ok( FlightMetadata{ manufacturer_code, manufacturer, logger_id, flight_number, additional_data } )
    }

    if let Some(caps) = RE_A_SHORT.captures(line) {
        let manufacturer_code = caps[1].to_string();
        let manufacturer = lookup_manufacturer( &manufacturer_code).to_string();
        let additional_data = caps.get(2).map( |m| m.as_str().trim().to_string()).filter( |s| !s.is_empty());
        return Ok( FlightMetadata{ manufacturer_code, manufacturer, logger_id: None, flight_number: None, additional_data } )
    }

    Err( malformed( RecordKind::Metadata, line_number, line))
}

/* #endregion A record */

/* #region H records ****************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct DateHeader {
    pub date: NaiveDate,
    pub flight_number: Option<u32>,
}

pub fn parse_date_header (line: &str, line_number: usize)->Result<DateHeader,DecodeError> {
    let caps = RE_HFDTE.captures(line).ok_or_else( || malformed( RecordKind::DateHeader, line_number, line))?;

    let date = parse_ddmmyy( &caps[1], &caps[2], &caps[3]).ok_or_else( || malformed( RecordKind::DateHeader, line_number, line))?;
    let flight_number = caps.get(4).and_then( |m| m.as_str().parse().ok());

    Ok( DateHeader{ date, flight_number } )
}

/// parse one of the free text headers, which come either as `HFPLTPILOTINCHARGE:John Doe` or `HFPLTJohn Doe`
pub fn parse_text_header (line: &str, line_number: usize)->Result<String,DecodeError> {
    let code = line.get(2..5).unwrap_or("");
    let (code, underscore) = TEXT_HEADERS.iter()
        .find( |(c,_)| *c == code)
        .map( |(c,u)| (*c,*u))
        .unwrap_or( ("???", ' '));
    let kind = RecordKind::TextHeader(code);

    let caps = RE_TEXT_HEADER.captures(line).ok_or_else( || malformed( kind, line_number, line))?;
    let value = caps.get(2).or_else( || caps.get(3)).map( |m| m.as_str()).unwrap_or("");

    Ok( value.replace( '_', &underscore.to_string()).trim().to_string() )
}

/* #endregion H records */

/* #region B record ****************************************************************************/

/// a single GPS fix
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    pub time: NaiveTime,

    pub latitude: f64,
    pub longitude: f64,
    pub valid: bool,

    pub pressure_altitude: Option<i32>,
    pub gps_altitude: Option<i32>,

    pub extensions: BTreeMap<String,String>,

    pub enl: Option<f64>, // engine noise level [0..1]
    pub mop: Option<f64>, // means of propulsion [0..1]
    pub cur: Option<f64>, // motor current [0..1]
    pub fix_accuracy: Option<i32>,
}

impl Fix {
    pub fn extension (&self, code: &str)->Option<&str> {
        self.extensions.get(code).map( |s| s.as_str())
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Fix( time: {}, lat: {:.5}, lon: {:.5}", self.timestamp, self.latitude, self.longitude)?;
        if let Some(alt) = self.gps_altitude { write!( f, ", gps_alt: {alt}")?; }
        if let Some(alt) = self.pressure_altitude { write!( f, ", baro_alt: {alt}")?; }
        if let Some(enl) = self.enl { write!( f, ", enl: {enl:.3}")?; }
        if !self.valid { write!( f, ", invalid")?; }
        write!( f, ")")
    }
}

/// decode a B record. This advances `resolver` if (and only if) the record is valid
pub fn parse_fix (line: &str, line_number: usize, resolver: &mut TimestampResolver, extensions: &ExtensionTable)->Result<Fix,DecodeError> {
    let kind = RecordKind::Fix;
    let caps = RE_B.captures(line).ok_or_else( || malformed( kind, line_number, line))?;

    let time = parse_hhmmss( &caps[1], &caps[2], &caps[3]).ok_or_else( || malformed( kind, line_number, line))?;
    let latitude = parse_latitude( &caps[4], &caps[5], &caps[6], &caps[7]).ok_or_else( || malformed( kind, line_number, line))?;
    let longitude = parse_longitude( &caps[8], &caps[9], &caps[10], &caps[11]).ok_or_else( || malformed( kind, line_number, line))?;
    let valid = &caps[12] == "A";
    let pressure_altitude = parse_altitude( &caps[13]);
    let gps_altitude = parse_altitude( &caps[14]);

    let extension_values = extensions.extract(line);
    let enl = extensions.fraction( "ENL", line);
    let mop = extensions.fraction( "MOP", line);
    let cur = extensions.fraction( "CUR", line);
    let fix_accuracy = extension_values.get("FXA").and_then( |v| v.trim().parse::<i32>().ok());

    let timestamp = resolver.resolve(time);

    Ok( Fix {
        timestamp, time,
        latitude, longitude, valid,
        pressure_altitude, gps_altitude,
        extensions: extension_values,
        enl, mop, cur, fix_accuracy
    })
}

/// '00000' means not recorded
fn parse_altitude (s: &str)->Option<i32> {
    if s == "00000" { None } else { s.parse().ok() }
}

/* #endregion B record */

/* #region K record ****************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct DataSample {
    pub timestamp: DateTime<Utc>,
    pub time: NaiveTime,
    pub extensions: BTreeMap<String,String>,
}

pub fn parse_data_sample (line: &str, line_number: usize, resolver: &mut TimestampResolver, extensions: &ExtensionTable)->Result<DataSample,DecodeError> {
    let kind = RecordKind::DataSample;
    let caps = RE_K.captures(line).ok_or_else( || malformed( kind, line_number, line))?;
    let time = parse_hhmmss( &caps[1], &caps[2], &caps[3]).ok_or_else( || malformed( kind, line_number, line))?;

    let timestamp = resolver.resolve(time);
    Ok( DataSample{ timestamp, time, extensions: extensions.extract(line) } )
}

/* #endregion K record */

/* #region C records ***************************************************************************/

/// the declared task. The first C record holds the declaration, all subsequent C records are points
/// (usually takeoff, start, turnpoints, finish and landing)
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Task {
    pub declaration_date: Option<NaiveDate>,
    pub declaration_time: Option<NaiveTime>,
    pub declaration_timestamp: Option<DateTime<Utc>>,

    pub flight_date: Option<NaiveDate>,
    pub task_number: Option<u32>,

    pub num_turnpoints: i32,
    pub comment: Option<String>,

    pub points: Vec<TaskPoint>,
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct TaskPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

pub fn parse_task_declaration (line: &str, line_number: usize)->Result<Task,DecodeError> {
    let caps = RE_TASK.captures(line).ok_or_else( || malformed( RecordKind::TaskDeclaration, line_number, line))?;

    let declaration_date = parse_ddmmyy( &caps[1], &caps[2], &caps[3]);
    let declaration_time = parse_hhmmss( &caps[4], &caps[5], &caps[6]);
    let declaration_timestamp = declaration_date.zip(declaration_time).map( |(d,t)| utc_datetime(d,t));

    let flight_date = if is_zero(&caps, &[7,8,9]) { None } else { parse_ddmmyy( &caps[7], &caps[8], &caps[9]) };
    let task_number = if &caps[10] == "0000" { None } else { caps[10].parse().ok() };
    let num_turnpoints: i32 = caps[11].parse().map_err( |_| malformed( RecordKind::TaskDeclaration, line_number, line))?;
    let comment = Some( caps[12].to_string()).filter( |s| !s.is_empty());

    Ok( Task {
        declaration_date, declaration_time, declaration_timestamp,
        flight_date, task_number,
        num_turnpoints, comment,
        points: Vec::new()
    })
}

pub fn parse_task_point (line: &str, line_number: usize)->Result<TaskPoint,DecodeError> {
    let kind = RecordKind::TaskPoint;
    let caps = RE_TASKPOINT.captures(line).ok_or_else( || malformed( kind, line_number, line))?;

    let latitude = parse_latitude( &caps[1], &caps[2], &caps[3], &caps[4]).ok_or_else( || malformed( kind, line_number, line))?;
    let longitude = parse_longitude( &caps[5], &caps[6], &caps[7], &caps[8]).ok_or_else( || malformed( kind, line_number, line))?;
    let name = Some( caps[9].to_string()).filter( |s| !s.is_empty());

    Ok( TaskPoint{ latitude, longitude, name } )
}

fn is_zero (caps: &Captures, groups: &[usize])->bool {
    groups.iter().all( |i| &caps[*i] == "00")
}

/* #endregion C records */

//--- coordinates

/// degrees + decimal minutes, where the fractional minutes field can have any width ("DDMMmmm" or "DDMMmmmmm")
fn parse_degrees (deg: &str, min: &str, min_fraction: &str)->Option<f64> {
    let d: f64 = deg.parse().ok()?;
    let m: f64 = format!("{min}.{min_fraction}").parse().ok()?;
    Some( d + m / 60.0)
}

pub fn parse_latitude (dd: &str, mm: &str, mmm: &str, ns: &str)->Option<f64> {
    let deg = parse_degrees( dd, mm, mmm)?;
    Some( if ns == "S" { -deg } else { deg })
}

pub fn parse_longitude (ddd: &str, mm: &str, mmm: &str, ew: &str)->Option<f64> {
    let deg = parse_degrees( ddd, mm, mmm)?;
    Some( if ew == "W" { -deg } else { deg })
}
