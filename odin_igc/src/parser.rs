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

//! the line dispatcher that turns IGC text into a `FlightDocument`

use std::{fs, path::Path};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{FlightDocument, ParseOptions};
use crate::datetime::TimestampResolver;
use crate::errors::{DecodeError, OdinIgcError, RecordKind, Result, missing_metadata};
use crate::extensions::ExtensionTable;
use crate::oz::{ObservationZoneOverride, parse_oz_record};
use crate::records::{
    DataSample, Fix, Task,
    parse_data_sample, parse_date_header, parse_fix, parse_metadata, parse_task_declaration, parse_task_point, parse_text_header
};

/// decode IGC text. In strict mode the first malformed line fails the whole decode, in lenient mode
/// such failures end up in the `errors` list of the returned document. A missing A record or
/// date header is always an error
pub fn parse (input: &str, opts: &ParseOptions)->Result<FlightDocument> {
    let mut ctx = DecodeContext::new();

    for line in input.split('\n') {
        if let Err(e) = ctx.process_line( line.trim()) {
            if opts.lenient {
                warn!("{e}");
                ctx.errors.push(e);
            } else {
                return Err(e.into())
            }
        }
    }

    let doc = ctx.into_document()?;
    info!("decoded flight of {}: {} fixes, {} data records, {} errors", doc.date, doc.fixes.len(), doc.data_records.len(), doc.errors.len());
    Ok(doc)
}

pub fn parse_file (path: impl AsRef<Path>, opts: &ParseOptions)->Result<FlightDocument> {
    let input = fs::read_to_string( path.as_ref())?;
    parse( &input, opts)
}

/// the cross-line state of a single decode pass
#[derive(Default)]
struct DecodeContext {
    line_number: usize,

    date: Option<NaiveDate>,
    resolver: Option<TimestampResolver>,

    fix_extensions: ExtensionTable,
    data_extensions: Option<ExtensionTable>,

    num_flight: Option<u32>,
    pilot: Option<String>,
    copilot: Option<String>,
    glider_type: Option<String>,
    registration: Option<String>,
    callsign: Option<String>,
    competition_class: Option<String>,

    logger_id: Option<String>,
    logger_manufacturer: Option<String>,
    logger_type: Option<String>,
    firmware_version: Option<String>,
    hardware_version: Option<String>,

    task: Option<Task>,
    fixes: Vec<Fix>,
    data_records: Vec<DataSample>,
    oz_records: Vec<ObservationZoneOverride>,
    security: Option<String>,

    errors: Vec<DecodeError>,
}

impl DecodeContext {
    fn new ()->Self { Self::default() }

    /// `line` is already trimmed. Blank lines still count
    fn process_line (&mut self, line: &str)->std::result::Result<(),DecodeError> {
        self.line_number += 1;
        let ln = self.line_number;

        let Some(record_type) = line.chars().next() else { return Ok(()) };

        match record_type {
            'B' => {
                let resolver = self.resolver.as_mut().ok_or_else( || missing_metadata( RecordKind::Fix, "HFDTE record", ln))?;
                let fix = parse_fix( line, ln, resolver, &self.fix_extensions)?;
                self.fixes.push(fix);
            }
            'K' => {
                let resolver = self.resolver.as_mut().ok_or_else( || missing_metadata( RecordKind::DataSample, "HFDTE record", ln))?;
                let extensions = self.data_extensions.as_ref().ok_or_else( || DecodeError::MissingExtensionTable{
                    kind: RecordKind::DataSample, missing: "J record", line_number: ln
                })?;
                let sample = parse_data_sample( line, ln, resolver, extensions)?;
                self.data_records.push(sample);
            }
            'L' => {
                if let Some(update) = parse_oz_record( line, ln)? {
                    debug!("observation zone {} updated at line {ln}", update.index());
                    update.apply_to( &mut self.oz_records);
                }
            }
            'H' => self.process_header( line)?,
            'C' => self.process_task_line( line)?,
            'A' => {
                let md = parse_metadata( line, ln)?;
                self.logger_id = md.logger_id;
                self.logger_manufacturer = Some(md.manufacturer);
                if md.flight_number.is_some() { self.num_flight = md.flight_number }
            }
            'I' => {
                self.fix_extensions = ExtensionTable::parse( line, RecordKind::FixExtensions, ln)?;
                debug!("fix extensions at line {ln}: {:?}", self.fix_extensions.fields());
            }
            'J' => {
                let table = ExtensionTable::parse( line, RecordKind::DataExtensions, ln)?;
                debug!("data extensions at line {ln}: {:?}", table.fields());
                self.data_extensions = Some(table);
            }
            'G' => {
                self.security.get_or_insert_with( String::new).push_str( &line[1..]);
            }
            _ => {} // unknown or unsupported record type
        }

        Ok(())
    }

    fn process_header (&mut self, line: &str)->std::result::Result<(),DecodeError> {
        let ln = self.line_number;

        match line.get(2..5).unwrap_or("") {
            "DTE" => {
                let hdr = parse_date_header( line, ln)?;
                self.date = Some(hdr.date);
                match &mut self.resolver {
                    Some(resolver) => resolver.set_date( hdr.date),
                    None => self.resolver = Some( TimestampResolver::new( hdr.date))
                }
                if hdr.flight_number.is_some() { self.num_flight = hdr.flight_number }
            }
            "PLT" => self.pilot = Some( parse_text_header( line, ln)?),
            "CM2" => self.copilot = Some( parse_text_header( line, ln)?),
            "GTY" => self.glider_type = Some( parse_text_header( line, ln)?),
            "GID" => self.registration = Some( parse_text_header( line, ln)?),
            "CID" => self.callsign = Some( parse_text_header( line, ln)?),
            "CCL" => self.competition_class = Some( parse_text_header( line, ln)?),
            "FTY" => self.logger_type = Some( parse_text_header( line, ln)?),
            "RFW" => self.firmware_version = Some( parse_text_header( line, ln)?),
            "RHW" => self.hardware_version = Some( parse_text_header( line, ln)?),
            _ => {}
        }
        Ok(())
    }

    /// the first C record is the declaration, all following ones are task points
    fn process_task_line (&mut self, line: &str)->std::result::Result<(),DecodeError> {
        let ln = self.line_number;

        if let Some(task) = &mut self.task {
            task.points.push( parse_task_point( line, ln)?);
        } else {
            let task = parse_task_declaration( line, ln)?;
            debug!("task declared at line {ln} with {} turnpoints", task.num_turnpoints);
            self.task = Some(task);
        }
        Ok(())
    }

    fn into_document (self)->Result<FlightDocument> {
        let logger_manufacturer = self.logger_manufacturer.ok_or_else( || OdinIgcError::MissingMetadata("A record".to_string()))?;
        let date = self.date.ok_or_else( || OdinIgcError::MissingMetadata("HFDTE record".to_string()))?;

        Ok( FlightDocument {
            date,
            num_flight: self.num_flight,
            pilot: self.pilot,
            copilot: self.copilot,
            glider_type: self.glider_type,
            registration: self.registration,
            callsign: self.callsign,
            competition_class: self.competition_class,
            logger_id: self.logger_id,
            logger_manufacturer,
            logger_type: self.logger_type,
            firmware_version: self.firmware_version,
            hardware_version: self.hardware_version,
            task: self.task,
            fixes: self.fixes,
            data_records: self.data_records,
            oz_records: self.oz_records,
            security: self.security,
            errors: self.errors,
        })
    }
}
