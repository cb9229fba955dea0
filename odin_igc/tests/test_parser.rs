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
#![allow(unused)]

use chrono::{NaiveDate, Duration};
use odin_igc::{parse, parse_file, ParseOptions, FlightDocument};
use odin_igc::errors::{DecodeError, OdinIgcError, RecordKind};
use odin_igc::manufacturers::UNKNOWN_MANUFACTURER;

// run with "cargo test --test test_parser -- --nocapture"

const SAMPLE: &str = concat!( env!("CARGO_MANIFEST_DIR"), "/resources/sample.igc");

#[test]
fn test_minimal() {
    let input = "AXXXABC123\nHFDTE010180\nI013638ENL\nB1101355206343N00006198WA0058700558250\n";
    let doc = parse( input, &ParseOptions::strict()).unwrap();
    println!("{doc:#?}");

    assert_eq!( doc.date, NaiveDate::from_ymd_opt(1980,1,1).unwrap());
    assert_eq!( doc.logger_manufacturer, UNKNOWN_MANUFACTURER);
    assert_eq!( doc.logger_id.as_deref(), Some("ABC123"));
    assert_eq!( doc.fixes.len(), 1);
    assert_eq!( doc.fixes[0].enl, Some(0.25));
    assert_eq!( doc.fixes[0].timestamp.date_naive(), doc.date);
    assert!( doc.errors.is_empty());
}

#[test]
fn test_sample_file() {
    let doc = parse_file( SAMPLE, &ParseOptions::strict()).unwrap();
    println!("pilot: {:?}, glider: {:?}, fixes: {}", doc.pilot, doc.glider_type, doc.fixes.len());

    assert_eq!( doc.date, NaiveDate::from_ymd_opt(2024,7,15).unwrap());
    assert_eq!( doc.num_flight, Some(1));
    assert_eq!( doc.logger_manufacturer, "LXNAV");
    assert_eq!( doc.pilot.as_deref(), Some("Jane Doe"));
    assert_eq!( doc.copilot.as_deref(), Some("NIL"));
    assert_eq!( doc.glider_type.as_deref(), Some("ASG 29"));
    assert_eq!( doc.registration.as_deref(), Some("D-1234"));
    assert_eq!( doc.callsign.as_deref(), Some("XY"));
    assert_eq!( doc.competition_class.as_deref(), Some("18m"));
    assert_eq!( doc.logger_type.as_deref(), Some("LXNAV,LX9000"));
    assert_eq!( doc.firmware_version.as_deref(), Some("9.1"));
    assert_eq!( doc.hardware_version.as_deref(), Some("1.0"));

    assert_eq!( doc.fixes.len(), 8);
    assert_eq!( doc.data_records.len(), 1);
    assert_eq!( doc.data_records[0].extensions.get("HDT").map(|s| s.as_str()), Some("09000"));
    assert_eq!( doc.fixes.last().unwrap().enl, Some(0.25));

    let task = doc.task.as_ref().unwrap();
    assert_eq!( task.num_turnpoints, 1);
    assert_eq!( task.points.len(), 5);
    assert_eq!( task.points[2].name.as_deref(), Some("Turnpoint 1"));

    assert_eq!( doc.oz_records.len(), 3);
    assert!( doc.oz_record(0).unwrap().line);
    assert_eq!( doc.oz_record(2).unwrap().r1, 1000.0);

    assert!( doc.security.as_ref().unwrap().starts_with("REJNGJERJKNJKRE"));
    assert!( doc.security.as_ref().unwrap().ends_with("O0934"));
    assert!( doc.errors.is_empty());

    let json = doc.to_json().unwrap();
    assert!( json.contains("\"pilot\": \"Jane Doe\""));
}

#[test]
fn test_missing_metadata() {
    let res = parse( "HFDTE010180\n", &ParseOptions::lenient());
    println!("no A record: {res:?}");
    assert!( matches!( res, Err(OdinIgcError::MissingMetadata(_))));

    let res = parse( "AXXXABC123\nHFPLTJane\n", &ParseOptions::lenient());
    println!("no date: {res:?}");
    assert!( matches!( res, Err(OdinIgcError::MissingMetadata(_))));

    // fixes before the date are line errors
    let input = "AXXXABC123\nB1101355206343N00006198WA0058700558\nHFDTE010180\n";
    let res = parse( input, &ParseOptions::strict());
    assert!( matches!( res, Err(OdinIgcError::Decode( DecodeError::MissingMetadata{ kind: RecordKind::Fix, line_number: 2, .. }))));

    let doc = parse( input, &ParseOptions::lenient()).unwrap();
    assert!( doc.fixes.is_empty());
    assert_eq!( doc.errors.len(), 1);
}

#[test]
fn test_lenient_vs_strict() {
    let input = "AXXXABC123\nHFDTE010180\n\nB1101355206343N00006198WA0058700558\nB11013X\nXSOMETHING\nB1101375206343N00006198WA0058700558\n";

    let res = parse( input, &ParseOptions::strict());
    println!("strict: {res:?}");
    match res {
        Err(OdinIgcError::Decode( DecodeError::MalformedRecord{ kind, line_number, line })) => {
            assert_eq!( kind, RecordKind::Fix);
            assert_eq!( line_number, 5); // blank lines are counted
            assert_eq!( line, "B11013X");
        }
        other => panic!("expected malformed B record, got {other:?}")
    }

    let doc = parse( input, &ParseOptions::lenient()).unwrap();
    println!("lenient errors: {:?}", doc.errors);
    assert_eq!( doc.fixes.len(), 2);
    assert_eq!( doc.errors.len(), 1);
    assert_eq!( doc.errors[0].line_number(), 5);
}

#[test]
fn test_fractional_oz_elevation() {
    let input = "AXXXABC123\nHFDTE010180\nLLXVOZ=0,Style=2,R1=500m,A1=180,Line=1,Elev=123.5m\n";
    let doc = parse( input, &ParseOptions::strict()).unwrap();
    println!("{:?}", doc.oz_records);
    assert!( doc.errors.is_empty());
    assert_eq!( doc.oz_record(0).and_then( |oz| oz.elevation), Some(123));
}

#[test]
fn test_data_samples_need_j() {
    let input = "AXXXABC123\nHFDTE010180\nK110135123\n";
    let res = parse( input, &ParseOptions::strict());
    assert!( matches!( res, Err(OdinIgcError::Decode( DecodeError::MissingExtensionTable{ kind: RecordKind::DataSample, line_number: 3, .. }))));

    let input = "AXXXABC123\nHFDTE010180\nJ010810HDG\nK110135123\n";
    let doc = parse( input, &ParseOptions::strict()).unwrap();
    assert_eq!( doc.data_records[0].extensions.get("HDG").map(|s| s.as_str()), Some("123"));
}

#[test]
fn test_midnight_crossing() {
    let input = "AXXXABC123\r\nHFDTE311224\r\nB2359005206343N00006198WA0058700558\r\nB2359305206343N00006198WA0058700558\r\nB0001005206343N00006198WA0058700558\r\n";
    let doc = parse( input, &ParseOptions::strict()).unwrap();

    let ts: Vec<_> = doc.fixes.iter().map( |f| f.timestamp).collect();
    println!("timestamps: {ts:?}");
    assert_eq!( ts[0].date_naive(), NaiveDate::from_ymd_opt(2024,12,31).unwrap());
    assert_eq!( ts[2].date_naive(), NaiveDate::from_ymd_opt(2025,1,1).unwrap());
    assert_eq!( ts[2] - ts[1], Duration::seconds(90));
}

#[test]
fn test_task_lines() {
    let input = "AXXXABC123\nHFDTE010180\nC010180120000000000000001\nC5111359N00101899WStart\nC5211359N00101899WTP\nC5111359N00201899WFinish\n";
    let doc = parse( input, &ParseOptions::strict()).unwrap();
    let task = doc.task.unwrap();
    assert_eq!( task.points.len(), 3);
    assert_eq!( task.points[0].name.as_deref(), Some("Start"));

    // a bad task point is a line error, the task stays open
    let input = "AXXXABC123\nHFDTE010180\nC010180120000000000000001\nC51\nC5111359N00101899WStart\n";
    let doc = parse( input, &ParseOptions::lenient()).unwrap();
    assert_eq!( doc.errors[0].kind(), RecordKind::TaskPoint);
    assert_eq!( doc.task.unwrap().points.len(), 1);
}
