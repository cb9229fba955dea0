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

use uom::si::length::{kilometer, meter};
use odin_igc::{parse, parse_file, ParseOptions};
use odin_igc::oz::ObservationZoneOverride;
use odin_igc::records::{Task, TaskPoint};
use odin_task::errors::OdinTaskError;
use odin_task::geo::{GeoPoint, Located};
use odin_task::zones::ZoneSpec;
use odin_task::{load_config, score_flight, RacingTask, TaskConfig};

// run with "cargo test --test test_task -- --nocapture"

const SAMPLE: &str = concat!( env!("CARGO_MANIFEST_DIR"), "/../odin_igc/resources/sample.igc");
const TASK_CONFIG: &str = concat!( env!("CARGO_MANIFEST_DIR"), "/configs/task.ron");

fn pt (lat: f64, lon: f64)->GeoPoint { GeoPoint::from_lon_lat_degrees( lon, lat) }

fn task_point (lat: f64, lon: f64, name: &str)->TaskPoint {
    TaskPoint{ latitude: lat, longitude: lon, name: Some(name.to_string()) }
}

fn declaration (num_turnpoints: i32, points: Vec<TaskPoint>)->Task {
    Task {
        declaration_date: None, declaration_time: None, declaration_timestamp: None,
        flight_date: None, task_number: None,
        num_turnpoints, comment: None,
        points
    }
}

#[test]
fn test_legs() {
    let task = RacingTask::new( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)]).unwrap();
    let legs: Vec<f64> = task.legs().iter().map( |l| l.get::<kilometer>()).collect();
    println!("legs: {legs:?}, total: {}km", task.distance().get::<kilometer>());

    assert_eq!( task.num_turnpoints(), 1);
    assert_eq!( legs.len(), 2);
    assert!( (legs[0] - 55.6).abs() < 0.1);
    assert!( (task.distance().get::<meter>() - task.legs().iter().map(|l| l.get::<meter>()).sum::<f64>()).abs() < 1e-6);
    assert!( (task.measure_distance( &pt(0.0,0.0), &pt(0.0,0.5)) - task.legs()[0]).get::<meter>().abs() < 1e-6);
}

#[test]
fn test_degenerate() {
    let res = RacingTask::new( vec![ pt(0.0,0.0), pt(0.5,0.5)]);
    println!("two points: {res:?}");
    assert!( matches!( res, Err(OdinTaskError::DegenerateTask(_))));

    let res = RacingTask::new( vec![ pt(0.0,0.0), pt(0.0,0.0), pt(0.5,0.5)]);
    println!("zero leg: {res:?}");
    assert!( matches!( res, Err(OdinTaskError::DegenerateTask(_))));

    let res = RacingTask::with_zone_specs( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)], vec![ ZoneSpec::cylinder(500.0)]);
    assert!( matches!( res, Err(OdinTaskError::DegenerateTask(_))));
}

#[test]
fn test_start_and_finish_rules() {
    // line start: entering the course side
    let task = RacingTask::new( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)]).unwrap();
    assert!( task.check_start( &pt(0.0,-0.002), &pt(0.0,0.002)));
    assert!( !task.check_start( &pt(0.0,0.002), &pt(0.0,-0.002)));
    assert!( !task.check_start( &pt(0.006,0.001), &pt(0.004,0.001))); // round the north end of the line

    // cylinder start: leaving the zone
    let specs = vec![ ZoneSpec::cylinder(1000.0), ZoneSpec::cylinder(500.0), ZoneSpec::cylinder(1000.0)];
    let task = RacingTask::with_zone_specs( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)], specs).unwrap();
    assert!( task.check_start( &pt(0.0,0.005), &pt(0.0,0.01)));
    assert!( !task.check_start( &pt(0.0,0.01), &pt(0.0,0.005)));

    assert!( task.check_turnpoint( 1, &pt(0.0,0.49), &pt(0.0,0.499)));
    assert!( task.check_finish( &pt(0.49,0.5), &pt(0.499,0.5)));
    assert!( !task.check_finish( &pt(0.499,0.5), &pt(0.498,0.5)));

    // line zones can't be used as turnpoints
    let specs = vec![ ZoneSpec::line(1000.0), ZoneSpec::line(1000.0), ZoneSpec::cylinder(1000.0)];
    let task = RacingTask::with_zone_specs( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)], specs).unwrap();
    assert!( !task.check_turnpoint( 1, &pt(0.0,0.49), &pt(0.0,0.501)));

    // line finish: has to be crossed within its length
    let specs = vec![ ZoneSpec::line(1000.0), ZoneSpec::cylinder(500.0), ZoneSpec::line(1000.0)];
    let task = RacingTask::with_zone_specs( vec![ pt(0.0,0.0), pt(0.0,0.5), pt(0.5,0.5)], specs).unwrap();
    assert!( task.check_finish( &pt(0.498,0.5), &pt(0.502,0.5)));
    assert!( !task.check_finish( &pt(0.502,0.5), &pt(0.498,0.5)));
    assert!( !task.check_finish( &pt(0.498,0.506), &pt(0.502,0.504))); // passes east of the line end
}

#[test]
fn test_from_declaration() {
    let points = vec![
        task_point( 0.0, -0.1, "Takeoff"),
        task_point( 0.0, 0.0, "Start"),
        task_point( 0.0, 0.5, "TP1"),
        task_point( 0.5, 0.5, "Finish"),
        task_point( 0.0, -0.1, "Landing"),
    ];

    // takeoff and landing are stripped
    let task = RacingTask::from_declaration( &declaration( 1, points.clone()), &[], &TaskConfig::default()).unwrap();
    assert_eq!( task.num_points(), 3);
    assert_eq!( task.points()[0], points[1].position());

    // without matching turnpoint count all points are kept
    let task = RacingTask::from_declaration( &declaration( 3, points[1..].to_vec()), &[], &TaskConfig::default()).unwrap();
    assert_eq!( task.num_points(), 4);

    // overrides apply by index, unknown indices are ignored
    let mut tp_zone = ObservationZoneOverride::new(1);
    tp_zone.r1 = 3000.0;
    tp_zone.a1 = 180.0;
    let unknown = ObservationZoneOverride{ r1: 1000.0, ..ObservationZoneOverride::new(7) };

    let task = RacingTask::from_declaration( &declaration( 1, points), &[tp_zone, unknown], &TaskConfig::default()).unwrap();
    assert!( task.zone(1).contains( &pt(0.0,0.475))); // ~2.8km from TP1
    assert!( !task.start_zone().is_area());
}

#[test]
fn test_config() {
    let config: TaskConfig = load_config( TASK_CONFIG).unwrap();
    println!("{config:?}");
    assert_eq!( config, TaskConfig::default());

    let config: TaskConfig = ron::from_str( "TaskConfig( turnpoint: Cylinder( radius: 3000.0 ))").unwrap();
    assert_eq!( config.turnpoint, ZoneSpec::cylinder(3000.0));
    assert_eq!( config.start, ZoneSpec::line(1000.0));
}

#[test]
fn test_score_sample() {
    let doc = parse_file( SAMPLE, &ParseOptions::strict()).unwrap();
    let result = score_flight( &doc, &TaskConfig::default()).unwrap();
    println!("completed: {}, distance: {:.3}km, time: {:?}s, speed: {:?}km/h", result.completed, result.distance_km(), result.time_secs(), result.speed_kmh());

    assert!( result.completed);
    assert_eq!( result.path.len(), 3);
    assert_eq!( result.time_secs(), Some(2340.0));

    let task = RacingTask::from_declaration( doc.task.as_ref().unwrap(), &doc.oz_records, &TaskConfig::default()).unwrap();
    assert_eq!( result.distance, task.distance());

    let expected_speed = task.distance().get::<kilometer>() / (2340.0 / 3600.0);
    assert!( (result.speed_kmh().unwrap() - expected_speed).abs() < 1e-6);

    let json = serde_json::to_string( &result).unwrap();
    assert!( json.contains("\"completed\":true"));
}

#[test]
fn test_no_task() {
    let doc = parse( "AXXXABC123\nHFDTE010180\n", &ParseOptions::strict()).unwrap();
    assert!( matches!( score_flight( &doc, &TaskConfig::default()), Err(OdinTaskError::NoTaskDeclared)));
}
