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

use std::collections::BTreeMap;
use chrono::{TimeDelta, TimeZone, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use uom::si::length::{kilometer, meter};
use odin_igc::records::Fix;
use odin_task::geo::GeoPoint;
use odin_task::{Event, RacingTask, RacingTaskSolver};

// run with "cargo test --test test_solver -- --nocapture"

fn fix (secs: i64, lat: f64, lon: f64)->Fix {
    let timestamp = Utc.with_ymd_and_hms( 2024, 7, 15, 10, 0, 0).unwrap() + TimeDelta::seconds(secs);
    Fix {
        timestamp, time: timestamp.time(),
        latitude: lat, longitude: lon, valid: true,
        pressure_altitude: None, gps_altitude: None,
        extensions: BTreeMap::new(),
        enl: None, mop: None, cur: None, fix_accuracy: None
    }
}

/// start (0,0) -> TP (0,0.5) -> finish (0.5,0.5) with default zones (start line heading east)
fn triangle ()->RacingTask {
    RacingTask::new( vec![
        GeoPoint::from_lon_lat_degrees( 0.0, 0.0),
        GeoPoint::from_lon_lat_degrees( 0.5, 0.0),
        GeoPoint::from_lon_lat_degrees( 0.5, 0.5),
    ]).unwrap()
}

fn flight ()->Vec<Fix> {
    vec![
        fix(    0, 0.0, -0.01),   // behind the start line
        fix(   60, 0.0, 0.002),   // start
        fix( 1800, 0.0, 0.25),
        fix( 3600, 0.0, 0.499),   // turnpoint
        fix( 5400, 0.25, 0.5),
        fix( 7200, 0.499, 0.5),   // finish
        fix( 7260, 0.52, 0.5),
    ]
}

fn event_names (events: &[Event])->Vec<String> {
    events.iter().map( |e| match e {
        Event::Start{..} => "S".to_string(),
        Event::Turn{index,..} => format!("T{index}"),
        Event::Finish{..} => "F".to_string(),
    }).collect()
}

#[test]
fn test_completed() {
    let mut solver = RacingTaskSolver::new( triangle());
    solver.consume( &flight());
    println!("events: {:?}", event_names( solver.events()));
    assert_eq!( event_names( solver.events()), vec!["S","T1","F"]);
    assert!( solver.task_started());
    assert!( solver.task_finished());

    let result = solver.result();
    println!("distance: {:.3}km, time: {:?}, speed: {:?}", result.distance_km(), result.time_secs(), result.speed_kmh());

    assert!( result.completed);
    assert_eq!( result.distance, solver.task().distance());
    assert_eq!( result.time_secs(), Some(7140.0));
    let expected_speed = solver.task().distance().get::<kilometer>() / (7140.0 / 3600.0);
    assert!( (result.speed_kmh().unwrap() - expected_speed).abs() < 1e-6);
    assert_eq!( result.path.len(), 3);
    assert_eq!( result.path[0].fix().timestamp, flight()[1].timestamp);
}

#[test]
fn test_outlanding() {
    let mut solver = RacingTaskSolver::new( triangle());
    solver.consume( &flight()[..5]);
    println!("events: {:?}", event_names( solver.events()));

    let result = solver.result();
    println!("distance: {:.3}km", result.distance_km());

    assert!( !result.completed);
    assert!( result.time.is_none());
    assert!( result.speed.is_none());

    let total = solver.task().distance().get::<meter>();
    let d = result.distance.get::<meter>();
    assert!( d > 0.0 && d < total);

    // first leg plus half of the second one
    let legs = solver.task().legs();
    let expected = legs[0].get::<meter>() + legs[1].get::<meter>() / 2.0;
    assert!( (d - expected).abs() < 100.0);
    assert_eq!( result.max_distance_fix.as_ref().map( |f| f.timestamp), Some( flight()[4].timestamp));
    assert_eq!( event_names( &result.path), vec!["S","T1"]);
}

#[test]
fn test_turn_before_start() {
    let mut solver = RacingTaskSolver::new( triangle());
    solver.consume( &[
        fix(    0, 0.0, 0.25),   // never crossed the start line
        fix( 1800, 0.0, 0.499),  // in turnpoint
        fix( 3600, 0.25, 0.5),
        fix( 5400, 0.499, 0.5),  // in finish
    ]);
    println!("events: {:?}", event_names( solver.events()));

    assert!( solver.events().is_empty());
    let result = solver.result();
    assert!( !result.completed);
    assert!( result.path.is_empty());
    assert_eq!( result.distance.get::<meter>(), 0.0);
}

#[test]
fn test_no_start_round_line_end() {
    let mut solver = RacingTaskSolver::new( triangle());
    solver.consume( &[
        fix(    0, 0.006, 0.001),  // north of the start line end, on the course side
        fix(   60, 0.004, 0.001),  // inside the half disc without crossing the line
        fix( 1800, 0.0, 0.25),
        fix( 3600, 0.0, 0.499),
    ]);
    println!("events: {:?}", event_names( solver.events()));

    assert!( !solver.task_started());
    assert!( solver.events().is_empty());
}

#[test]
fn test_restart() {
    // second start gives the faster time
    let mut solver = RacingTaskSolver::new( triangle());
    solver.consume( &[
        fix(    0, 0.0, -0.01),
        fix(   60, 0.0, 0.002),  // first start
        fix(  120, 0.0, -0.01),
        fix(  600, 0.0, 0.002),  // second start
        fix( 3600, 0.0, 0.499),
        fix( 7200, 0.499, 0.5),
    ]);
    println!("events: {:?}", event_names( solver.events()));
    assert_eq!( event_names( solver.events()), vec!["S","S","T1","F"]);

    let result = solver.result();
    assert!( result.completed);
    assert_eq!( result.time_secs(), Some(6600.0));
    assert_eq!( result.path[0].fix().timestamp, Utc.with_ymd_and_hms( 2024, 7, 15, 10, 10, 0).unwrap());
}

#[test]
fn test_max_distance_monotonic() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut solver = RacingTaskSolver::new( triangle());

    solver.update( &fix( 0, 0.0, -0.01));
    solver.update( &fix( 60, 0.0, 0.002));
    assert!( solver.task_started());

    let (mut lat, mut lon) = (0.0, 0.002);
    let mut last_max = solver.max_distance().get::<meter>();

    for i in 0..2000 {
        lat += rng.random_range( -0.005..0.006);
        lon += rng.random_range( -0.005..0.006);
        solver.update( &fix( 120 + i*10, lat, lon));

        if solver.task_finished() { break }

        let max = solver.max_distance().get::<meter>();
        assert!( max >= last_max, "max distance decreased from {last_max} to {max} at step {i}");
        last_max = max;
    }
    println!("max distance after random walk: {:.3}km, events: {:?}", last_max / 1000.0, event_names( solver.events()));
}
