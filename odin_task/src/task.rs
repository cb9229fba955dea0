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

//! racing tasks: start, turnpoints in a fixed order and finish, each with its observation zone

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uom::si::{f64::Length, length::meter};

use odin_igc::oz::ObservationZoneOverride;
use odin_igc::records::Task;

use crate::errors::{OdinTaskError, Result, degenerate_task};
use crate::geo::{GeoPoint, Located};
use crate::zones::{ObservationZone, ZoneSpec};

/// legs shorter than this are considered to be zero length
const MIN_LEG_METERS: f64 = 0.001;

/// default zone geometry per role, used for task points without L record definition
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub start: ZoneSpec,
    pub turnpoint: ZoneSpec,
    pub finish: ZoneSpec,
}

impl Default for TaskConfig {
    fn default()->Self {
        TaskConfig {
            start: ZoneSpec::line( 1000.0),
            turnpoint: ZoneSpec::cylinder( 500.0),
            finish: ZoneSpec::cylinder( 1000.0),
        }
    }
}

impl TaskConfig {
    /// the default zone for the task point at `index` of a task with `len` points
    pub fn zone_spec (&self, index: usize, len: usize)->&ZoneSpec {
        if index == 0 { &self.start }
        else if index + 1 == len { &self.finish }
        else { &self.turnpoint }
    }
}

#[derive(Debug)]
pub struct RacingTask {
    points: Vec<GeoPoint>,
    zones: Vec<Box<dyn ObservationZone>>,
    legs: Vec<Length>,   // legs[i] is from points[i] to points[i+1]
    distance: Length,
}

impl RacingTask {
    /// a task with the default zones
    pub fn new (points: Vec<GeoPoint>)->Result<Self> {
        Self::with_config( points, &TaskConfig::default())
    }

    pub fn with_config (points: Vec<GeoPoint>, config: &TaskConfig)->Result<Self> {
        let len = points.len();
        let specs = (0..len).map( |i| config.zone_spec(i, len).clone()).collect();
        Self::with_zone_specs( points, specs)
    }

    pub fn with_zone_specs (points: Vec<GeoPoint>, specs: Vec<ZoneSpec>)->Result<Self> {
        if points.len() < 3 {
            return Err( degenerate_task!("need at least start, one turnpoint and finish, got {} points", points.len()))
        }
        if specs.len() != points.len() {
            return Err( degenerate_task!("{} zones for {} points", specs.len(), points.len()))
        }

        let mut legs = Vec::with_capacity( points.len()-1);
        for (i, w) in points.windows(2).enumerate() {
            let d = w[0].distance_to( &w[1]);
            if d.get::<meter>() < MIN_LEG_METERS {
                return Err( degenerate_task!("leg {} has zero length", i+1))
            }
            legs.push(d);
        }
        let distance = legs.iter().fold( Length::new::<meter>(0.0), |acc, d| acc + *d);

        let start = points[0];
        let last = points.len() - 1;
        let zones = specs.iter().enumerate().map( |(i,spec)| {
            let prev = if i > 0 { Some(points[i-1]) } else { None };
            let next = if i < last { Some(points[i+1]) } else { None };
            spec.build( points[i], prev, next, start)
        }).collect();

        Ok( RacingTask{ points, zones, legs, distance } )
    }

    /// turn a declared task into a racing task. Declarations that include takeoff and landing
    /// (i.e. have two more points than start, turnpoints and finish) get those stripped.
    /// Zone overrides are applied by index, 0 being the start
    pub fn from_declaration (task: &Task, overrides: &[ObservationZoneOverride], config: &TaskConfig)->Result<Self> {
        let mut decl_points: &[_] = task.points.as_slice();
        if task.num_turnpoints >= 0 && decl_points.len() == task.num_turnpoints as usize + 4 {
            decl_points = &decl_points[1..decl_points.len()-1];
        }

        let points: Vec<GeoPoint> = decl_points.iter().map( |p| p.position()).collect();
        let len = points.len();
        let mut specs: Vec<ZoneSpec> = (0..len).map( |i| config.zone_spec(i, len).clone()).collect();

        for oz in overrides {
            if oz.index >= 0 && (oz.index as usize) < len {
                let i = oz.index as usize;
                specs[i] = ZoneSpec::from_override( oz, config.zone_spec(i, len));
                debug!("zone {} of task set to {:?}", i, specs[i]);
            } else {
                warn!("ignoring zone override with index {} for task with {} points", oz.index, len);
            }
        }

        Self::with_zone_specs( points, specs)
    }

    pub fn points (&self)->&[GeoPoint] { self.points.as_slice() }
    pub fn num_points (&self)->usize { self.points.len() }

    /// number of turnpoints (without start and finish)
    pub fn num_turnpoints (&self)->usize { self.points.len() - 2 }

    pub fn finish_index (&self)->usize { self.points.len() - 1 }

    pub fn zone (&self, i: usize)->&dyn ObservationZone { self.zones[i].as_ref() }
    pub fn start_zone (&self)->&dyn ObservationZone { self.zones[0].as_ref() }
    pub fn finish_zone (&self)->&dyn ObservationZone { self.zones[self.finish_index()].as_ref() }

    pub fn legs (&self)->&[Length] { self.legs.as_slice() }
    pub fn distance (&self)->Length { self.distance }

    pub fn measure_distance (&self, a: &impl Located, b: &impl Located)->Length {
        a.position().distance_to( &b.position())
    }

    /// area start zones are left to start, lines are crossed onto the course side
    pub fn check_start (&self, prev: &impl Located, cur: &impl Located)->bool {
        let zone = self.start_zone();
        let (p0, p1) = (prev.position(), cur.position());

        if zone.is_area() {
            zone.contains(&p0) && !zone.contains(&p1)
        } else {
            zone.entered( &p0, &p1)
        }
    }

    /// `index` in 1..=num_turnpoints. Only area zones can be achieved
    pub fn check_turnpoint (&self, index: usize, prev: &impl Located, cur: &impl Located)->bool {
        let zone = self.zone(index);
        zone.is_area() && zone.entered( &prev.position(), &cur.position())
    }

    pub fn check_finish (&self, prev: &impl Located, cur: &impl Located)->bool {
        let zone = self.finish_zone();
        zone.entered( &prev.position(), &cur.position())
    }
}
