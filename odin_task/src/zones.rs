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

//! observation zones (OZ) - the areas or lines a glider has to reach for start, turnpoints and finish.
//! Directions are outward, i.e. the direction (in degrees) into which a sector or line half disc opens

use std::fmt::Debug;
use geo::{Coord, Intersects};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::meter};

use odin_igc::oz::ObservationZoneOverride;
use crate::geo::{GeoPoint, angle_between, normalize_360};

/// the capability the solver needs from a zone
pub trait ObservationZone: Debug + Send + Sync {
    fn center (&self)->GeoPoint;
    fn contains (&self, p: &GeoPoint)->bool;

    /// only area zones can be used to achieve turnpoints
    fn is_area (&self)->bool { true }

    /// did the track segment `from` -> `to` enter the zone
    fn entered (&self, from: &GeoPoint, to: &GeoPoint)->bool {
        !self.contains(from) && self.contains(to)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Cylinder {
    pub center: GeoPoint,
    pub radius: Length,
}

impl ObservationZone for Cylinder {
    fn center (&self)->GeoPoint { self.center }

    fn contains (&self, p: &GeoPoint)->bool {
        self.center.meters_to(p) <= self.radius.get::<meter>()
    }
}

/// a circle sector with optional inner cylinder (keyhole if `inner_radius` > 0)
#[derive(Debug,Clone,PartialEq)]
pub struct Sector {
    pub center: GeoPoint,
    pub radius: Length,
    pub half_angle: f64,
    pub inner_radius: Length,
    pub direction: f64,
}

impl ObservationZone for Sector {
    fn center (&self)->GeoPoint { self.center }

    fn contains (&self, p: &GeoPoint)->bool {
        let d = self.center.meters_to(p);
        if d <= self.inner_radius.get::<meter>() { return true }
        if d > self.radius.get::<meter>() { return false }

        d == 0.0 || angle_between( self.center.bearing_to(p), self.direction) <= self.half_angle
    }
}

/// a line of `length` through the center, perpendicular to `direction`. The zone is entered by
/// crossing the line segment from the back side to the `direction` side. `contains` is the half
/// disc on the `direction` side
#[derive(Debug,Clone,PartialEq)]
pub struct Line {
    pub center: GeoPoint,
    pub length: Length,
    pub direction: f64,
}

impl ObservationZone for Line {
    fn center (&self)->GeoPoint { self.center }

    fn contains (&self, p: &GeoPoint)->bool {
        let d = self.center.meters_to(p);
        if d > self.length.get::<meter>() / 2.0 { return false }

        d == 0.0 || angle_between( self.center.bearing_to(p), self.direction) <= 90.0
    }

    fn is_area (&self)->bool { false }

    fn entered (&self, from: &GeoPoint, to: &GeoPoint)->bool {
        let dir = self.direction.to_radians();
        let normal = Coord{ x: dir.sin(), y: dir.cos() };
        let half = self.length.get::<meter>() / 2.0;
        let along = Coord{ x: normal.y * half, y: -normal.x * half };

        let p0 = from.offset_from( &self.center);
        let p1 = to.offset_from( &self.center);
        let side = |c: Coord| c.x * normal.x + c.y * normal.y;

        if !(side(p0) < 0.0 && side(p1) >= 0.0) { return false }

        let line = geo::Line::new( Coord{ x: -along.x, y: -along.y }, along);
        geo::Line::new( p0, p1).intersects( &line)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum SectorOrientation {
    /// fixed outward direction in degrees
    Fixed(f64),
    /// bisector of the angle between incoming and outgoing leg, pointing outside
    Symmetric,
    ToNext,
    ToPrevious,
    ToStart,
}

/// configurable zone shapes. Lengths are serialized in meters
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum ZoneSpec {
    Cylinder { radius: Length },
    Sector { radius: Length, half_angle: f64, inner_radius: Length, orientation: SectorOrientation },
    Line { length: Length },
}

impl ZoneSpec {
    pub fn cylinder (radius_m: f64)->Self {
        ZoneSpec::Cylinder{ radius: Length::new::<meter>(radius_m) }
    }

    pub fn line (length_m: f64)->Self {
        ZoneSpec::Line{ length: Length::new::<meter>(length_m) }
    }

    pub fn sector (radius_m: f64, half_angle: f64, inner_radius_m: f64, orientation: SectorOrientation)->Self {
        ZoneSpec::Sector {
            radius: Length::new::<meter>(radius_m),
            half_angle,
            inner_radius: Length::new::<meter>(inner_radius_m),
            orientation
        }
    }

    /// instantiate the zone for a task point, given its neighbours and the start point of the task
    pub fn build (&self, point: GeoPoint, prev: Option<GeoPoint>, next: Option<GeoPoint>, start: GeoPoint)->Box<dyn ObservationZone> {
        match self {
            ZoneSpec::Cylinder{radius} => Box::new( Cylinder{ center: point, radius: *radius }),

            ZoneSpec::Line{length} => {
                // start lines open towards the first leg, finish lines away from the last one
                let direction = match (prev, next) {
                    (_, Some(next)) => point.bearing_to(&next),
                    (Some(prev), None) => prev.bearing_to(&point),
                    (None, None) => 0.0
                };
                Box::new( Line{ center: point, length: *length, direction })
            }

            ZoneSpec::Sector{radius, half_angle, inner_radius, orientation} => {
                let away_from = |other: Option<GeoPoint>| other.map( |o| normalize_360( point.bearing_to(&o) + 180.0));

                let direction = match orientation {
                    SectorOrientation::Fixed(deg) => normalize_360(*deg),
                    SectorOrientation::Symmetric => symmetric_direction( point, prev, next),
                    SectorOrientation::ToNext => away_from(next).or_else( || away_from(prev)).unwrap_or(0.0),
                    SectorOrientation::ToPrevious => away_from(prev).or_else( || away_from(next)).unwrap_or(0.0),
                    SectorOrientation::ToStart => away_from( Some(start)).unwrap_or(0.0),
                };

                Box::new( Sector{ center: point, radius: *radius, half_angle: *half_angle, inner_radius: *inner_radius, direction })
            }
        }
    }

    /// map the zone definition of an L record. A zero R1 means the file does not define
    /// the geometry, which gets us the `fallback`
    pub fn from_override (oz: &ObservationZoneOverride, fallback: &ZoneSpec)->ZoneSpec {
        if oz.r1 <= 0.0 {
            fallback.clone()

        } else if oz.line {
            ZoneSpec::line( 2.0 * oz.r1)

        } else if oz.a1 >= 180.0 && oz.r2 <= 0.0 {
            ZoneSpec::cylinder( oz.r1)

        } else {
            let orientation = match oz.style {
                1 => SectorOrientation::Symmetric,
                2 => SectorOrientation::ToNext,
                3 => SectorOrientation::ToPrevious,
                4 => SectorOrientation::ToStart,
                _ => SectorOrientation::Fixed(oz.a12)
            };
            ZoneSpec::sector( oz.r1, oz.a1, oz.r2.max(0.0), orientation)
        }
    }
}

/// outward bisector of the angle between the directions to the previous and the next point
fn symmetric_direction (point: GeoPoint, prev: Option<GeoPoint>, next: Option<GeoPoint>)->f64 {
    match (prev, next) {
        (Some(prev), Some(next)) => {
            let b1 = point.bearing_to(&prev).to_radians();
            let b2 = point.bearing_to(&next).to_radians();
            let x = b1.sin() + b2.sin();
            let y = b1.cos() + b2.cos();

            if x.abs() < 1e-9 && y.abs() < 1e-9 { // straight leg
                normalize_360( b1.to_degrees() + 90.0)
            } else {
                normalize_360( x.atan2(y).to_degrees() + 180.0)
            }
        }
        (Some(other), None) | (None, Some(other)) => normalize_360( point.bearing_to(&other) + 180.0),
        (None, None) => 0.0
    }
}
