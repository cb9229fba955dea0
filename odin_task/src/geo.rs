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

//! minimal spherical geometry for task scoring. Distances use the haversine formula on the
//! mean earth radius, which is what competition scoring rules are based on

use std::fmt;
use geo::{Bearing, Coord, Distance, Haversine, Point};
use serde::ser::{Serialize, Serializer, SerializeStruct};
use uom::si::{f64::Length, length::meter};

use odin_igc::records::{Fix, TaskPoint};

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// the absolute difference between two directions in [0..180] degrees
#[inline]
pub fn angle_between (a: f64, b: f64) -> f64 {
    normalize_180( a - b).abs()
}

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x: longitude, y: latitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), lat))
    }

    pub fn longitude_degrees (&self)->f64 { self.0.x() }
    pub fn latitude_degrees (&self)->f64 { self.0.y() }

    pub fn point (&self)->&Point { &self.0 }

    pub fn distance_to (&self, other: &GeoPoint)->Length {
        Length::new::<meter>( self.meters_to(other))
    }

    /// haversine distance in meters
    pub fn meters_to (&self, other: &GeoPoint)->f64 {
        Haversine.distance( self.0, other.0)
    }

    /// initial great circle course from self to other in [0..360) degrees (0: north, 90: east)
    pub fn bearing_to (&self, other: &GeoPoint)->f64 {
        normalize_360( Haversine.bearing( self.0, other.0))
    }

    /// planar (east,north) offset in meters of self relative to `origin`, preserving distance and
    /// bearing from `origin`. Only meaningful close to `origin`
    pub fn offset_from (&self, origin: &GeoPoint)->Coord {
        let d = origin.meters_to(self);
        if d == 0.0 { return Coord{ x: 0.0, y: 0.0 } }

        let b = origin.bearing_to(self).to_radians();
        Coord{ x: d * b.sin(), y: d * b.cos() }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.0.x(), self.0.y())
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.end()
    }
}

/// something that has a ground position
pub trait Located {
    fn position (&self)->GeoPoint;
}

impl Located for GeoPoint {
    fn position (&self)->GeoPoint { *self }
}

impl Located for Fix {
    fn position (&self)->GeoPoint { GeoPoint::from_lon_lat_degrees( self.longitude, self.latitude) }
}

impl Located for TaskPoint {
    fn position (&self)->GeoPoint { GeoPoint::from_lon_lat_degrees( self.longitude, self.latitude) }
}
