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

//! flight recorder manufacturers as listed in the IGC technical specification (three character IDs)

pub const UNKNOWN_MANUFACTURER: &str = "Unknown manufacturer";

static MANUFACTURERS: &[(&str,&str)] = &[
    ("ACT", "Aircotec"),
    ("CAM", "Cambridge Aero Instruments"),
    ("CNI", "ClearNav Instruments"),
    ("DSX", "Data Swan/DSX"),
    ("EWA", "EW Avionics"),
    ("FIL", "Filser"),
    ("FLA", "Flarm"),
    ("FLY", "Flytech"),
    ("GCS", "Garrecht"),
    ("IMI", "IMI Gliding Equipment"),
    ("LGS", "Logstream"),
    ("LXN", "LX Navigation"),
    ("LXV", "LXNAV"),
    ("NAV", "Naviter"),
    ("NKL", "Nielsen Kellerman"),
    ("NTE", "New Technologies"),
    ("PES", "Peschges"),
    ("PFE", "PressFinish Electronics"),
    ("PRT", "Print Technik"),
    ("SCH", "Scheffel"),
    ("SDI", "Streamline Data Instruments"),
    ("TRI", "Triadis Engineering"),
    ("WES", "Westerboer"),
    ("XCS", "XCSoar"),
    ("XCT", "XCTrack"),
    ("XLK", "LK8000"),
    ("XSY", "SeeYou Navigator"),
    ("XTR", "XCTrack"),
    ("ZAN", "Zander"),
];

/// map a three character manufacturer ID to its name. This never fails, unknown IDs map to `UNKNOWN_MANUFACTURER`
pub fn lookup_manufacturer (code: &str)->&'static str {
    MANUFACTURERS.iter()
        .find( |(id,_)| id.eq_ignore_ascii_case(code))
        .map( |(_,name)| *name)
        .unwrap_or( UNKNOWN_MANUFACTURER)
}

pub fn is_known_manufacturer (code: &str)->bool {
    lookup_manufacturer(code) != UNKNOWN_MANUFACTURER
}
