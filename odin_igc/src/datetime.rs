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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// how far (in seconds) a record time may go back before we assume it belongs to the next day
pub const MAX_BACKWARD_JITTER_SECS: i64 = 3600;

/// expand a two digit IGC year. Years starting with 8 or 9 are 19xx, everything else 20xx.
/// Note this is only valid up to 2079
pub fn expand_year (yy: &str)->Option<i32> {
    let y: i32 = yy.parse().ok()?;
    if yy.starts_with('8') || yy.starts_with('9') { Some(1900 + y) } else { Some(2000 + y) }
}

/// parse the DD MM YY fields of date headers and task declarations
pub fn parse_ddmmyy (dd: &str, mm: &str, yy: &str)->Option<NaiveDate> {
    let year = expand_year(yy)?;
    let month: u32 = mm.parse().ok()?;
    let day: u32 = dd.parse().ok()?;
    NaiveDate::from_ymd_opt( year, month, day)
}

pub fn parse_hhmmss (hh: &str, mm: &str, ss: &str)->Option<NaiveTime> {
    NaiveTime::from_hms_opt( hh.parse().ok()?, mm.parse().ok()?, ss.parse().ok()?)
}

pub fn utc_datetime (date: NaiveDate, time: NaiveTime)->DateTime<Utc> {
    NaiveDateTime::new( date, time).and_utc()
}

/// turns the bare time-of-day of B and K records into absolute times.
/// Records only carry HHMMSS, the date comes from the HFDTE header. Flights can cross midnight, which
/// we detect by comparing with the previous record time - anything more than an hour before that
/// is moved to the next day(s). Smaller backward steps are kept as they are (logger jitter)
#[derive(Debug,Clone)]
pub struct TimestampResolver {
    date: NaiveDate,
    prev: Option<DateTime<Utc>>,
}

impl TimestampResolver {
    pub fn new (date: NaiveDate)->Self {
        TimestampResolver { date, prev: None }
    }

    pub fn date (&self)->NaiveDate { self.date }

    /// a new date header changes the reference date but not the previous record time
    pub fn set_date (&mut self, date: NaiveDate) { self.date = date; }

    pub fn previous (&self)->Option<DateTime<Utc>> { self.prev }

    /// compute the absolute time without advancing the resolver
    pub fn peek (&self, time: NaiveTime)->DateTime<Utc> {
        let mut timestamp = utc_datetime( self.date, time);

        if let Some(prev) = self.prev {
            let earliest = prev - TimeDelta::seconds( MAX_BACKWARD_JITTER_SECS);
            while timestamp < earliest {
                timestamp += TimeDelta::days(1);
            }
        }
        timestamp
    }

    /// compute the absolute time and make it the reference for the next record
    pub fn resolve (&mut self, time: NaiveTime)->DateTime<Utc> {
        let timestamp = self.peek(time);
        self.prev = Some(timestamp);
        timestamp
    }
}
