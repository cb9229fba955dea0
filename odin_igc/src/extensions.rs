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

//! support for the self-describing tails of B and K records.
//! I and J records declare which additional fields follow the fixed part of B (fixes) and K (data samples)
//! records, e.g. `I023638FXA3940SIU` declares FXA at columns 36-38 and SIU at columns 39-40.
//! Column numbers in the declaration are 1-based and inclusive, we store zero-based byte offsets.

use std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::errors::{DecodeError, RecordKind, malformed};

lazy_static! {
    static ref RE_IJ: Regex = Regex::new(r"^[IJ]([0-9]{2})(?:[0-9]{4}[A-Z]{3})+").unwrap();
}

const FIELD_DECL_LEN: usize = 7;   // SSEECCC
const HEADER_LEN: usize = 3; // I/J + 2 digit count

/// where a named value is located within a fixed width record
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct ExtensionField {
    pub code: String,
    pub start: usize,
    pub length: usize,
}

impl ExtensionField {
    /// the raw value of this field in `line`. Lines that are too short yield what is left
    pub fn slice<'a> (&self, line: &'a str)->&'a str {
        let len = line.len();
        let start = self.start.min(len);
        let end = (self.start + self.length).min(len);
        line.get(start..end).unwrap_or("")
    }

    /// normalize integer values such as ENL to [0..1] based on the declared field length
    pub fn fraction (&self, raw: &str)->Option<f64> {
        if raw.is_empty() { return None }
        raw.trim().parse::<u64>().ok().map( |v| v as f64 / 10f64.powi( self.length as i32))
    }
}

/// the ordered list of extension fields declared by the last I or J record.
/// There is no merging - a new declaration replaces the whole table
#[derive(Debug,Clone,Default,PartialEq,Serialize)]
pub struct ExtensionTable {
    fields: Vec<ExtensionField>
}

impl ExtensionTable {
    pub fn new (fields: Vec<ExtensionField>)->Self { ExtensionTable{ fields } }

    /// parse an I or J record. `kind` is only used to tag errors
    pub fn parse (line: &str, kind: RecordKind, line_number: usize)->Result<Self,DecodeError> {
        let caps = RE_IJ.captures(line).ok_or_else( || malformed( kind, line_number, line))?;
        let n: usize = caps[1].parse().map_err( |_| malformed( kind, line_number, line))?;

        if line.len() < HEADER_LEN + n * FIELD_DECL_LEN {
            return Err( malformed( kind, line_number, line))
        }

        let mut fields = Vec::with_capacity(n);
        for i in 0..n {
            let offset = HEADER_LEN + i * FIELD_DECL_LEN;
            let decl = line.get( offset..offset+FIELD_DECL_LEN).ok_or_else( || malformed( kind, line_number, line))?;

            let first: usize = decl[0..2].parse().map_err( |_| malformed( kind, line_number, line))?;
            let last: usize = decl[2..4].parse().map_err( |_| malformed( kind, line_number, line))?;
            if first == 0 || last < first {
                return Err( malformed( kind, line_number, line))
            }

            fields.push( ExtensionField{ code: decl[4..7].to_string(), start: first - 1, length: last - first + 1 });
        }

        Ok( ExtensionTable{ fields } )
    }

    pub fn fields (&self)->&[ExtensionField] { self.fields.as_slice() }

    pub fn len (&self)->usize { self.fields.len() }
    pub fn is_empty (&self)->bool { self.fields.is_empty() }

    /// the first field declared with `code`
    pub fn get (&self, code: &str)->Option<&ExtensionField> {
        self.fields.iter().find( |f| f.code == code)
    }

    /// slice all declared fields out of `line`
    pub fn extract (&self, line: &str)->BTreeMap<String,String> {
        let mut values = BTreeMap::new();
        for f in &self.fields {
            values.insert( f.code.clone(), f.slice(line).to_string());
        }
        values
    }

    /// the [0..1] normalized value of field `code` in `line`, if declared and numeric
    pub fn fraction (&self, code: &str, line: &str)->Option<f64> {
        self.get(code).and_then( |f| f.fraction( f.slice(line)))
    }
}
