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

use std::fmt;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinIgcError>;

/// the record categories we decode. Used to tag decode errors
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub enum RecordKind {
    Metadata,             // A
    DateHeader,           // HFDTE
    TextHeader(&'static str), // HxPLT, HxGID ..
    Fix,                  // B
    DataSample,           // K
    FixExtensions,        // I
    DataExtensions,       // J
    TaskDeclaration,      // first C
    TaskPoint,            // subsequent C
    ObservationZone,      // LLXVOZ / LNAVOZN
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Metadata => write!(f, "A record"),
            RecordKind::DateHeader => write!(f, "DTE header"),
            RecordKind::TextHeader(code) => write!(f, "{code} header"),
            RecordKind::Fix => write!(f, "B record"),
            RecordKind::DataSample => write!(f, "K record"),
            RecordKind::FixExtensions => write!(f, "I record"),
            RecordKind::DataExtensions => write!(f, "J record"),
            RecordKind::TaskDeclaration => write!(f, "task declaration"),
            RecordKind::TaskPoint => write!(f, "task point declaration"),
            RecordKind::ObservationZone => write!(f, "observation zone record"),
        }
    }
}

/// per-line decode failures. These are values (not just errors) since lenient parsing
/// keeps them in the `errors` list of the resulting `FlightDocument`
#[derive(Error,Debug,Clone,PartialEq,Serialize)]
pub enum DecodeError {
    #[error("missing {missing} before {kind} at line {line_number}")]
    MissingMetadata { kind: RecordKind, missing: &'static str, line_number: usize },

    #[error("invalid {kind} at line {line_number}: {line}")]
    MalformedRecord { kind: RecordKind, line_number: usize, line: String },

    #[error("missing {missing} before {kind} at line {line_number}")]
    MissingExtensionTable { kind: RecordKind, missing: &'static str, line_number: usize },
}

impl DecodeError {
    pub fn line_number (&self)->usize {
        match self {
            DecodeError::MissingMetadata{line_number,..} => *line_number,
            DecodeError::MalformedRecord{line_number,..} => *line_number,
            DecodeError::MissingExtensionTable{line_number,..} => *line_number,
        }
    }

    pub fn kind (&self)->RecordKind {
        match self {
            DecodeError::MissingMetadata{kind,..} => *kind,
            DecodeError::MalformedRecord{kind,..} => *kind,
            DecodeError::MissingExtensionTable{kind,..} => *kind,
        }
    }
}

#[derive(Error,Debug)]
pub enum OdinIgcError {

    #[error("decode error {0}")]
    Decode( #[from] DecodeError),

    #[error("missing {0}")]
    MissingMetadata(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( #[from] ron::error::SpannedError),
}

pub fn malformed (kind: RecordKind, line_number: usize, line: &str)->DecodeError {
    DecodeError::MalformedRecord{ kind, line_number, line: line.to_string() }
}

pub fn missing_metadata (kind: RecordKind, missing: &'static str, line_number: usize)->DecodeError {
    DecodeError::MissingMetadata{ kind, missing, line_number }
}
