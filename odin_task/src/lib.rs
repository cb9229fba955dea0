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

//! scoring of racing tasks declared in IGC files

use std::{fs, path::Path};
use serde::de::DeserializeOwned;

pub mod errors;
use errors::Result;

pub mod geo;
pub mod zones;

pub mod task;
pub use task::{RacingTask, TaskConfig};

pub mod solver;
pub use solver::{Event, RacingTaskSolver, ScoringResult, score_flight};

/// read a RON config file
pub fn load_config<C: DeserializeOwned> (path: impl AsRef<Path>)->Result<C> {
    let bytes = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( &bytes)? )
}
