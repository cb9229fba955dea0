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

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_igc::{parse_file, ParseOptions};
use odin_task::{load_config, score_flight, Event, ScoringResult, TaskConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "score the declared racing task of an IGC flight log")]
pub struct Args {
    /// ignore malformed records in the IGC file
    #[arg(short,long)]
    pub lenient: bool,

    /// print the result as JSON
    #[arg(short,long)]
    pub json: bool,

    /// RON file with default observation zones
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// the IGC file to score
    pub file: PathBuf,
}

fn main()->Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init();

    let args = Args::parse();

    let config: TaskConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => TaskConfig::default()
    };
    let opts = ParseOptions{ lenient: args.lenient };

    let doc = parse_file( &args.file, &opts)?;
    let result = score_flight( &doc, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty( &result)?);
    } else {
        print_result( &result);
    }

    Ok(())
}

fn print_result (result: &ScoringResult) {
    println!("completed: {}", result.completed);
    println!("distance:  {:.2} km", result.distance_km());
    match result.time_secs() {
        Some(secs) => println!("time:      {:02}:{:02}:{:02}", (secs / 3600.0) as u64, ((secs % 3600.0) / 60.0) as u64, (secs % 60.0) as u64),
        None => println!("time:      -")
    }
    match result.speed_kmh() {
        Some(v) => println!("speed:     {v:.2} km/h"),
        None => println!("speed:     -")
    }

    println!("path:");
    for e in &result.path {
        let label = match e {
            Event::Start{..} => "start".to_string(),
            Event::Turn{index,..} => format!("turnpoint {index}"),
            Event::Finish{..} => "finish".to_string(),
        };
        println!("  {:<12} {}", label, e.fix().timestamp);
    }

    if let Some(fix) = &result.max_distance_fix {
        println!("best position: {fix}");
    }
}
