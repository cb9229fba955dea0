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
use odin_igc::{load_config, parse_file, FlightDocument, ParseOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "decode an IGC flight log and print a summary or the JSON document")]
pub struct Args {
    /// keep going on malformed records (they are reported in the errors list)
    #[arg(short,long)]
    pub lenient: bool,

    /// print the whole document as JSON
    #[arg(short,long)]
    pub json: bool,

    /// RON file with parse options (overridden by --lenient)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// the IGC file to read
    pub file: PathBuf,
}

fn main()->Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init();

    let args = Args::parse();

    let mut opts: ParseOptions = match &args.config {
        Some(path) => load_config(path)?,
        None => ParseOptions::default()
    };
    if args.lenient { opts.lenient = true }

    let doc = parse_file( &args.file, &opts)?;

    if args.json {
        println!("{}", doc.to_json()?);
    } else {
        print_summary( &doc);
    }

    Ok(())
}

fn print_summary (doc: &FlightDocument) {
    println!("date:         {}", doc.date);
    if let Some(n) = doc.num_flight { println!("flight:       {n}"); }
    println!("logger:       {} {}", doc.logger_manufacturer, doc.logger_id.as_deref().unwrap_or(""));
    if let Some(s) = &doc.logger_type { println!("logger type:  {s}"); }
    if let Some(s) = &doc.pilot { println!("pilot:        {s}"); }
    if let Some(s) = &doc.copilot { println!("copilot:      {s}"); }
    if let Some(s) = &doc.glider_type { println!("glider:       {s}"); }
    if let Some(s) = &doc.registration { println!("registration: {s}"); }
    if let Some(s) = &doc.callsign { println!("callsign:     {s}"); }

    println!("fixes:        {}", doc.fixes.len());
    if let (Some(first), Some(last)) = (doc.fixes.first(), doc.fixes.last()) {
        println!("  first:      {first}");
        println!("  last:       {last}");
    }
    println!("data records: {}", doc.data_records.len());

    if let Some(task) = &doc.task {
        println!("task:         {} turnpoints, {} points", task.num_turnpoints, task.points.len());
        for p in &task.points {
            println!("  {:>10.5} {:>10.5}  {}", p.latitude, p.longitude, p.name.as_deref().unwrap_or(""));
        }
    }
    if !doc.oz_records.is_empty() {
        println!("zone overrides: {}", doc.oz_records.len());
    }

    if !doc.errors.is_empty() {
        println!("errors:");
        for e in &doc.errors { println!("  {e}"); }
    }
}
