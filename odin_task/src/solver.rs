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

//! scoring of racing tasks according to the FAI Sporting Code Section 3 Annex A (SC3a).
//! The solver replays a fix sequence and records start, turn and finish events, from which we
//! compute the marking distance, time and speed

use std::cmp::Ordering;
use serde::Serialize;
use tracing::{debug, info};
use uom::si::{
    f64::{Length, Time, Velocity},
    length::{kilometer, meter},
    time::second,
    velocity::kilometer_per_hour,
};

use odin_igc::FlightDocument;
use odin_igc::records::Fix;

use crate::errors::{OdinTaskError, Result};
use crate::task::{RacingTask, TaskConfig};

#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(tag = "type")]
pub enum Event {
    Start { fix: Fix },
    Turn { index: usize, fix: Fix },
    Finish { fix: Fix },
}

impl Event {
    pub fn fix (&self)->&Fix {
        match self {
            Event::Start{fix} | Event::Turn{fix,..} | Event::Finish{fix} => fix
        }
    }

    pub fn is_start (&self)->bool { matches!( self, Event::Start{..}) }
    pub fn is_finish (&self)->bool { matches!( self, Event::Finish{..}) }
    pub fn turn_index (&self)->Option<usize> {
        if let Event::Turn{index,..} = self { Some(*index) } else { None }
    }
}

#[derive(Debug,Clone,Serialize)]
pub struct ScoringResult {
    pub completed: bool,
    pub path: Vec<Event>,
    /// marking time (finishers only)
    pub time: Option<Time>,
    /// marking distance
    pub distance: Length,
    /// marking speed (finishers only)
    pub speed: Option<Velocity>,
    /// where the best partial distance was achieved
    pub max_distance_fix: Option<Fix>,
}

impl ScoringResult {
    pub fn distance_km (&self)->f64 { self.distance.get::<kilometer>() }
    pub fn time_secs (&self)->Option<f64> { self.time.map( |t| t.get::<second>()) }
    pub fn speed_kmh (&self)->Option<f64> { self.speed.map( |v| v.get::<kilometer_per_hour>()) }
}

/// one candidate sequence of events starting with a Start
#[derive(Debug,Clone)]
struct EventPath {
    path: Vec<Event>,
    time: Option<f64>, // seconds from start to finish
}

pub struct RacingTaskSolver {
    task: RacingTask,
    events: Vec<Event>,
    last_fix: Option<Fix>,
    max_distance: f64, // meters
    max_distance_fix: Option<Fix>,
}

impl RacingTaskSolver {
    pub fn new (task: RacingTask)->Self {
        RacingTaskSolver { task, events: Vec::new(), last_fix: None, max_distance: 0.0, max_distance_fix: None }
    }

    pub fn task (&self)->&RacingTask { &self.task }
    pub fn events (&self)->&[Event] { self.events.as_slice() }

    pub fn task_started (&self)->bool { self.events.iter().any( |e| e.is_start()) }
    pub fn task_finished (&self)->bool { self.events.iter().any( |e| e.is_finish()) }

    pub fn max_distance (&self)->Length { Length::new::<meter>( self.max_distance) }
    pub fn max_distance_fix (&self)->Option<&Fix> { self.max_distance_fix.as_ref() }

    pub fn consume<'a> (&mut self, fixes: impl IntoIterator<Item=&'a Fix>) {
        for fix in fixes { self.update(fix) }
    }

    pub fn update (&mut self, fix: &Fix) {
        if let Some(last_fix) = self.last_fix.take() {
            self.update_pair( &last_fix, fix);
        }
        self.last_fix = Some(fix.clone());
    }

    fn has_turn (&self, index: usize)->bool {
        self.events.iter().any( |e| e.turn_index() == Some(index))
    }

    fn record (&mut self, event: Event) {
        debug!("{} at {}", event_name(&event), event.fix().timestamp);
        self.events.push(event);
    }

    fn update_pair (&mut self, last_fix: &Fix, fix: &Fix) {
        if self.task.check_start( last_fix, fix) {
            self.record( Event::Start{ fix: fix.clone() });
        }

        // SC3a 6.3.1b: a turnpoint is achieved by entering its observation zone
        let finish_index = self.task.finish_index();
        for i in 1..finish_index {
            let prev_reached = if i == 1 { self.task_started() } else { self.has_turn(i-1) };
            if prev_reached && self.task.check_turnpoint( i, last_fix, fix) {
                self.record( Event::Turn{ index: i, fix: fix.clone() });
            }
        }

        if self.has_turn( finish_index - 1) && self.task.check_finish( last_fix, fix) {
            self.record( Event::Finish{ fix: fix.clone() });
        }

        if self.task_finished() || !self.task_started() {
            return
        }

        // SC3a 6.3.1d (ii),(iii): completed legs plus what was achieved on the current one (never negative)
        let leg_index = self.events.iter().filter_map( |e| e.turn_index()).max().unwrap_or(0);
        let legs = self.task.legs();
        let finished_legs: f64 = legs[..leg_index].iter().map( |l| l.get::<meter>()).sum();
        let next_point = self.task.zone( leg_index + 1).center();
        let to_next = self.task.measure_distance( fix, &next_point).get::<meter>();
        let current_leg = (legs[leg_index].get::<meter>() - to_next).max(0.0);

        let distance = finished_legs + current_leg;
        if distance > self.max_distance {
            self.max_distance = distance;
            self.max_distance_fix = Some(fix.clone());
        }
    }

    pub fn result (&self)->ScoringResult {
        // SC3a 6.3.1b: completed is valid start, all turnpoints in sequence and finish.
        // Finish events are only recorded after the last turnpoint so this is all we need to check
        let completed = self.task_finished();

        // SC3a 6.3.1d (i): marking distance of completed tasks is the task distance
        let distance = if completed { self.task.distance() } else { self.max_distance() };

        // SC3a 6.3.1d (iv): marking time is from the most favorable valid start to the finish
        let mut paths: Vec<EventPath> = self.events.iter().enumerate()
            .filter( |(_,e)| e.is_start())
            .map( |(i,_)| path_for_start( &self.events, i, self.task.num_turnpoints()))
            .collect();
        paths.sort_by( compare_paths);
        let best = paths.into_iter().next().unwrap_or( EventPath{ path: Vec::new(), time: None });

        let time = if completed { best.time.map( |t| Time::new::<second>(t)) } else { None };

        // SC3a 6.3.1d (v)
        let speed = match (completed, best.time) {
            (true, Some(t)) if t > 0.0 => {
                Some( Velocity::new::<kilometer_per_hour>( distance.get::<kilometer>() / (t / 3600.0)))
            }
            _ => None
        };

        ScoringResult {
            completed,
            path: best.path,
            time,
            distance,
            speed,
            max_distance_fix: if completed { None } else { self.max_distance_fix.clone() },
        }
    }
}

fn event_name (e: &Event)->String {
    match e {
        Event::Start{..} => "start".to_string(),
        Event::Turn{index,..} => format!("turn {index}"),
        Event::Finish{..} => "finish".to_string(),
    }
}

/// walk the events after the start at `start_idx`, collecting turns in sequence. A finish only
/// counts once all turnpoints are in the path
fn path_for_start (events: &[Event], start_idx: usize, num_turnpoints: usize)->EventPath {
    let start = &events[start_idx];
    let mut path = vec![ start.clone() ];

    for e in &events[start_idx+1..] {
        match e {
            Event::Turn{index,..} if *index == path.len() => path.push( e.clone()),
            Event::Finish{fix} if path.len() == num_turnpoints + 1 => {
                let secs = (fix.timestamp - start.fix().timestamp).num_milliseconds() as f64 / 1000.0;
                path.push( e.clone());
                return EventPath{ path, time: Some(secs) }
            }
            _ => {}
        }
    }

    EventPath{ path, time: None }
}

/// finished paths first (fastest first), then unfinished ones with the most events first
fn compare_paths (a: &EventPath, b: &EventPath)->Ordering {
    match (a.time, b.time) {
        (Some(ta), Some(tb)) => ta.partial_cmp(&tb).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.path.len().cmp( &a.path.len())
    }
}

/// decode-to-score convenience: build the declared task of `doc` and score its fixes
pub fn score_flight (doc: &FlightDocument, config: &TaskConfig)->Result<ScoringResult> {
    let decl = doc.task.as_ref().ok_or( OdinTaskError::NoTaskDeclared)?;
    let task = RacingTask::from_declaration( decl, &doc.oz_records, config)?;

    let mut solver = RacingTaskSolver::new(task);
    solver.consume( &doc.fixes);
    let result = solver.result();

    info!("scored flight of {}: completed={}, distance={:.1}km", doc.date, result.completed, result.distance_km());
    Ok(result)
}
