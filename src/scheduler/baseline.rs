//! Greedy FIFO baseline strategy.
//!
//! Serves requests strictly in arrival order; each request goes to the
//! elevator that would finish it earliest given its projected position.
//! No lookahead, no batching, no cost model — the yardstick the
//! rolling-horizon scheduler is measured against.

use crate::config::Config;
use crate::models::{ElevatorState, Kinematics, Request, Temporal};
use crate::scheduler::DispatchStrategy;

/// FIFO nearest-available assignment.
#[derive(Debug, Clone)]
pub struct BaselineScheduler {
    kinematics: Kinematics,
    temporal: Temporal,
}

impl BaselineScheduler {
    /// Creates a baseline scheduler from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            kinematics: Kinematics::new(config),
            temporal: Temporal::new(config),
        }
    }

    /// Completion time if `request` were appended to a plan at
    /// (`floor`, `free_time`).
    fn finish_time(&self, floor: u8, free_time: f64, request: &Request) -> f64 {
        let travel_to_origin = self.kinematics.travel_time(0.0, floor, request.origin);
        let start_service = (free_time + travel_to_origin).max(request.arrival_time);
        let dwell = self.temporal.hold_time(request.load_kg, 0.0);
        let travel_to_dest =
            self.kinematics
                .travel_time(request.load_kg, request.origin, request.destination);
        start_service + dwell + travel_to_dest
    }
}

impl DispatchStrategy for BaselineScheduler {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn assign(&self, requests: &[Request], elevators: &mut [ElevatorState]) {
        if elevators.is_empty() {
            return;
        }
        for elev in elevators.iter_mut() {
            elev.reset_assignments();
        }

        let mut ordered: Vec<Request> = requests.to_vec();
        ordered.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));

        let mut floors: Vec<u8> = elevators.iter().map(|e| e.floor).collect();
        let mut free_times: Vec<f64> = vec![0.0; elevators.len()];

        for req in ordered {
            // First elevator on ties keeps the choice deterministic.
            let mut best_idx = 0;
            let mut best_finish = f64::INFINITY;
            for idx in 0..elevators.len() {
                let finish = self.finish_time(floors[idx], free_times[idx], &req);
                if finish < best_finish {
                    best_finish = finish;
                    best_idx = idx;
                }
            }

            floors[best_idx] = req.destination;
            free_times[best_idx] = best_finish;
            elevators[best_idx].assign(req);
        }
    }
}
