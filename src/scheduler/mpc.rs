//! Rolling-horizon (MPC-lite) scheduler.
//!
//! Repeatedly picks the cheapest (request, elevator) pair inside a bounded
//! lookahead window instead of optimizing the full backlog at once:
//!
//! 1. Window = earliest unassigned arrival + `lookahead_window`; candidates
//!    are the in-window requests, padded with the next-earliest up to
//!    `max_batch`.
//! 2. Every (candidate, elevator) pair gets a marginal cost for appending
//!    the request to that elevator's projected plan.
//! 3. The minimum-cost pair is committed and the plan advances; ties break
//!    by earlier finish, then smaller passenger time, and a tiny
//!    finish-proportional bias keeps the ordering strict.
//!
//! The per-candidate estimate weighs raw passenger time linearly; it does
//! not apply the super-linear wait penalty that the objective evaluator
//! charges afterwards. Unifying the two changes assignments materially, so
//! the estimator is kept deliberately simple and fast.

use crate::config::Config;
use crate::models::{Direction, ElevatorState, Energy, Kinematics, Request, Temporal};
use crate::scheduler::DispatchStrategy;

const EPS: f64 = 1e-9;
const FINISH_BIAS: f64 = 1e-6;

/// Projected position of one elevator after its planned requests.
#[derive(Debug, Clone, Copy)]
struct PlanState {
    floor: u8,
    time: f64,
}

/// Marginal cost of appending one request to one plan.
#[derive(Debug, Clone, Copy)]
struct Estimate {
    cost: f64,
    finish_time: f64,
    passenger_time: f64,
}

/// Rolling-horizon assignment strategy.
#[derive(Debug, Clone)]
pub struct MpcScheduler {
    kinematics: Kinematics,
    energy: Energy,
    temporal: Temporal,
    floor_height: f64,
    weight_time: f64,
    weight_energy: f64,
    lookahead_window: f64,
    max_batch: usize,
}

impl MpcScheduler {
    /// Creates a scheduler from the run configuration.
    ///
    /// A non-positive batch cap degrades to `max(3 * elevators, 1)`.
    pub fn new(config: &Config) -> Self {
        let max_batch = if config.max_batch == 0 {
            (config.elevator_count * 3).max(1)
        } else {
            config.max_batch
        };
        Self {
            kinematics: Kinematics::new(config),
            energy: Energy::new(config),
            temporal: Temporal::new(config),
            floor_height: config.floor_height,
            weight_time: config.weight_time,
            weight_energy: config.weight_energy,
            lookahead_window: config.lookahead_window,
            max_batch,
        }
    }

    /// Marginal cost of serving `request` next from `plan`.
    ///
    /// Empty travel to the origin, boarding no earlier than the request's
    /// arrival, dwell, then loaded travel to the destination. Energy counts
    /// traction plus standby for each non-degenerate leg and standby for
    /// the dwell.
    fn estimate_incremental_cost(&self, plan: PlanState, request: &Request) -> Estimate {
        let travel_to_origin = self.kinematics.travel_time(0.0, plan.floor, request.origin);
        let arrival_at_origin = plan.time + travel_to_origin;
        let start_service = arrival_at_origin.max(request.arrival_time);
        let dwell = self.temporal.hold_time(request.load_kg, 0.0);
        let depart_time = start_service + dwell;
        let travel_to_dest =
            self.kinematics
                .travel_time(request.load_kg, request.origin, request.destination);
        let finish_time = depart_time + travel_to_dest;

        let passenger_time = finish_time - request.arrival_time;

        let mut energy = 0.0;
        if plan.floor != request.origin {
            let distance =
                (f64::from(request.origin) - f64::from(plan.floor)).abs() * self.floor_height;
            energy += self.energy.segment_energy(
                0.0,
                distance,
                Direction::of(plan.floor, request.origin),
            );
            energy += self.energy.standby_energy(travel_to_origin);
        }
        energy += self.energy.standby_energy(dwell);
        if request.origin != request.destination {
            let distance = (f64::from(request.destination) - f64::from(request.origin)).abs()
                * self.floor_height;
            energy += self.energy.segment_energy(
                request.load_kg,
                distance,
                Direction::of(request.origin, request.destination),
            );
            energy += self.energy.standby_energy(travel_to_dest);
        }

        // The finish-proportional bias keeps equal-cost choices strictly
        // ordered so the selection cannot oscillate.
        let cost =
            self.weight_time * passenger_time + self.weight_energy * energy + FINISH_BIAS * finish_time;

        Estimate {
            cost,
            finish_time,
            passenger_time,
        }
    }

    /// In-window candidate indices, padded to the batch cap.
    fn candidate_indices(&self, unassigned: &[Request]) -> Vec<usize> {
        let window_limit = unassigned[0].arrival_time + self.lookahead_window;
        let mut candidates = Vec::new();
        for (idx, req) in unassigned.iter().enumerate() {
            if req.arrival_time <= window_limit || candidates.len() < self.max_batch {
                candidates.push(idx);
            }
            if candidates.len() >= self.max_batch {
                break;
            }
        }
        candidates
    }
}

impl DispatchStrategy for MpcScheduler {
    fn name(&self) -> &'static str {
        "mpc"
    }

    fn assign(&self, requests: &[Request], elevators: &mut [ElevatorState]) {
        if elevators.is_empty() {
            return;
        }
        for elev in elevators.iter_mut() {
            elev.reset_assignments();
        }
        if requests.is_empty() {
            return;
        }

        let mut unassigned: Vec<Request> = requests.to_vec();
        unassigned.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));

        let mut plans: Vec<PlanState> = elevators
            .iter()
            .map(|e| PlanState {
                floor: e.floor,
                time: 0.0,
            })
            .collect();

        while !unassigned.is_empty() {
            let candidates = self.candidate_indices(&unassigned);

            let mut best: Option<(usize, usize, Estimate)> = None;
            for &idx in &candidates {
                let req = &unassigned[idx];
                for (elev_idx, plan) in plans.iter().enumerate() {
                    let estimate = self.estimate_incremental_cost(*plan, req);
                    let better = match &best {
                        None => true,
                        Some((_, _, incumbent)) => {
                            estimate.cost < incumbent.cost - EPS
                                || ((estimate.cost - incumbent.cost).abs() <= EPS
                                    && estimate.finish_time < incumbent.finish_time - EPS)
                                || ((estimate.cost - incumbent.cost).abs() <= EPS
                                    && (estimate.finish_time - incumbent.finish_time).abs() <= EPS
                                    && estimate.passenger_time < incumbent.passenger_time)
                        }
                    };
                    if better {
                        best = Some((idx, elev_idx, estimate));
                    }
                }
            }

            match best {
                Some((idx, elev_idx, estimate)) => {
                    let req = unassigned.remove(idx);
                    plans[elev_idx].time = estimate.finish_time;
                    plans[elev_idx].floor = req.destination;
                    elevators[elev_idx].assign(req);
                }
                None => {
                    // No valid estimate this round: hand the first candidate
                    // to the least-busy elevator so the backlog always
                    // shrinks and the loop terminates.
                    let req = unassigned.remove(candidates[0]);
                    let elev_idx = plans
                        .iter()
                        .enumerate()
                        .min_by(|a, b| a.1.time.total_cmp(&b.1.time))
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    let estimate = self.estimate_incremental_cost(plans[elev_idx], &req);
                    plans[elev_idx].time = estimate.finish_time;
                    plans[elev_idx].floor = req.destination;
                    elevators[elev_idx].assign(req);
                }
            }
        }
    }
}
