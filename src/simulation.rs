//! Discrete-event replay of committed queues.
//!
//! Takes a fleet whose queues a strategy has populated and replays each
//! elevator's queue in service order, stamping trip progress on every
//! request and totalling energy. Each elevator replays independently:
//! queues are disjoint and an elevator serves one request at a time, so
//! the replay is a pure deterministic function of the assignment.
//!
//! The simulator is the sole writer of trip progress; after `run` returns,
//! the elevators' `served` lists carry the stamped requests for metric
//! aggregation.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{Direction, ElevatorState, Energy, Kinematics, Request, Temporal};

/// Result of replaying a fleet's committed queues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Latest finish time over the fleet (s).
    pub system_time: f64,
    /// Traction plus standby energy over all busy intervals (J).
    pub total_energy: f64,
    /// Every request served, stamped with its trip timeline.
    pub served: Vec<Request>,
    /// Share of `total_energy` spent approaching pickups empty (J).
    pub emptyload_energy: f64,
}

/// Deterministic queue replayer.
#[derive(Debug, Clone)]
pub struct Simulator {
    kinematics: Kinematics,
    energy: Energy,
    temporal: Temporal,
    floor_height: f64,
}

impl Simulator {
    /// Creates a simulator from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            kinematics: Kinematics::new(config),
            energy: Energy::new(config),
            temporal: Temporal::new(config),
            floor_height: config.floor_height,
        }
    }

    /// Replays every elevator's queue, stamping trip progress in place.
    pub fn run(&self, elevators: &mut [ElevatorState]) -> SimulationOutcome {
        let mut system_time = 0.0f64;
        let mut total_energy = 0.0;
        let mut emptyload_energy = 0.0;
        let mut served = Vec::new();

        for elev in elevators.iter_mut() {
            let mut clock = 0.0f64;
            let mut floor = elev.floor;
            let queue = std::mem::take(&mut elev.queue);
            let mut replayed = Vec::with_capacity(queue.len());

            for mut req in queue {
                // Empty approach to the pickup floor.
                let travel_to_origin = self.kinematics.travel_time(0.0, floor, req.origin);
                if floor != req.origin {
                    let distance =
                        (f64::from(req.origin) - f64::from(floor)).abs() * self.floor_height;
                    let leg = self.energy.segment_energy(
                        0.0,
                        distance,
                        Direction::of(floor, req.origin),
                    ) + self.energy.standby_energy(travel_to_origin);
                    emptyload_energy += leg;
                    total_energy += leg;
                    elev.direction = Direction::of(floor, req.origin);
                }
                let car_arrival = clock + travel_to_origin;
                req.mark_origin_arrival(car_arrival);

                // Doors stay open from the car's arrival until boarding
                // completes; if the car is early it idles for the passenger.
                let service_start = car_arrival.max(req.arrival_time);
                let dwell = self.temporal.hold_time(req.load_kg, 0.0);
                let pickup = service_start + dwell;
                total_energy += self.energy.standby_energy(pickup - car_arrival);
                req.mark_pickup(pickup);

                // Loaded leg to the destination.
                let travel_to_dest =
                    self.kinematics
                        .travel_time(req.load_kg, req.origin, req.destination);
                if req.origin != req.destination {
                    let distance = (f64::from(req.destination) - f64::from(req.origin)).abs()
                        * self.floor_height;
                    total_energy += self.energy.segment_energy(
                        req.load_kg,
                        distance,
                        Direction::of(req.origin, req.destination),
                    );
                    total_energy += self.energy.standby_energy(travel_to_dest);
                    elev.direction = Direction::of(req.origin, req.destination);
                    elev.load_kg = req.load_kg;
                }
                clock = pickup + travel_to_dest;
                req.mark_destination_arrival(clock);

                floor = req.destination;
                elev.load_kg = 0.0;
                replayed.push(req);
            }

            elev.floor = floor;
            elev.direction = Direction::Idle;
            elev.served = replayed.clone();
            elev.queue = replayed.clone();
            served.extend(replayed);
            system_time = system_time.max(clock);
        }

        SimulationOutcome {
            system_time,
            total_energy,
            served,
            emptyload_energy,
        }
    }
}
