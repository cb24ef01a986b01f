//! Passenger request model.
//!
//! A request is a pickup/drop-off demand: a group of passengers of a given
//! total weight appears at an origin floor at some instant and wants to
//! reach a destination floor. Trip progress is an explicit state machine
//! rather than nullable timestamps, so a destination arrival without an
//! origin arrival is unrepresentable.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Progress of a request through its trip.
///
/// States only advance: `Pending → EnRoute → Boarded → Delivered`.
/// Each transition records the timestamp at which it happened; timestamps
/// of earlier transitions are carried forward so a delivered request holds
/// its full timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TripProgress {
    /// Waiting; no elevator has reached the origin floor yet.
    Pending,
    /// An elevator has arrived at the origin floor and opened its doors.
    EnRoute {
        /// When the car reached the origin floor (s).
        origin_arrival: f64,
    },
    /// Boarding complete; the car is carrying the passengers.
    Boarded {
        /// When the car reached the origin floor (s).
        origin_arrival: f64,
        /// When boarding completed (s).
        pickup: f64,
    },
    /// The car has reached the destination floor.
    Delivered {
        /// When the car reached the origin floor (s).
        origin_arrival: f64,
        /// When boarding completed (s).
        pickup: f64,
        /// When the car reached the destination floor (s).
        destination_arrival: f64,
    },
}

/// A pickup/drop-off demand made known at `arrival_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: u32,
    /// Pickup floor (1-based).
    pub origin: u8,
    /// Drop-off floor (1-based).
    pub destination: u8,
    /// Total weight boarding at the origin (kg).
    pub load_kg: f64,
    /// Instant the request becomes known (s).
    pub arrival_time: f64,
    /// Trip progress, written only by the simulator.
    pub progress: TripProgress,
}

impl Request {
    /// Creates a pending request.
    pub fn new(id: u32, origin: u8, destination: u8, load_kg: f64, arrival_time: f64) -> Self {
        Self {
            id,
            origin,
            destination,
            load_kg,
            arrival_time,
            progress: TripProgress::Pending,
        }
    }

    /// Travel direction from origin to destination (`Up` on equal floors).
    pub fn direction(&self) -> Direction {
        Direction::of(self.origin, self.destination)
    }

    /// Whether the request has reached its destination.
    pub fn is_served(&self) -> bool {
        matches!(self.progress, TripProgress::Delivered { .. })
    }

    /// When the car reached the origin floor, if it has.
    pub fn origin_arrival_time(&self) -> Option<f64> {
        match self.progress {
            TripProgress::Pending => None,
            TripProgress::EnRoute { origin_arrival }
            | TripProgress::Boarded { origin_arrival, .. }
            | TripProgress::Delivered { origin_arrival, .. } => Some(origin_arrival),
        }
    }

    /// When boarding completed, if it has.
    pub fn pickup_time(&self) -> Option<f64> {
        match self.progress {
            TripProgress::Pending | TripProgress::EnRoute { .. } => None,
            TripProgress::Boarded { pickup, .. } | TripProgress::Delivered { pickup, .. } => {
                Some(pickup)
            }
        }
    }

    /// When the car reached the destination floor, if it has.
    pub fn destination_arrival_time(&self) -> Option<f64> {
        match self.progress {
            TripProgress::Delivered {
                destination_arrival,
                ..
            } => Some(destination_arrival),
            _ => None,
        }
    }

    /// Time spent waiting at the origin floor, floored at 0.
    ///
    /// `None` until an elevator reaches the origin.
    pub fn wait_time(&self) -> Option<f64> {
        self.origin_arrival_time()
            .map(|t| (t - self.arrival_time).max(0.0))
    }

    /// Time spent inside the cab, floored at 0. `None` until delivered.
    pub fn in_cab_time(&self) -> Option<f64> {
        match self.progress {
            TripProgress::Delivered {
                origin_arrival,
                destination_arrival,
                ..
            } => Some((destination_arrival - origin_arrival).max(0.0)),
            _ => None,
        }
    }

    /// Marks the car's arrival at the origin floor.
    ///
    /// No-op unless the request is still `Pending`.
    pub fn mark_origin_arrival(&mut self, time: f64) {
        if matches!(self.progress, TripProgress::Pending) {
            self.progress = TripProgress::EnRoute {
                origin_arrival: time,
            };
        }
    }

    /// Marks boarding complete. No-op unless the request is `EnRoute`.
    pub fn mark_pickup(&mut self, time: f64) {
        if let TripProgress::EnRoute { origin_arrival } = self.progress {
            self.progress = TripProgress::Boarded {
                origin_arrival,
                pickup: time,
            };
        }
    }

    /// Marks arrival at the destination. No-op unless the request is `Boarded`.
    pub fn mark_destination_arrival(&mut self, time: f64) {
        if let TripProgress::Boarded {
            origin_arrival,
            pickup,
        } = self.progress
        {
            self.progress = TripProgress::Delivered {
                origin_arrival,
                pickup,
                destination_arrival: time,
            };
        }
    }
}
