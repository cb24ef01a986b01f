//! Elevator (car) state.

use serde::{Deserialize, Serialize};

use super::Request;

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Moving toward higher floors.
    Up,
    /// Moving toward lower floors.
    Down,
    /// Parked.
    #[default]
    Idle,
}

impl Direction {
    /// Direction of a trip from `from` to `to`.
    ///
    /// Equal floors resolve to `Up`, which fixes the sign convention for
    /// zero-distance segments elsewhere.
    pub fn of(from: u8, to: u8) -> Self {
        if to < from {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// A single elevator car and its committed work.
///
/// `queue` holds requests in service order as decided by a dispatch
/// strategy; only a strategy may reorder it. `served` accumulates every
/// request ever assigned and is what metric aggregation reads after the
/// simulator has stamped trip progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevatorState {
    /// Unique elevator identifier.
    pub id: u32,
    /// Current floor (1-based).
    pub floor: u8,
    /// Current cabin load (kg). Never exceeds the configured capacity.
    pub load_kg: f64,
    /// Current travel direction.
    pub direction: Direction,
    /// Requests committed for service, in order.
    pub queue: Vec<Request>,
    /// All requests ever assigned to this elevator.
    pub served: Vec<Request>,
}

impl ElevatorState {
    /// Creates an idle, empty elevator parked at `floor`.
    pub fn new(id: u32, floor: u8) -> Self {
        Self {
            id,
            floor,
            load_kg: 0.0,
            direction: Direction::Idle,
            queue: Vec::new(),
            served: Vec::new(),
        }
    }

    /// Clears committed work. Called by strategies before assignment.
    pub fn reset_assignments(&mut self) {
        self.queue.clear();
        self.served.clear();
    }

    /// Appends a request to the service queue and the served list.
    pub fn assign(&mut self, request: Request) {
        self.queue.push(request.clone());
        self.served.push(request);
    }
}
