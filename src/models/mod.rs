//! Domain models and physical engines.
//!
//! Data types (`Request`, `ElevatorState`) plus the three physical models
//! that turn a trip into time and energy:
//!
//! | Engine | Answers |
//! |--------|---------|
//! | `Kinematics` | How long does a loaded car take between two floors? |
//! | `Energy` | What does a segment or an idle interval cost in joules? |
//! | `Temporal` | How long do the doors stay open at a stop? |

mod elevator;
mod energy;
mod kinematics;
mod request;
mod temporal;

pub use elevator::{Direction, ElevatorState};
pub use energy::Energy;
pub use kinematics::Kinematics;
pub use request::{Request, TripProgress};
pub use temporal::Temporal;
