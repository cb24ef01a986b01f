//! Dispatch strategies.
//!
//! Every strategy implements the same capability: take a stream of
//! time-stamped requests and populate each elevator's service queue. The
//! variants differ only in how hard they look for a good assignment:
//!
//! | Strategy | Approach |
//! |----------|----------|
//! | `Baseline` | FIFO, nearest-available elevator per request |
//! | `Mpc` | Rolling-horizon marginal-cost minimization |
//! | `Milp` | Exact solver; not compiled into this build |
//!
//! Which variants are available is a configuration-time decision surfaced
//! as a typed error, not a runtime probe.

mod baseline;
mod mpc;

pub use baseline::BaselineScheduler;
pub use mpc::MpcScheduler;

use std::fmt;

use crate::config::Config;
use crate::models::{ElevatorState, Request};

/// A request-to-elevator assignment policy.
///
/// `assign` clears any previously committed work on the elevators and
/// repopulates their queues; it owns all scheduling state for the duration
/// of the call and leaves nothing behind. Implementations are
/// deterministic: identical inputs produce identical queues.
pub trait DispatchStrategy {
    /// Strategy name (e.g. "baseline", "mpc").
    fn name(&self) -> &'static str;

    /// Assigns every request to exactly one elevator, in service order.
    fn assign(&self, requests: &[Request], elevators: &mut [ElevatorState]);
}

impl fmt::Debug for dyn DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Selectable strategy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Greedy FIFO baseline.
    Baseline,
    /// Rolling-horizon (MPC-lite) heuristic.
    Mpc,
    /// Exact solver-backed assignment. Not available in this build.
    Milp,
}

/// Why a strategy could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The variant is not compiled into this build.
    Unavailable(StrategyKind),
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::Unavailable(kind) => {
                write!(f, "strategy {kind:?} is not available in this build")
            }
        }
    }
}

impl std::error::Error for StrategyError {}

impl StrategyKind {
    /// Builds the strategy, or reports that the variant is unavailable.
    pub fn build(self, config: &Config) -> Result<Box<dyn DispatchStrategy>, StrategyError> {
        match self {
            StrategyKind::Baseline => Ok(Box::new(BaselineScheduler::new(config))),
            StrategyKind::Mpc => Ok(Box::new(MpcScheduler::new(config))),
            StrategyKind::Milp => Err(StrategyError::Unavailable(self)),
        }
    }
}
