//! Load-aware elevator dispatch.
//!
//! Decides which elevator serves each passenger request and in what order,
//! minimizing a weighted cost of waiting (with a super-linear penalty for
//! long waits), in-cab time, and motor energy (with a surcharge for energy
//! spent moving empty to pickups). A queueing-theoretic best case is
//! computed alongside to benchmark any concrete strategy.
//!
//! # Modules
//!
//! - **`config`**: flat immutable parameter set shared by every component
//! - **`models`**: `Request`/`ElevatorState` plus the kinematic, energy,
//!   and dwell-time engines
//! - **`objective`**: wait penalty, passenger metrics, cost breakdown, and
//!   the M/D/c-style theoretical limit
//! - **`scheduler`**: `DispatchStrategy` implementations — rolling-horizon
//!   MPC-lite and a greedy FIFO baseline
//! - **`simulation`**: deterministic replay of committed queues into trip
//!   timelines and energy totals
//! - **`generator`**: seeded synthetic request streams
//! - **`validation`**: input integrity checks
//!
//! # Pipeline
//!
//! ```
//! use lift_dispatch::config::Config;
//! use lift_dispatch::generator::RequestGenerator;
//! use lift_dispatch::models::ElevatorState;
//! use lift_dispatch::objective::ObjectiveModel;
//! use lift_dispatch::scheduler::{DispatchStrategy, StrategyKind};
//! use lift_dispatch::simulation::Simulator;
//!
//! let config = Config::default().with_elevator_count(2);
//! let requests = RequestGenerator::new(&config).generate(20);
//! let mut elevators: Vec<ElevatorState> =
//!     (1..=2).map(|id| ElevatorState::new(id, 1)).collect();
//!
//! let strategy = StrategyKind::Mpc.build(&config).unwrap();
//! strategy.assign(&requests, &mut elevators);
//!
//! let outcome = Simulator::new(&config).run(&mut elevators);
//! let objective = ObjectiveModel::new(&config);
//! let metrics = objective.summarize_passenger_metrics(&outcome.served);
//! let breakdown = objective.compute_objective(
//!     metrics.wait_penalty_total,
//!     metrics.total_in_cab_time,
//!     outcome.emptyload_energy,
//!     outcome.total_energy,
//! );
//! assert_eq!(metrics.served_count, 20);
//! assert!(breakdown.total_cost.is_finite());
//! ```

pub mod config;
pub mod generator;
pub mod models;
pub mod objective;
pub mod scheduler;
pub mod simulation;
pub mod validation;

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::generator::RequestGenerator;
    use crate::models::ElevatorState;
    use crate::objective::ObjectiveModel;
    use crate::scheduler::StrategyKind;
    use crate::simulation::Simulator;
    use crate::validation::validate_input;

    fn fleet(config: &Config) -> Vec<ElevatorState> {
        (1..=config.elevator_count as u32)
            .map(|id| ElevatorState::new(id, 1))
            .collect()
    }

    fn run_strategy(kind: StrategyKind, config: &Config, count: usize) -> (f64, usize) {
        let requests = RequestGenerator::new(config).generate(count);
        let mut elevators = fleet(config);
        assert!(validate_input(&requests, &elevators, config).is_ok());

        let strategy = kind.build(config).unwrap();
        strategy.assign(&requests, &mut elevators);

        let outcome = Simulator::new(config).run(&mut elevators);
        let objective = ObjectiveModel::new(config);
        let metrics = objective.summarize_passenger_metrics(&outcome.served);
        let breakdown = objective.compute_objective(
            metrics.wait_penalty_total,
            metrics.total_in_cab_time,
            outcome.emptyload_energy,
            outcome.total_energy,
        );
        (breakdown.total_cost, metrics.served_count)
    }

    #[test]
    fn test_full_pipeline_both_strategies() {
        let config = Config::default().with_elevator_count(2);
        for kind in [StrategyKind::Baseline, StrategyKind::Mpc] {
            let (cost, served) = run_strategy(kind, &config, 30);
            assert_eq!(served, 30);
            assert!(cost.is_finite());
            assert!(cost > 0.0);
        }
    }

    #[test]
    fn test_theoretical_limit_bounds_realized_ride_time() {
        // The bound's ride time is unimpeded travel, which the replay can
        // only match or exceed.
        let config = Config::default().with_elevator_count(2);
        let requests = RequestGenerator::new(&config).generate(25);
        let mut elevators = fleet(&config);
        StrategyKind::Mpc
            .build(&config)
            .unwrap()
            .assign(&requests, &mut elevators);
        let outcome = Simulator::new(&config).run(&mut elevators);

        let objective = ObjectiveModel::new(&config);
        let metrics = objective.summarize_passenger_metrics(&outcome.served);
        let limit = objective.theoretical_limit(&requests);

        assert!(limit.in_cab_time > 0.0);
        assert!(metrics.total_in_cab_time >= limit.in_cab_time - 1e-6);
        assert!(limit.running_energy >= 0.0);
        assert!(limit.wait_penalty >= 0.0);
    }

    #[test]
    fn test_pipeline_reproducible() {
        let config = Config::default().with_elevator_count(3).with_random_seed(11);
        let first = run_strategy(StrategyKind::Mpc, &config, 40);
        let second = run_strategy(StrategyKind::Mpc, &config, 40);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_fixture_round_trips_as_json() {
        let config = Config::default();
        let requests = RequestGenerator::new(&config).generate(5);
        let json = serde_json::to_string(&requests).unwrap();
        let back: Vec<crate::models::Request> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, requests);
    }
}
