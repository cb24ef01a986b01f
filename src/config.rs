//! Run configuration.
//!
//! One flat, immutable set of numeric parameters shared by every component:
//! building geometry, fleet size, kinematic extremes, dwell rates, energy
//! constants, objective weights, and scheduler tuning. Constructed once at
//! startup and passed by reference into each engine — no component reads
//! ambient global state.
//!
//! `Config::default()` carries the reference 15-floor / single-elevator
//! scenario; `with_*` builders override individual parameters.

use serde::{Deserialize, Serialize};

/// Standard gravity (m/s²).
pub const G: f64 = 9.81;

/// All tunable parameters for a dispatch run.
///
/// # Units
/// Distances in meters, masses in kilograms, times in seconds,
/// energies in joules, power in watts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Building
    /// Total number of floors (floors are numbered 1..=floors).
    pub floors: u8,
    /// Vertical distance between adjacent floors (m).
    pub floor_height: f64,
    /// Number of elevators in the fleet.
    pub elevator_count: usize,
    /// Maximum allowed cabin load (kg).
    pub capacity: f64,

    // Kinematics
    /// Maximum upward speed, empty cabin (m/s).
    pub max_speed_up_empty: f64,
    /// Maximum upward speed, full cabin (m/s).
    pub max_speed_up_full: f64,
    /// Maximum downward speed, empty cabin (m/s).
    pub max_speed_down_empty: f64,
    /// Maximum downward speed, full cabin (m/s).
    pub max_speed_down_full: f64,
    /// Exponential decay factor for speed vs. load.
    pub speed_decay_rate: f64,
    /// Acceleration, empty cabin (m/s²).
    pub acc_empty: f64,
    /// Acceleration, full cabin (m/s²).
    pub acc_full: f64,
    /// Deceleration, empty cabin (m/s²).
    pub dec_empty: f64,
    /// Deceleration, full cabin (m/s²).
    pub dec_full: f64,
    /// Exponential decay factor for acceleration vs. load.
    pub acc_decay_rate: f64,

    // Dwell
    /// Minimum door-open time (s).
    pub hold_base_time: f64,
    /// Boarding/alighting rate below the congestion threshold (s/kg).
    pub hold_rate_normal: f64,
    /// Boarding/alighting rate above the congestion threshold (s/kg).
    pub hold_rate_congested: f64,
    /// Total transfer weight at which congestion effects begin (kg).
    pub hold_congestion_threshold: f64,

    // Energy
    /// Cabin mass (kg).
    pub car_mass: f64,
    /// Counterweight mass (kg).
    pub counterweight_mass: f64,
    /// Mechanical loss per meter traveled (J/m).
    pub friction_per_meter: f64,
    /// Motor efficiency ratio (0..1].
    pub motor_efficiency: f64,
    /// Base power drawn per elevator (W).
    pub standby_power: f64,

    // Simulation
    /// Total simulated duration (s).
    pub time_horizon: f64,
    /// Simulation granularity (s).
    pub time_step: f64,
    /// Seed for synthetic request generation.
    pub random_seed: u64,

    // Objective
    /// Weight on passenger time terms.
    pub weight_time: f64,
    /// Weight on energy terms.
    pub weight_energy: f64,
    /// Normalization scale for the super-linear wait penalty (s).
    pub wait_penalty_scale: f64,
    /// Exponent of the super-linear wait penalty (>= 1).
    pub wait_penalty_exponent: f64,
    /// Wait duration below which the penalty is linear (s).
    pub wait_penalty_threshold: f64,
    /// Surcharge multiplier on empty-load energy (>= 1; 1 = no surcharge).
    pub emptyload_penalty_multiplier: f64,

    // Scheduler
    /// Lookahead window beyond the earliest unassigned arrival (s).
    pub lookahead_window: f64,
    /// Maximum candidate requests evaluated per assignment round.
    pub max_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            floors: 15,
            floor_height: 3.5,
            elevator_count: 1,
            capacity: 1200.0,

            max_speed_up_empty: 3.0,
            max_speed_up_full: 2.5,
            max_speed_down_empty: 3.0,
            max_speed_down_full: 2.6,
            speed_decay_rate: 1.2,
            acc_empty: 1.2,
            acc_full: 0.9,
            dec_empty: 1.2,
            dec_full: 1.0,
            acc_decay_rate: 1.3,

            hold_base_time: 1.5,
            hold_rate_normal: 0.002,
            hold_rate_congested: 0.005,
            hold_congestion_threshold: 400.0,

            car_mass: 600.0,
            counterweight_mass: 500.0,
            friction_per_meter: 50.0,
            motor_efficiency: 0.85,
            standby_power: 500.0,

            time_horizon: 300.0,
            time_step: 1.0,
            random_seed: 42,

            weight_time: 1.0,
            weight_energy: 0.001,
            wait_penalty_scale: 60.0,
            wait_penalty_exponent: 1.5,
            wait_penalty_threshold: 0.0,
            emptyload_penalty_multiplier: 2.0,

            lookahead_window: 240.0,
            max_batch: 12,
        }
    }
}

impl Config {
    /// Creates the reference configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of floors.
    pub fn with_floors(mut self, floors: u8) -> Self {
        self.floors = floors;
        self
    }

    /// Sets the fleet size.
    pub fn with_elevator_count(mut self, count: usize) -> Self {
        self.elevator_count = count;
        self
    }

    /// Sets the cabin capacity (kg).
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the simulated time horizon (s).
    pub fn with_time_horizon(mut self, horizon: f64) -> Self {
        self.time_horizon = horizon;
        self
    }

    /// Sets the generation seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weight_time: f64, weight_energy: f64) -> Self {
        self.weight_time = weight_time;
        self.weight_energy = weight_energy;
        self
    }

    /// Sets the wait-penalty shape (scale s, exponent, threshold s).
    pub fn with_wait_penalty(mut self, scale: f64, exponent: f64, threshold: f64) -> Self {
        self.wait_penalty_scale = scale;
        self.wait_penalty_exponent = exponent;
        self.wait_penalty_threshold = threshold;
        self
    }

    /// Sets the scheduler lookahead window and batch cap.
    pub fn with_lookahead(mut self, window: f64, max_batch: usize) -> Self {
        self.lookahead_window = window;
        self.max_batch = max_batch;
        self
    }

    /// Vertical distance between two floors (m).
    pub fn floor_distance(&self, from: u8, to: u8) -> f64 {
        (f64::from(to) - f64::from(from)).abs() * self.floor_height
    }
}
