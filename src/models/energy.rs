//! Traction and standby energy model.
//!
//! A counterweighted hoist supplies energy only for the net-positive part
//! of the gravitational work: when the counterweight side is heavier the
//! motoring term floors at zero (no regenerative credit in this model).
//! Friction losses accrue per meter traveled regardless of direction, and
//! the drawn electrical energy is the mechanical sum divided by motor
//! efficiency. Standby power is additive and independent of motion.

use crate::config::{Config, G};
use crate::models::Direction;

/// Energy model for a single car.
#[derive(Debug, Clone)]
pub struct Energy {
    car_mass: f64,
    counterweight_mass: f64,
    friction_per_meter: f64,
    motor_efficiency: f64,
    standby_power: f64,
}

impl Energy {
    /// Creates an energy model from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            car_mass: config.car_mass,
            counterweight_mass: config.counterweight_mass,
            friction_per_meter: config.friction_per_meter,
            motor_efficiency: config.motor_efficiency.max(1e-6),
            standby_power: config.standby_power,
        }
    }

    /// Drawn electrical energy for a vertical segment (J).
    ///
    /// `distance_m` is the unsigned length of the segment; `direction`
    /// selects which side of the counterweight balance the cabin load
    /// works against. Always non-negative; zero distance costs nothing
    /// (standby for the elapsed time is accounted separately).
    pub fn segment_energy(&self, load_kg: f64, distance_m: f64, direction: Direction) -> f64 {
        if distance_m <= 0.0 {
            return 0.0;
        }

        let effective_mass = match direction {
            Direction::Down => self.counterweight_mass - (self.car_mass + load_kg),
            _ => self.car_mass + load_kg - self.counterweight_mass,
        };

        let gravitational = (effective_mass * G * distance_m).max(0.0);
        let friction = self.friction_per_meter * distance_m;
        (gravitational + friction) / self.motor_efficiency
    }

    /// Standby energy over an elapsed duration (J).
    pub fn standby_energy(&self, duration_s: f64) -> f64 {
        self.standby_power * duration_s.max(0.0)
    }
}
