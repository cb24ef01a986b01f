//! Load-aware elevator kinematics.
//!
//! Maximum velocity and acceleration interpolate exponentially between
//! empty-cabin and full-cabin extremes as a function of `load / capacity`.
//! Single-trip travel time uses bounded-acceleration motion profiles:
//! triangular when the distance is too short to reach cruise speed,
//! trapezoidal (accelerate, cruise, decelerate) otherwise.

use crate::config::Config;
use crate::models::Direction;

/// Travel-time model for a single car.
#[derive(Debug, Clone)]
pub struct Kinematics {
    capacity: f64,
    floor_height: f64,
    max_speed_up_empty: f64,
    max_speed_up_full: f64,
    max_speed_down_empty: f64,
    max_speed_down_full: f64,
    speed_decay_rate: f64,
    acc_empty: f64,
    acc_full: f64,
    dec_empty: f64,
    dec_full: f64,
    acc_decay_rate: f64,
}

impl Kinematics {
    /// Creates a kinematics model from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            capacity: config.capacity.max(1e-6),
            floor_height: config.floor_height,
            max_speed_up_empty: config.max_speed_up_empty,
            max_speed_up_full: config.max_speed_up_full,
            max_speed_down_empty: config.max_speed_down_empty,
            max_speed_down_full: config.max_speed_down_full,
            speed_decay_rate: config.speed_decay_rate,
            acc_empty: config.acc_empty,
            acc_full: config.acc_full,
            dec_empty: config.dec_empty,
            dec_full: config.dec_full,
            acc_decay_rate: config.acc_decay_rate,
        }
    }

    fn attenuate(empty: f64, full: f64, decay: f64, load_ratio: f64) -> f64 {
        full + (empty - full) * (-decay * load_ratio).exp()
    }

    /// Maximum upward velocity for the given load (m/s).
    pub fn vmax_up(&self, load_kg: f64) -> f64 {
        Self::attenuate(
            self.max_speed_up_empty,
            self.max_speed_up_full,
            self.speed_decay_rate,
            load_kg / self.capacity,
        )
    }

    /// Maximum downward velocity for the given load (m/s).
    pub fn vmax_down(&self, load_kg: f64) -> f64 {
        Self::attenuate(
            self.max_speed_down_empty,
            self.max_speed_down_full,
            self.speed_decay_rate,
            load_kg / self.capacity,
        )
    }

    /// Acceleration for the given load (m/s²).
    pub fn acc(&self, load_kg: f64) -> f64 {
        Self::attenuate(
            self.acc_empty,
            self.acc_full,
            self.acc_decay_rate,
            load_kg / self.capacity,
        )
    }

    /// Deceleration for the given load (m/s²).
    pub fn dec(&self, load_kg: f64) -> f64 {
        Self::attenuate(
            self.dec_empty,
            self.dec_full,
            self.acc_decay_rate,
            load_kg / self.capacity,
        )
    }

    /// Motion time between two floors at the given load (s).
    ///
    /// Selects a triangular profile when the symmetric accel/decel ramp
    /// peaks at or below the load-adjusted maximum velocity, a trapezoidal
    /// profile otherwise. Equal floors take zero time.
    pub fn travel_time(&self, load_kg: f64, origin: u8, destination: u8) -> f64 {
        let distance = (f64::from(destination) - f64::from(origin)).abs() * self.floor_height;
        if distance == 0.0 {
            return 0.0;
        }

        let vmax = match Direction::of(origin, destination) {
            Direction::Down => self.vmax_down(load_kg),
            _ => self.vmax_up(load_kg),
        };
        let a_acc = self.acc(load_kg);
        let a_dec = self.dec(load_kg);

        let v_peak = (2.0 * distance * a_acc * a_dec / (a_acc + a_dec)).sqrt();

        if v_peak <= vmax {
            // Triangular: cruise speed never reached.
            v_peak * (1.0 / a_acc + 1.0 / a_dec)
        } else {
            let d_acc = vmax * vmax / (2.0 * a_acc);
            let d_dec = vmax * vmax / (2.0 * a_dec);
            let d_const = (distance - d_acc - d_dec).max(0.0);
            vmax / a_acc + vmax / a_dec + d_const / vmax
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Kinematics {
        Kinematics::new(&Config::default())
    }

    #[test]
    fn test_zero_distance_zero_time() {
        let kin = model();
        for floor in 1..=15u8 {
            assert_eq!(kin.travel_time(0.0, floor, floor), 0.0);
            assert_eq!(kin.travel_time(900.0, floor, floor), 0.0);
        }
    }

    #[test]
    fn test_travel_time_positive_and_monotone_in_distance() {
        let kin = model();
        let mut previous = 0.0;
        for dest in 2..=15u8 {
            let t = kin.travel_time(300.0, 1, dest);
            assert!(t > 0.0);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn test_vmax_and_acc_decrease_with_load() {
        let kin = model();
        let cfg = Config::default();
        let mut load = 0.0;
        let mut prev_v = f64::INFINITY;
        let mut prev_a = f64::INFINITY;
        while load <= cfg.capacity {
            let v = kin.vmax_up(load);
            let a = kin.acc(load);
            assert!(v < prev_v);
            assert!(a < prev_a);
            // Bounded by the configured extremes.
            assert!(v <= cfg.max_speed_up_empty + 1e-9);
            assert!(v >= cfg.max_speed_up_full - 1e-9);
            prev_v = v;
            prev_a = a;
            load += 100.0;
        }
    }

    #[test]
    fn test_empty_load_hits_empty_extremes() {
        let kin = model();
        let cfg = Config::default();
        assert!((kin.vmax_up(0.0) - cfg.max_speed_up_empty).abs() < 1e-9);
        assert!((kin.vmax_down(0.0) - cfg.max_speed_down_empty).abs() < 1e-9);
        assert!((kin.acc(0.0) - cfg.acc_empty).abs() < 1e-9);
        assert!((kin.dec(0.0) - cfg.dec_empty).abs() < 1e-9);
    }

    #[test]
    fn test_triangular_profile_short_hop() {
        // One floor (3.5 m) empty: v_peak = sqrt(2*3.5*1.2*1.2/2.4) = 2.049...
        // below vmax 3.0, so the profile is triangular.
        let kin = model();
        let a: f64 = 1.2;
        let d = 3.5;
        let v_peak = (2.0 * d * a * a / (2.0 * a)).sqrt();
        assert!(v_peak < 3.0);
        let expected = v_peak * (2.0 / a);
        assert!((kin.travel_time(0.0, 1, 2) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoidal_profile_long_run() {
        // 14 floors (49 m) empty: ramp peak exceeds vmax, so the car cruises.
        let kin = model();
        let a: f64 = 1.2;
        let vmax = 3.0;
        let d = 49.0;
        let v_peak = (2.0 * d * a * a / (2.0 * a)).sqrt();
        assert!(v_peak > vmax);
        let d_ramp = vmax * vmax / (2.0 * a);
        let expected = 2.0 * vmax / a + (d - 2.0 * d_ramp) / vmax;
        assert!((kin.travel_time(0.0, 1, 15) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heavier_load_is_slower() {
        let kin = model();
        assert!(kin.travel_time(1000.0, 1, 10) > kin.travel_time(0.0, 1, 10));
    }

    #[test]
    fn test_direction_symmetry_uses_directional_vmax() {
        // Full-load down is slightly faster than full-load up in the
        // reference config (2.6 vs 2.5 m/s ceiling).
        let kin = model();
        let up = kin.travel_time(1200.0, 1, 15);
        let down = kin.travel_time(1200.0, 15, 1);
        assert!(down <= up);
    }
}
