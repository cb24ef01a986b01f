//! Input validation for dispatch runs.
//!
//! Checks structural integrity of requests and elevators against the
//! configuration before scheduling. Detects:
//! - Duplicate request or elevator IDs
//! - Floors outside the building
//! - Negative or over-capacity loads
//! - Negative arrival times

use std::collections::HashSet;

use crate::config::Config;
use crate::models::{ElevatorState, Request};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A floor lies outside `1..=floors`.
    FloorOutOfRange,
    /// A load is negative or exceeds the cabin capacity.
    InvalidLoad,
    /// An arrival time is negative.
    InvalidArrivalTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates requests and elevators against the configuration.
///
/// Collects every violation instead of stopping at the first, so callers
/// can report all problems at once.
pub fn validate_input(
    requests: &[Request],
    elevators: &[ElevatorState],
    config: &Config,
) -> ValidationResult {
    let mut errors = Vec::new();
    let max_floor = config.floors;

    let mut request_ids = HashSet::new();
    for req in requests {
        if !request_ids.insert(req.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate request id {}", req.id),
            ));
        }
        for (label, floor) in [("origin", req.origin), ("destination", req.destination)] {
            if floor < 1 || floor > max_floor {
                errors.push(ValidationError::new(
                    ValidationErrorKind::FloorOutOfRange,
                    format!(
                        "request {}: {label} floor {floor} outside 1..={max_floor}",
                        req.id
                    ),
                ));
            }
        }
        if req.load_kg < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLoad,
                format!("request {}: negative load {} kg", req.id, req.load_kg),
            ));
        } else if req.load_kg > config.capacity {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLoad,
                format!(
                    "request {}: load {} kg exceeds capacity {} kg",
                    req.id, req.load_kg, config.capacity
                ),
            ));
        }
        if req.arrival_time < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrivalTime,
                format!(
                    "request {}: negative arrival time {}",
                    req.id, req.arrival_time
                ),
            ));
        }
    }

    let mut elevator_ids = HashSet::new();
    for elev in elevators {
        if !elevator_ids.insert(elev.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate elevator id {}", elev.id),
            ));
        }
        if elev.floor < 1 || elev.floor > max_floor {
            errors.push(ValidationError::new(
                ValidationErrorKind::FloorOutOfRange,
                format!(
                    "elevator {}: floor {} outside 1..={max_floor}",
                    elev.id, elev.floor
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
