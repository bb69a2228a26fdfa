use thiserror::Error;

use crate::game::Zone;

/// Errors produced when validating types against a game configuration.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid game configuration: {0}")]
    InvalidGame(String),

    #[error("{zone} zone: expected {expected} numbers, got {actual}")]
    WrongCount {
        zone: Zone,
        expected: usize,
        actual: usize,
    },

    #[error("{zone} zone: number {number} outside 1..={max}")]
    OutOfRange { zone: Zone, number: u32, max: u32 },

    #[error("{zone} zone: number {number} appears more than once")]
    Duplicate { zone: Zone, number: u32 },

    #[error("confidence {0} outside [0, 1]")]
    InvalidConfidence(f64),

    #[error("bias component '{field}' = {value} outside [0, 1]")]
    InvalidBias { field: &'static str, value: f64 },
}
