//! Steering: how an agent turns after reading its three probes.
//!
//! The rule is a strict cascade and its tie-breaks matter for the patterns
//! that emerge, so the branch selection is kept separate from the random
//! draw: [`classify`] is pure, [`decide`] resolves the random branches.

use crate::types::{SensorReadings, Turn};
use rand::Rng;

/// Which branch of the steering rule applies to a set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnRule {
    /// Center strictly above both sides: keep going.
    Straight,
    /// Center strictly below both sides: pick a side at random.
    EitherSide,
    /// Left above right.
    Left,
    /// Right above left.
    Right,
    /// Everything else (sides equal, center not a strict extremum):
    /// uniform over left, straight, right.
    Any,
}

/// Select the branch of the steering rule. Comparisons are evaluated in order.
pub fn classify(readings: &SensorReadings) -> TurnRule {
    let SensorReadings {
        left,
        center,
        right,
    } = *readings;

    if center > left && center > right {
        TurnRule::Straight
    } else if center < left && center < right {
        TurnRule::EitherSide
    } else if left > right {
        TurnRule::Left
    } else if left < right {
        TurnRule::Right
    } else {
        TurnRule::Any
    }
}

/// Decide a turn, drawing from `rng` only for the random branches.
pub fn decide<R: Rng + ?Sized>(readings: &SensorReadings, rng: &mut R) -> Turn {
    match classify(readings) {
        TurnRule::Straight => Turn::Straight,
        TurnRule::EitherSide => {
            if rng.gen_bool(0.5) {
                Turn::Right
            } else {
                Turn::Left
            }
        }
        TurnRule::Left => Turn::Left,
        TurnRule::Right => Turn::Right,
        TurnRule::Any => match rng.gen_range(0..3) {
            0 => Turn::Left,
            1 => Turn::Straight,
            _ => Turn::Right,
        },
    }
}

/// A uniformly random sign, `-1.0` or `+1.0`.
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
