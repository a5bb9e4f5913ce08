//! Shared types used across the simulation crates.

use serde::{Deserialize, Serialize};

/// Simulation step counter.
pub type Step = u64;

/// A position in domain units.
///
/// Domain units are either normalized (`[0, extent)`) or pixels, depending
/// on the configured [`DomainShape`](crate::config::DomainShape).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from this one along `angle` (radians).
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position {
            x: self.x + angle.cos() * distance,
            y: self.y + angle.sin() * distance,
        }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A single trail-following agent.
///
/// Only `cos`/`sin` of the heading are ever used, so the heading is left
/// unwrapped and may grow without bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Position,
    /// Heading in radians.
    pub heading: f64,
}

impl Agent {
    pub fn new(position: Position, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Move `distance` along the current heading.
    pub fn advance(&mut self, distance: f64) {
        self.position = self.position.offset(self.heading, distance);
    }

    /// Rotate by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.heading += angle;
    }
}

/// A signed grid cell coordinate.
///
/// Signed because probes and reflected agents can land outside the grid;
/// resolving a cell against a field decides whether it wraps or is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// The discrete turn an agent takes after sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

impl Turn {
    /// Turn amount in `{-1, 0, +1}`, multiplied by the rotation angle.
    pub fn amount(self) -> f64 {
        match self {
            Turn::Left => -1.0,
            Turn::Straight => 0.0,
            Turn::Right => 1.0,
        }
    }
}

/// Field values read by the left, center, and right probes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReadings {
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

impl SensorReadings {
    pub fn new(left: f64, center: f64, right: f64) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.left, self.center, self.right]
    }
}
