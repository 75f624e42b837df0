//! Baize - a 2D billiards physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (table layout, collisions, stepping)
//! - `config`: Table configuration, validation and JSON (de)serialization
//! - `draw`: Plain-old-data snapshots of the table for a rendering host
//! - `rack`: The standard 16-ball triangle rack
//! - `error`: Crate error type

pub mod config;
pub mod draw;
pub mod error;
pub mod rack;
pub mod sim;

pub use config::{BallContact, PocketPlacement, RailBounce, RailContact, TableConfig};
pub use error::{Error, Result};
pub use sim::{Body, BodyId, BodySpec, Table, TickEvent};

use glam::DVec2;

/// Table defaults, taken from the classic desktop pool layout
pub mod consts {
    /// Width of the playing surface (height is twice this)
    pub const TABLE_SIZE: i32 = 250;
    /// Ball radius in table units
    pub const BALL_RADIUS: i32 = 6;
    /// Pocket opening as a multiple of the ball radius
    pub const POCKET_MULTIPLIER: f64 = 2.2;
    /// Jaw bumper radius as a multiple of the ball radius
    pub const JAW_MULTIPLIER: f64 = 0.7;
    /// Mass shared by every object ball
    pub const BALL_MASS: f64 = 1.0;
    /// The cue ball is heavier
    pub const CUE_BALL_MASS: f64 = 10.0;
    /// Speeds below this are snapped to rest when friction is active
    pub const REST_SPEED: f64 = 1e-6;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Direction of a vector in radians, atan2-style
#[inline]
pub fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Rotate a vector by +90°
#[inline]
pub fn perp(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}
