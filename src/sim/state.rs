//! Body state and kinematics
//!
//! A body is the only moving entity on the table. Its `moving` flag is never
//! stored; it is read off the velocity every time it is asked for.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geom::Circle;
use crate::consts::REST_SPEED;
use crate::error::{Error, Result};

/// Stable handle to a body, an index into the table's body list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Index of a pocket zone in the table geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PocketId(pub usize);

/// Index of a rail in the table geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RailId(pub usize);

/// 8-bit RGB color tag, used only by the drawing host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    /// Linear RGBA in [0, 1]
    pub fn to_rgba(self) -> [f32; 4] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
            1.0,
        ]
    }
}

/// Where a body is in its life on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyState {
    AtRest,
    Moving,
    /// Terminal: captured by the given pocket
    Pocketed(PocketId),
}

/// Everything needed to put a body on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub label: String,
    pub radius: f64,
    pub mass: f64,
    pub color: Rgb,
    pub pos: DVec2,
    #[serde(default)]
    pub vel: DVec2,
}

impl BodySpec {
    pub fn new(label: impl Into<String>, radius: f64, mass: f64, pos: DVec2) -> Self {
        Self {
            label: label.into(),
            radius,
            mass,
            color: Rgb::WHITE,
            pos,
            vel: DVec2::ZERO,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: DVec2) -> Self {
        self.vel = vel;
        self
    }
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub label: String,
    pub radius: f64,
    pub mass: f64,
    pub color: Rgb,
    pos: DVec2,
    vel: DVec2,
    pocketed: Option<PocketId>,
}

impl Body {
    pub fn from_spec(spec: BodySpec) -> Result<Self> {
        if !spec.radius.is_finite() || spec.radius <= 0.0 {
            return Err(Error::InvalidBody(format!(
                "{}: radius must be finite and > 0, got {}",
                spec.label, spec.radius
            )));
        }
        if !spec.mass.is_finite() || spec.mass <= 0.0 {
            return Err(Error::InvalidBody(format!(
                "{}: mass must be finite and > 0, got {}",
                spec.label, spec.mass
            )));
        }
        if !spec.pos.is_finite() || !spec.vel.is_finite() {
            return Err(Error::InvalidBody(format!(
                "{}: position and velocity must be finite",
                spec.label
            )));
        }
        Ok(Self {
            label: spec.label,
            radius: spec.radius,
            mass: spec.mass,
            color: spec.color,
            pos: spec.pos,
            vel: spec.vel,
            pocketed: None,
        })
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    /// The body's outline, for contact tests
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    #[inline]
    pub fn is_pocketed(&self) -> bool {
        self.pocketed.is_some()
    }

    /// The pocket that captured this body, if any
    #[inline]
    pub fn pocket(&self) -> Option<PocketId> {
        self.pocketed
    }

    /// Non-zero velocity on a body still in play
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.is_pocketed() && self.vel != DVec2::ZERO
    }

    pub fn state(&self) -> BodyState {
        match self.pocketed {
            Some(pocket) => BodyState::Pocketed(pocket),
            None if self.vel != DVec2::ZERO => BodyState::Moving,
            None => BodyState::AtRest,
        }
    }

    /// Replace the velocity; ignored once pocketed
    pub fn set_vel(&mut self, vel: DVec2) {
        if !self.is_pocketed() {
            self.vel = vel;
        }
    }

    /// Teleport the body; ignored once pocketed
    pub fn set_pos(&mut self, pos: DVec2) {
        if !self.is_pocketed() {
            self.pos = pos;
        }
    }

    /// Advance one tick: `pos += vel`
    pub fn integrate(&mut self) {
        if !self.is_pocketed() {
            self.pos += self.vel;
        }
    }

    /// Shed `friction` units of speed, coming to rest instead of reversing
    pub fn apply_friction(&mut self, friction: f64) {
        if self.is_pocketed() || friction <= 0.0 {
            return;
        }
        let speed = self.vel.length();
        let slowed = speed - friction;
        self.vel = if slowed <= REST_SPEED {
            DVec2::ZERO
        } else {
            self.vel * (slowed / speed)
        };
    }

    /// Capture the body. The first pocket wins; later calls do nothing.
    pub fn pocket_into(&mut self, pocket: PocketId) -> bool {
        if self.is_pocketed() {
            return false;
        }
        self.pocketed = Some(pocket);
        self.vel = DVec2::ZERO;
        true
    }
}
