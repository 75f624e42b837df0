//! Table configuration
//!
//! Five scalars describe the whole layout; the remaining fields pick the
//! contact and bounce models used by the stepper. Loaded from JSON by the
//! native driver.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// How a body bounces off a rail it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RailBounce {
    /// Negate the horizontal velocity component whatever the rail orientation
    FlipX,
    /// Reflect about the rail normal, only while moving toward the rail
    #[default]
    Reflect,
}

/// How a body is judged to touch a rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RailContact {
    /// Exact point-to-segment distance, clipped to the rail's extent
    #[default]
    Segment,
    /// Angular half-width test against the rail's start point (unclipped)
    Angular,
}

/// How two overlapping bodies are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BallContact {
    /// Ball contacts are not checked
    Ignore,
    /// Both bodies stop dead
    Stop,
    /// Mass-weighted velocity exchange along the line of centers
    #[default]
    Elastic,
}

/// Where the pocket zones sit around the cushion gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PocketPlacement {
    /// Side pockets pulled onto the table by the jaw radius; corner radius
    /// `r·p − r·j + r·j/√2`
    #[default]
    Inset,
    /// Side pockets pushed off the table by the jaw radius; corner radius
    /// `r·p − r·j/2`, as the classic desktop game lays them out
    Classic,
}

impl RailBounce {
    pub fn as_str(&self) -> &'static str {
        match self {
            RailBounce::FlipX => "flip-x",
            RailBounce::Reflect => "reflect",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flip-x" | "flipx" | "legacy" => Some(RailBounce::FlipX),
            "reflect" => Some(RailBounce::Reflect),
            _ => None,
        }
    }
}

impl RailContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            RailContact::Segment => "segment",
            RailContact::Angular => "angular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "segment" | "exact" => Some(RailContact::Segment),
            "angular" | "legacy" => Some(RailContact::Angular),
            _ => None,
        }
    }
}

impl BallContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallContact::Ignore => "ignore",
            BallContact::Stop => "stop",
            BallContact::Elastic => "elastic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ignore" | "off" => Some(BallContact::Ignore),
            "stop" | "inelastic" => Some(BallContact::Stop),
            "elastic" => Some(BallContact::Elastic),
            _ => None,
        }
    }
}

impl PocketPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            PocketPlacement::Inset => "inset",
            PocketPlacement::Classic => "classic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inset" => Some(PocketPlacement::Inset),
            "classic" | "legacy" => Some(PocketPlacement::Classic),
            _ => None,
        }
    }
}

/// Everything needed to build a `Table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Top-left corner of the playing surface
    pub origin: IVec2,
    /// Width of the playing surface; the height is `2 * size`
    pub size: i32,
    /// Radius shared by the balls the layout is sized for
    pub ball_radius: i32,
    /// Pocket opening relative to the ball radius
    pub pocket_multiplier: f64,
    /// Jaw bumper radius relative to the ball radius
    pub jaw_multiplier: f64,
    pub pocket_placement: PocketPlacement,

    // === Stepping ===
    /// Speed lost per tick (0 disables friction)
    pub friction: f64,
    pub rail_bounce: RailBounce,
    pub rail_contact: RailContact,
    pub ball_contact: BallContact,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            origin: IVec2::ZERO,
            size: TABLE_SIZE,
            ball_radius: BALL_RADIUS,
            pocket_multiplier: POCKET_MULTIPLIER,
            jaw_multiplier: JAW_MULTIPLIER,
            pocket_placement: PocketPlacement::default(),

            friction: 0.0,
            rail_bounce: RailBounce::default(),
            rail_contact: RailContact::default(),
            ball_contact: BallContact::default(),
        }
    }
}

impl TableConfig {
    /// Layout parameters with default stepping models
    pub fn new(
        origin: IVec2,
        size: i32,
        ball_radius: i32,
        pocket_multiplier: f64,
        jaw_multiplier: f64,
    ) -> Self {
        Self {
            origin,
            size,
            ball_radius,
            pocket_multiplier,
            jaw_multiplier,
            ..Self::default()
        }
    }

    /// The classic desktop game: its pocket placement, x-only rail flips,
    /// angular rail test, balls stop dead on contact
    pub fn legacy() -> Self {
        Self {
            pocket_placement: PocketPlacement::Classic,
            rail_bounce: RailBounce::FlipX,
            rail_contact: RailContact::Angular,
            ball_contact: BallContact::Stop,
            ..Self::default()
        }
    }

    pub fn with_pocket_placement(mut self, placement: PocketPlacement) -> Self {
        self.pocket_placement = placement;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_rail_bounce(mut self, bounce: RailBounce) -> Self {
        self.rail_bounce = bounce;
        self
    }

    pub fn with_rail_contact(mut self, contact: RailContact) -> Self {
        self.rail_contact = contact;
        self
    }

    pub fn with_ball_contact(mut self, contact: BallContact) -> Self {
        self.ball_contact = contact;
        self
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        f64::from(self.ball_radius)
    }

    #[inline]
    pub fn table_size(&self) -> f64 {
        f64::from(self.size)
    }

    /// Gap left at the side pockets, on each side of the midline
    #[inline]
    pub fn gap_vertical(&self) -> f64 {
        self.radius() * self.pocket_multiplier
    }

    /// Gap left at the corner pockets
    #[inline]
    pub fn gap_diagonal(&self) -> f64 {
        self.radius() * std::f64::consts::SQRT_2 * self.pocket_multiplier
    }

    #[inline]
    pub fn jaw_radius(&self) -> f64 {
        self.radius() * self.jaw_multiplier
    }

    /// Check every parameter; a table is only built from a valid config
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "table size must be > 0, got {}",
                self.size
            )));
        }
        if self.ball_radius <= 0 {
            return Err(Error::InvalidConfig(format!(
                "ball radius must be > 0, got {}",
                self.ball_radius
            )));
        }
        if !self.pocket_multiplier.is_finite() || self.pocket_multiplier <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "pocket multiplier must be finite and > 0, got {}",
                self.pocket_multiplier
            )));
        }
        if !self.jaw_multiplier.is_finite() || self.jaw_multiplier < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "jaw multiplier must be finite and >= 0, got {}",
                self.jaw_multiplier
            )));
        }
        if self.jaw_multiplier >= self.pocket_multiplier {
            return Err(Error::InvalidConfig(format!(
                "jaws ({}) close the pocket mouths ({})",
                self.jaw_multiplier, self.pocket_multiplier
            )));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "friction must be finite and >= 0, got {}",
                self.friction
            )));
        }

        // Every rail must keep a positive length once the pocket gaps are cut
        let t = self.table_size();
        if 2.0 * self.gap_diagonal() >= t {
            return Err(Error::InvalidConfig(format!(
                "corner pockets ({:.2} each) swallow the {t} wide cushions",
                self.gap_diagonal()
            )));
        }
        if self.gap_diagonal() + self.gap_vertical() >= t {
            return Err(Error::InvalidConfig(format!(
                "pocket gaps ({:.2} + {:.2}) swallow the {t} long side cushions",
                self.gap_diagonal(),
                self.gap_vertical()
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded table config from {}", path.as_ref().display());
        Ok(config)
    }
}
