//! Static table geometry: rail segments, jaw bumpers and pocket zones
//!
//! A rail is a straight cushion between two points; bumpers and pockets are
//! plain circles. All of it is built once per table and never mutated.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::perp;

/// A straight cushion segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailSegment {
    start: DVec2,
    end: DVec2,
}

impl RailSegment {
    pub fn new(start: DVec2, end: DVec2) -> Result<Self> {
        if start == end {
            return Err(Error::DegenerateRail);
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DVec2 {
        self.end
    }

    /// `end - start`
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    /// Unit normal, the direction rotated by +90°
    #[inline]
    pub fn normal(&self) -> DVec2 {
        perp(self.direction()).normalize_or_zero()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// True for rails running along the x axis
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        let d = self.direction();
        d.x.abs() >= d.y.abs()
    }

    /// Closest point on the segment (clamped to its extent)
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        let line = self.direction();
        let t = ((p - self.start).dot(line) / line.length_squared()).clamp(0.0, 1.0);
        self.start + line * t
    }

    #[inline]
    pub fn distance_to(&self, p: DVec2) -> f64 {
        (p - self.closest_point(p)).length()
    }
}

/// A massless circle used for jaws and pocket zones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True if `point` lies inside or on the circle
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// Jaw bumpers are purely geometric markers at the rail ends
pub type Bumper = Circle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PocketKind {
    Corner,
    Side,
}

/// A capture region; a body whose center enters it is pocketed for good
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketZone {
    pub zone: Circle,
    pub kind: PocketKind,
}

impl PocketZone {
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.zone.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.zone.radius
    }

    #[inline]
    pub fn captures(&self, point: DVec2) -> bool {
        self.zone.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_rail_rejected() {
        let p = DVec2::new(3.0, 4.0);
        assert!(matches!(RailSegment::new(p, p), Err(Error::DegenerateRail)));
    }

    #[test]
    fn test_rail_derived_attributes() {
        let rail = RailSegment::new(DVec2::new(10.0, 0.0), DVec2::new(30.0, 0.0)).unwrap();
        assert_eq!(rail.direction(), DVec2::new(20.0, 0.0));
        assert_eq!(rail.normal(), DVec2::new(0.0, 1.0));
        assert_eq!(rail.midpoint(), DVec2::new(20.0, 0.0));
        assert!(rail.is_horizontal());
        assert!((rail.length() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_point_clamps_to_extent() {
        let rail = RailSegment::new(DVec2::new(0.0, 0.0), DVec2::new(0.0, 10.0)).unwrap();
        assert_eq!(rail.closest_point(DVec2::new(5.0, 4.0)), DVec2::new(0.0, 4.0));
        assert_eq!(rail.closest_point(DVec2::new(5.0, -4.0)), DVec2::ZERO);
        assert_eq!(rail.closest_point(DVec2::new(-5.0, 14.0)), DVec2::new(0.0, 10.0));
        assert!((rail.distance_to(DVec2::new(3.0, 14.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_contains_boundary() {
        let c = Circle::new(DVec2::new(1.0, 1.0), 2.0);
        assert!(c.contains(DVec2::new(1.0, 1.0)));
        assert!(c.contains(DVec2::new(3.0, 1.0)));
        assert!(!c.contains(DVec2::new(3.1, 1.0)));
    }
}
