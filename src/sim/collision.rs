//! Collision detection and response
//!
//! Pure predicates between circles and rails, plus the velocity responses the
//! stepper applies when they fire. Nothing here holds state between calls.

use glam::DVec2;

use super::geom::{Circle, RailSegment};
use crate::config::RailContact;
use crate::{angle_of, normalize_angle};

/// Contact between a body and a rail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailHit {
    /// Closest point on the rail
    pub point: DVec2,
    /// Rail normal, pointing toward the body center
    pub normal: DVec2,
    /// How far the body reaches past the rail (0 when just touching)
    pub penetration: f64,
}

/// True iff the two circles strictly overlap
#[inline]
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    (a.center - b.center).length() < a.radius + b.radius
}

/// Check a circle against a rail with the chosen contact model
pub fn circle_rail_proximity(
    center: DVec2,
    radius: f64,
    rail: &RailSegment,
    model: RailContact,
) -> Option<RailHit> {
    match model {
        RailContact::Segment => segment_contact(center, radius, rail),
        RailContact::Angular => angular_contact(center, radius, rail),
    }
}

/// Exact distance from the center to the finite segment
fn segment_contact(center: DVec2, radius: f64, rail: &RailSegment) -> Option<RailHit> {
    let point = rail.closest_point(center);
    let dist = (center - point).length();
    if dist > radius {
        return None;
    }
    // Past a rail end the closest point is the endpoint, so push straight
    // away from it rather than along the line normal
    let normal = (center - point)
        .try_normalize()
        .unwrap_or_else(|| facing_normal(center, rail));
    Some(RailHit {
        point,
        normal,
        penetration: radius - dist,
    })
}

/// Angular half-width test seen from the rail's start point.
///
/// The body touches when the angle between the rail line and the vector to
/// its center is below `asin(radius / distance)`. That reduces to a distance
/// test against the rail's infinite line, so bodies beyond the rail ends can
/// still register a hit.
fn angular_contact(center: DVec2, radius: f64, rail: &RailSegment) -> Option<RailHit> {
    let to_rail = rail.start() - center;
    let dist = to_rail.length();
    if dist <= f64::EPSILON {
        return None;
    }

    let half_width = (radius / dist).min(1.0).asin();
    let deviation = normalize_angle(angle_of(rail.direction()) - angle_of(to_rail)).abs();
    // The line has no preferred direction
    let deviation = deviation.min(std::f64::consts::PI - deviation);
    if deviation >= half_width {
        return None;
    }

    let line = rail.direction();
    let t = (center - rail.start()).dot(line) / line.length_squared();
    let point = rail.start() + line * t;
    Some(RailHit {
        point,
        normal: facing_normal(center, rail),
        penetration: (radius - (center - point).length()).max(0.0),
    })
}

/// Rail normal flipped, if needed, to point at `center`
fn facing_normal(center: DVec2, rail: &RailSegment) -> DVec2 {
    let normal = rail.normal();
    if (center - rail.start()).dot(normal) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Elastic exchange along the line of centers.
///
/// Returns the new velocities of `a` and `b`, or `None` when the centers
/// coincide or the bodies are already separating.
pub fn elastic_exchange(
    (pos_a, vel_a, mass_a): (DVec2, DVec2, f64),
    (pos_b, vel_b, mass_b): (DVec2, DVec2, f64),
) -> Option<(DVec2, DVec2)> {
    let n = (pos_b - pos_a).try_normalize()?;
    let approach = (vel_a - vel_b).dot(n);
    if approach <= 0.0 {
        return None;
    }
    let total = mass_a + mass_b;
    let new_a = vel_a - n * (2.0 * mass_b / total * approach);
    let new_b = vel_b + n * (2.0 * mass_a / total * approach);
    Some((new_a, new_b))
}
