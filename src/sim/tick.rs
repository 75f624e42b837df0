//! Fixed-tick stepping
//!
//! One tick is `update` (resolve contacts, capture pocketed bodies) followed
//! by `advance` (integrate). Bodies are visited in index order so a run is
//! fully deterministic.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_overlap, circle_rail_proximity, elastic_exchange, reflect_velocity};
use super::layout::TableGeometry;
use super::state::{Body, BodyId, PocketId, RailId};
use crate::config::{BallContact, RailBounce, TableConfig};

/// Something that happened during `update`, for sound or scoring hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    RailContact { body: BodyId, rail: RailId },
    BallContact { a: BodyId, b: BodyId },
    Pocketed { body: BodyId, pocket: PocketId },
}

/// Resolve every contact for this tick and report what happened
pub fn update(
    bodies: &mut [Body],
    geometry: &TableGeometry,
    config: &TableConfig,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    resolve_rail_contacts(bodies, geometry, config, &mut events);
    resolve_ball_contacts(bodies, config.ball_contact, &mut events);
    capture_pocketed(bodies, geometry, &mut events);
    events
}

/// Integrate every body still in play, then apply friction
pub fn advance(bodies: &mut [Body], friction: f64) {
    for body in bodies.iter_mut().filter(|b| !b.is_pocketed()) {
        body.integrate();
        body.apply_friction(friction);
    }
}

/// At most one rail contact per body per tick; the first rail in order wins
fn resolve_rail_contacts(
    bodies: &mut [Body],
    geometry: &TableGeometry,
    config: &TableConfig,
    events: &mut Vec<TickEvent>,
) {
    for (idx, body) in bodies.iter_mut().enumerate() {
        if body.is_pocketed() {
            continue;
        }
        let hit = geometry.rails().iter().enumerate().find_map(|(rail_idx, rail)| {
            circle_rail_proximity(body.pos(), body.radius, rail, config.rail_contact)
                .map(|hit| (rail_idx, hit))
        });
        let Some((rail_idx, hit)) = hit else {
            continue;
        };

        let vel = body.vel();
        match config.rail_bounce {
            RailBounce::FlipX => body.set_vel(DVec2::new(-vel.x, vel.y)),
            RailBounce::Reflect => {
                // Only reflect if moving toward the rail
                if vel.dot(hit.normal) < 0.0 {
                    body.set_vel(reflect_velocity(vel, hit.normal));
                }
            }
        }

        log::debug!(
            "{} touched rail {} at ({:.2}, {:.2})",
            body.label,
            rail_idx,
            hit.point.x,
            hit.point.y
        );
        events.push(TickEvent::RailContact {
            body: BodyId(idx),
            rail: RailId(rail_idx),
        });
    }
}

/// Every unordered pair of bodies still in play, checked once
fn resolve_ball_contacts(bodies: &mut [Body], model: BallContact, events: &mut Vec<TickEvent>) {
    if model == BallContact::Ignore {
        return;
    }
    for i in 0..bodies.len() {
        // Split so both bodies of the pair can be borrowed mutably
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        if a.is_pocketed() {
            continue;
        }
        for (offset, b) in tail.iter_mut().enumerate() {
            if b.is_pocketed() || !circle_overlap(&a.circle(), &b.circle()) {
                continue;
            }
            match model {
                BallContact::Stop => {
                    a.set_vel(DVec2::ZERO);
                    b.set_vel(DVec2::ZERO);
                }
                BallContact::Elastic => {
                    let exchanged = elastic_exchange(
                        (a.pos(), a.vel(), a.mass),
                        (b.pos(), b.vel(), b.mass),
                    );
                    // Coincident or separating pairs keep their velocities
                    let Some((va, vb)) = exchanged else {
                        continue;
                    };
                    a.set_vel(va);
                    b.set_vel(vb);
                }
                BallContact::Ignore => continue,
            }

            let j = i + 1 + offset;
            log::debug!("{} hit {}", a.label, b.label);
            events.push(TickEvent::BallContact {
                a: BodyId(i),
                b: BodyId(j),
            });
        }
    }
}

fn capture_pocketed(bodies: &mut [Body], geometry: &TableGeometry, events: &mut Vec<TickEvent>) {
    for (idx, body) in bodies.iter_mut().enumerate() {
        if body.is_pocketed() {
            continue;
        }
        let pocket = geometry
            .pockets()
            .iter()
            .position(|zone| zone.captures(body.pos()));
        if let Some(pocket) = pocket {
            body.pocket_into(PocketId(pocket));
            log::info!("{} pocketed in pocket {}", body.label, pocket);
            events.push(TickEvent::Pocketed {
                body: BodyId(idx),
                pocket: PocketId(pocket),
            });
        }
    }
}
