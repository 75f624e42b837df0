//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed tick only (`pos += vel` once per tick)
//! - Stable iteration order (by body index)
//! - Geometry built once, never mutated
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod layout;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{RailHit, circle_overlap, circle_rail_proximity, elastic_exchange, reflect_velocity};
pub use geom::{Bumper, Circle, PocketKind, PocketZone, RailSegment};
pub use layout::{RailSide, TableGeometry};
pub use state::{Body, BodyId, BodySpec, BodyState, PocketId, RailId, Rgb};
pub use table::Table;
pub use tick::TickEvent;
