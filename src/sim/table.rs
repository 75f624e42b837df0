//! The table: immutable geometry plus the bodies moving on it
//!
//! A host drives it once per frame:
//!
//! ```
//! use baize::{BodySpec, Table, TableConfig};
//! use glam::DVec2;
//!
//! let mut table = Table::build(TableConfig::default()).unwrap();
//! let cue = table
//!     .add_body(BodySpec::new("cue", 6.0, 1.0, DVec2::new(100.0, 100.0)))
//!     .unwrap();
//! table.shoot(cue, DVec2::new(-1.0, 1.0)).unwrap();
//! while table.any_moving() && table.ticks() < 10 {
//!     table.step();
//! }
//! assert_eq!(table.bodies()[0].pos(), DVec2::new(90.0, 110.0));
//! ```

use glam::DVec2;

use super::geom::{Bumper, PocketZone, RailSegment};
use super::layout::TableGeometry;
use super::state::{Body, BodyId, BodySpec};
use super::tick::{self, TickEvent};
use crate::config::TableConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    geometry: TableGeometry,
    bodies: Vec<Body>,
    ticks: u64,
}

impl Table {
    /// Validate the config and lay out the table. No bodies yet.
    pub fn build(config: TableConfig) -> Result<Self> {
        let geometry = TableGeometry::build(&config)?;
        let extent = geometry.extent();
        log::info!(
            "Built {}x{} table at ({}, {}): {} rails, {} jaws, {} pockets",
            extent.x,
            extent.y,
            config.origin.x,
            config.origin.y,
            geometry.rails().len(),
            geometry.bumpers().len(),
            geometry.pockets().len()
        );
        Ok(Self {
            config,
            geometry,
            bodies: Vec::new(),
            ticks: 0,
        })
    }

    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId> {
        let body = Body::from_spec(spec)?;
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Add several bodies, stopping at the first invalid one
    pub fn add_bodies(&mut self, specs: impl IntoIterator<Item = BodySpec>) -> Result<Vec<BodyId>> {
        specs.into_iter().map(|spec| self.add_body(spec)).collect()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Find a body by label
    pub fn find(&self, label: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.label == label).map(BodyId)
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.bodies.get_mut(id.0).ok_or(Error::UnknownBody(id))
    }

    /// Give a body a new velocity; a pocketed body stays put
    pub fn shoot(&mut self, id: BodyId, vel: DVec2) -> Result<()> {
        if !vel.is_finite() {
            return Err(Error::InvalidBody(format!("non-finite velocity {vel}")));
        }
        self.body_mut(id)?.set_vel(vel);
        Ok(())
    }

    /// Move a body by hand; a pocketed body stays put
    pub fn place(&mut self, id: BodyId, pos: DVec2) -> Result<()> {
        if !pos.is_finite() {
            return Err(Error::InvalidBody(format!("non-finite position {pos}")));
        }
        self.body_mut(id)?.set_pos(pos);
        Ok(())
    }

    /// Resolve rail, ball and pocket contacts for this tick
    pub fn update(&mut self) -> Vec<TickEvent> {
        tick::update(&mut self.bodies, &self.geometry, &self.config)
    }

    /// Integrate every body still in play by one tick
    pub fn advance(&mut self) {
        tick::advance(&mut self.bodies, self.config.friction);
        self.ticks += 1;
    }

    /// One full tick: `update` then `advance`
    pub fn step(&mut self) -> Vec<TickEvent> {
        let events = self.update();
        self.advance();
        events
    }

    /// True while any body still in play has a non-zero velocity
    pub fn any_moving(&self) -> bool {
        self.bodies.iter().any(Body::is_moving)
    }

    /// Bodies still in play
    pub fn active(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_pocketed())
            .map(|(i, b)| (BodyId(i), b))
    }

    /// Ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }

    pub fn rails(&self) -> &[RailSegment] {
        self.geometry.rails()
    }

    pub fn bumpers(&self) -> &[Bumper] {
        self.geometry.bumpers()
    }

    pub fn pockets(&self) -> &[PocketZone] {
        self.geometry.pockets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RailContact;
    use glam::IVec2;
    use proptest::prelude::*;

    fn table() -> Table {
        Table::build(TableConfig::default()).expect("default table")
    }

    fn spec(label: &str, x: f64, y: f64) -> BodySpec {
        BodySpec::new(label, 6.0, 1.0, DVec2::new(x, y))
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let bad = TableConfig::new(IVec2::ZERO, -5, 6, 2.2, 0.7);
        assert!(matches!(Table::build(bad), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_huge_table_with_logging_on() {
        log::set_max_level(log::LevelFilter::Info);
        let config = TableConfig::new(IVec2::ZERO, 1_500_000_000, 6, 2.2, 0.7);
        assert!(config.validate().is_ok());
        let table = Table::build(config).unwrap();
        assert_eq!(table.geometry().extent(), DVec2::new(1.5e9, 3.0e9));
    }

    #[test]
    fn test_add_body_and_lookup() {
        let mut table = table();
        let ids = table
            .add_bodies([spec("cue", 50.0, 50.0), spec("black", 125.0, 300.0)])
            .unwrap();
        assert_eq!(ids, vec![BodyId(0), BodyId(1)]);
        assert_eq!(table.find("black"), Some(BodyId(1)));
        assert_eq!(table.body(BodyId(0)).map(|b| b.label.as_str()), Some("cue"));
        assert!(table.body(BodyId(9)).is_none());
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let mut table = table();
        assert!(matches!(
            table.shoot(BodyId(3), DVec2::X),
            Err(Error::UnknownBody(BodyId(3)))
        ));
    }

    #[test]
    fn test_any_moving_idempotent() {
        let mut table = table();
        let id = table.add_body(spec("cue", 100.0, 100.0)).unwrap();
        assert!(!table.any_moving());
        assert_eq!(table.any_moving(), table.any_moving());
        table.shoot(id, DVec2::new(1.0, 0.0)).unwrap();
        assert!(table.any_moving());
        assert_eq!(table.any_moving(), table.any_moving());
    }

    #[test]
    fn test_bounces_between_side_rails() {
        let mut table = table();
        let id = table.add_body(spec("cue", 125.0, 120.0)).unwrap();
        table.shoot(id, DVec2::new(7.0, 0.0)).unwrap();
        for _ in 0..200 {
            table.step();
            let x = table.bodies()[0].pos().x;
            assert!((-7.0..=257.0).contains(&x), "escaped the table at x = {x}");
        }
        assert!(table.any_moving());
        assert_eq!(table.ticks(), 200);
    }

    #[test]
    fn test_pocketed_body_ignores_shoot_and_place() {
        let mut table = table();
        let id = table.add_body(spec("seven", 125.0, 125.0)).unwrap();
        let pocket = table.pockets()[3].center();
        table.place(id, pocket).unwrap();
        table.update();
        assert!(table.bodies()[0].is_pocketed());
        table.shoot(id, DVec2::new(5.0, 5.0)).unwrap();
        table.place(id, DVec2::new(100.0, 100.0)).unwrap();
        assert_eq!(table.bodies()[0].pos(), pocket);
        assert!(!table.any_moving());
        assert_eq!(table.active().count(), 0);
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let mut table = table();
        let id = table.add_body(spec("cue", 100.0, 100.0)).unwrap();
        assert!(table.shoot(id, DVec2::new(f64::NAN, 0.0)).is_err());
        assert!(table.place(id, DVec2::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_legacy_models_still_step() {
        let config = TableConfig::legacy();
        assert_eq!(config.rail_contact, RailContact::Angular);
        let mut table = Table::build(config).unwrap();
        let id = table.add_body(spec("cue", 125.0, 125.0)).unwrap();
        table.shoot(id, DVec2::new(-1.0, 1.0)).unwrap();
        for _ in 0..50 {
            table.step();
        }
        assert!(table.bodies()[0].pos().is_finite());
    }

    proptest! {
        #[test]
        fn prop_pocketed_is_terminal(
            pocket in 0usize..6,
            vx in -5.0f64..5.0,
            vy in -5.0f64..5.0,
            ticks in 1usize..40,
        ) {
            let mut table = table();
            let id = table.add_body(spec("ball", 125.0, 250.0)).unwrap();
            let others = table.add_body(spec("other", 60.0, 60.0)).unwrap();
            table.shoot(others, DVec2::new(vx, vy)).unwrap();

            let center = table.pockets()[pocket].center();
            table.place(id, center).unwrap();
            table.shoot(id, DVec2::new(vx, vy)).unwrap();
            table.update();
            prop_assert!(table.bodies()[0].is_pocketed());

            for _ in 0..ticks {
                table.step();
                table.shoot(id, DVec2::new(vy, vx)).unwrap();
                let body = &table.bodies()[0];
                prop_assert_eq!(body.pos(), center);
                prop_assert!(!body.is_moving());
            }
        }
    }
}
