//! Procedural table layout
//!
//! Every rail, jaw and pocket position is derived from the five layout
//! scalars of a `TableConfig`:
//! - six cushions, leaving diagonal gaps at the corners and a gap either side
//!   of the midline for the side pockets
//! - two jaws per cushion, pushed outward from each endpoint
//! - one side pocket per lower side cushion, two corner pockets per end cushion,
//!   placed per `PocketPlacement`

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Bumper, Circle, PocketKind, PocketZone, RailSegment};
use crate::config::{PocketPlacement, TableConfig};
use crate::error::Result;

/// Which edge of the table a rail runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RailSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl RailSide {
    /// Unit vector pointing away from the playing surface
    pub fn outward(&self) -> DVec2 {
        match self {
            RailSide::Top => DVec2::NEG_Y,
            RailSide::Bottom => DVec2::Y,
            RailSide::Left => DVec2::NEG_X,
            RailSide::Right => DVec2::X,
        }
    }
}

/// The immutable geometry of one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGeometry {
    origin: DVec2,
    size: f64,
    rails: Vec<RailSegment>,
    bumpers: Vec<Bumper>,
    pockets: Vec<PocketZone>,
}

impl TableGeometry {
    /// Derive rails, jaws and pockets from a validated config
    pub fn build(config: &TableConfig) -> Result<Self> {
        config.validate()?;

        let mut geometry = Self {
            origin: config.origin.as_dvec2(),
            size: config.table_size(),
            rails: build_rails(config)?,
            bumpers: Vec::new(),
            pockets: Vec::new(),
        };

        let jaw_radius = config.jaw_radius();
        let mut bumpers = Vec::with_capacity(geometry.rails.len() * 2);
        let mut pockets = Vec::with_capacity(6);
        for rail in &geometry.rails {
            let side = geometry.side_of(rail);
            for end in [rail.start(), rail.end()] {
                bumpers.push(Circle::new(end + side.outward() * jaw_radius, jaw_radius));
            }
            pockets.extend(geometry.pockets_for(rail, side, config));
        }
        geometry.bumpers = bumpers;
        geometry.pockets = pockets;

        Ok(geometry)
    }

    pub fn rails(&self) -> &[RailSegment] {
        &self.rails
    }

    pub fn bumpers(&self) -> &[Bumper] {
        &self.bumpers
    }

    pub fn pockets(&self) -> &[PocketZone] {
        &self.pockets
    }

    /// Top-left corner of the playing surface
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Width and height of the playing surface
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.size, 2.0 * self.size)
    }

    /// Center of the playing surface (the side pockets sit on its y)
    pub fn center(&self) -> DVec2 {
        self.origin + self.extent() * 0.5
    }

    /// Classify a rail by where it lies relative to the table center
    pub fn side_of(&self, rail: &RailSegment) -> RailSide {
        let mid = rail.midpoint();
        let center = self.center();
        if rail.is_horizontal() {
            if mid.y < center.y {
                RailSide::Top
            } else {
                RailSide::Bottom
            }
        } else if mid.x < center.x {
            RailSide::Left
        } else {
            RailSide::Right
        }
    }

    fn pockets_for(
        &self,
        rail: &RailSegment,
        side: RailSide,
        config: &TableConfig,
    ) -> Vec<PocketZone> {
        let clear = config.gap_vertical();
        let jaw = config.jaw_radius();
        let center = self.center();

        match side {
            RailSide::Left | RailSide::Right => {
                // Only the cushion below the midline owns the side pocket
                if rail.midpoint().y < center.y {
                    return Vec::new();
                }
                let shift = match config.pocket_placement {
                    PocketPlacement::Inset => -side.outward().x,
                    PocketPlacement::Classic => side.outward().x,
                };
                let x = rail.start().x + shift * jaw;
                vec![PocketZone {
                    zone: Circle::new(DVec2::new(x, center.y), clear - jaw),
                    kind: PocketKind::Side,
                }]
            }
            RailSide::Top | RailSide::Bottom => {
                let along = (clear + jaw) * std::f64::consts::FRAC_1_SQRT_2;
                let across = (clear - jaw) * std::f64::consts::FRAC_1_SQRT_2;
                // Corner pockets sit inside the cushion line, beyond its ends
                let inward_y = -side.outward().y;
                let radius = match config.pocket_placement {
                    PocketPlacement::Inset => clear - jaw + jaw * std::f64::consts::FRAC_1_SQRT_2,
                    PocketPlacement::Classic => clear - jaw / 2.0,
                };
                [rail.start(), rail.end()]
                    .into_iter()
                    .map(|end| {
                        let dir_x = (end.x - rail.midpoint().x).signum();
                        let c = DVec2::new(end.x + dir_x * along, end.y + inward_y * across);
                        PocketZone {
                            zone: Circle::new(c, radius),
                            kind: PocketKind::Corner,
                        }
                    })
                    .collect()
            }
        }
    }
}

fn build_rails(config: &TableConfig) -> Result<Vec<RailSegment>> {
    let x = f64::from(config.origin.x);
    let y = f64::from(config.origin.y);
    let t = config.table_size();
    let gv = config.gap_vertical();
    let gd = config.gap_diagonal();

    let segment = |x0: f64, y0: f64, x1: f64, y1: f64| {
        RailSegment::new(DVec2::new(x0, y0), DVec2::new(x1, y1))
    };

    Ok(vec![
        // Top
        segment(x + gd, y, x + t - gd, y)?,
        // Left, upper and lower
        segment(x, y + gd, x, y + t - gv)?,
        segment(x, y + t + gv, x, y + 2.0 * t - gd)?,
        // Bottom
        segment(x + gd, y + 2.0 * t, x + t - gd, y + 2.0 * t)?,
        // Right, upper and lower
        segment(x + t, y + gd, x + t, y + t - gv)?,
        segment(x + t, y + t + gv, x + t, y + 2.0 * t - gd)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn default_geometry() -> TableGeometry {
        TableGeometry::build(&TableConfig::default()).expect("default config builds")
    }

    /// Is `p` within 1e-6 of some point in `set`?
    fn has_point(set: &[DVec2], p: DVec2) -> bool {
        set.iter().any(|q| q.distance(p) < 1e-6)
    }

    #[test]
    fn test_counts() {
        let g = default_geometry();
        assert_eq!(g.rails().len(), 6);
        assert_eq!(g.bumpers().len(), 12);
        assert_eq!(g.pockets().len(), 6);
        let sides = g.pockets().iter().filter(|p| p.kind == PocketKind::Side).count();
        assert_eq!(sides, 2);
    }

    #[test]
    fn test_top_rail_span() {
        let g = default_geometry();
        let top = g.rails()[0];
        let gd = 6.0 * 2.0_f64.sqrt() * 2.2;
        assert!((top.start().x - gd).abs() < EPS);
        assert!((top.end().x - (250.0 - gd)).abs() < EPS);
        assert_eq!(top.start().y, 0.0);
        assert_eq!(top.end().y, 0.0);
        assert!((top.start().x - 18.67).abs() < 0.01);
        assert!((top.end().x - 231.33).abs() < 0.01);
    }

    #[test]
    fn test_side_pockets_on_midline() {
        let config = TableConfig::default();
        let g = default_geometry();
        let side: Vec<_> = g
            .pockets()
            .iter()
            .filter(|p| p.kind == PocketKind::Side)
            .collect();
        for pocket in &side {
            assert!((pocket.center().y - 250.0).abs() < EPS);
            assert!((pocket.radius() - (config.gap_vertical() - config.jaw_radius())).abs() < EPS);
        }
        // Pulled onto the table by the jaw radius
        let xs: Vec<f64> = side.iter().map(|p| p.center().x).collect();
        assert!(xs.iter().any(|x| (x - 4.2).abs() < EPS));
        assert!(xs.iter().any(|x| (x - 245.8).abs() < EPS));
    }

    #[test]
    fn test_classic_side_pockets_sit_off_the_table() {
        let config = TableConfig::default().with_pocket_placement(PocketPlacement::Classic);
        let g = TableGeometry::build(&config).unwrap();
        let xs: Vec<f64> = g
            .pockets()
            .iter()
            .filter(|p| p.kind == PocketKind::Side)
            .map(|p| p.center().x)
            .collect();
        assert_eq!(xs.len(), 2);
        assert!(xs.iter().any(|x| (x + 4.2).abs() < EPS));
        assert!(xs.iter().any(|x| (x - 254.2).abs() < EPS));
    }

    fn corner_radius(placement: PocketPlacement) -> f64 {
        let config = TableConfig::default().with_pocket_placement(placement);
        let g = TableGeometry::build(&config).unwrap();
        let radii: Vec<f64> = g
            .pockets()
            .iter()
            .filter(|p| p.kind == PocketKind::Corner)
            .map(|p| p.radius())
            .collect();
        assert_eq!(radii.len(), 4);
        assert!(radii.iter().all(|r| (r - radii[0]).abs() < EPS));
        radii[0]
    }

    #[test]
    fn test_corner_pocket_radius_per_placement() {
        let (r, p, j) = (6.0, 2.2, 0.7);
        let inset = r * p - r * j + r * j / 2.0_f64.sqrt();
        assert!((corner_radius(PocketPlacement::Inset) - inset).abs() < EPS);
        assert!((corner_radius(PocketPlacement::Classic) - (r * p - r * j / 2.0)).abs() < EPS);
    }

    #[test]
    fn test_corner_pocket_offsets() {
        let g = default_geometry();
        let top = g.rails()[0];
        let r = 6.0;
        let (p, j) = (2.2, 0.7);
        let expected = DVec2::new(
            top.start().x - (r * p + r * j) / 2.0_f64.sqrt(),
            (r * p - r * j) / 2.0_f64.sqrt(),
        );
        let corner = g
            .pockets()
            .iter()
            .find(|z| z.center().distance(expected) < 1e-6)
            .expect("top-left corner pocket");
        assert_eq!(corner.kind, PocketKind::Corner);
    }

    #[test]
    fn test_bumpers_sit_outside_the_surface() {
        let g = default_geometry();
        let (min, max) = (g.origin(), g.origin() + g.extent());
        for b in g.bumpers() {
            let inside = b.center.x > min.x
                && b.center.x < max.x
                && b.center.y > min.y
                && b.center.y < max.y;
            assert!(!inside, "jaw at {:?} is on the playing surface", b.center);
            assert!((b.radius - 4.2).abs() < EPS);
        }
    }

    #[test]
    fn test_sides_classified_from_geometry() {
        let g = default_geometry();
        let sides: Vec<_> = g.rails().iter().map(|r| g.side_of(r)).collect();
        assert_eq!(
            sides,
            vec![
                RailSide::Top,
                RailSide::Left,
                RailSide::Left,
                RailSide::Bottom,
                RailSide::Right,
                RailSide::Right
            ]
        );
    }

    #[test]
    fn test_zero_jaws_collapse_onto_rail_ends() {
        let config = TableConfig {
            jaw_multiplier: 0.0,
            ..TableConfig::default()
        };
        let g = TableGeometry::build(&config).unwrap();
        let ends: Vec<DVec2> = g.rails().iter().flat_map(|r| [r.start(), r.end()]).collect();
        for b in g.bumpers() {
            assert_eq!(b.radius, 0.0);
            assert!(has_point(&ends, b.center));
        }
    }

    #[test]
    fn test_offset_origin_translates_layout() {
        let base = default_geometry();
        let config = TableConfig::new(IVec2::new(40, -15), 250, 6, 2.2, 0.7);
        let moved = TableGeometry::build(&config).unwrap();
        let shift = DVec2::new(40.0, -15.0);
        for (a, b) in base.pockets().iter().zip(moved.pockets()) {
            assert!((a.center() + shift).distance(b.center()) < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_layout_is_symmetric(
            ox in -500i32..500,
            oy in -500i32..500,
            t in 120i32..800,
            r in 1i32..12,
            p in 0.5f64..2.5,
            jf in 0.0f64..0.95,
            classic in any::<bool>(),
        ) {
            let placement = if classic { PocketPlacement::Classic } else { PocketPlacement::Inset };
            let config = TableConfig::new(IVec2::new(ox, oy), t, r, p, p * jf)
                .with_pocket_placement(placement);
            prop_assume!(config.validate().is_ok());
            let g = TableGeometry::build(&config).unwrap();

            prop_assert_eq!(g.rails().len(), 6);
            prop_assert_eq!(g.bumpers().len(), 12);
            prop_assert_eq!(g.pockets().len(), 6);

            let c = g.center();
            let mirror_x = |v: DVec2| DVec2::new(2.0 * c.x - v.x, v.y);
            let mirror_y = |v: DVec2| DVec2::new(v.x, 2.0 * c.y - v.y);

            let pockets: Vec<DVec2> = g.pockets().iter().map(|z| z.center()).collect();
            let jaws: Vec<DVec2> = g.bumpers().iter().map(|b| b.center).collect();
            for set in [&pockets, &jaws] {
                for v in set.iter() {
                    prop_assert!(has_point(set, mirror_x(*v)));
                    prop_assert!(has_point(set, mirror_y(*v)));
                }
            }
        }
    }
}
