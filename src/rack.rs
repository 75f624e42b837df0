//! The standard 16-ball rack
//!
//! Application-level setup, not physics: a cue ball on the head string and
//! fifteen object balls in a five-row triangle on the lower half of the table.

use glam::DVec2;

use crate::config::TableConfig;
use crate::consts::{BALL_MASS, CUE_BALL_MASS};
use crate::sim::{BodySpec, Rgb};

/// Label of the cue ball
pub const CUE: &str = "cue";

/// Half the spacing between neighbouring ball centers, in ball radii
const SPREAD: f64 = 1.3;

/// Triangle rows, apex first: (label, column offset, color)
///
/// Column offsets are in units of `radius * SPREAD`.
const ROWS: [&[(&str, i32, Rgb)]; 5] = [
    &[("1spot", 0, Rgb::RED)],
    &[("1stripe", -1, Rgb::YELLOW), ("2stripe", 1, Rgb::YELLOW)],
    &[("2spot", -2, Rgb::RED), ("black", 0, Rgb::BLACK), ("3spot", 2, Rgb::RED)],
    &[
        ("3stripe", -3, Rgb::YELLOW),
        ("4stripe", -1, Rgb::YELLOW),
        ("4spot", 1, Rgb::RED),
        ("5stripe", 3, Rgb::YELLOW),
    ],
    &[
        ("5spot", -4, Rgb::RED),
        ("6stripe", -2, Rgb::YELLOW),
        ("6spot", 0, Rgb::RED),
        ("7stripe", 2, Rgb::YELLOW),
        ("7spot", 4, Rgb::RED),
    ],
];

/// Where the cue ball starts: centered, two fifths down the table width
pub fn cue_spot(config: &TableConfig) -> DVec2 {
    let t = config.table_size();
    config.origin.as_dvec2() + DVec2::new(t / 2.0, t * 2.0 / 5.0)
}

/// Apex of the triangle: centered, three quarters of the way down
pub fn foot_spot(config: &TableConfig) -> DVec2 {
    let t = config.table_size();
    config.origin.as_dvec2() + DVec2::new(t / 2.0, t * 1.5)
}

/// The opening velocity given to the cue ball, one unit per tick on each axis
pub fn opening_shot() -> DVec2 {
    DVec2::new(-1.0, 1.0)
}

/// Cue ball first, then the triangle row by row
pub fn standard_rack(config: &TableConfig) -> Vec<BodySpec> {
    let r = config.radius();
    let column = r * SPREAD;
    let row_gap = 3.0_f64.sqrt() * r * SPREAD;
    let apex = foot_spot(config);

    let mut rack = Vec::with_capacity(16);
    rack.push(BodySpec::new(CUE, r, CUE_BALL_MASS, cue_spot(config)).with_color(Rgb::WHITE));
    for (row, balls) in ROWS.iter().enumerate() {
        for &(label, offset, color) in balls.iter() {
            let pos = apex + DVec2::new(f64::from(offset) * column, row as f64 * row_gap);
            rack.push(BodySpec::new(label, r, BALL_MASS, pos).with_color(color));
        }
    }
    rack
}
