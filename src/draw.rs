//! Draw snapshots for a rendering host
//!
//! The core never draws. It hands out flat `Pod` instance lists that can be
//! uploaded to a GPU buffer as-is with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::{Circle, RailSegment, Table};

/// Colors for table elements
pub mod colors {
    pub const BAIZE: [f32; 4] = [0.0, 0.2, 0.0, 1.0];
    pub const RAIL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const JAW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const POCKET: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
}

/// A circle outline or disc
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: Vec2,
    pub radius: f32,
    /// 1 for a filled disc, 0 for an outline
    pub filled: u32,
    pub color: [f32; 4],
}

impl CircleInstance {
    fn new(circle: &Circle, filled: bool, color: [f32; 4]) -> Self {
        Self {
            center: circle.center.as_vec2(),
            radius: circle.radius as f32,
            filled: u32::from(filled),
            color,
        }
    }
}

/// A straight line
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub start: Vec2,
    pub end: Vec2,
    pub color: [f32; 4],
}

impl SegmentInstance {
    fn new(rail: &RailSegment, color: [f32; 4]) -> Self {
        Self {
            start: rail.start().as_vec2(),
            end: rail.end().as_vec2(),
            color,
        }
    }
}

/// Everything needed to draw one frame of the table
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Playing surface as `[x, y, width, height]`
    pub surface: [f32; 4],
    pub segments: Vec<SegmentInstance>,
    /// Pockets, then jaws, then balls still in play
    pub circles: Vec<CircleInstance>,
}

impl DrawList {
    pub fn capture(table: &Table) -> Self {
        let geometry = table.geometry();
        let origin: Vec2 = geometry.origin().as_vec2();
        let extent: Vec2 = geometry.extent().as_vec2();

        let segments = table
            .rails()
            .iter()
            .map(|rail| SegmentInstance::new(rail, colors::RAIL))
            .collect();

        let mut circles = Vec::with_capacity(
            table.pockets().len() + table.bumpers().len() + table.bodies().len(),
        );
        circles.extend(
            table
                .pockets()
                .iter()
                .map(|p| CircleInstance::new(&p.zone, false, colors::POCKET)),
        );
        circles.extend(
            table
                .bumpers()
                .iter()
                .map(|jaw| CircleInstance::new(jaw, false, colors::JAW)),
        );
        circles.extend(
            table
                .active()
                .map(|(_, body)| CircleInstance::new(&body.circle(), true, body.color.to_rgba())),
        );

        Self {
            surface: [origin.x, origin.y, extent.x, extent.y],
            segments,
            circles,
        }
    }

    pub fn segment_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.segments)
    }

    pub fn circle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }
}
