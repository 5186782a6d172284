//! Render snapshot
//!
//! Flattens the world into per-body instance data an external renderer can
//! upload as-is: a unit sphere scaled to the body radius and moved to the
//! body's position, plus its colour.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::World;

/// One body's draw instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Column-major model matrix
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl BodyInstance {
    pub fn new(pos: Vec3, radius: f32, color: [f32; 4]) -> Self {
        let model = Mat4::from_translation(pos) * Mat4::from_scale(Vec3::splat(radius));
        Self {
            transform: model.to_cols_array_2d(),
            color,
        }
    }
}

/// Instances for every live body, or none when bodies are hidden
pub fn instances(world: &World) -> Vec<BodyInstance> {
    let settings = world.settings();
    if !settings.bodies_visible {
        return Vec::new();
    }
    world
        .bodies()
        .iter()
        .map(|b| BodyInstance::new(b.pos, settings.body_radius, b.tag.to_rgba_f32()))
        .collect()
}

/// Raw bytes of an instance slice
pub fn as_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
