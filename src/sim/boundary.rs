//! Body-wall collision detection
//!
//! The arena is the square `[-h, h]²`. Walls are tested per body without the
//! grid. Corrections go into the same accumulator the body-body pass uses,
//! so a body can resolve a corner and a body contact in one frame.

use glam::Vec3;

use super::body::Body;
use crate::reflect;

/// One of the four arena walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Bottom, Wall::Top];

    /// Unit normal pointing into the arena
    pub fn inward_normal(self) -> Vec3 {
        match self {
            Wall::Left => Vec3::X,
            Wall::Right => Vec3::NEG_X,
            Wall::Bottom => Vec3::Y,
            Wall::Top => Vec3::NEG_Y,
        }
    }

    /// How far the body's edge is past this wall, if it is and the body is
    /// still moving outward
    fn violation(self, pos: Vec3, vel: Vec3, radius: f32, half_extent: f32) -> Option<f32> {
        let (edge_past, heading_out) = match self {
            Wall::Left => (-half_extent - (pos.x - radius), vel.x < 0.0),
            Wall::Right => (pos.x + radius - half_extent, vel.x > 0.0),
            Wall::Bottom => (-half_extent - (pos.y - radius), vel.y < 0.0),
            Wall::Top => (pos.y + radius - half_extent, vel.y > 0.0),
        };
        (edge_past >= 0.0 && heading_out).then_some(edge_past)
    }
}

/// Walls hit by one body this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallContact {
    /// Sum of the per-wall corrections
    pub pos_delta: Vec3,
    /// Combined inward normal, unit length (zero if no wall was hit)
    pub normal: Vec3,
    pub walls_hit: u8,
}

/// Test one body against all four walls
pub fn wall_contact(pos: Vec3, vel: Vec3, radius: f32, half_extent: f32) -> Option<WallContact> {
    let mut contact = WallContact::default();
    let mut normal_sum = Vec3::ZERO;

    for wall in Wall::ALL {
        if let Some(depth) = wall.violation(pos, vel, radius, half_extent) {
            let inward = wall.inward_normal();
            contact.pos_delta += inward * depth;
            normal_sum += inward;
            contact.walls_hit += 1;
        }
    }

    if contact.walls_hit == 0 {
        return None;
    }
    contact.normal = normal_sum.normalize_or_zero();
    Some(contact)
}

/// Accumulate wall responses for every body
///
/// Returns how many bodies touched at least one wall.
pub fn detect_wall_contacts(bodies: &mut [Body], radius: f32, half_extent: f32) -> usize {
    let mut touched = 0;

    for body in bodies.iter_mut() {
        let Some(contact) = wall_contact(body.pos, body.vel, radius, half_extent) else {
            continue;
        };
        let vel_delta = if contact.normal != Vec3::ZERO {
            reflect(body.vel, contact.normal) - body.vel
        } else {
            Vec3::ZERO
        };
        body.response.add(contact.pos_delta, vel_delta);
        touched += 1;
    }

    touched
}
