//! Body data
//!
//! A body is a circle in the z = 0 plane. Every body shares the radius in
//! `Settings`, so only per-body motion and collision state lives here.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spatial::Cell;
use crate::consts::TAG_CHANNEL_MIN;

/// Stable body identity; ordering decides which side of a pair does the work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display colour, re-rolled on every collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualTag(pub [u8; 4]);

impl VisualTag {
    /// Random opaque colour with no channel below `TAG_CHANNEL_MIN`
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut channel = || rng.random_range(TAG_CHANNEL_MIN..=u8::MAX);
        Self([channel(), channel(), channel(), u8::MAX])
    }

    /// Colour as normalized floats
    pub fn to_rgba_f32(self) -> [f32; 4] {
        self.0.map(|c| c as f32 / 255.0)
    }
}

impl Default for VisualTag {
    fn default() -> Self {
        Self([255, 255, 255, 255])
    }
}

/// Pending correction collected by the detectors, applied once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionResponse {
    pub pos_delta: Vec3,
    pub vel_delta: Vec3,
    pub has_collision: bool,
}

impl CollisionResponse {
    /// Add one contact's worth of correction
    #[inline]
    pub fn add(&mut self, pos_delta: Vec3, vel_delta: Vec3) {
        self.pos_delta += pos_delta;
        self.vel_delta += vel_delta;
        self.has_collision = true;
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when nothing is pending
    #[inline]
    pub fn is_clear(&self) -> bool {
        !self.has_collision && self.pos_delta == Vec3::ZERO && self.vel_delta == Vec3::ZERO
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub tag: VisualTag,
    /// Grid cell from the last hash build
    #[serde(skip)]
    pub cell: Cell,
    #[serde(skip)]
    pub response: CollisionResponse,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec3, vel: Vec3) -> Self {
        Self {
            id,
            pos,
            vel,
            tag: VisualTag::default(),
            cell: Cell::default(),
            response: CollisionResponse::default(),
        }
    }

    /// Rescale velocity to `speed`, keeping direction (a body at rest stays at rest)
    pub fn set_speed(&mut self, speed: f32) {
        self.vel = self.vel.normalize_or_zero() * speed;
    }
}
