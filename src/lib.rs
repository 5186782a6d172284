//! Bounce Arena - bouncing bodies in a square arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spatial hash, collisions, integration)
//! - `settings`: Shared tuning record, loadable from JSON
//! - `render`: Per-frame instance snapshot for an external renderer

pub mod render;
pub mod settings;
pub mod sim;

pub use render::BodyInstance;
pub use settings::{Settings, SettingsError};
pub use sim::{BodyId, FrameReport, SpawnError, World, tick};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Default arena half-extent (walls at ±this on x and y)
    pub const ARENA_HALF_EXTENT: f32 = 250.0;
    /// Default body radius
    pub const BODY_RADIUS: f32 = 10.0;
    /// Default body speed (units per second)
    pub const BODY_SPEED: f32 = 1500.0;

    /// Bodies spawned by `World::populate`
    pub const INITIAL_BODY_COUNT: usize = 10;
    /// Samples tried before a spawn gives up
    pub const MAX_PLACEMENT_RETRIES: u32 = 100;

    /// Largest time step integrated in one frame (hitch protection)
    pub const MAX_FRAME_DT: f32 = 0.33;
    /// Smallest spatial hash cell size
    pub const MIN_CELL_SIZE: f32 = 1.0;

    /// Visual tag channels are drawn from this range so bodies never go dark
    pub const TAG_CHANNEL_MIN: u8 = 50;
}

/// Reflect a vector about a unit normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

/// Planar unit vector for an angle (radians), z = 0
#[inline]
pub fn planar_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), theta.sin(), 0.0)
}
