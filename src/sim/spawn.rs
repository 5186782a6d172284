//! Body placement
//!
//! Rejection sampling: draw a uniform position inside the arena and retry
//! while it overlaps any live body. Every live body is checked, not just grid
//! neighbours, because the hash may be stale between frames.

use glam::Vec3;
use rand::Rng;

use super::body::Body;
use crate::consts::MAX_PLACEMENT_RETRIES;
use crate::planar_direction;
use crate::settings::Settings;

/// Why a body could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("no free position found after {attempts} attempts")]
    NoFreeSpace { attempts: u32 },
    #[error("arena is too small to hold a body")]
    ArenaTooSmall,
}

/// Position and velocity for a new body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// True if a body centered at `pos` would overlap any of `bodies`
pub fn overlaps_any(pos: Vec3, bodies: &[Body], radius: f32) -> bool {
    let required = radius * 2.0;
    bodies.iter().any(|b| b.pos.distance(pos) < required)
}

/// Find a free spot for a new body and pick its launch velocity
pub fn find_placement(
    bodies: &[Body],
    settings: &Settings,
    rng: &mut impl Rng,
) -> Result<Placement, SpawnError> {
    let (lo, hi) = settings.spawn_range().ok_or(SpawnError::ArenaTooSmall)?;

    let mut attempts = 0;
    let pos = loop {
        if attempts == MAX_PLACEMENT_RETRIES {
            return Err(SpawnError::NoFreeSpace { attempts });
        }
        attempts += 1;

        let candidate = Vec3::new(rng.random_range(lo..=hi), rng.random_range(lo..=hi), 0.0);
        if !overlaps_any(candidate, bodies, settings.body_radius) {
            break candidate;
        }
    };

    let heading = rng.random_range(0.0..std::f32::consts::TAU);
    Ok(Placement {
        pos,
        vel: planar_direction(heading) * settings.body_speed,
    })
}
