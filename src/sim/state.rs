//! World state and body lifecycle
//!
//! `World` owns the live bodies, the settings they are simulated under, and
//! the seeded RNG that drives placement and collision colours. Bodies are
//! kept sorted by id so iteration order is stable.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, VisualTag};
use super::spatial::SpatialHash;
use super::spawn::{SpawnError, find_placement};
use crate::consts::INITIAL_BODY_COUNT;
use crate::settings::Settings;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Frames stepped so far
    pub frame: u64,
    settings: Settings,
    bodies: Vec<Body>,
    /// Per-frame broadphase scratch, rebuilt by `tick`
    pub(crate) hash: SpatialHash,
    pub(crate) rng: Pcg32,
    next_id: u64,
}

impl World {
    /// Empty world with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self {
            seed,
            frame: 0,
            settings,
            bodies: Vec::new(),
            hash: SpatialHash::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Split borrow for the pipeline: bodies, hash, and RNG together
    pub(crate) fn parts_mut(&mut self) -> (&mut [Body], &mut SpatialHash, &mut Pcg32) {
        (&mut self.bodies, &mut self.hash, &mut self.rng)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Spatial hash from the most recent frame
    pub fn spatial_hash(&self) -> &SpatialHash {
        &self.hash
    }

    fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a body at a random free position
    pub fn spawn_body(&mut self) -> Result<BodyId, SpawnError> {
        let placement = match find_placement(&self.bodies, &self.settings, &mut self.rng) {
            Ok(placement) => placement,
            Err(e) => {
                log::warn!("Failed to place body: {}", e);
                return Err(e);
            }
        };
        let id = self.insert_body(placement.pos, placement.vel);
        log::debug!("Spawned body {} at ({:.1}, {:.1})", id, placement.pos.x, placement.pos.y);
        Ok(id)
    }

    /// Try to spawn `count` bodies; returns how many were placed
    pub fn spawn_bodies(&mut self, count: usize) -> usize {
        let placed = (0..count).filter(|_| self.spawn_body().is_ok()).count();
        log::info!("Spawned {}/{} bodies ({} live)", placed, count, self.bodies.len());
        placed
    }

    /// Spawn the start-up population
    pub fn populate(&mut self) -> usize {
        self.spawn_bodies(INITIAL_BODY_COUNT)
    }

    /// Place a body exactly where asked, with no overlap check
    pub fn insert_body(&mut self, pos: Vec3, vel: Vec3) -> BodyId {
        let id = self.next_body_id();
        let mut body = Body::new(id, pos, vel);
        body.tag = VisualTag::random(&mut self.rng);
        // Ids are monotonic, so pushing keeps the vec sorted
        self.bodies.push(body);
        id
    }

    /// Remove the first live body
    pub fn remove_one(&mut self) -> Option<BodyId> {
        if self.bodies.is_empty() {
            return None;
        }
        let body = self.bodies.remove(0);
        log::info!("Removed body {}", body.id);
        Some(body.id)
    }

    /// Remove a specific body
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(self.bodies.remove(index))
    }

    /// Remove every body; returns how many were removed
    pub fn remove_all(&mut self) -> usize {
        let removed = self.bodies.len();
        self.bodies.clear();
        log::info!("Removed all bodies ({})", removed);
        removed
    }

    pub fn set_arena_half_extent(&mut self, half_extent: f32) {
        self.settings.arena_half_extent = half_extent;
    }

    pub fn set_body_radius(&mut self, radius: f32) {
        self.settings.body_radius = radius;
    }

    pub fn set_bodies_visible(&mut self, visible: bool) {
        self.settings.bodies_visible = visible;
    }

    /// Change body speed and immediately rescale every velocity to match
    pub fn set_body_speed(&mut self, speed: f32) {
        self.settings.body_speed = speed;
        for body in &mut self.bodies {
            body.set_speed(speed);
        }
        log::debug!("Body speed set to {} ({} bodies rescaled)", speed, self.bodies.len());
    }

    /// Replace all settings, firing the speed rescale only if speed changed
    pub fn apply_settings(&mut self, settings: Settings) {
        let speed_changed = settings.body_speed != self.settings.body_speed;
        self.settings = settings;
        if speed_changed {
            self.set_body_speed(settings.body_speed);
        }
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            seed: self.seed,
            frame: self.frame,
            settings: self.settings,
            bodies: self.bodies.clone(),
        }
    }
}

/// Plain-data dump of a world for tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub frame: u64,
    pub settings: Settings,
    pub bodies: Vec<Body>,
}
