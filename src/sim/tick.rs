//! Per-frame simulation pipeline
//!
//! Phases run in a fixed order:
//! 1. rebuild the spatial hash from current positions
//! 2. body-body detection (accumulators only)
//! 3. body-wall detection (accumulators only)
//! 4. apply and reset accumulators
//! 5. integrate position by velocity over a clamped time step

use rand::Rng;

use super::body::{Body, BodyId, VisualTag};
use super::boundary::detect_wall_contacts;
use super::collision::detect_body_contacts;
use super::state::World;
use crate::consts::MAX_FRAME_DT;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Body-body contacts as `(smaller id, larger id)`
    pub body_contacts: Vec<(BodyId, BodyId)>,
    /// Bodies that touched at least one wall
    pub wall_contacts: usize,
    /// Bodies whose accumulated response was applied
    pub responses_applied: usize,
    /// Time step actually integrated
    pub dt: f32,
}

/// Clamp a host frame time to the integrable range
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Apply every pending response, re-roll the colour of bodies that collided,
/// and reset the accumulators. The only place live position and velocity
/// change outside of integration.
pub fn apply_responses(bodies: &mut [Body], rng: &mut impl Rng) -> usize {
    let mut applied = 0;
    for body in bodies.iter_mut().filter(|b| b.response.has_collision) {
        body.pos += body.response.pos_delta;
        body.vel += body.response.vel_delta;
        body.tag = VisualTag::random(rng);
        body.response.reset();
        applied += 1;
    }
    applied
}

/// Advance positions by velocity
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies.iter_mut() {
        body.pos += body.vel * dt;
    }
}

/// Run one full frame of the pipeline
pub fn tick(world: &mut World, frame_dt: f32) -> FrameReport {
    let settings = *world.settings();
    let radius = settings.body_radius;
    let dt = clamp_dt(frame_dt);
    let (bodies, hash, rng) = world.parts_mut();

    hash.build(bodies, settings.cell_size());

    let body_contacts = detect_body_contacts(bodies, hash, radius);
    let wall_contacts = detect_wall_contacts(bodies, radius, settings.arena_half_extent);

    let responses_applied = apply_responses(bodies, rng);
    integrate(bodies, dt);

    world.frame += 1;
    if !body_contacts.is_empty() {
        log::trace!(
            "Frame {}: {} body contacts, {} wall contacts",
            world.frame,
            body_contacts.len(),
            wall_contacts
        );
    }

    FrameReport {
        body_contacts,
        wall_contacts,
        responses_applied,
        dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    use crate::settings::Settings;

    #[test]
    fn test_head_on_scenario() {
        let mut world = World::with_settings(
            Settings {
                body_radius: 10.0,
                ..Default::default()
            },
            1,
        );
        let a = world.insert_body(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0));
        let b = world.insert_body(Vec3::new(15.0, 0.0, 0.0), Vec3::new(-100.0, 0.0, 0.0));

        let report = tick(&mut world, 1.0 / 60.0);
        assert_eq!(report.body_contacts, vec![(a, b)]);

        let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
        assert!(a.pos.distance(b.pos) >= 20.0);
        assert!(a.vel.x < 0.0);
        assert!(b.vel.x > 0.0);
    }

    #[test]
    fn test_right_wall_scenario() {
        let mut world = World::new(1);
        let id = world.insert_body(Vec3::new(245.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0));

        let report = tick(&mut world, 1.0 / 60.0);
        assert_eq!(report.wall_contacts, 1);

        let body = world.body(id).unwrap();
        assert!(body.vel.x < 0.0);
        assert!(body.pos.x >= -240.0 && body.pos.x <= 240.0);
    }

    #[test]
    fn test_accumulators_clear_after_frame() {
        let mut world = World::new(5);
        world.insert_body(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        world.insert_body(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        world.insert_body(Vec3::new(248.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));

        let report = tick(&mut world, 0.01);
        assert_eq!(report.responses_applied, 3);
        assert!(world.bodies().iter().all(|b| b.response.is_clear()));
    }

    #[test]
    fn test_collision_rerolls_tag_only_on_contact() {
        let mut world = World::new(5);
        let hit = world.insert_body(Vec3::ZERO, Vec3::X);
        world.insert_body(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        let idle = world.insert_body(Vec3::new(100.0, 100.0, 0.0), Vec3::X);
        let hit_tag = world.body(hit).unwrap().tag;
        let idle_tag = world.body(idle).unwrap().tag;

        tick(&mut world, 0.01);
        assert_eq!(world.body(idle).unwrap().tag, idle_tag);
        // Random re-roll; a repeat of the same colour is astronomically unlikely
        assert_ne!(world.body(hit).unwrap().tag, hit_tag);
    }

    #[test]
    fn test_dt_is_clamped() {
        assert_eq!(clamp_dt(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(0.016), 0.016);

        let mut world = World::new(1);
        let id = world.insert_body(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0));
        let report = tick(&mut world, 10.0);
        assert_eq!(report.dt, MAX_FRAME_DT);
        assert!((world.body(id).unwrap().pos.x - 100.0 * MAX_FRAME_DT).abs() < 1e-3);
    }

    #[test]
    fn test_frame_counter_and_hash_rebuilt() {
        let mut world = World::new(3);
        world.spawn_bodies(6);
        tick(&mut world, 0.01);
        tick(&mut world, 0.01);
        assert_eq!(world.frame, 2);
        assert_eq!(world.spatial_hash().len(), 6);

        world.remove_all();
        tick(&mut world, 0.01);
        assert!(world.spatial_hash().is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut w1 = World::new(99999);
        let mut w2 = World::new(99999);
        w1.spawn_bodies(30);
        w2.spawn_bodies(30);

        for _ in 0..120 {
            tick(&mut w1, 1.0 / 60.0);
            tick(&mut w2, 1.0 / 60.0);
        }

        for (a, b) in w1.bodies().iter().zip(w2.bodies()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, b.vel);
        }
    }

    proptest! {
        #[test]
        fn prop_isolated_pair_separates(
            gap in 0.5f32..19.5,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 0.0f32..200.0,
        ) {
            let mut world = World::new(1);
            let dir = crate::planar_direction(angle);
            let a = world.insert_body(Vec3::ZERO, dir * speed);
            let b = world.insert_body(dir * gap, -dir * speed);

            let report = tick(&mut world, 1.0 / 60.0);
            prop_assert_eq!(report.body_contacts.len(), 1);

            let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
            prop_assert!(a.pos.distance(b.pos) >= 20.0 - 1e-3);
        }

        #[test]
        fn prop_bodies_stay_in_arena(
            seed in any::<u64>(),
            frames in 1usize..60,
        ) {
            let settings = Settings {
                body_speed: 300.0,
                ..Default::default()
            };
            let mut world = World::with_settings(settings, seed);
            world.spawn_bodies(6);

            // Per-frame travel (5 units) stays under the radius, so one
            // frame's correction always brings a body back
            for _ in 0..frames {
                tick(&mut world, 1.0 / 60.0);
            }
            let h = settings.arena_half_extent + 1e-3;
            for body in world.bodies() {
                prop_assert!(body.pos.x.abs() <= h && body.pos.y.abs() <= h);
            }
        }
    }
}
