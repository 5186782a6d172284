use bounce_arena::consts::MAX_PLACEMENT_RETRIES;
use bounce_arena::render;
use bounce_arena::sim::{SpawnError, World, tick};
use bounce_arena::Settings;
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn world_with(settings: Settings) -> World {
    World::with_settings(settings, 1234)
}

#[test]
fn head_on_pair_bounces_apart() {
    let mut world = World::new(1);
    let a = world.insert_body(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0));
    let b = world.insert_body(Vec3::new(15.0, 0.0, 0.0), Vec3::new(-100.0, 0.0, 0.0));

    let report = tick(&mut world, DT);
    assert_eq!(report.body_contacts.len(), 1, "expected one contact");

    let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
    assert!(a.pos.distance(b.pos) >= 20.0);
    assert!((a.pos.y).abs() < 1e-5 && (b.pos.y).abs() < 1e-5);
    assert!(a.vel.x < 0.0 && b.vel.x > 0.0);

    // Moving apart now: no contact next frame
    let report = tick(&mut world, DT);
    assert!(report.body_contacts.is_empty());
}

#[test]
fn right_wall_reflects_and_contains() {
    let mut world = world_with(Settings {
        arena_half_extent: 250.0,
        body_radius: 10.0,
        ..Default::default()
    });
    let id = world.insert_body(Vec3::new(245.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0));

    let report = tick(&mut world, DT);
    assert_eq!(report.wall_contacts, 1);

    let body = world.body(id).unwrap();
    assert!((body.vel.x + 100.0).abs() < 1e-3);
    assert!((-240.0..=240.0).contains(&body.pos.x));
}

#[test]
fn saturated_arena_refuses_spawn() {
    let mut world = world_with(Settings {
        arena_half_extent: 30.0,
        body_radius: 10.0,
        ..Default::default()
    });
    for x in [-20.0, 0.0, 20.0] {
        for y in [-20.0, 0.0, 20.0] {
            world.insert_body(Vec3::new(x, y, 0.0), Vec3::ZERO);
        }
    }

    assert_eq!(
        world.spawn_body(),
        Err(SpawnError::NoFreeSpace {
            attempts: MAX_PLACEMENT_RETRIES
        })
    );
    assert_eq!(world.body_count(), 9);
    assert_eq!(world.spawn_bodies(3), 0);
}

#[test]
fn speed_change_rescales_live_bodies() {
    let mut world = World::new(8);
    world.spawn_bodies(10);
    let headings: Vec<Vec3> = world.bodies().iter().map(|b| b.vel.normalize()).collect();

    world.set_body_speed(250.0);

    for (body, heading) in world.bodies().iter().zip(headings) {
        assert!((body.vel.length() - 250.0).abs() < 1e-2);
        assert!((body.vel.normalize() - heading).length() < 1e-4);
    }
}

#[test]
fn long_run_keeps_invariants() {
    let mut world = world_with(Settings {
        body_speed: 300.0,
        ..Default::default()
    });
    world.spawn_bodies(25);

    for _ in 0..300 {
        let report = tick(&mut world, DT);
        for &(a, b) in &report.body_contacts {
            assert!(a < b);
        }
        assert!(world.bodies().iter().all(|b| b.response.is_clear()));
    }

    // Nothing escapes further than one radius past the walls
    let limit = world.settings().arena_half_extent + world.settings().body_radius;
    for body in world.bodies() {
        assert!(body.pos.x.abs() <= limit && body.pos.y.abs() <= limit);
        assert_eq!(body.pos.z, 0.0);
    }
}

#[test]
fn lifecycle_between_frames() {
    let mut world = World::new(21);
    assert_eq!(world.populate(), 10);
    tick(&mut world, DT);

    world.remove_one();
    tick(&mut world, DT);
    assert_eq!(world.spatial_hash().len(), 9);

    world.remove_all();
    let report = tick(&mut world, DT);
    assert!(report.body_contacts.is_empty());
    assert!(render::instances(&world).is_empty());
}
