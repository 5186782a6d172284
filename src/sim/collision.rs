//! Body-body collision detection
//!
//! Broadphase through the spatial hash, then an exact circle test per
//! candidate pair. Detection never touches live position or velocity: each
//! contact's correction is added to both bodies' `CollisionResponse` and
//! applied later in one step, so the result does not depend on the order
//! bodies are visited in.

use glam::Vec3;

use super::body::{Body, BodyId};
use super::spatial::SpatialHash;
use crate::reflect;

/// Separation axis used when two centers coincide
pub const FALLBACK_NORMAL: Vec3 = Vec3::X;

/// Result of a body-body overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from B toward A
    pub normal: Vec3,
    /// How far the circles overlap
    pub penetration: f32,
}

/// Per-body corrections for one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResponse {
    pub pos_delta_a: Vec3,
    pub vel_delta_a: Vec3,
    pub pos_delta_b: Vec3,
    pub vel_delta_b: Vec3,
}

/// Overlap test between two equal circles
///
/// Touching exactly (`distance == 2r`) is not a contact.
pub fn circle_contact(pos_a: Vec3, pos_b: Vec3, radius: f32) -> Option<Contact> {
    let required = radius * 2.0;
    let offset = pos_a - pos_b;
    let distance = offset.length();
    if distance >= required {
        return None;
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        FALLBACK_NORMAL
    };
    Some(Contact {
        normal,
        penetration: required - distance,
    })
}

/// Split the overlap evenly and reflect both velocities about the contact normal
pub fn pair_response(contact: Contact, vel_a: Vec3, vel_b: Vec3) -> PairResponse {
    let push = contact.normal * (contact.penetration * 0.5);
    PairResponse {
        pos_delta_a: push,
        vel_delta_a: reflect(vel_a, contact.normal) - vel_a,
        pos_delta_b: -push,
        vel_delta_b: reflect(vel_b, -contact.normal) - vel_b,
    }
}

/// Find every overlapping pair and accumulate responses
///
/// `hash` must have been built from `bodies` this frame. Each unordered pair
/// is handled once, from the body with the smaller id. Returns the pairs
/// found as `(smaller, larger)`.
pub fn detect_body_contacts(
    bodies: &mut [Body],
    hash: &SpatialHash,
    radius: f32,
) -> Vec<(BodyId, BodyId)> {
    let mut pairs = Vec::new();

    for a in 0..bodies.len() {
        let (id_a, pos_a, vel_a, cell_a) = {
            let body = &bodies[a];
            (body.id, body.pos, body.vel, body.cell)
        };

        for b in hash.neighbors(cell_a) {
            let (id_b, pos_b, vel_b) = {
                let body = &bodies[b];
                (body.id, body.pos, body.vel)
            };
            // Skips self and the mirrored half of every pair
            if id_a >= id_b {
                continue;
            }

            let Some(contact) = circle_contact(pos_a, pos_b, radius) else {
                continue;
            };
            let response = pair_response(contact, vel_a, vel_b);
            bodies[a]
                .response
                .add(response.pos_delta_a, response.vel_delta_a);
            bodies[b]
                .response
                .add(response.pos_delta_b, response.vel_delta_b);
            pairs.push((id_a, id_b));
        }
    }

    pairs
}
