//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (bodies sorted by id)
//! - Detection writes accumulators only; live state changes in one apply step
//! - No rendering or platform dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod spatial;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, CollisionResponse, VisualTag};
pub use boundary::{Wall, WallContact, detect_wall_contacts, wall_contact};
pub use collision::{Contact, circle_contact, detect_body_contacts, pair_response};
pub use spatial::{Cell, CellKey, SpatialHash};
pub use spawn::{Placement, SpawnError, find_placement};
pub use state::{World, WorldSnapshot};
pub use tick::{FrameReport, apply_responses, integrate, tick};
