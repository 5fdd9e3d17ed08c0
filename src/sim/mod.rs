//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Entities appear and disappear only at the end-of-tick cleanup
//! - No rendering or platform dependencies (sound cues are only queued)

pub mod autopilot;
pub mod collision;
pub mod director;
pub mod entity;
pub mod hazards;
pub mod lifecycle;
pub mod player;
pub mod registry;
pub mod shape;
pub mod state;
pub mod tick;
pub mod timer;

pub use autopilot::autopilot;
pub use collision::{Hit, can_collide, find_hit, resolve};
pub use director::{SpawnDirector, SpawnKind};
pub use entity::{Entity, EntityId, EntityKind, Tags};
pub use lifecycle::{destroy, destroy_id, flush};
pub use registry::Registry;
pub use shape::Shape;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use timer::Countdown;
