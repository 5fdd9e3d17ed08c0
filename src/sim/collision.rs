//! Probe-vs-hazard collision resolution
//!
//! A probe (the player or a player projectile) is tested against every live
//! hazard-tagged entity. Overlap is an axis-aligned box around the hazard's
//! center with half-extent equal to its radius. The scan stops at the first
//! qualifying hazard, so a probe resolves at most one hit per tick; which of
//! several overlapping hazards wins is arbitrary.

use super::entity::{Entity, EntityId};
use super::lifecycle::{destroy, destroy_id};
use super::registry::Registry;
use super::state::GameState;

/// Outcome of a resolved collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// The hazard that was hit
    pub id: EntityId,
    /// Value the hazard was worth when it went down
    pub value: u32,
    /// Pickup: the probe survives
    pub upgrade: bool,
}

/// Box overlap of `probe`'s center against `other`'s extent
#[inline]
pub fn overlaps(probe: &Entity, other: &Entity) -> bool {
    let d = (probe.pos - other.pos).abs();
    d.x < other.radius && d.y < other.radius
}

/// Shared originator, or one spawned the other
pub fn same_lineage(a: &Entity, b: &Entity) -> bool {
    (a.parent_id.is_some() && a.parent_id == b.parent_id)
        || a.parent_id == Some(b.id)
        || b.parent_id == Some(a.id)
}

/// Whether `other` counts as a hit for `probe`. Lineage is checked first.
pub fn can_collide(probe: &Entity, other: &Entity) -> bool {
    if same_lineage(probe, other) {
        return false;
    }
    other.id != probe.id && other.is_hazard() && other.is_alive() && overlaps(probe, other)
}

/// First live hazard the probe touches
pub fn find_hit(registry: &Registry, probe: &Entity) -> Option<EntityId> {
    registry
        .iter()
        .find(|other| can_collide(probe, other))
        .map(|other| other.id)
}

/// Every live hazard the probe touches (diagnostics and tests)
pub fn find_all_hits(registry: &Registry, probe: &Entity) -> Vec<EntityId> {
    registry
        .iter()
        .filter(|other| can_collide(probe, other))
        .map(|other| other.id)
        .collect()
}

/// Resolve one collision for `probe`. The hazard is destroyed; the probe is
/// destroyed too unless the hazard is an upgrade.
pub fn resolve(state: &mut GameState, probe: &mut Entity) -> Option<Hit> {
    if !probe.is_alive() {
        return None;
    }
    let id = find_hit(&state.registry, probe)?;
    let upgrade = state.registry.get(id).is_some_and(|e| e.is_upgrade());
    if !upgrade {
        destroy(state, probe);
    }
    let value = destroy_id(state, id).unwrap_or(0);
    Some(Hit { id, value, upgrade })
}
