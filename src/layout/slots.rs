//! Append-only ledger of reserved ornament positions.

use serde::Serialize;

use crate::math::angle_distance;

use super::config::GapRule;

/// A position on the tree in cylindrical coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placement {
    /// Radians around the trunk axis; wraps mod 2PI
    pub angle: f32,
    pub height: f32,
    /// Distance from the trunk axis
    pub radius: f32,
}

/// One reserved placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Slot {
    pub angle: f32,
    pub height: f32,
    pub radius: f32,
    pub weight: f32,
}

impl Slot {
    /// Whether this slot excludes `candidate` under `rule`: all three
    /// distances fall below the rule's gaps scaled by this slot's weight.
    pub fn blocks(&self, candidate: &Placement, rule: &GapRule) -> bool {
        let w = self.weight;
        angle_distance(candidate.angle, self.angle) < rule.min_angle_gap * w
            && (candidate.height - self.height).abs() < rule.min_height_gap * w
            && (candidate.radius - self.radius).abs() < rule.min_radius_gap * w
    }
}

/// Handle to a registered slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// Ordered registry of every slot claimed during one scene build.
///
/// Slots are never removed; only their radius may be corrected afterwards.
#[derive(Clone, Debug, Default)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot unconditionally.
    pub fn register(&mut self, angle: f32, height: f32, radius: f32, weight: f32) -> SlotId {
        self.slots.push(Slot { angle, height, radius, weight });
        SlotId(self.slots.len() - 1)
    }

    pub fn register_placement(&mut self, placement: &Placement, weight: f32) -> SlotId {
        self.register(placement.angle, placement.height, placement.radius, weight)
    }

    /// True unless some existing slot blocks `candidate`.
    pub fn is_free(&self, candidate: &Placement, rule: &GapRule) -> bool {
        !self.slots.iter().any(|s| s.blocks(candidate, rule))
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    /// Correct the radius of a slot once its ornament's final size is known.
    pub fn set_radius(&mut self, id: SlotId, radius: f32) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) => {
                slot.radius = radius;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}
