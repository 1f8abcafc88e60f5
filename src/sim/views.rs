//! View handles.
//!
//! Every renderable thing the simulation lends out is a slot in the
//! [`ViewArena`], addressed by a [`ViewId`]. Ids are assigned once, when the
//! slot is created, and never point at a different slot afterwards. Pools
//! recycle ids; they never recycle slots for a different kind.
//!
//! Renderers read the arena and mirror it; the simulation never talks to a
//! renderer directly.

use bevy::math::Vec2;

use crate::common::layers::Layer;

/// Opaque handle to a view slot. Two entities are the same entity iff they
/// hold the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which prefab a view stands for. Mini asteroids reuse the asteroid view at
/// a smaller scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Player,
    Asteroid,
    Enemy,
    Projectile,
}

impl ViewKind {
    /// Collision layer an active view of this kind is a member of.
    #[inline]
    pub fn layer(self) -> Layer {
        match self {
            ViewKind::Player => Layer::Player,
            ViewKind::Asteroid => Layer::Asteroid,
            ViewKind::Enemy => Layer::Enemy,
            ViewKind::Projectile => Layer::Projectile,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewSlot {
    pub kind: ViewKind,
    pub position: Vec2,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale: f32,
    pub active: bool,
    /// Far end of the laser beam while it is firing (player view only).
    pub beam: Option<Vec2>,
}

impl ViewSlot {
    fn hidden(kind: ViewKind) -> Self {
        Self {
            kind,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            active: false,
            beam: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewArena {
    slots: Vec<ViewSlot>,
}

impl ViewArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hidden view. This is the only allocation point for views.
    pub fn create(&mut self, kind: ViewKind) -> ViewId {
        let id = ViewId(self.slots.len() as u32);
        self.slots.push(ViewSlot::hidden(kind));
        id
    }

    /// Total views ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ViewId) -> Option<&ViewSlot> {
        self.slots.get(id.index())
    }

    /// Slot of a view created by this arena.
    ///
    /// Ids only come from [`ViewArena::create`], so an unknown id is a bug.
    #[inline]
    pub fn slot(&self, id: ViewId) -> &ViewSlot {
        &self.slots[id.index()]
    }

    #[inline]
    pub fn slot_mut(&mut self, id: ViewId) -> &mut ViewSlot {
        &mut self.slots[id.index()]
    }

    #[inline]
    pub fn position(&self, id: ViewId) -> Vec2 {
        self.slot(id).position
    }

    #[inline]
    pub fn is_active(&self, id: ViewId) -> bool {
        self.get(id).is_some_and(|s| s.active)
    }

    /// Show a view at `position`.
    pub fn activate(&mut self, id: ViewId, position: Vec2) {
        let slot = self.slot_mut(id);
        slot.position = position;
        slot.active = true;
    }

    /// Hide a view and clear transient visuals.
    pub fn deactivate(&mut self, id: ViewId) {
        let slot = self.slot_mut(id);
        slot.active = false;
        slot.beam = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &ViewSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (ViewId(i as u32), slot))
    }

    pub fn active_count(&self, kind: ViewKind) -> usize {
        self.slots
            .iter()
            .filter(|s| s.active && s.kind == kind)
            .count()
    }
}
