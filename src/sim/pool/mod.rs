//! View pooling and spawn policies.
//!
//! `ObjectPool::new(n)` creates `n` hidden views up front. A view is in exactly one of `free` / `active` at any time. `release` is
//! idempotent: releasing a view that is not active is a no-op that returns
//! `false`, so two hits on the same entity in one tick cannot double-free it.
//!
//! When `free` runs dry the pool grows by creating a new view rather than
//! refusing the spawn.
//!
//! Spawn policies sit on top:
//! - [`TimerSpawner`]: at most one spawn per `update`, once `period` has
//!   elapsed since the last spawn (no catch-up).
//! - [`EventSpawner`]: spawns when asked (fragmentation, firing).

use bevy::log::debug;
use bevy::platform::collections::HashMap;

use crate::sim::views::{ViewArena, ViewId, ViewKind};

/// An entity that lives on a pooled view.
pub trait Poolable: Sized {
    /// Everything needed to place and initialise one instance.
    type SpawnData;

    /// View kind created for this pool.
    const VIEW: ViewKind;

    /// Build the entity for `view` and place the view. The pool marks it
    /// active afterwards.
    fn bind(view: ViewId, data: Self::SpawnData, arena: &mut ViewArena) -> Self;
}

#[derive(Debug)]
pub struct ObjectPool<E> {
    free: Vec<ViewId>,
    active: HashMap<ViewId, E>,
    created: usize,
}

impl<E: Poolable> ObjectPool<E> {
    pub fn new(capacity: usize, arena: &mut ViewArena) -> Self {
        let free = (0..capacity).map(|_| arena.create(E::VIEW)).collect();
        Self {
            free,
            active: HashMap::default(),
            created: capacity,
        }
    }

    /// Lend a view and bind a fresh entity to it.
    pub fn spawn(&mut self, data: E::SpawnData, arena: &mut ViewArena) -> ViewId {
        let view = match self.free.pop() {
            Some(view) => view,
            None => {
                self.created += 1;
                debug!("{:?} pool grew to {} views", E::VIEW, self.created);
                arena.create(E::VIEW)
            }
        };

        let entity = E::bind(view, data, arena);
        arena.slot_mut(view).active = true;

        let previous = self.active.insert(view, entity);
        debug_assert!(previous.is_none(), "view {view:?} was both free and active");
        view
    }

    /// Return `view` to the free list. `false` if it was not active.
    pub fn release(&mut self, view: ViewId, arena: &mut ViewArena) -> bool {
        if self.active.remove(&view).is_none() {
            return false;
        }
        arena.deactivate(view);
        self.free.push(view);
        true
    }

    /// Release every active entity.
    pub fn disable_all(&mut self, arena: &mut ViewArena) {
        for (view, _) in self.active.drain() {
            arena.deactivate(view);
            self.free.push(view);
        }
    }

    #[inline]
    pub fn contains(&self, view: ViewId) -> bool {
        self.active.contains_key(&view)
    }

    #[inline]
    pub fn get(&self, view: ViewId) -> Option<&E> {
        self.active.get(&view)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &E)> {
        self.active.iter().map(|(v, e)| (*v, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ViewId, &mut E)> {
        self.active.iter_mut().map(|(v, e)| (*v, e))
    }

    /// Snapshot of active views, sorted by id.
    pub fn active_views(&self) -> Vec<ViewId> {
        let mut views: Vec<ViewId> = self.active.keys().copied().collect();
        views.sort_unstable();
        views
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Views this pool has ever created.
    #[inline]
    pub fn created(&self) -> usize {
        self.created
    }

    #[cfg(test)]
    pub(crate) fn free_views(&self) -> &[ViewId] {
        &self.free
    }
}

/// Timer spawn policy.
#[derive(Debug)]
pub struct TimerSpawner<E> {
    pool: ObjectPool<E>,
    period: f32,
    last_spawn: Option<f32>,
}

impl<E: Poolable> TimerSpawner<E> {
    pub fn new(pool: ObjectPool<E>, period: f32) -> Self {
        Self {
            pool,
            period,
            last_spawn: None,
        }
    }

    /// Arm the timer; the first spawn comes one period after `now`.
    pub fn enable(&mut self, now: f32) {
        self.last_spawn = Some(now);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.last_spawn.is_some()
    }

    /// Spawn once if a full period has elapsed. Returns the new view.
    pub fn update(
        &mut self,
        now: f32,
        arena: &mut ViewArena,
        make_data: impl FnOnce() -> E::SpawnData,
    ) -> Option<ViewId> {
        let last = self.last_spawn?;
        if now < last + self.period {
            return None;
        }
        self.last_spawn = Some(now);
        Some(self.pool.spawn(make_data(), arena))
    }

    /// Release everything and disarm.
    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.pool.disable_all(arena);
        self.last_spawn = None;
    }

    #[inline]
    pub fn pool(&self) -> &ObjectPool<E> {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut ObjectPool<E> {
        &mut self.pool
    }
}

/// On-demand spawn policy.
#[derive(Debug)]
pub struct EventSpawner<E> {
    pool: ObjectPool<E>,
}

impl<E: Poolable> EventSpawner<E> {
    pub fn new(pool: ObjectPool<E>) -> Self {
        Self { pool }
    }

    pub fn spawn(&mut self, data: E::SpawnData, arena: &mut ViewArena) -> ViewId {
        self.pool.spawn(data, arena)
    }

    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.pool.disable_all(arena);
    }

    #[inline]
    pub fn pool(&self) -> &ObjectPool<E> {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut ObjectPool<E> {
        &mut self.pool
    }
}
