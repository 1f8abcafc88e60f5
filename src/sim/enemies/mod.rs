//! Homing enemies.
//!
//! Timer-spawned at a random in-bounds position, then every tick they step
//! straight at the player. They do not wrap: the player is always inside
//! the playfield, so neither are they for long.
//!
//! Destruction follows the asteroid flow: `handle_hit` emits
//! `EnemyDestroyed` + `PlayerScored(Enemy)`, the handler registered in
//! `enable` queues the view, and `apply_destruction` releases it after the
//! weapon pass.

use std::sync::{Arc, Mutex};

use bevy::log::debug;
use bevy::math::Vec2;
use bevy::platform::collections::HashSet;
use rand::rngs::StdRng;

use crate::common::config::EnemyConfig;
use crate::sim::bounds::BoundsWrapper;
use crate::sim::events::{EnemyDestroyed, EventEmitter, EventSubscriber, SubscriptionScope, lock};
use crate::sim::pool::{ObjectPool, Poolable, TimerSpawner};
use crate::sim::score::ScoreKind;
use crate::sim::views::{ViewArena, ViewId, ViewKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    pub speed: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct EnemySpawn {
    pub position: Vec2,
    pub speed: f32,
}

impl Poolable for Enemy {
    type SpawnData = EnemySpawn;
    const VIEW: ViewKind = ViewKind::Enemy;

    fn bind(view: ViewId, data: EnemySpawn, arena: &mut ViewArena) -> Self {
        let slot = arena.slot_mut(view);
        slot.position = data.position;
        slot.rotation = 0.0;
        slot.scale = 1.0;
        Enemy { speed: data.speed }
    }
}

/// Step from `current` toward `target` by at most `max_step`, landing on
/// `target` when it is within reach.
#[inline]
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - current;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        target
    } else {
        current + delta / dist * max_step
    }
}

#[derive(Debug)]
pub struct EnemyController {
    cfg: EnemyConfig,
    spawner: TimerSpawner<Enemy>,
    inbox: Arc<Mutex<Vec<ViewId>>>,
    pending: HashSet<ViewId>,
}

impl EnemyController {
    pub fn new(cfg: EnemyConfig, arena: &mut ViewArena) -> Self {
        Self {
            cfg,
            spawner: TimerSpawner::new(ObjectPool::new(cfg.pool_size, arena), cfg.spawn_period),
            inbox: Arc::default(),
            pending: HashSet::default(),
        }
    }

    pub fn enable(&mut self, now: f32, bus: &impl EventSubscriber, scope: &mut SubscriptionScope) {
        let inbox = Arc::clone(&self.inbox);
        bus.on_enemy_destroyed(scope, move |e: &EnemyDestroyed| lock(&inbox).push(e.enemy));
        self.spawner.enable(now);
    }

    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.spawner.disable(arena);
        lock(&self.inbox).clear();
        self.pending.clear();
    }

    #[inline]
    pub fn owns(&self, view: ViewId) -> bool {
        self.spawner.pool().contains(view)
    }

    /// Any weapon kills an enemy. `false` if `view` is not a live enemy of
    /// this controller or was already hit this tick.
    pub fn handle_hit(&mut self, view: ViewId, events: &impl EventEmitter) -> bool {
        if !self.owns(view) || !self.pending.insert(view) {
            return false;
        }
        events.enemy_destroyed(EnemyDestroyed { enemy: view });
        events.player_scored(ScoreKind::Enemy);
        true
    }

    pub fn apply_destruction(&mut self, arena: &mut ViewArena) {
        let destroyed: Vec<ViewId> = std::mem::take(&mut *lock(&self.inbox));
        self.pending.clear();

        for view in destroyed {
            if self.spawner.pool_mut().release(view, arena) {
                debug!("enemy {view:?} destroyed");
            }
        }
    }

    /// Timer spawn, then chase `target`.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        target: Vec2,
        arena: &mut ViewArena,
        bounds: &BoundsWrapper,
        rng: &mut StdRng,
    ) {
        let speed = self.cfg.speed;
        let spawned = self.spawner.update(now, arena, || EnemySpawn {
            position: bounds.random_position_in_bounds(rng),
            speed,
        });
        if let Some(view) = spawned {
            debug!("enemy {view:?} spawned");
        }

        for (view, enemy) in self.spawner.pool().iter() {
            let slot = arena.slot_mut(view);
            slot.position = move_towards(slot.position, target, enemy.speed * dt);
        }
    }

    #[inline]
    pub fn pool(&self) -> &ObjectPool<Enemy> {
        self.spawner.pool()
    }
}
