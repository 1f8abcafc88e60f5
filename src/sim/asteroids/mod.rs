//! Asteroids and their fragments.
//!
//! Big asteroids come from a timer; minis only ever come from a big one
//! dying to a projectile. Both share [`Asteroid`] and differ only by
//! [`AsteroidKind`].
//!
//! `handle_hit` emits the destroyed and scored signals during the weapon
//! pass. The handlers registered in `enable` only queue the asteroid;
//! `apply_destruction` releases it after the pass and splits big asteroids
//! killed by projectiles.
//!
//! `pending` holds every view already reported this tick, so a second hit
//! on the same asteroid before `apply_destruction` is ignored.

use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

use bevy::log::debug;
use bevy::math::Vec2;
use bevy::platform::collections::HashSet;
use rand::Rng;
use rand::rngs::StdRng;

use crate::common::config::AsteroidConfig;
use crate::sim::bounds::BoundsWrapper;
use crate::sim::events::{
    AsteroidDestroyed, EventEmitter, EventSubscriber, MiniAsteroidDestroyed, SubscriptionScope,
    lock,
};
use crate::sim::pool::{EventSpawner, ObjectPool, Poolable, TimerSpawner};
use crate::sim::query::WeaponKind;
use crate::sim::score::ScoreKind;
use crate::sim::views::{ViewArena, ViewId, ViewKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsteroidKind {
    Big,
    Mini,
}

impl AsteroidKind {
    #[inline]
    pub fn score(self) -> ScoreKind {
        match self {
            AsteroidKind::Big => ScoreKind::Asteroid,
            AsteroidKind::Mini => ScoreKind::MiniAsteroid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub kind: AsteroidKind,
    pub velocity: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct AsteroidSpawn {
    pub kind: AsteroidKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub scale: f32,
}

impl Poolable for Asteroid {
    type SpawnData = AsteroidSpawn;
    const VIEW: ViewKind = ViewKind::Asteroid;

    fn bind(view: ViewId, data: AsteroidSpawn, arena: &mut ViewArena) -> Self {
        let slot = arena.slot_mut(view);
        slot.position = data.position;
        slot.rotation = 0.0;
        slot.scale = data.scale;
        Asteroid {
            kind: data.kind,
            velocity: data.velocity,
        }
    }
}

/// Uniformly random unit vector.
#[inline]
pub fn random_direction(rng: &mut StdRng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Destruction {
    asteroid: ViewId,
    position: Vec2,
    /// `None` for minis; they never split.
    weapon: Option<WeaponKind>,
}

#[derive(Debug)]
pub struct AsteroidController {
    cfg: AsteroidConfig,
    big: TimerSpawner<Asteroid>,
    minis: EventSpawner<Asteroid>,
    inbox: Arc<Mutex<Vec<Destruction>>>,
    pending: HashSet<ViewId>,
}

impl AsteroidController {
    pub fn new(cfg: AsteroidConfig, arena: &mut ViewArena) -> Self {
        Self {
            cfg,
            big: TimerSpawner::new(ObjectPool::new(cfg.pool_size, arena), cfg.spawn_period),
            minis: EventSpawner::new(ObjectPool::new(cfg.mini_pool_size, arena)),
            inbox: Arc::default(),
            pending: HashSet::default(),
        }
    }

    /// Arm the spawn timer and listen for destruction in `scope`.
    pub fn enable(&mut self, now: f32, bus: &impl EventSubscriber, scope: &mut SubscriptionScope) {
        let inbox = Arc::clone(&self.inbox);
        bus.on_asteroid_destroyed(scope, move |e: &AsteroidDestroyed| {
            lock(&inbox).push(Destruction {
                asteroid: e.asteroid,
                position: e.position,
                weapon: Some(e.weapon),
            });
        });

        let inbox = Arc::clone(&self.inbox);
        bus.on_mini_asteroid_destroyed(scope, move |e: &MiniAsteroidDestroyed| {
            lock(&inbox).push(Destruction {
                asteroid: e.asteroid,
                position: e.position,
                weapon: None,
            });
        });

        self.big.enable(now);
    }

    /// Release both pools and disarm the timer.
    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.big.disable(arena);
        self.minis.disable(arena);
        lock(&self.inbox).clear();
        self.pending.clear();
    }

    #[inline]
    pub fn owns(&self, view: ViewId) -> bool {
        self.big.pool().contains(view) || self.minis.pool().contains(view)
    }

    /// Report a weapon hit. `false` if the view is not a live asteroid of
    /// this controller or was already hit this tick.
    pub fn handle_hit(
        &mut self,
        view: ViewId,
        weapon: WeaponKind,
        arena: &ViewArena,
        events: &impl EventEmitter,
    ) -> bool {
        let kind = match (self.big.pool().get(view), self.minis.pool().get(view)) {
            (Some(a), _) | (None, Some(a)) => a.kind,
            (None, None) => return false,
        };
        if !self.pending.insert(view) {
            return false;
        }

        let position = arena.position(view);
        match kind {
            AsteroidKind::Big => events.asteroid_destroyed(AsteroidDestroyed {
                asteroid: view,
                position,
                weapon,
            }),
            AsteroidKind::Mini => events.mini_asteroid_destroyed(MiniAsteroidDestroyed {
                asteroid: view,
                position,
            }),
        }
        events.player_scored(kind.score());
        true
    }

    /// Release everything destroyed since the last call, spawning fragments
    /// for big asteroids killed by projectiles.
    pub fn apply_destruction(&mut self, arena: &mut ViewArena, rng: &mut StdRng) {
        let destroyed: Vec<Destruction> = std::mem::take(&mut *lock(&self.inbox));
        self.pending.clear();

        for d in destroyed {
            match d.weapon {
                Some(weapon) => {
                    if !self.big.pool_mut().release(d.asteroid, arena) {
                        continue;
                    }
                    debug!("asteroid {:?} destroyed by {weapon:?}", d.asteroid);
                    if weapon == WeaponKind::Projectile {
                        self.split(d.position, arena, rng);
                    }
                }
                None => {
                    if self.minis.pool_mut().release(d.asteroid, arena) {
                        debug!("mini asteroid {:?} destroyed", d.asteroid);
                    }
                }
            }
        }
    }

    fn split(&mut self, position: Vec2, arena: &mut ViewArena, rng: &mut StdRng) {
        for _ in 0..self.cfg.minis_per_asteroid {
            let velocity = random_direction(rng) * self.cfg.mini_speed;
            self.minis.spawn(
                AsteroidSpawn {
                    kind: AsteroidKind::Mini,
                    position,
                    velocity,
                    scale: self.cfg.mini_scale,
                },
                arena,
            );
        }
    }

    /// Timer spawn, then move and wrap every asteroid.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        arena: &mut ViewArena,
        bounds: &BoundsWrapper,
        rng: &mut StdRng,
    ) {
        let cfg = self.cfg;
        let spawned = self.big.update(now, arena, || AsteroidSpawn {
            kind: AsteroidKind::Big,
            position: bounds.random_position_in_bounds(rng),
            velocity: random_direction(rng) * cfg.speed,
            scale: cfg.scale,
        });
        if let Some(view) = spawned {
            debug!("asteroid {view:?} spawned");
        }

        for (view, asteroid) in self
            .big
            .pool()
            .iter()
            .chain(self.minis.pool().iter())
        {
            let slot = arena.slot_mut(view);
            slot.position = bounds.wrap_position(slot.position + asteroid.velocity * dt);
        }
    }

    #[inline]
    pub fn big_pool(&self) -> &ObjectPool<Asteroid> {
        self.big.pool()
    }

    #[inline]
    pub fn mini_pool(&self) -> &ObjectPool<Asteroid> {
        self.minis.pool()
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.big.pool().active_len() + self.minis.pool().active_len()
    }
}
