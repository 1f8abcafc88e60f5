//! Projectile weapon.
//!
//! Each update a projectile either expires, hits something along its next
//! step, or moves. Expired and spent projectiles are released after the pass.

use bevy::log::debug;
use bevy::math::Vec2;

use crate::common::config::ShootingConfig;
use crate::common::layers::hostile_mask;
use crate::sim::pool::{EventSpawner, ObjectPool, Poolable};
use crate::sim::query::{CollisionQuery, WeaponHit, WeaponKind};
use crate::sim::views::{ViewArena, ViewId, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    pub created_at: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub now: f32,
}

impl Poolable for Projectile {
    type SpawnData = ProjectileSpawn;
    const VIEW: ViewKind = ViewKind::Projectile;

    fn bind(view: ViewId, data: ProjectileSpawn, arena: &mut ViewArena) -> Self {
        let slot = arena.slot_mut(view);
        slot.position = data.position;
        slot.rotation = 0.0;
        slot.scale = 1.0;
        Projectile {
            velocity: data.velocity,
            created_at: data.now,
        }
    }
}

#[derive(Debug)]
pub struct ProjectileWeapon {
    cfg: ShootingConfig,
    spawner: EventSpawner<Projectile>,
    // Reused every tick.
    doomed: Vec<ViewId>,
}

impl ProjectileWeapon {
    pub fn new(cfg: ShootingConfig, arena: &mut ViewArena) -> Self {
        Self {
            cfg,
            spawner: EventSpawner::new(ObjectPool::new(cfg.pool_size, arena)),
            doomed: Vec::new(),
        }
    }

    pub fn fire(&mut self, position: Vec2, forward: Vec2, now: f32, arena: &mut ViewArena) -> ViewId {
        let view = self.spawner.spawn(
            ProjectileSpawn {
                position,
                velocity: forward * self.cfg.speed,
                now,
            },
            arena,
        );
        debug!("projectile {view:?} fired");
        view
    }

    /// Age, sweep and move every projectile. Hits are appended to `hits`.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        arena: &mut ViewArena,
        query: &impl CollisionQuery,
        hits: &mut Vec<WeaponHit>,
    ) {
        self.doomed.clear();

        for (view, projectile) in self.spawner.pool().iter() {
            let expired = now >= projectile.created_at + self.cfg.lifetime;

            let speed = projectile.velocity.length();
            let hit = if speed > 0.0 {
                query.circle_cast(
                    arena.position(view),
                    self.cfg.radius,
                    projectile.velocity / speed,
                    speed * dt,
                    hostile_mask(),
                )
            } else {
                None
            };

            if let Some(hit) = hit {
                hits.push(WeaponHit {
                    hit,
                    weapon: WeaponKind::Projectile,
                });
            }

            if expired || hit.is_some() {
                self.doomed.push(view);
            } else {
                let slot = arena.slot_mut(view);
                slot.position += projectile.velocity * dt;
            }
        }

        for view in self.doomed.drain(..) {
            self.spawner.pool_mut().release(view, arena);
        }
    }

    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.spawner.disable(arena);
        self.doomed.clear();
    }

    #[inline]
    pub fn pool(&self) -> &ObjectPool<Projectile> {
        self.spawner.pool()
    }
}
