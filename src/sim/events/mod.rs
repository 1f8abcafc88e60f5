//! Synchronous, in-process event bus.
//!
//! Every signal is a [`Signal<T>`]: a list of callbacks invoked in
//! registration order. Subscribing always goes through a
//! [`SubscriptionScope`], so a consumer's callbacks live exactly as long as
//! its scope. Dropping the scope (or calling [`SubscriptionScope::cancel_all`])
//! removes them all at once.
//!
//! The callback list is cloned before dispatch. A callback that subscribes
//! or cancels during dispatch only affects the *next* emit.
//!
//! Callbacks are `Send + Sync` so the owning session can live in a Bevy
//! `Resource`; the locks are never contended.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bevy::math::Vec2;

use crate::sim::query::WeaponKind;
use crate::sim::score::ScoreKind;
use crate::sim::views::ViewId;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

#[inline]
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poisoned only if a callback panicked; the slot list is still consistent.
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One typed signal.
pub struct Signal<T> {
    slots: Arc<Mutex<Slots<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` for as long as `scope` is alive.
    pub fn connect(&self, scope: &mut SubscriptionScope, f: impl Fn(&T) + Send + Sync + 'static) {
        let id = {
            let mut slots = lock(&self.slots);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.entries.push((id, Arc::new(f)));
            id
        };

        let weak: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.slots);
        scope.push(Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    lock(&slots).entries.retain(|(entry, _)| *entry != id);
                }
            })),
        });
    }

    /// Call every registered callback, in registration order.
    pub fn emit(&self, payload: &T) {
        let snapshot: Vec<Callback<T>> = lock(&self.slots)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for cb in snapshot {
            cb(payload);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.slots).entries.len()
    }
}

/// Cancellation handle for one callback.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// A batch of subscriptions torn down together.
#[derive(Default)]
pub struct SubscriptionScope {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn cancel_all(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.cancel();
        }
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for SubscriptionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionScope")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidDestroyed {
    pub asteroid: ViewId,
    /// Last position of the asteroid; minis spawn here.
    pub position: Vec2,
    pub weapon: WeaponKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiniAsteroidDestroyed {
    pub asteroid: ViewId,
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub enemy: ViewId,
}

pub trait EventEmitter {
    fn game_started(&self);
    fn game_finished(&self);
    fn asteroid_destroyed(&self, event: AsteroidDestroyed);
    fn mini_asteroid_destroyed(&self, event: MiniAsteroidDestroyed);
    fn enemy_destroyed(&self, event: EnemyDestroyed);
    fn player_scored(&self, kind: ScoreKind);
}

pub trait EventSubscriber {
    fn on_game_started(&self, scope: &mut SubscriptionScope, f: impl Fn() + Send + Sync + 'static);
    fn on_game_finished(&self, scope: &mut SubscriptionScope, f: impl Fn() + Send + Sync + 'static);
    fn on_asteroid_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&AsteroidDestroyed) + Send + Sync + 'static,
    );
    fn on_mini_asteroid_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&MiniAsteroidDestroyed) + Send + Sync + 'static,
    );
    fn on_enemy_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&EnemyDestroyed) + Send + Sync + 'static,
    );
    fn on_player_scored(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&ScoreKind) + Send + Sync + 'static,
    );
}

/// The game's signal set. Cloning shares the same signals.
#[derive(Clone, Default)]
pub struct EventBus {
    game_started: Signal<()>,
    game_finished: Signal<()>,
    asteroid_destroyed: Signal<AsteroidDestroyed>,
    mini_asteroid_destroyed: Signal<MiniAsteroidDestroyed>,
    enemy_destroyed: Signal<EnemyDestroyed>,
    player_scored: Signal<ScoreKind>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.game_started.subscriber_count()
            + self.game_finished.subscriber_count()
            + self.asteroid_destroyed.subscriber_count()
            + self.mini_asteroid_destroyed.subscriber_count()
            + self.enemy_destroyed.subscriber_count()
            + self.player_scored.subscriber_count()
    }
}

impl EventEmitter for EventBus {
    fn game_started(&self) {
        self.game_started.emit(&());
    }

    fn game_finished(&self) {
        self.game_finished.emit(&());
    }

    fn asteroid_destroyed(&self, event: AsteroidDestroyed) {
        self.asteroid_destroyed.emit(&event);
    }

    fn mini_asteroid_destroyed(&self, event: MiniAsteroidDestroyed) {
        self.mini_asteroid_destroyed.emit(&event);
    }

    fn enemy_destroyed(&self, event: EnemyDestroyed) {
        self.enemy_destroyed.emit(&event);
    }

    fn player_scored(&self, kind: ScoreKind) {
        self.player_scored.emit(&kind);
    }
}

impl EventSubscriber for EventBus {
    fn on_game_started(&self, scope: &mut SubscriptionScope, f: impl Fn() + Send + Sync + 'static) {
        self.game_started.connect(scope, move |_| f());
    }

    fn on_game_finished(&self, scope: &mut SubscriptionScope, f: impl Fn() + Send + Sync + 'static) {
        self.game_finished.connect(scope, move |_| f());
    }

    fn on_asteroid_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&AsteroidDestroyed) + Send + Sync + 'static,
    ) {
        self.asteroid_destroyed.connect(scope, f);
    }

    fn on_mini_asteroid_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&MiniAsteroidDestroyed) + Send + Sync + 'static,
    ) {
        self.mini_asteroid_destroyed.connect(scope, f);
    }

    fn on_enemy_destroyed(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&EnemyDestroyed) + Send + Sync + 'static,
    ) {
        self.enemy_destroyed.connect(scope, f);
    }

    fn on_player_scored(
        &self,
        scope: &mut SubscriptionScope,
        f: impl Fn(&ScoreKind) + Send + Sync + 'static,
    ) {
        self.player_scored.connect(scope, f);
    }
}

#[cfg(test)]
mod tests;
