use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::*;

fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn() + Send + Sync>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let make = {
        let log = Arc::clone(&log);
        move |tag: &'static str| -> Box<dyn Fn() + Send + Sync> {
            let log = Arc::clone(&log);
            Box::new(move || log.lock().unwrap().push(tag))
        }
    };
    (log, make)
}

#[test]
fn emit_without_subscribers_is_a_no_op() {
    let bus = EventBus::new();
    bus.game_started();
    bus.player_scored(ScoreKind::Enemy);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn callbacks_run_in_registration_order() {
    let bus = EventBus::new();
    let mut scope = SubscriptionScope::new();
    let (log, make) = recorder();

    for tag in ["a", "b", "c"] {
        let f = make(tag);
        bus.on_game_started(&mut scope, move || f());
    }

    bus.game_started();
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn payload_reaches_subscriber() {
    let bus = EventBus::new();
    let mut scope = SubscriptionScope::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let seen = Arc::clone(&seen);
        bus.on_asteroid_destroyed(&mut scope, move |e| seen.lock().unwrap().push(*e));
    }

    let mut arena = crate::sim::views::ViewArena::new();
    let id = arena.create(crate::sim::views::ViewKind::Asteroid);
    let event = AsteroidDestroyed {
        asteroid: id,
        position: Vec2::new(1.0, 2.0),
        weapon: WeaponKind::Laser,
    };
    bus.asteroid_destroyed(event);

    assert_eq!(*seen.lock().unwrap(), vec![event]);
}

#[test]
fn dropping_scope_unsubscribes() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicU32::new(0));

    {
        let mut scope = SubscriptionScope::new();
        let hits = Arc::clone(&hits);
        bus.on_player_scored(&mut scope, move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        });
        bus.player_scored(ScoreKind::Asteroid);
        assert_eq!(bus.subscriber_count(), 1);
    }

    bus.player_scored(ScoreKind::Asteroid);
    assert_eq!(hits.load(Ordering::Relaxed), 1);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn cancel_all_only_affects_its_own_scope() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let mut first = SubscriptionScope::new();
    let mut second = SubscriptionScope::new();

    let f = make("first");
    bus.on_game_finished(&mut first, move || f());
    let f = make("second");
    bus.on_game_finished(&mut second, move || f());

    first.cancel_all();
    assert!(first.is_empty());
    bus.game_finished();

    assert_eq!(*log.lock().unwrap(), vec!["second"]);
    assert_eq!(second.len(), 1);
}

#[test]
fn subscribing_during_dispatch_waits_for_next_emit() {
    let bus = EventBus::new();
    let scope = Arc::new(Mutex::new(SubscriptionScope::new()));
    let late_hits = Arc::new(AtomicU32::new(0));

    {
        let bus2 = bus.clone();
        let scope2 = Arc::clone(&scope);
        let late_hits = Arc::clone(&late_hits);
        let mut outer = scope.lock().unwrap();
        bus.on_game_started(&mut outer, move || {
            let late_hits = Arc::clone(&late_hits);
            let mut s = scope2.lock().unwrap();
            bus2.on_game_started(&mut s, move || {
                late_hits.fetch_add(1, Ordering::Relaxed);
            });
        });
    }

    bus.game_started();
    assert_eq!(late_hits.load(Ordering::Relaxed), 0);

    bus.game_started();
    assert_eq!(late_hits.load(Ordering::Relaxed), 1);
}

#[test]
fn cancelling_during_dispatch_does_not_skip_current_pass() {
    let bus = EventBus::new();
    let scope = Arc::new(Mutex::new(SubscriptionScope::new()));
    let (log, make) = recorder();

    {
        let scope2 = Arc::clone(&scope);
        let first = make("canceller");
        let mut s = scope.lock().unwrap();
        bus.on_game_finished(&mut s, move || {
            first();
            // Take the scope out so cancellation does not drop it under its own lock.
            let mut taken = std::mem::take(&mut *scope2.lock().unwrap());
            taken.cancel_all();
        });
        let second = make("bystander");
        bus.on_game_finished(&mut s, move || second());
    }

    bus.game_finished();
    assert_eq!(*log.lock().unwrap(), vec!["canceller", "bystander"]);

    bus.game_finished();
    assert_eq!(log.lock().unwrap().len(), 2);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn clones_share_signals() {
    let bus = EventBus::new();
    let other = bus.clone();
    let mut scope = SubscriptionScope::new();
    let hits = Arc::new(AtomicU32::new(0));
    {
        let hits = Arc::clone(&hits);
        other.on_enemy_destroyed(&mut scope, move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        });
    }

    let mut arena = crate::sim::views::ViewArena::new();
    let enemy = arena.create(crate::sim::views::ViewKind::Enemy);
    bus.enemy_destroyed(EnemyDestroyed { enemy });
    assert_eq!(hits.load(Ordering::Relaxed), 1);
}
