//! Game session: the `Idle ⇄ Running` state machine and the per-tick
//! choreography.
//!
//! While Running, a tick advances the clock, then moves the ship, runs both
//! weapon passes, routes the hits and applies destruction. Only then does
//! the ship sweep for hostiles; a hit finishes the game and ends the tick.
//! Asteroids and enemies move last, and the telemetry snapshot is taken
//! from the final state.
//!
//! Lifecycle signals are only fired through [`Session::start_game`] and
//! [`Session::finish_game`], which apply the transition before returning.
//! Outside code gets the subscriber half of the bus from [`Session::events`].

use std::sync::{Arc, Mutex};

use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::config::GameConfig;
use crate::common::error::ConfigResult;
use crate::sim::asteroids::AsteroidController;
use crate::sim::bounds::{BoundsWrapper, Viewport};
use crate::sim::clock::GameClock;
use crate::sim::enemies::EnemyController;
use crate::sim::events::{EventBus, EventEmitter, EventSubscriber, SubscriptionScope, lock};
use crate::sim::input::InputFrame;
use crate::sim::player::{PlayerController, PlayerUiData};
use crate::sim::query::{CollisionQuery, WeaponHit};
use crate::sim::score::ScoreCounter;
use crate::sim::views::{ViewArena, ViewKind};

#[derive(Debug)]
pub enum SessionState {
    Idle,
    Running {
        /// Every subscription made on entering Running. Cancelled on exit.
        scope: SubscriptionScope,
        telemetry: PlayerUiData,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Started,
    Finished,
}

pub struct Session {
    cfg: GameConfig,
    bus: EventBus,
    // Lives as long as the session: lifecycle and score handlers.
    _scope: SubscriptionScope,
    lifecycle: Arc<Mutex<Vec<Lifecycle>>>,
    state: SessionState,
    clock: GameClock,
    rng: StdRng,
    arena: ViewArena,
    bounds: BoundsWrapper,
    score: ScoreCounter,
    player: PlayerController,
    asteroids: AsteroidController,
    enemies: Vec<EnemyController>,
    hits: Vec<WeaponHit>,
}

impl Session {
    /// Validate `cfg` and build every controller. Starts Idle.
    pub fn new(cfg: GameConfig) -> ConfigResult<Self> {
        cfg.validate()?;

        let bus = EventBus::new();
        let mut scope = SubscriptionScope::new();
        let lifecycle = Arc::new(Mutex::new(Vec::new()));
        let score = ScoreCounter::new(cfg.score);

        {
            let inbox = Arc::clone(&lifecycle);
            bus.on_game_started(&mut scope, move || lock(&inbox).push(Lifecycle::Started));
            let inbox = Arc::clone(&lifecycle);
            bus.on_game_finished(&mut scope, move || lock(&inbox).push(Lifecycle::Finished));
            let score = score.clone();
            bus.on_player_scored(&mut scope, move |kind| score.add(*kind));
        }

        let mut arena = ViewArena::new();
        let bounds = BoundsWrapper::from_config(Viewport::from_config(&cfg.playfield), &cfg.bounds);
        let player = PlayerController::new(&cfg, &mut arena);
        let asteroids = AsteroidController::new(cfg.asteroid, &mut arena);
        let enemies = vec![EnemyController::new(cfg.enemy, &mut arena)];

        debug!("session built with {} views", arena.len());

        Ok(Self {
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
            bus,
            _scope: scope,
            lifecycle,
            state: SessionState::Idle,
            clock: GameClock::new(),
            arena,
            bounds,
            score,
            player,
            asteroids,
            enemies,
            hits: Vec::new(),
        })
    }

    /// Fire `GameStarted` and apply it.
    pub fn start_game(&mut self) {
        self.bus.game_started();
        self.process_lifecycle();
    }

    /// Fire `GameFinished` and apply it.
    pub fn finish_game(&mut self) {
        self.bus.game_finished();
        self.process_lifecycle();
    }

    fn process_lifecycle(&mut self) {
        let queued: Vec<Lifecycle> = std::mem::take(&mut *lock(&self.lifecycle));
        for signal in queued {
            match (signal, self.is_running()) {
                (Lifecycle::Started, false) => self.enter_running(),
                (Lifecycle::Finished, true) => self.enter_idle(),
                (signal, running) => debug!("ignoring {signal:?} (running: {running})"),
            }
        }
    }

    fn enter_running(&mut self) {
        let now = self.clock.now();
        let mut scope = SubscriptionScope::new();

        self.score.reset();
        self.player.enable(&mut self.arena);
        self.asteroids.enable(now, &self.bus, &mut scope);
        for enemies in &mut self.enemies {
            enemies.enable(now, &self.bus, &mut scope);
        }

        let telemetry = self.player.telemetry(now, &self.arena);
        self.state = SessionState::Running { scope, telemetry };
        info!("game started");
    }

    fn enter_idle(&mut self) {
        if let SessionState::Running { mut scope, .. } =
            std::mem::replace(&mut self.state, SessionState::Idle)
        {
            scope.cancel_all();
        }

        self.player.disable(&mut self.arena);
        self.asteroids.disable(&mut self.arena);
        for enemies in &mut self.enemies {
            enemies.disable(&mut self.arena);
        }
        self.hits.clear();

        info!("game finished with score {}", self.score.score());
    }

    /// Advance the simulation by `dt` seconds. A no-op while Idle.
    pub fn tick(&mut self, dt: f32, input: &InputFrame, query: &impl CollisionQuery) {
        if !self.is_running() {
            return;
        }

        let input = input.sanitized();
        self.clock.advance(dt);
        let (now, dt) = (self.clock.now(), self.clock.dt());

        self.player
            .update_movement(&input, dt, &mut self.arena, &self.bounds);

        self.hits.clear();
        self.player
            .update_weapons(&input, now, dt, &mut self.arena, query, &mut self.hits);
        self.route_hits();

        self.asteroids.apply_destruction(&mut self.arena, &mut self.rng);
        for enemies in &mut self.enemies {
            enemies.apply_destruction(&mut self.arena);
        }

        if let Some(hit) = self.player.check_collision(dt, &self.arena, query) {
            info!("ship hit {:?} {:?}", hit.layer, hit.view);
            self.finish_game();
            return;
        }

        self.asteroids
            .update(now, dt, &mut self.arena, &self.bounds, &mut self.rng);

        let target = self.player.position(&self.arena);
        for enemies in &mut self.enemies {
            enemies.update(now, dt, target, &mut self.arena, &self.bounds, &mut self.rng);
        }

        let snapshot = self.player.telemetry(now, &self.arena);
        if let SessionState::Running { telemetry, .. } = &mut self.state {
            *telemetry = snapshot;
        }
    }

    fn route_hits(&mut self) {
        for WeaponHit { hit, weapon } in self.hits.iter().copied() {
            if self.asteroids.owns(hit.view) {
                self.asteroids
                    .handle_hit(hit.view, weapon, &self.arena, &self.bus);
            } else if let Some(enemies) = self.enemies.iter_mut().find(|e| e.owns(hit.view)) {
                enemies.handle_hit(hit.view, &self.bus);
            }
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Last published player snapshot; `None` while Idle.
    pub fn telemetry(&self) -> Option<PlayerUiData> {
        match &self.state {
            SessionState::Running { telemetry, .. } => Some(*telemetry),
            SessionState::Idle => None,
        }
    }

    /// Subscribe to lifecycle and gameplay signals. Firing them stays with
    /// the session.
    #[inline]
    pub fn events(&self) -> &impl EventSubscriber {
        &self.bus
    }

    #[inline]
    pub fn arena(&self) -> &ViewArena {
        &self.arena
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    #[inline]
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    #[inline]
    pub fn asteroids(&self) -> &AsteroidController {
        &self.asteroids
    }

    #[inline]
    pub fn enemies(&self) -> &[EnemyController] {
        &self.enemies
    }

    /// Collider radius of a view of `kind` at scale 1.
    pub fn base_radius(&self, kind: ViewKind) -> f32 {
        match kind {
            ViewKind::Player => self.cfg.player.collision_radius,
            ViewKind::Asteroid => self.cfg.asteroid.radius,
            ViewKind::Enemy => self.cfg.enemy.radius,
            ViewKind::Projectile => self.cfg.projectile.radius,
        }
    }

    /// Active pooled entities across every controller (the ship excluded).
    pub fn active_entities(&self) -> usize {
        self.asteroids.active_len()
            + self.enemies.iter().map(|e| e.pool().active_len()).sum::<usize>()
            + self.player.projectiles().pool().active_len()
    }

    /// Player position, or `None` while Idle.
    pub fn player_position(&self) -> Option<Vec2> {
        self.is_running().then(|| self.player.position(&self.arena))
    }
}
