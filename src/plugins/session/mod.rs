//! Session plugin: owns the simulation [`Session`] and drives it from the
//! fixed schedule.
//!
//! `gather_input` samples the keyboard into `PlayerInput` every frame.
//! `advance_session` ticks the session on the fixed step with an
//! `AvianQuery`, then `sync_views` copies the arena onto sprites and
//! colliders. `mirror_state` copies session state into `GameState` and the
//! `Scoreboard`.
//!
//! The session is the source of truth. `GameState` only follows it, one
//! frame late at most.

pub mod input;

use bevy::prelude::*;

use crate::common::config::GameConfig;
use crate::common::state::GameState;
use crate::plugins::physics::query::AvianQuery;
use crate::plugins::views::sync_views;
use crate::sim::player::PlayerUiData;
use crate::sim::session::Session;

pub use self::input::PlayerInput;

#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub Session);

/// What a HUD would show.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Scoreboard {
    pub score: u32,
    pub telemetry: Option<PlayerUiData>,
    /// Score of the most recently finished game.
    pub last_score: Option<u32>,
}

pub fn plugin(app: &mut App) {
    let cfg = app.world().resource::<GameConfig>().clone();
    let session = Session::new(cfg).expect("GameConfig resource failed validation");

    app.insert_resource(ActiveSession(session))
        .init_resource::<PlayerInput>()
        .init_resource::<Scoreboard>()
        .add_systems(Update, (input::gather_input, mirror_state))
        .add_systems(FixedUpdate, (advance_session, sync_views).chain());
}

pub fn advance_session(
    time: Res<Time>,
    mut session: ResMut<ActiveSession>,
    mut input: ResMut<PlayerInput>,
    query: AvianQuery,
) {
    if input.take_start() && !session.is_running() {
        session.start_game();
    }
    let frame = input.take_frame();
    session.tick(time.delta_secs(), &frame, &query);
}

pub fn mirror_state(
    session: Res<ActiveSession>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
    mut board: ResMut<Scoreboard>,
) {
    board.score = session.score();
    board.telemetry = session.telemetry();

    match (state.get(), session.is_running()) {
        (GameState::Idle, true) => next.set(GameState::Running),
        (GameState::Running, false) => {
            info!("final score: {}", session.score());
            board.last_score = Some(session.score());
            next.set(GameState::Idle);
        }
        _ => {}
    }
}
