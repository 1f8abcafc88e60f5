//! Simulation core.
//!
//! Plain Rust, no ECS: everything is driven by [`Session::tick`] with an
//! explicit `dt`, an [`InputFrame`] and a [`CollisionQuery`]. The Bevy
//! plugins in `crate::plugins` supply those three and mirror the
//! [`ViewArena`] into sprites.

pub mod asteroids;
pub mod bounds;
pub mod clock;
pub mod enemies;
pub mod events;
pub mod input;
pub mod player;
pub mod pool;
pub mod query;
pub mod score;
pub mod session;
pub mod views;

pub use input::InputFrame;
pub use player::PlayerUiData;
pub use query::{CollisionQuery, Hit, WeaponKind};
pub use session::{Session, SessionState};
pub use views::{ViewArena, ViewId, ViewKind};
