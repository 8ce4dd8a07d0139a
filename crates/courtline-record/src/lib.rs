//! In-memory model of a tracked game
//!
//! A [`Game`] holds an ordered list of [`Event`]s (plays). Each event holds
//! an ordered list of [`Moment`]s, one per tracking sample, and each moment
//! holds the planar positions of the players on the court at that instant.
//!
//! ```text
//! Game
//! ├─ home / guest groups
//! ├─ directory: EntityId → EntityInfo (name, jersey)
//! └─ events: Vec<Event>
//!     └─ moments: Vec<Moment>
//!         ├─ quarter, game_clock, shot_clock
//!         ├─ ball (optional)
//!         └─ entities: Vec<Entity> (id, group, x, y)
//! ```
//!
//! The model is read-only input for the assembly pipeline. It is decoded from
//! a raw tracking file by the caller; nothing here touches the file system.

pub use self::{entity::*, event::*, game::*};

pub mod entity;
pub mod event;
pub mod game;
