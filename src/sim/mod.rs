//! Deterministic game logic
//!
//! All gameplay state and every state transition lives here. This module
//! must stay pure:
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies
//! - Side effects reported as `GameEvent`s, drained by the shell

pub mod rect;
pub mod state;
pub mod step;

pub use rect::Rect;
pub use state::{GameEvent, GameState, Heart, Playfield, SessionPhase};
pub use step::{check_collisions, move_player, resize, try_spawn};
