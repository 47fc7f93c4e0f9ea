//! Heart Dash - a collect-the-hearts browser mini-game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (movement, spawning, collisions, win state)
//! - `presentation`: Presenter port the core reports through, plus the DOM view
//! - `input`: Directional command mapping (keyboard + on-screen buttons)
//! - `audio`: Procedural Web Audio sound effects
//! - `session`: End-screen music handoff via sessionStorage
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod presentation;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed entity dimensions and presentation timings
pub mod consts {
    /// Player sprite edge length (square bounding box)
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Heart pickup edge length
    pub const HEART_SIZE: f32 = 40.0;

    /// How long a collected heart's element keeps animating before removal
    pub const COLLECT_ANIM_MS: i32 = 500;
    /// Delay between winning and revealing the end screen
    pub const WIN_REVEAL_DELAY_MS: i32 = 1000;
}

/// Clamp one axis of an entity position to `[0, bound - size]`
///
/// Min/max composition; a degenerate playfield (bound < size) pins the
/// entity to the origin.
#[inline]
pub fn clamp_axis(value: f32, bound: f32, size: f32) -> f32 {
    value.min(bound - size).max(0.0)
}
