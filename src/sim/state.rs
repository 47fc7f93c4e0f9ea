//! Session state and core gameplay types
//!
//! Everything gameplay-observable lives here. The sim is pure: no DOM, no
//! audio, no timers. Side effects are reported to the shell as `GameEvent`s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp_axis;
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle of one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Gameplay running, spawner armed
    Active,
    /// Target score reached. Terminal: the phase never reverts.
    Won,
}

/// A heart pickup
///
/// Position is fixed at spawn time and never changes. Identity is the `id`;
/// two hearts are never compared by value.
#[derive(Debug, Clone, Copy)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
}

impl Heart {
    /// Bounding box used for collection tests
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, HEART_SIZE)
    }
}

/// Current usable playfield dimensions, derived from the rendering surface
/// at session start and updated on viewport resize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a player position to `[0, width - PLAYER_SIZE] x [0, height - PLAYER_SIZE]`
    pub fn clamp_player(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, self.width, PLAYER_SIZE),
            clamp_axis(pos.y, self.height, PLAYER_SIZE),
        )
    }

    /// Starting position: a player-sized sprite centered on the field
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - PLAYER_SIZE / 2.0,
            self.height / 2.0 - PLAYER_SIZE / 2.0,
        )
    }
}

/// What the core tells the presentation layer
///
/// Drained by the shell after every handler and dispatched through the
/// `presentation::Presenter` port. Ordering within one handler matters:
/// a `Won` always follows the `HeartCollected`/`ScoreChanged` that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerMoved { pos: Vec2 },
    HeartSpawned { id: u32, pos: Vec2 },
    HeartCollected { id: u32 },
    ScoreChanged { score: u32, target: u32 },
    /// Hearts still live when the session ended; the view removes them
    BoardCleared { ids: Vec<u32> },
    Won,
}

/// Complete session state (single instance, lifecycle = page lifetime)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters, fixed for the session
    pub tuning: Tuning,
    /// Playfield bounds, updated on resize
    pub bounds: Playfield,
    /// Active until the win condition fires
    pub phase: SessionPhase,
    /// Hearts collected so far; monotonic, capped by `tuning.target_score`
    pub score: u32,
    /// Always inside the clamped bounds
    pub player_pos: Vec2,
    /// Live hearts in spawn order
    pub hearts: Vec<Heart>,
    /// Pending presentation events
    pub events: Vec<GameEvent>,
    /// Spawn position RNG, seeded at session start
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session over a `width x height` playfield
    ///
    /// The player starts centered. Initial `PlayerMoved` and `ScoreChanged`
    /// events are queued so the view can draw the starting frame.
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        let bounds = Playfield::new(width, height);
        let player_pos = bounds.clamp_player(bounds.player_start());
        let target = tuning.target_score;
        let mut state = Self {
            tuning,
            bounds,
            phase: SessionPhase::Active,
            score: 0,
            player_pos,
            hearts: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.events.push(GameEvent::PlayerMoved { pos: player_pos });
        state.events.push(GameEvent::ScoreChanged { score: 0, target });
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// The player's current bounding box
    #[inline]
    pub fn player_rect(&self) -> Rect {
        Rect::from_pos_size(self.player_pos, PLAYER_SIZE)
    }

    /// Take all pending presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
