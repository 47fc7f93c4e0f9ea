//! Session operations
//!
//! Each public function here is one complete event-handler mutation: it runs
//! to completion and leaves the state consistent, so the shell can call them
//! straight from input/timer callbacks without any intermediate observable
//! state. A movement is position update -> clamp -> collision pass -> (maybe)
//! win transition, all inside one call.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GameState, Heart, Playfield, SessionPhase};
use crate::consts::*;

/// Apply a discrete movement command
///
/// `delta` carries the configured speed along one axis (see
/// `input::Direction::delta`). Clamps each axis independently to
/// `[0, bound - PLAYER_SIZE]`, then runs the collision pass synchronously.
/// No-op on an inactive session: no move, no collision check, no events.
pub fn move_player(state: &mut GameState, delta: Vec2) {
    if !state.is_active() {
        return;
    }

    let pos = state.bounds.clamp_player(state.player_pos + delta);
    state.player_pos = pos;
    state.events.push(GameEvent::PlayerMoved { pos });

    check_collisions(state);
}

/// Spawn attempt, driven by the shell's fixed-period timer
/// (and called once directly at session start)
///
/// Silent no-op unless the session is active and the heart count is under
/// the cap; that is normal rate limiting, not an error. A timer tick still
/// queued when the session ends lands here and does nothing.
pub fn try_spawn(state: &mut GameState) {
    if !state.is_active() || state.hearts.len() >= state.tuning.max_active_hearts {
        return;
    }

    let pos = Vec2::new(
        spawn_coord(&mut state.rng, state.bounds.width),
        spawn_coord(&mut state.rng, state.bounds.height),
    );
    let id = state.next_entity_id();
    state.hearts.push(Heart { id, pos });
    state.events.push(GameEvent::HeartSpawned { id, pos });
}

/// Uniform spawn coordinate in `[0, bound - HEART_SIZE)`
fn spawn_coord(rng: &mut Pcg32, bound: f32) -> f32 {
    let span = bound - HEART_SIZE;
    if span > 0.0 { rng.random_range(0.0..span) } else { 0.0 }
}

/// Test the player's box against every live heart and collect the overlaps
///
/// Filter semantics: all hearts overlapping in this pass are collected in
/// the same pass (score rises by the count, not capped at 1) and survivor
/// order is preserved. After all removals, reaching the target score runs
/// the win transition exactly once; re-entry is impossible because the
/// phase is already `Won` when the next call could happen.
pub fn check_collisions(state: &mut GameState) {
    if !state.is_active() {
        return;
    }

    let player = state.player_rect();
    let events = &mut state.events;
    let mut collected = 0u32;
    state.hearts.retain(|heart| {
        if player.overlaps(&heart.rect()) {
            collected += 1;
            events.push(GameEvent::HeartCollected { id: heart.id });
            false
        } else {
            true
        }
    });

    if collected > 0 {
        state.score += collected;
        state.events.push(GameEvent::ScoreChanged {
            score: state.score,
            target: state.tuning.target_score,
        });
        if state.score >= state.tuning.target_score {
            win(state);
        }
    }
}

/// One-shot Active -> Won transition
///
/// Ordering is load-bearing: the phase flips before anything else so a
/// movement or spawn handler racing behind this one observes an inactive
/// session. Remaining hearts leave the model and travel in `BoardCleared`
/// for the view to remove; the shell cancels the spawn timer when it sees
/// `Won`.
fn win(state: &mut GameState) {
    state.phase = SessionPhase::Won;
    let ids: Vec<u32> = state.hearts.drain(..).map(|h| h.id).collect();
    state.events.push(GameEvent::BoardCleared { ids });
    state.events.push(GameEvent::Won);
    log::info!("Session won with score {}", state.score);
}

/// Apply a viewport resize
///
/// Updates the bounds and re-clamps the player (the view gets a
/// `PlayerMoved` so the sprite follows). No collision pass runs; only a
/// movement command triggers collection.
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.bounds = Playfield::new(width, height);
    let pos = state.bounds.clamp_player(state.player_pos);
    state.player_pos = pos;
    state.events.push(GameEvent::PlayerMoved { pos });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// 800x600 session with shipped tuning, initial frame events drained
    fn session() -> GameState {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0, 42);
        state.drain_events();
        state
    }

    fn place_heart(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.hearts.push(Heart {
            id,
            pos: Vec2::new(x, y),
        });
        id
    }

    #[test]
    fn test_move_applies_speed_delta() {
        let mut state = session();
        let start = state.player_pos;
        move_player(&mut state, Vec2::new(15.0, 0.0));
        assert_eq!(state.player_pos, start + Vec2::new(15.0, 0.0));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerMoved {
                pos: state.player_pos
            }]
        );
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let mut state = session();
        // Drive far past the left edge
        for _ in 0..100 {
            move_player(&mut state, Vec2::new(-15.0, 0.0));
        }
        assert_eq!(state.player_pos.x, 0.0);

        // And far past the bottom-right corner
        for _ in 0..100 {
            move_player(&mut state, Vec2::new(15.0, 15.0));
        }
        assert_eq!(state.player_pos, Vec2::new(800.0 - 50.0, 600.0 - 50.0));
    }

    #[test]
    fn test_touching_edge_collects() {
        // Heart exactly on the player's right edge: non-strict overlap
        let mut state = session();
        state.player_pos = Vec2::new(0.0, 0.0);
        place_heart(&mut state, 50.0, 0.0);
        check_collisions(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_one_pixel_gap_does_not_collect() {
        let mut state = session();
        state.player_pos = Vec2::new(0.0, 0.0);
        place_heart(&mut state, 51.0, 0.0);
        check_collisions(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_collection_event_order() {
        let mut state = session();
        state.player_pos = Vec2::new(100.0, 100.0);
        let id = place_heart(&mut state, 120.0, 100.0);
        move_player(&mut state, Vec2::new(15.0, 0.0));
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::PlayerMoved {
                    pos: Vec2::new(115.0, 100.0)
                },
                GameEvent::HeartCollected { id },
                GameEvent::ScoreChanged {
                    score: 1,
                    target: 10
                },
            ]
        );
    }

    #[test]
    fn test_simultaneous_overlaps_collect_in_one_pass() {
        let mut state = session();
        state.player_pos = Vec2::new(200.0, 200.0);
        place_heart(&mut state, 190.0, 200.0);
        place_heart(&mut state, 220.0, 210.0);
        let survivor = place_heart(&mut state, 600.0, 500.0);

        move_player(&mut state, Vec2::new(0.0, 15.0));
        assert_eq!(state.score, 2);
        // Filter semantics: the survivor keeps its slot
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.hearts[0].id, survivor);
    }

    #[test]
    fn test_spawn_respects_cap_until_a_collection() {
        let mut state = session();
        for _ in 0..state.tuning.max_active_hearts {
            try_spawn(&mut state);
        }
        assert_eq!(state.hearts.len(), 3);

        // At the cap: a tick is a no-op
        try_spawn(&mut state);
        assert_eq!(state.hearts.len(), 3);

        // Collect by teleporting onto one, then the next tick fits again
        let target = state.hearts[0].pos;
        state.player_pos = target;
        check_collisions(&mut state);
        let remaining = state.hearts.len();
        assert!(remaining < 3);

        state.drain_events();
        try_spawn(&mut state);
        assert_eq!(state.hearts.len(), remaining + 1);
        let events = state.drain_events();
        match &events[..] {
            [GameEvent::HeartSpawned { id, pos }] => {
                // Distinct identity, inside the spawn band
                assert!(state.hearts.iter().filter(|h| h.id == *id).count() == 1);
                assert!(pos.x >= 0.0 && pos.x < 800.0 - HEART_SIZE);
                assert!(pos.y >= 0.0 && pos.y < 600.0 - HEART_SIZE);
            }
            other => panic!("expected one spawn event, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_positions_stay_in_band() {
        let mut state = session();
        for _ in 0..200 {
            try_spawn(&mut state);
            for heart in &state.hearts {
                assert!(heart.pos.x >= 0.0 && heart.pos.x < 800.0 - HEART_SIZE);
                assert!(heart.pos.y >= 0.0 && heart.pos.y < 600.0 - HEART_SIZE);
            }
            state.hearts.clear();
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = GameState::new(Tuning::default(), 800.0, 600.0, 99);
        let mut b = GameState::new(Tuning::default(), 800.0, 600.0, 99);
        for _ in 0..3 {
            try_spawn(&mut a);
            try_spawn(&mut b);
        }
        let pos_a: Vec<Vec2> = a.hearts.iter().map(|h| h.pos).collect();
        let pos_b: Vec<Vec2> = b.hearts.iter().map(|h| h.pos).collect();
        assert_eq!(pos_a, pos_b);
    }

    #[test]
    fn test_win_at_target_score() {
        let mut state = session();
        state.score = 9;
        state.player_pos = Vec2::new(100.0, 100.0);
        place_heart(&mut state, 130.0, 100.0);
        let leftover = place_heart(&mut state, 700.0, 500.0);

        move_player(&mut state, Vec2::new(15.0, 0.0));
        assert_eq!(state.score, 10);
        assert_eq!(state.phase, SessionPhase::Won);
        assert!(state.hearts.is_empty());

        let events = state.drain_events();
        let tail = &events[events.len() - 2..];
        assert_eq!(
            tail,
            &[
                GameEvent::BoardCleared {
                    ids: vec![leftover]
                },
                GameEvent::Won,
            ]
        );
    }

    #[test]
    fn test_won_session_ignores_move_and_spawn() {
        let mut state = session();
        state.score = 9;
        place_heart(&mut state, state.player_pos.x, state.player_pos.y);
        check_collisions(&mut state);
        assert_eq!(state.phase, SessionPhase::Won);
        state.drain_events();

        let pos = state.player_pos;
        move_player(&mut state, Vec2::new(15.0, 0.0));
        try_spawn(&mut state);
        check_collisions(&mut state);

        assert_eq!(state.player_pos, pos);
        assert_eq!(state.score, 10);
        assert!(state.hearts.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_overshoot_still_wins_once() {
        // Two simultaneous collections crossing the target: one transition
        let mut state = session();
        state.score = 9;
        state.player_pos = Vec2::new(200.0, 200.0);
        place_heart(&mut state, 195.0, 200.0);
        place_heart(&mut state, 210.0, 205.0);

        check_collisions(&mut state);
        assert_eq!(state.score, 11);
        assert_eq!(state.phase, SessionPhase::Won);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Won).count(), 1);
    }

    #[test]
    fn test_resize_reclamps_without_collision_pass() {
        let mut state = session();
        // Player hugging the right edge, heart just past the future bound
        state.player_pos = Vec2::new(800.0 - 50.0, 100.0);
        place_heart(&mut state, 740.0, 100.0);
        state.drain_events();

        resize(&mut state, 770.0, 600.0);
        // Re-clamped to the new bound, overlapping heart NOT collected
        assert_eq!(state.player_pos.x, 770.0 - 50.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerMoved {
                pos: state.player_pos
            }]
        );

        // The next real movement does collect it
        move_player(&mut state, Vec2::new(-15.0, 0.0));
        assert_eq!(state.score, 1);
    }

    proptest! {
        /// Clamp invariant: any command sequence keeps the player in bounds
        #[test]
        fn prop_player_stays_in_bounds(commands in proptest::collection::vec(0u8..4, 0..300)) {
            let mut state = session();
            for cmd in commands {
                let delta = match cmd {
                    0 => Vec2::new(0.0, -15.0),
                    1 => Vec2::new(0.0, 15.0),
                    2 => Vec2::new(-15.0, 0.0),
                    _ => Vec2::new(15.0, 0.0),
                };
                move_player(&mut state, delta);
                prop_assert!(state.player_pos.x >= 0.0);
                prop_assert!(state.player_pos.x <= 800.0 - 50.0);
                prop_assert!(state.player_pos.y >= 0.0);
                prop_assert!(state.player_pos.y <= 600.0 - 50.0);
            }
        }

        /// Heart count never exceeds the cap, whatever the tick pattern
        #[test]
        fn prop_heart_count_never_exceeds_cap(ticks in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut state = session();
            for collect in ticks {
                try_spawn(&mut state);
                prop_assert!(state.hearts.len() <= state.tuning.max_active_hearts);
                if collect && !state.hearts.is_empty() {
                    state.player_pos = state.hearts[0].pos;
                    check_collisions(&mut state);
                }
            }
        }
    }
}
