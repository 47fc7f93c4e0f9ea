//! Presentation port
//!
//! The core never touches the DOM. It queues `GameEvent`s, the shell drains
//! them after each handler and feeds them through this trait. Swapping the
//! view (DOM, headless test recorder) is a matter of another impl.

use glam::Vec2;

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;

/// What a view must be able to show
pub trait Presenter {
    /// Player sprite moved (or was re-clamped on resize)
    fn player_moved(&mut self, pos: Vec2);
    /// A new heart appeared
    fn heart_spawned(&mut self, id: u32, pos: Vec2);
    /// A heart was collected (animation + sound live here)
    fn heart_collected(&mut self, id: u32);
    /// Score display update
    fn score_changed(&mut self, score: u32, target: u32);
    /// Session ended with these hearts still on the board
    fn board_cleared(&mut self, ids: &[u32]);
    /// The session was won; reveal the end screen after the fixed delay
    fn won(&mut self);
}

/// Feed a drained event batch through a presenter, in order
pub fn dispatch<P: Presenter>(events: Vec<GameEvent>, presenter: &mut P) {
    for event in events {
        match event {
            GameEvent::PlayerMoved { pos } => presenter.player_moved(pos),
            GameEvent::HeartSpawned { id, pos } => presenter.heart_spawned(id, pos),
            GameEvent::HeartCollected { id } => presenter.heart_collected(id),
            GameEvent::ScoreChanged { score, target } => presenter.score_changed(score, target),
            GameEvent::BoardCleared { ids } => presenter.board_cleared(&ids),
            GameEvent::Won => presenter.won(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{self, GameState};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn player_moved(&mut self, _pos: Vec2) {
            self.calls.push("moved".into());
        }
        fn heart_spawned(&mut self, id: u32, _pos: Vec2) {
            self.calls.push(format!("spawned:{id}"));
        }
        fn heart_collected(&mut self, id: u32) {
            self.calls.push(format!("collected:{id}"));
        }
        fn score_changed(&mut self, score: u32, target: u32) {
            self.calls.push(format!("score:{score}/{target}"));
        }
        fn board_cleared(&mut self, ids: &[u32]) {
            self.calls.push(format!("cleared:{}", ids.len()));
        }
        fn won(&mut self) {
            self.calls.push("won".into());
        }
    }

    #[test]
    fn test_dispatch_preserves_handler_order() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0, 1);
        let mut recorder = Recorder::default();
        dispatch(state.drain_events(), &mut recorder);
        assert_eq!(recorder.calls, vec!["moved", "score:0/10"]);

        sim::try_spawn(&mut state);
        // Teleport onto the heart and collect it
        state.player_pos = state.hearts[0].pos;
        sim::check_collisions(&mut state);

        recorder.calls.clear();
        dispatch(state.drain_events(), &mut recorder);
        assert!(recorder.calls[0].starts_with("spawned:"));
        assert!(recorder.calls[1].starts_with("collected:"));
        assert_eq!(recorder.calls[2], "score:1/10");
    }
}
