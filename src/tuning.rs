//! Data-driven game balance
//!
//! The shipped numbers live in `Default`; the struct is serializable so a
//! host page can override balance without a rebuild.

use serde::{Deserialize, Serialize};

/// Balance parameters, fixed for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Pixels moved per directional command
    pub player_speed: f32,
    /// Milliseconds between spawn attempts
    pub spawn_interval_ms: u32,
    /// Concurrency cap on live hearts
    pub max_active_hearts: usize,
    /// Hearts to collect for the win
    pub target_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 15.0,
            spawn_interval_ms: 2000,
            max_active_hearts: 3,
            target_score: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"target_score": 3}"#).unwrap();
        assert_eq!(tuning.target_score, 3);
        assert_eq!(tuning.max_active_hearts, 3);
        assert_eq!(tuning.spawn_interval_ms, 2000);
        assert_eq!(tuning.player_speed, 15.0);
    }
}
