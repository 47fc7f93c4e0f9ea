//! End-screen music handoff
//!
//! When the player leaves the end screen for the memories page, the host
//! records whether the background music was playing and where it was, so
//! the next page can resume it seamlessly. Session-scoped storage only;
//! this is navigation glue, not gameplay state.

use serde::{Deserialize, Serialize};

/// Transient music state carried across the page navigation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MusicHandoff {
    /// Music was audible when the player navigated away
    pub playing: bool,
    /// Playback position in seconds
    pub time_secs: f64,
}

impl MusicHandoff {
    /// sessionStorage key
    const STORAGE_KEY: &'static str = "heart_dash_music";

    /// Store the handoff in sessionStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn store(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Music handoff stored at {:.1}s", self.time_secs);
            }
        }
    }

    /// Read a previously stored handoff, if any (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()?.session_storage().ok()??;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        serde_json::from_str(&json).ok()
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn store(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let handoff = MusicHandoff {
            playing: true,
            time_secs: 42.5,
        };
        let json = serde_json::to_string(&handoff).unwrap();
        let back: MusicHandoff = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handoff);
    }
}
