//! DOM view
//!
//! Mirrors session state into the page: absolutely-positioned elements
//! inside the game canvas div, a score line, and the end screen. Every DOM
//! failure degrades the view and is otherwise ignored; the sim never waits
//! on presentation.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

use super::Presenter;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::settings::Settings;

/// Presenter backed by the game page's DOM
pub struct DomPresenter {
    document: Document,
    canvas: Element,
    player: HtmlElement,
    score_display: Element,
    final_screen: Option<Element>,
    /// Live heart elements by entity ID
    hearts: HashMap<u32, HtmlElement>,
    audio: AudioManager,
}

impl DomPresenter {
    /// Look up the page anchors; `None` if an essential one is missing
    pub fn new(document: &Document) -> Option<Self> {
        let canvas = document.get_element_by_id("gameCanvas")?;
        let player = document
            .get_element_by_id("player")?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let score_display = document.get_element_by_id("scoreDisplay")?;
        // End screen is only needed at the very end; tolerate its absence
        let final_screen = document.get_element_by_id("finalScreen");
        if final_screen.is_none() {
            log::warn!("No #finalScreen element - win reveal disabled");
        }
        Some(Self {
            document: document.clone(),
            canvas,
            player,
            score_display,
            final_screen,
            hearts: HashMap::new(),
            audio: AudioManager::new(),
        })
    }

    /// Adopt persisted volume preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.audio.apply_settings(settings);
    }

    fn set_position(element: &HtmlElement, pos: Vec2) {
        let style = element.style();
        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));
    }

    /// Drop the element once its "collected" animation has played out
    fn remove_after_animation(element: HtmlElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            element.remove();
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            COLLECT_ANIM_MS,
        );
        closure.forget();
    }
}

impl Presenter for DomPresenter {
    fn player_moved(&mut self, pos: Vec2) {
        Self::set_position(&self.player, pos);
    }

    fn heart_spawned(&mut self, id: u32, pos: Vec2) {
        let Ok(element) = self.document.create_element("div") else {
            return;
        };
        element.set_class_name("game-heart");
        let Ok(element) = element.dyn_into::<HtmlElement>() else {
            return;
        };
        Self::set_position(&element, pos);
        if self.canvas.append_child(&element).is_ok() {
            self.hearts.insert(id, element);
        }
    }

    fn heart_collected(&mut self, id: u32) {
        if let Some(element) = self.hearts.remove(&id) {
            let _ = element.class_list().add_1("collected");
            Self::remove_after_animation(element);
        } else {
            log::warn!("No element for collected heart {id}");
        }
        self.audio.play(SoundEffect::Collect);
    }

    fn score_changed(&mut self, score: u32, target: u32) {
        self.score_display
            .set_text_content(Some(&format!("{score} / {target}")));
    }

    fn board_cleared(&mut self, ids: &[u32]) {
        // Leftovers leave with the board, no collection animation
        for id in ids {
            if let Some(element) = self.hearts.remove(id) {
                element.remove();
            }
        }
    }

    fn won(&mut self) {
        self.audio.play(SoundEffect::Win);

        let Some(final_screen) = self.final_screen.clone() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let _ = final_screen.class_list().add_1("show");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            WIN_REVEAL_DELAY_MS,
        );
        closure.forget();
    }
}
