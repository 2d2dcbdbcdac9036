// Input manager - turns winit events into action state

use super::action::{default_bindings, Action, InputSource};
use super::state::InputState;
use crate::core::math::Vec2;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps raw window events to actions through a binding table
pub struct InputManager {
    /// Source-to-action lookup
    bindings: HashMap<InputSource, Action>,

    /// Current action and cursor state
    state: InputState,
}

impl InputManager {
    /// Create a manager with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    /// Process a key press or release
    pub fn process_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        // Key repeats never count as new presses
        if repeat && state == ElementState::Pressed {
            return;
        }
        self.process_source(InputSource::key(code), state);
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    /// Process a cursor move, in window coordinates
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.state.set_cursor(Vec2::new(x, y));
    }

    fn process_source(&mut self, source: InputSource, state: ElementState) {
        let Some(&action) = self.bindings.get(&source) else {
            return;
        };
        match state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
    }

    /// Bind a source to an action, returning the action it replaced
    pub fn rebind(&mut self, source: InputSource, action: Action) -> Option<Action> {
        self.bindings.insert(source, action)
    }

    /// Current action of a source, if bound
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Start a new frame
    /// Call this once per frame after the game has consumed the input
    pub fn update(&mut self) {
        self.state.update();
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Drop all held actions
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_buttons_map_to_gestures() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);

        assert!(manager.state().just_pressed(Action::Drag));
        assert!(manager.state().just_pressed(Action::Fling));
        assert!(!manager.state().is_pressed(Action::Pull));
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut manager = InputManager::new();
        manager.process_key(KeyCode::Space, ElementState::Pressed, false);
        manager.update();
        manager.process_key(KeyCode::Space, ElementState::Released, false);
        manager.update();

        manager.process_key(KeyCode::Space, ElementState::Pressed, true);
        assert!(!manager.state().just_pressed(Action::TogglePause));
        assert!(!manager.state().is_pressed(Action::TogglePause));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::new();
        manager.process_key(KeyCode::KeyQ, ElementState::Pressed, false);
        for action in [Action::Drag, Action::TogglePause, Action::SpeedUp] {
            assert!(!manager.state().is_pressed(action));
        }
    }

    #[test]
    fn test_cursor_tracking() {
        let mut manager = InputManager::new();
        manager.process_cursor_moved(12.5, 40.0);
        assert_eq!(manager.state().cursor(), Vec2::new(12.5, 40.0));
    }

    #[test]
    fn test_rebind() {
        let mut manager = InputManager::new();
        let source = InputSource::key(KeyCode::KeyP);
        assert_eq!(manager.rebind(source, Action::TogglePause), None);
        assert_eq!(manager.action_for(source), Some(Action::TogglePause));

        manager.process_key(KeyCode::KeyP, ElementState::Pressed, false);
        assert!(manager.state().just_pressed(Action::TogglePause));
    }

    #[test]
    fn test_update_clears_edges() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.update();
        assert!(manager.state().is_pressed(Action::Drag));
        assert!(!manager.state().just_pressed(Action::Drag));

        manager.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(manager.state().just_released(Action::Drag));

        manager.reset();
        assert!(!manager.state().is_pressed(Action::Drag));
    }
}
