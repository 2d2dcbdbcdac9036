// Simulation actions and their default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the user can ask the simulation to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Pointer gestures
    Drag,  // Left mouse
    Fling, // Right mouse
    Pull,  // Middle mouse

    // Time control
    SlowDown,
    SpeedUp,
    TogglePause,
    SpeedSlow,
    SpeedHalf,
    SpeedFull,
}

/// A physical input: keyboard key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::mouse(MouseButton::Left), Action::Drag),
        (InputSource::mouse(MouseButton::Right), Action::Fling),
        (InputSource::mouse(MouseButton::Middle), Action::Pull),
        (InputSource::key(KeyCode::Comma), Action::SlowDown),
        (InputSource::key(KeyCode::Period), Action::SpeedUp),
        (InputSource::key(KeyCode::Space), Action::TogglePause),
        (InputSource::key(KeyCode::Digit1), Action::SpeedSlow),
        (InputSource::key(KeyCode::Digit2), Action::SpeedHalf),
        (InputSource::key(KeyCode::Digit3), Action::SpeedFull),
    ]
}
