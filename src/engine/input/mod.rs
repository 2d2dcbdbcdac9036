// Input handling system
//
// Mouse buttons drive the pointer gestures, keys drive the time control.
//
// ## Architecture
//
// - `action`: Simulation actions and default bindings
// - `state`: Pressed / just pressed / just released sets plus the cursor
// - `manager`: Turns winit events into action state
//
// ## Usage Example
//
// ```rust
// use circle_collisions::engine::input::{Action, InputManager};
//
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_mouse_button(button, state);
// input.process_cursor_moved(x, y);
//
// // After the game has read this frame's input
// input.update();
//
// if input.state().just_pressed(Action::Drag) {
//     let cursor = input.state().cursor();
// }
// ```

pub mod action;
pub mod manager;
pub mod state;

pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use state::InputState;
