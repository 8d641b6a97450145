//! Input handling for keyboard and mouse, including text entry for the
//! command console.

use glam::Vec2;
use std::collections::HashSet;

use winit::event::KeyEvent;
use winit::keyboard::Key;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (drained into mouse_delta each frame).
    accumulated_delta: Vec2,

    /// Printable characters typed this frame, in order.
    typed_chars: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.typed_chars.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event, capturing both the physical key state
    /// and any printable text it produced.
    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
            match event.state {
                ElementState::Pressed => {
                    if !self.keys_held.contains(&key) {
                        self.keys_pressed.insert(key);
                    }
                    self.keys_held.insert(key);
                }
                ElementState::Released => {
                    self.keys_held.remove(&key);
                    self.keys_released.insert(key);
                }
            }
        }

        // Text for the console input line. Control characters are handled
        // through key codes, not here.
        if event.state == ElementState::Pressed && !event.repeat {
            if let Key::Character(text) = &event.logical_key {
                for ch in text.chars().filter(|c| !c.is_control()) {
                    self.typed_chars.push(ch);
                }
            } else if matches!(event.logical_key, Key::Named(winit::keyboard::NamedKey::Space)) {
                self.typed_chars.push(' ');
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Printable characters typed this frame.
    pub fn typed_chars(&self) -> &[char] {
        &self.typed_chars
    }

    // Console and flight bindings

    /// Engage/disengage warp (Tab).
    pub fn is_warp_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Tab)
    }

    /// Submit the console input line (Enter).
    pub fn is_submit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Enter) || self.is_key_pressed(KeyCode::NumpadEnter)
    }

    /// Delete the last character of the console input line (Backspace).
    pub fn is_backspace_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Backspace)
    }

    /// Quit (Escape).
    pub fn is_quit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Look-around is active while the left mouse button is dragged.
    pub fn is_look_active(&self) -> bool {
        self.is_mouse_held(MouseButton::Left)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    // KeyEvent has no public constructor, so keyboard text capture is
    // covered in the app; mouse state is testable directly.

    #[test]
    fn mouse_delta_drains_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -2.0));
        input.process_mouse_motion((1.0, 1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(4.0, -1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn mouse_press_is_one_shot() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.is_mouse_held(MouseButton::Left));
        input.begin_frame();
        assert!(input.is_mouse_held(MouseButton::Left));
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!input.is_mouse_held(MouseButton::Left));
    }
}
