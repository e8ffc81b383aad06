use crate::math::Vector2;
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Cursor state fed from window events, in the `[0, 1]` screen space that
/// [`crate::scene::Ray`] expects.
pub struct InputState {
    cursor_position: PhysicalPosition<f64>,
    window_size: PhysicalSize<u32>,
    mouse_delta: (f32, f32),
    mouse_sensitivity: f32,
}

impl InputState {
    #[must_use]
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self {
            cursor_position: PhysicalPosition::new(
                f64::from(window_size.width) / 2.0,
                f64::from(window_size.height) / 2.0,
            ),
            window_size,
            mouse_delta: (0.0, 0.0),
            mouse_sensitivity: 0.003,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_position = position;
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    #[must_use]
    pub fn cursor_position(&self) -> PhysicalPosition<f64> {
        self.cursor_position
    }

    /// Cursor position divided by the window size, clamped to `[0, 1]` with y
    /// pointing down. A minimized (zero sized) window reports the center.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn normalized_mouse_position(&self) -> Vector2 {
        let PhysicalSize { width, height } = self.window_size;
        if width == 0 || height == 0 {
            return Vector2::new(0.5, 0.5);
        }

        let x = self.cursor_position.x / f64::from(width);
        let y = self.cursor_position.y / f64::from(height);
        Vector2::new(x.clamp(0.0, 1.0) as f32, y.clamp(0.0, 1.0) as f32)
    }

    pub fn set_mouse_delta(&mut self, delta_x: f32, delta_y: f32) {
        self.mouse_delta = (delta_x, delta_y);
    }

    pub fn reset_mouse_delta(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }

    #[must_use]
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    #[must_use]
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(PhysicalSize::new(0, 0))
    }
}
