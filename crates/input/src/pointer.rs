use glam::Vec2;

/// Pointer position mapped to `[-1, 1]` on both axes.
///
/// `x` grows to the right. `y` grows upward, which is the opposite of screen
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedPointer {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPointer {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map raw screen coordinates against the viewport extents.
    ///
    /// Returns `None` for a zero-sized viewport.
    pub fn from_screen(px: f32, py: f32, width: f32, height: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            x: (px / width) * 2.0 - 1.0,
            y: -(py / height) * 2.0 + 1.0,
        })
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(feature = "winit")]
impl NormalizedPointer {
    /// Normalize a `CursorMoved` position against the window's inner size.
    pub fn from_cursor(
        position: winit::dpi::PhysicalPosition<f64>,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Option<Self> {
        Self::from_screen(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        )
    }
}
