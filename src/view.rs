use macroquad::prelude::*;

/// Pixel size of the area the map and sprite are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Viewport {
    /// Build a viewport from explicit pixel dimensions.
    pub const fn new(width: i32, height: i32) -> Self {
        Viewport { width, height }
    }

    /// Size of the current macroquad window. Needs a running window.
    pub fn screen() -> Self {
        Viewport {
            width: screen_width() as i32,
            height: screen_height() as i32,
        }
    }
}
