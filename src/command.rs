/// Something that can draw one frame of an atlas at a pixel position.
///
/// Tile maps and sprites never touch textures themselves; they emit
/// `(frame, x, y)` requests through this trait.
pub trait Blitter {
    /// Draw `frame` with its top-left corner at `(x, y)`.
    fn blit(&mut self, frame: usize, x: i32, y: i32);
}

/// A single recorded draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Atlas frame (tile index or sprite frame)
    pub frame: usize,
    /// Destination x in viewport pixels
    pub x: i32,
    /// Destination y in viewport pixels
    pub y: i32,
}

/// `Blitter` that records every request instead of drawing it.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    /// Commands in emission order
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Blitter for CommandBuffer {
    fn blit(&mut self, frame: usize, x: i32, y: i32) {
        self.commands.push(DrawCommand { frame, x, y });
    }
}
