use crate::clock::{Clock, SystemClock};
use crate::command::Blitter;
use crate::error::{Error, Result};
use crate::input::Direction;
use crate::loader::json_loader::ResourceManager;
use crate::map::TileMap;
use crate::view::Viewport;
use macroquad::input::KeyCode;
use tracing::debug;

/// Pixels moved per animation step when walking left or right.
pub const HORIZONTAL_STEP: i32 = 10;
/// Pixels moved per animation step when walking up or down.
pub const VERTICAL_STEP: i32 = 5;

/// Size and display time of one sprite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Pixel width
    pub width: i32,
    /// Pixel height
    pub height: i32,
    /// How long the frame stays up before the next step, in ms
    pub delay_ms: u64,
}

/// Frame table of a sprite: one entry per atlas frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    name: String,
    frames: Vec<FrameInfo>,
}

impl SpriteSheet {
    /// Sheet named `name` with the given frames.
    pub fn new(name: impl Into<String>, frames: Vec<FrameInfo>) -> Self {
        SpriteSheet {
            name: name.into(),
            frames,
        }
    }

    /// `count` frames that all share one size and delay.
    pub fn uniform(name: impl Into<String>, count: usize, width: i32, height: i32, delay_ms: u64) -> Self {
        Self::new(
            name,
            vec![
                FrameInfo {
                    width,
                    height,
                    delay_ms
                };
                count
            ],
        )
    }

    /// Resource name the sheet was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if the sheet has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `index`. Panics when out of range.
    pub fn frame(&self, index: usize) -> &FrameInfo {
        &self.frames[index]
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Arrow-key driven sprite that walks around the viewport and scrolls a
/// [`TileMap`] once it crosses the center line.
///
/// Frames are laid out as four strips of `anim_frame_count` frames, one per
/// [`Direction`] in `Up, Right, Down, Left` order. While the key of the
/// current direction is held, each update whose elapsed time reaches the
/// current frame's delay advances the animation one ping-pong step and
/// moves one step.
pub struct ControlledSprite {
    sheet: SpriteSheet,
    anim_frame_count: usize,
    direction: Direction,
    prev_direction: Direction,
    anim_pos: usize,
    anim_dir: i32,
    held_keys: [bool; 4],
    frame: usize,
    screen_x: i32,
    screen_y: i32,
    last_update_ms: u64,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for ControlledSprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlledSprite")
            .field("sheet", &self.sheet.name())
            .field("direction", &self.direction)
            .field("prev_direction", &self.prev_direction)
            .field("anim_pos", &self.anim_pos)
            .field("anim_dir", &self.anim_dir)
            .field("held_keys", &self.held_keys)
            .field("frame", &self.frame)
            .field("screen", &(self.screen_x, self.screen_y))
            .finish_non_exhaustive()
    }
}

impl ControlledSprite {
    /// New sprite at `(0, 0)` facing up, timed by a [`SystemClock`].
    ///
    /// Fails if `anim_frame_count` is zero or the sheet holds fewer than four
    /// strips of that many frames.
    pub fn new(sheet: SpriteSheet, anim_frame_count: usize) -> Result<Self> {
        if anim_frame_count == 0 {
            return Err(Error::invalid(sheet.name(), "animation needs at least one frame"));
        }
        let needed = anim_frame_count * Direction::ALL.len();
        if sheet.len() < needed {
            return Err(Error::invalid(
                sheet.name(),
                format!(
                    "sprite has {} frames, {} directions of {} frames need {}",
                    sheet.len(),
                    Direction::ALL.len(),
                    anim_frame_count,
                    needed
                ),
            ));
        }

        let clock = SystemClock::new();
        Ok(ControlledSprite {
            sheet,
            anim_frame_count,
            direction: Direction::Up,
            prev_direction: Direction::Up,
            anim_pos: 0,
            anim_dir: 1,
            held_keys: [false; 4],
            frame: 0,
            screen_x: 0,
            screen_y: 0,
            last_update_ms: clock.now_ms(),
            clock: Box::new(clock),
        })
    }

    /// Sprite built from the `sprite` resource `name`.
    pub fn from_resources(resources: &ResourceManager, name: &str, anim_frame_count: usize) -> Result<Self> {
        let sheet = resources.sprite(name)?.sheet(name);
        Self::new(sheet, anim_frame_count)
    }

    /// Replace the time source; the last-update mark restarts at its `now`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.last_update_ms = clock.now_ms();
        self.clock = Box::new(clock);
        self
    }

    /// Place the sprite's center at `(x, y)` in viewport pixels.
    pub fn set_coords(&mut self, x: i32, y: i32) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Center x in viewport pixels.
    pub fn screen_x(&self) -> i32 {
        self.screen_x
    }

    /// Center y in viewport pixels.
    pub fn screen_y(&self) -> i32 {
        self.screen_y
    }

    /// Current facing direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Offset within the current direction's frame strip.
    pub fn anim_pos(&self) -> usize {
        self.anim_pos
    }

    /// Frames per direction.
    pub fn anim_frame_count(&self) -> usize {
        self.anim_frame_count
    }

    /// Atlas frame shown right now.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Pixel width of the current frame.
    pub fn width(&self) -> i32 {
        self.sheet.frame(self.frame).width
    }

    /// Pixel height of the current frame.
    pub fn height(&self) -> i32 {
        self.sheet.frame(self.frame).height
    }

    /// Whether the key for `dir` is currently down.
    pub fn is_key_held(&self, dir: Direction) -> bool {
        self.held_keys[dir.index()]
    }

    /// Key-down event. Keys other than the arrows are ignored.
    pub fn on_key_down(&mut self, key: KeyCode) {
        if let Some(dir) = Direction::from_key(key) {
            self.press(dir);
        }
    }

    /// Key-up event. Keys other than the arrows are ignored.
    pub fn on_key_up(&mut self, key: KeyCode) {
        if let Some(dir) = Direction::from_key(key) {
            self.release(dir);
        }
    }

    /// Start moving towards `dir`, remembering the previous direction.
    pub fn press(&mut self, dir: Direction) {
        if self.held_keys[dir.index()] {
            return;
        }
        debug!(key = ?dir, "key down");
        self.held_keys[dir.index()] = true;
        self.prev_direction = self.direction;
        self.direction = dir;
    }

    /// Stop holding `dir`; the direction reverts to the one before the last press.
    pub fn release(&mut self, dir: Direction) {
        if !self.held_keys[dir.index()] {
            return;
        }
        debug!(key = ?dir, "key up");
        self.held_keys[dir.index()] = false;
        self.direction = self.prev_direction;
    }

    /// Advance animation and movement.
    ///
    /// `elapsed_ms` defaults to the time since the last step that actually
    /// advanced. Nothing happens unless the current direction's key is held
    /// and the elapsed time reaches the current frame's delay.
    pub fn update(&mut self, map: &mut TileMap, viewport: Viewport, elapsed_ms: Option<u64>) {
        let now = self.clock.now_ms();
        let elapsed = elapsed_ms.unwrap_or_else(|| now.saturating_sub(self.last_update_ms));

        if !self.held_keys[self.direction.index()] {
            return;
        }

        let strip = self.anim_frame_count * self.direction.index();
        let delay = self.sheet.frame(self.anim_pos + strip).delay_ms;
        if elapsed < delay {
            return;
        }

        self.last_update_ms = now;
        self.advance_animation();
        self.frame = self.anim_pos + strip;
        self.step(map, viewport);
        self.keep_inside(viewport);
    }

    /// Draw the current frame centered on the sprite's position.
    pub fn render<B: Blitter>(&self, out: &mut B) {
        out.blit(
            self.frame,
            self.screen_x - self.width() / 2,
            self.screen_y - self.height() / 2,
        );
    }

    // Ping-pong: reflect off either end of the strip instead of wrapping.
    fn advance_animation(&mut self) {
        let last = self.anim_frame_count as i32 - 1;
        let mut pos = self.anim_pos as i32 + self.anim_dir;
        if pos < 0 || pos > last {
            pos -= 2 * self.anim_dir;
            self.anim_dir = -self.anim_dir;
        }
        // single-frame strips reflect out of range
        self.anim_pos = pos.clamp(0, last) as usize;
    }

    fn step(&mut self, map: &mut TileMap, viewport: Viewport) {
        let half_w = viewport.width / 2;
        let half_h = viewport.height / 2;

        let (axis, delta, scroll) = match self.direction {
            Direction::Up => (
                Axis::Y,
                -VERTICAL_STEP,
                self.screen_y - VERTICAL_STEP < half_h && map.camera_y() > 0,
            ),
            Direction::Right => (
                Axis::X,
                HORIZONTAL_STEP,
                self.screen_x + HORIZONTAL_STEP > half_w
                    && map.pixel_width() - map.camera_x() > viewport.width,
            ),
            Direction::Down => (
                Axis::Y,
                VERTICAL_STEP,
                self.screen_y + VERTICAL_STEP > half_h
                    && map.pixel_height() - map.camera_y() > viewport.height,
            ),
            Direction::Left => (
                Axis::X,
                -HORIZONTAL_STEP,
                self.screen_x - HORIZONTAL_STEP < half_w && map.camera_x() > 0,
            ),
        };

        match (axis, scroll) {
            (Axis::X, true) => map.set_camera_x(map.camera_x() + delta, viewport.width),
            (Axis::Y, true) => map.set_camera_y(map.camera_y() + delta, viewport.height),
            (Axis::X, false) => self.screen_x += delta,
            (Axis::Y, false) => self.screen_y += delta,
        }
    }

    fn keep_inside(&mut self, viewport: Viewport) {
        let half_w = self.width() / 2;
        let half_h = self.height() / 2;

        if self.screen_x + half_w > viewport.width {
            self.screen_x = viewport.width - half_w;
        } else if self.screen_x - half_w < 0 {
            self.screen_x = half_w;
        }
        if self.screen_y + half_h > viewport.height {
            self.screen_y = viewport.height - half_h;
        } else if self.screen_y - half_h < 0 {
            self.screen_y = half_h;
        }
    }
}
