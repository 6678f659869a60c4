#![warn(missing_docs)]

//! Scrollable layered tile map and an arrow-key driven animated sprite for
//! Macroquad.
//!
//! The map owns the camera and clamps it to the map edges; the sprite walks
//! inside a central dead-zone and asks the map to scroll once it crosses the
//! center line. Drawing goes through the [`Blitter`] trait so everything but
//! [`render::Atlas`] runs without a window.

pub mod camera;
mod clock;
mod command;
mod config;
mod error;
mod input;
mod layer;
mod loader {
    pub mod json_loader;
}
mod map;
pub mod render;
mod sprite;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Blitter, CommandBuffer, DrawCommand};
pub use config::{DemoConfig, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use input::Direction;
pub use layer::TileLayer;
pub use loader::json_loader::{ResourceManager, SpriteDef, TileMapDef, SPRITE, TILEMAP};
pub use map::{RowOffsetBasis, TileMap, VisibleRange};
pub use sprite::{ControlledSprite, FrameInfo, SpriteSheet, HORIZONTAL_STEP, VERTICAL_STEP};
pub use view::Viewport;
