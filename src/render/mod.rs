//! Macroquad-backed drawing for the [`Blitter`](crate::Blitter) seam.

mod atlas;

pub use atlas::{source_rect, Atlas};
