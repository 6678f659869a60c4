use crate::command::Blitter;
use crate::loader::json_loader::{ResourceManager, SpriteDef};
use anyhow::Context;
use macroquad::prelude::*;
use tracing::info;

/// Texture cut into a regular grid of frames, drawn by frame index.
pub struct Atlas {
    tex: Texture2D,
    def: SpriteDef,
}

/// Pixel rectangle of `frame` inside the atlas image, or `None` past the last frame.
///
/// Frames run row-major, `columns` per row.
pub fn source_rect(def: &SpriteDef, frame: usize) -> Option<Rect> {
    if frame >= def.frame_count as usize || def.columns == 0 {
        return None;
    }
    let cols = def.columns as usize;
    let col = (frame % cols) as f32;
    let row = (frame / cols) as f32;
    let w = def.frame_width as f32;
    let h = def.frame_height as f32;
    Some(Rect::new(col * w, row * h, w, h))
}

impl Atlas {
    /// Load the `sprite` resource `name` and its texture.
    pub async fn load(resources: &ResourceManager, name: &str) -> anyhow::Result<Self> {
        let def = resources.sprite(name)?;
        let img_path = resources.resolve(&def.image);
        let img_str = img_path
            .to_str()
            .with_context(|| format!("Texture path is not UTF-8: {}", img_path.display()))?;

        let tex: Texture2D = load_texture(img_str)
            .await
            .with_context(|| format!("Loading texture {}", def.image))?;
        tex.set_filter(FilterMode::Nearest);

        info!(sprite = name, image = %def.image, frames = def.frame_count, "loaded atlas");
        Ok(Atlas { tex, def })
    }

    /// Manifest entry the atlas was built from.
    pub fn def(&self) -> &SpriteDef {
        &self.def
    }
}

impl Blitter for Atlas {
    fn blit(&mut self, frame: usize, x: i32, y: i32) {
        let Some(src) = source_rect(&self.def, frame) else {
            return;
        };
        let (w, h) = self.def.scaled_frame_size();
        draw_texture_ex(
            &self.tex,
            x as f32,
            y as f32,
            WHITE,
            DrawTextureParams {
                source: Some(src),
                dest_size: Some(vec2(w as f32, h as f32)),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> SpriteDef {
        SpriteDef {
            image: "tiles.png".into(),
            frame_width: 16,
            frame_height: 8,
            columns: 3,
            frame_count: 7,
            delay_ms: 60,
            delays: Vec::new(),
            scale: 1.0,
        }
    }

    #[test]
    fn source_rect_walks_rows() {
        let d = def();
        assert_eq!(source_rect(&d, 0), Some(Rect::new(0.0, 0.0, 16.0, 8.0)));
        assert_eq!(source_rect(&d, 2), Some(Rect::new(32.0, 0.0, 16.0, 8.0)));
        assert_eq!(source_rect(&d, 4), Some(Rect::new(16.0, 8.0, 16.0, 8.0)));
        assert_eq!(source_rect(&d, 6), Some(Rect::new(0.0, 16.0, 16.0, 8.0)));
    }

    #[test]
    fn source_rect_rejects_frames_past_the_end() {
        assert_eq!(source_rect(&def(), 7), None);
    }
}
