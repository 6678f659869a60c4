use crate::camera::clamp_axis;
use crate::command::Blitter;
use crate::error::{Error, Result};
use crate::layer::TileLayer;
use crate::loader::json_loader::ResourceManager;
use crate::view::Viewport;
use tracing::info;

/// Tile size used to derive the vertical sub-tile scroll offset.
///
/// The map has always used the tile *width* here, which is only correct for
/// square tiles. `TileHeight` is the corrected variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOffsetBasis {
    /// `pixel_offset_y = camera_y - start_row * tile_width`
    #[default]
    TileWidth,
    /// `pixel_offset_y = camera_y - start_row * tile_height`
    TileHeight,
}

/// Block of tiles that covers the viewport at the current camera position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// First visible column
    pub start_col: usize,
    /// First visible row
    pub start_row: usize,
    /// Number of columns to draw
    pub col_count: usize,
    /// Number of rows to draw
    pub row_count: usize,
    /// Pixels the first column is shifted left by
    pub pixel_offset_x: i32,
    /// Pixels the first row is shifted up by
    pub pixel_offset_y: i32,
}

/// Layered tile grid with a clamped camera.
#[derive(Debug, Clone)]
pub struct TileMap {
    level_name: String,
    map_width: usize,
    map_height: usize,
    tile_width: i32,
    tile_height: i32,
    pixel_width: i32,
    pixel_height: i32,
    layers: Vec<TileLayer>,
    camera_x: i32,
    camera_y: i32,
    row_offset_basis: RowOffsetBasis,
}

impl TileMap {
    /// Build a map from per-layer tile arrays. Layers draw back-to-front in
    /// list order and the camera starts at `(0, 0)`.
    pub fn new(
        level_name: impl Into<String>,
        map_width: usize,
        map_height: usize,
        tile_width: i32,
        tile_height: i32,
        layers: Vec<Vec<u32>>,
    ) -> Result<Self> {
        let level_name = level_name.into();
        if map_width == 0 || map_height == 0 {
            return Err(Error::invalid(
                &level_name,
                format!("map dimensions must be non-zero, got {map_width}x{map_height}"),
            ));
        }
        if tile_width <= 0 || tile_height <= 0 {
            return Err(Error::invalid(
                &level_name,
                format!("tile size must be positive, got {tile_width}x{tile_height}"),
            ));
        }

        let extent = |tiles: usize, size: i32| {
            i32::try_from(tiles)
                .ok()
                .and_then(|t| t.checked_mul(size))
        };
        let (Some(pixel_width), Some(pixel_height)) =
            (extent(map_width, tile_width), extent(map_height, tile_height))
        else {
            return Err(Error::invalid(&level_name, "map is too large in pixels"));
        };

        let layers = layers
            .into_iter()
            .map(|data| TileLayer::new(&level_name, data, map_width, map_height))
            .collect::<Result<Vec<_>>>()?;

        Ok(TileMap {
            level_name,
            map_width,
            map_height,
            tile_width,
            tile_height,
            pixel_width,
            pixel_height,
            layers,
            camera_x: 0,
            camera_y: 0,
            row_offset_basis: RowOffsetBasis::default(),
        })
    }

    /// Build the map stored under `tileset` in a resource manifest.
    ///
    /// The resource must be of type `tilemap`; its `resource` attribute names
    /// the sprite whose (scaled) frame size becomes the tile size.
    pub fn from_resources(resources: &ResourceManager, tileset: &str) -> Result<Self> {
        let def = resources.tilemap(tileset)?;
        let atlas = resources.sprite(&def.resource)?;
        let (tile_width, tile_height) = atlas.scaled_frame_size();

        let map = TileMap::new(
            def.name,
            def.width,
            def.height,
            tile_width,
            tile_height,
            def.layers,
        )
        .map_err(|err| match err {
            Error::InvalidResource { reason, .. } => Error::invalid(tileset, reason),
            other => other,
        })?;

        info!(
            tileset,
            level = %map.level_name,
            width = map.map_width,
            height = map.map_height,
            layers = map.layers.len(),
            "loaded tile map"
        );
        Ok(map)
    }

    /// Pick how the vertical scroll offset is derived.
    pub fn with_row_offset_basis(mut self, basis: RowOffsetBasis) -> Self {
        self.row_offset_basis = basis;
        self
    }

    /// `name` attribute of the level.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Width in tiles.
    pub fn map_width(&self) -> usize {
        self.map_width
    }

    /// Height in tiles.
    pub fn map_height(&self) -> usize {
        self.map_height
    }

    /// Pixel width of one tile.
    pub fn tile_width(&self) -> i32 {
        self.tile_width
    }

    /// Pixel height of one tile.
    pub fn tile_height(&self) -> i32 {
        self.tile_height
    }

    /// Width of the whole map in pixels.
    pub fn pixel_width(&self) -> i32 {
        self.pixel_width
    }

    /// Height of the whole map in pixels.
    pub fn pixel_height(&self) -> i32 {
        self.pixel_height
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Left edge of the viewport in map pixels.
    pub fn camera_x(&self) -> i32 {
        self.camera_x
    }

    /// Top edge of the viewport in map pixels.
    pub fn camera_y(&self) -> i32 {
        self.camera_y
    }

    /// Move the camera horizontally, clamped so the map keeps filling the viewport.
    pub fn set_camera_x(&mut self, new_x: i32, viewport_width: i32) {
        self.camera_x = clamp_axis(new_x, self.pixel_width(), viewport_width);
    }

    /// Move the camera vertically, clamped so the map keeps filling the viewport.
    pub fn set_camera_y(&mut self, new_y: i32, viewport_height: i32) {
        self.camera_y = clamp_axis(new_y, self.pixel_height(), viewport_height);
    }

    /// Tiles needed to cover `viewport` at the current camera position.
    ///
    /// One extra column and row beyond the whole tiles that fit are included
    /// so a partially scrolled edge never shows a gap.
    pub fn visible_tile_range(&self, viewport: Viewport) -> VisibleRange {
        let start_col = (self.camera_x / self.tile_width).max(0) as usize;
        let start_row = (self.camera_y / self.tile_height).max(0) as usize;

        let horiz = (viewport.width / self.tile_width + 2).max(0) as usize;
        let vert = (viewport.height / self.tile_height + 2).max(0) as usize;
        let col_count = horiz.min(self.map_width.saturating_sub(start_col));
        let row_count = vert.min(self.map_height.saturating_sub(start_row));

        let row_unit = match self.row_offset_basis {
            RowOffsetBasis::TileWidth => self.tile_width,
            RowOffsetBasis::TileHeight => self.tile_height,
        };

        VisibleRange {
            start_col,
            start_row,
            col_count,
            row_count,
            pixel_offset_x: self.camera_x - start_col as i32 * self.tile_width,
            pixel_offset_y: self.camera_y - start_row as i32 * row_unit,
        }
    }

    /// Emit one draw request per visible tile, layer by layer.
    pub fn render<B: Blitter>(&self, viewport: Viewport, out: &mut B) {
        let range = self.visible_tile_range(viewport);

        for layer in &self.layers {
            for row in 0..range.row_count {
                for col in 0..range.col_count {
                    let tile = layer.tile(range.start_col + col, range.start_row + row);
                    let x = col as i32 * self.tile_width - range.pixel_offset_x;
                    let y = row as i32 * self.tile_height - range.pixel_offset_y;
                    out.blit(tile as usize, x, y);
                }
            }
        }
    }
}
