// src/loader/json_loader.rs
use crate::error::{Error, Result};
use crate::sprite::{FrameInfo, SpriteSheet};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resource type tag for tile maps.
pub const TILEMAP: &str = "tilemap";
/// Resource type tag for sprites / atlases.
pub const SPRITE: &str = "sprite";

#[derive(Deserialize)]
struct JsonManifest {
    resources: HashMap<String, JsonResource>,
}

#[derive(Deserialize)]
struct JsonResource {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    body: serde_json::Map<String, JsonValue>,
}

/// `tilemap` resource as stored in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct TileMapDef {
    /// Level name
    #[serde(default)]
    pub name: String,
    /// Name of the `sprite` resource holding the tile atlas
    pub resource: String,
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
    /// Row-major tile indices, one array per layer
    #[serde(default)]
    pub layers: Vec<Vec<u32>>,
}

fn default_delay() -> u64 {
    60
}
fn one() -> f32 {
    1.0
}
fn default_columns() -> u32 {
    1
}
fn default_count() -> u32 {
    1
}

/// `sprite` resource as stored in the manifest: a regular grid of frames.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteDef {
    /// Image path, relative to the manifest
    pub image: String,
    /// Unscaled frame width in pixels
    pub frame_width: u32,
    /// Unscaled frame height in pixels
    pub frame_height: u32,
    /// Frames per atlas row
    #[serde(default = "default_columns")]
    pub columns: u32,
    /// Total number of frames
    #[serde(default = "default_count")]
    pub frame_count: u32,
    /// Delay used for frames without an entry in `delays`
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
    /// Per-frame delays, indexed by frame
    #[serde(default)]
    pub delays: Vec<u64>,
    /// Draw scale applied to each frame
    #[serde(default = "one")]
    pub scale: f32,
}

impl SpriteDef {
    /// Frame size after scaling, in whole pixels.
    pub fn scaled_frame_size(&self) -> (i32, i32) {
        (
            (self.frame_width as f32 * self.scale) as i32,
            (self.frame_height as f32 * self.scale) as i32,
        )
    }

    /// Display time of frame `index`.
    pub fn delay_of(&self, index: usize) -> u64 {
        self.delays.get(index).copied().unwrap_or(self.delay_ms)
    }

    /// Frame table for `name`.
    pub fn sheet(&self, name: &str) -> SpriteSheet {
        let (width, height) = self.scaled_frame_size();
        let frames = (0..self.frame_count as usize)
            .map(|i| FrameInfo {
                width,
                height,
                delay_ms: self.delay_of(i),
            })
            .collect();
        SpriteSheet::new(name, frames)
    }

    /// Frame shown `elapsed_ms` into a forward, wrapping playback of all frames.
    pub fn looping_frame(&self, elapsed_ms: u64) -> usize {
        let count = self.frame_count as usize;
        let cycle: u64 = (0..count).map(|i| self.delay_of(i)).sum();
        if cycle == 0 {
            return 0;
        }
        let mut t = elapsed_ms % cycle;
        for i in 0..count {
            let d = self.delay_of(i);
            if t < d {
                return i;
            }
            t -= d;
        }
        0
    }
}

/// Named, typed resources read from a JSON manifest.
#[derive(Debug, Default)]
pub struct ResourceManager {
    base_dir: PathBuf,
    entries: HashMap<String, (String, JsonValue)>,
}

impl ResourceManager {
    /// Load a manifest from disk; only JSON is supported.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        if p.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(Error::UnsupportedFormat(p.display().to_string()));
        }

        let txt = std::fs::read_to_string(p).map_err(|source| Error::Io {
            path: p.to_path_buf(),
            source,
        })?;

        let base = p
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"));

        let manager = Self::parse(&txt, base).map_err(|source| Error::Json {
            path: p.to_path_buf(),
            source,
        })?;
        info!(path = %p.display(), resources = manager.entries.len(), "loaded resource manifest");
        Ok(manager)
    }

    /// Parse a manifest held in memory. Image paths resolve against `base_dir`.
    pub fn load_from_str(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::parse(json, base_dir.into()).map_err(|source| Error::Json {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    fn parse(json: &str, base_dir: PathBuf) -> serde_json::Result<Self> {
        let manifest: JsonManifest = serde_json::from_str(json)?;
        let entries = manifest
            .resources
            .into_iter()
            .map(|(name, res)| (name, (res.kind, JsonValue::Object(res.body))))
            .collect();
        Ok(ResourceManager { base_dir, entries })
    }

    /// Type tag of `name`, if present.
    pub fn kind(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|(kind, _)| kind.as_str())
    }

    /// The `tilemap` resource called `name`.
    pub fn tilemap(&self, name: &str) -> Result<TileMapDef> {
        self.typed(name, TILEMAP)
    }

    /// The `sprite` resource called `name`.
    pub fn sprite(&self, name: &str) -> Result<SpriteDef> {
        self.typed(name, SPRITE)
    }

    /// Path of `relative` next to the manifest.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    fn typed<T: serde::de::DeserializeOwned>(&self, name: &str, expected: &str) -> Result<T> {
        let (kind, body) = self
            .entries
            .get(name)
            .ok_or_else(|| Error::invalid(name, "no such resource"))?;
        if kind != expected {
            return Err(Error::invalid(
                name,
                format!("Resource {} is not a {}", name, expected),
            ));
        }
        T::deserialize(body)
            .map_err(|e| Error::invalid(name, format!("malformed {} resource: {}", expected, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
      "resources": {
        "cliff": {
          "type": "tilemap",
          "name": "Cliffs",
          "resource": "cliff_tiles",
          "width": 2,
          "height": 2,
          "layers": [[0, 1, 2, 3], [4, 4, 4, 4]]
        },
        "cliff_tiles": {
          "type": "sprite",
          "image": "cliff.png",
          "frame_width": 16,
          "frame_height": 8,
          "columns": 4,
          "frame_count": 8,
          "scale": 2.0
        },
        "Tonberry": {
          "type": "sprite",
          "image": "tonberry.png",
          "frame_width": 24,
          "frame_height": 32,
          "columns": 3,
          "frame_count": 12,
          "delay_ms": 100,
          "delays": [10, 20]
        },
        "tahoma": { "type": "font", "height": 30 }
      }
    }"#;

    fn manager() -> ResourceManager {
        ResourceManager::load_from_str(MANIFEST, "assets").expect("manifest should parse")
    }

    #[test]
    fn reads_tilemap_definition() {
        let def = manager().tilemap("cliff").expect("tilemap");
        assert_eq!(def.name, "Cliffs");
        assert_eq!(def.resource, "cliff_tiles");
        assert_eq!((def.width, def.height), (2, 2));
        assert_eq!(def.layers.len(), 2);
        assert_eq!(def.layers[1], vec![4, 4, 4, 4]);
    }

    #[test]
    fn sprite_sheet_uses_scale_and_per_frame_delays() {
        let res = manager();
        assert_eq!(res.sprite("cliff_tiles").unwrap().scaled_frame_size(), (32, 16));

        let sheet = res.sprite("Tonberry").unwrap().sheet("Tonberry");
        assert_eq!(sheet.len(), 12);
        assert_eq!(sheet.frame(0).delay_ms, 10);
        assert_eq!(sheet.frame(1).delay_ms, 20);
        assert_eq!(sheet.frame(2).delay_ms, 100);
        assert_eq!((sheet.frame(5).width, sheet.frame(5).height), (24, 32));
    }

    #[test]
    fn looping_frame_follows_delays_and_wraps() {
        let def = manager().sprite("Tonberry").unwrap();
        // delays: 10, 20, then 100 for the remaining ten frames
        assert_eq!(def.looping_frame(0), 0);
        assert_eq!(def.looping_frame(9), 0);
        assert_eq!(def.looping_frame(10), 1);
        assert_eq!(def.looping_frame(29), 1);
        assert_eq!(def.looping_frame(30), 2);
        assert_eq!(def.looping_frame(1_029), 11);
        assert_eq!(def.looping_frame(1_030), 0);
    }

    #[test]
    fn looping_frame_with_single_frame_stays_put() {
        let def = manager().sprite("cliff_tiles").unwrap();
        let single = SpriteDef {
            frame_count: 1,
            ..def
        };
        for t in [0, 59, 60, 12_345] {
            assert_eq!(single.looping_frame(t), 0);
        }
    }

    #[test]
    fn keeps_unknown_resource_types() {
        assert_eq!(manager().kind("tahoma"), Some("font"));
    }

    #[test]
    fn wrong_type_is_invalid_resource() {
        let err = manager().tilemap("Tonberry").unwrap_err();
        match err {
            Error::InvalidResource { name, reason } => {
                assert_eq!(name, "Tonberry");
                assert_eq!(reason, "Resource Tonberry is not a tilemap");
            }
            other => panic!("expected InvalidResource, got {:?}", other),
        }
    }

    #[test]
    fn missing_resource_is_invalid_resource() {
        let err = manager().sprite("Boat").unwrap_err();
        assert!(matches!(err, Error::InvalidResource { name, .. } if name == "Boat"));
    }

    #[test]
    fn malformed_body_is_invalid_resource() {
        let json = r#"{ "resources": { "bad": { "type": "tilemap", "width": 2 } } }"#;
        let res = ResourceManager::load_from_str(json, ".").unwrap();
        assert!(matches!(res.tilemap("bad"), Err(Error::InvalidResource { .. })));
    }

    #[test]
    fn resolves_paths_next_to_manifest() {
        assert_eq!(manager().resolve("cliff.png"), Path::new("assets").join("cliff.png"));
    }
}
