use crate::error::{Error, Result};
use macroquad::window::Conf;
use serde::Deserialize;
use std::path::Path;

/// Env var pointing at a demo config file.
pub const CONFIG_ENV_VAR: &str = "TILESCROLL_CONFIG";
/// Config file picked up from the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "tilescroll.json";

/// Settings for the sunset demo. Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Window title
    pub window_title: String,
    /// Initial window width
    pub window_width: i32,
    /// Initial window height
    pub window_height: i32,
    /// Whether the window may be resized
    pub resizable: bool,
    /// Resource manifest path
    pub resources: String,
    /// `tilemap` resource to scroll
    pub map: String,
    /// `sprite` resource of the player
    pub sprite: String,
    /// Frames per direction in the player sprite
    pub sprite_frames: usize,
    /// Initial player position (sprite center)
    pub start: (i32, i32),
    /// Optional decoration sprite and where to draw it
    pub boat: Option<(String, (f32, f32))>,
    /// Caption text
    pub caption: String,
    /// Caption position
    pub caption_pos: (f32, f32),
    /// Caption font size
    pub caption_size: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            window_title: "Sunset".into(),
            window_width: 640,
            window_height: 480,
            resizable: true,
            resources: "resources/resources.json".into(),
            map: "cliff".into(),
            sprite: "Tonberry".into(),
            sprite_frames: 3,
            start: (320, 240),
            boat: Some(("Boat".into(), (70.0, 252.0))),
            caption: "A Quiet Evening on the Pacific...".into(),
            caption_pos: (146.0, 50.0),
            caption_size: 30.0,
        }
    }
}

impl DemoConfig {
    /// Parse a config file; only JSON is supported.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        if p.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(Error::UnsupportedFormat(p.display().to_string()));
        }
        let txt = std::fs::read_to_string(p).map_err(|source| Error::Io {
            path: p.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| Error::Json {
            path: p.to_path_buf(),
            source,
        })
    }

    /// Config from [`CONFIG_ENV_VAR`], else [`DEFAULT_CONFIG_FILE`] if it
    /// exists, else defaults.
    pub fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load(path);
        }
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::load(DEFAULT_CONFIG_FILE);
        }
        Ok(Self::default())
    }

    /// Macroquad window settings.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            window_resizable: self.resizable,
            ..Default::default()
        }
    }
}
