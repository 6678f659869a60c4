// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use tilescroll::{ControlledSprite, Error, ResourceManager, TileMap};

const MANIFEST: &str = r#"
{
  "resources": {
    "cliff": {
      "type": "tilemap",
      "name": "Cliffs",
      "resource": "cliff_tiles",
      "width": 3,
      "height": 2,
      "layers": [ [0, 1, 2, 3, 4, 5] ]
    },
    "broken": {
      "type": "tilemap",
      "resource": "cliff_tiles",
      "width": 3,
      "height": 2,
      "layers": [ [0, 1] ]
    },
    "cliff_tiles": {
      "type": "sprite",
      "image": "cliff.png",
      "frame_width": 16,
      "frame_height": 12,
      "columns": 3,
      "frame_count": 6,
      "scale": 2.0
    },
    "Tonberry": {
      "type": "sprite",
      "image": "tonberry.png",
      "frame_width": 20,
      "frame_height": 30,
      "columns": 3,
      "frame_count": 12
    }
  }
}
"#;

fn manager() -> ResourceManager {
    ResourceManager::load_from_str(MANIFEST, "resources").expect("should parse inline JSON")
}

#[test]
fn tilemap_takes_tile_size_from_scaled_atlas() {
    let map = TileMap::from_resources(&manager(), "cliff").expect("map");
    assert_eq!(map.level_name(), "Cliffs");
    assert_eq!((map.map_width(), map.map_height()), (3, 2));
    assert_eq!((map.tile_width(), map.tile_height()), (32, 24));
    assert_eq!(map.layers().len(), 1);
}

#[test]
fn tilemap_layer_mismatch_names_the_tileset() {
    let err = TileMap::from_resources(&manager(), "broken").unwrap_err();
    assert!(matches!(err, Error::InvalidResource { name, .. } if name == "broken"));
}

#[test]
fn tilemap_from_non_tilemap_resource_fails() {
    let err = TileMap::from_resources(&manager(), "Tonberry").unwrap_err();
    match err {
        Error::InvalidResource { name, reason } => {
            assert_eq!(name, "Tonberry");
            assert!(reason.contains("not a tilemap"));
        }
        other => panic!("expected InvalidResource, got {:?}", other),
    }
}

#[test]
fn sprite_from_resources_checks_frame_count() {
    let res = manager();
    let sprite = ControlledSprite::from_resources(&res, "Tonberry", 3).expect("sprite");
    assert_eq!((sprite.width(), sprite.height()), (20, 30));

    let err = ControlledSprite::from_resources(&res, "Tonberry", 4).unwrap_err();
    assert!(matches!(err, Error::InvalidResource { name, .. } if name == "Tonberry"));
}

#[test]
fn integration_load_manifest_from_file() {
    let mut dir = std::env::temp_dir();
    dir.push(format!("tilescroll_manifest_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("resources.json");
    fs::write(&path, MANIFEST).unwrap();

    let res = ResourceManager::load(&path).unwrap();
    assert_eq!(res.kind("cliff"), Some("tilemap"));
    assert_eq!(res.resolve("cliff.png"), dir.join("cliff.png"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn integration_unsupported_format() {
    let err = ResourceManager::load("resources.xml").unwrap_err();
    match err {
        Error::UnsupportedFormat(ext) => assert_eq!(ext, "resources.xml"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn missing_manifest_is_io_error() {
    let path = PathBuf::from("definitely/not/here.json");
    assert!(matches!(ResourceManager::load(&path), Err(Error::Io { .. })));
}

#[test]
fn bundled_manifest_builds_the_demo_scene() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources");
    path.push("resources.json");

    let res = ResourceManager::load(&path).expect("bundled resources should load");
    let map = TileMap::from_resources(&res, "cliff").expect("bundled map");
    assert!(map.pixel_width() > 640);
    ControlledSprite::from_resources(&res, "Tonberry", 3).expect("bundled sprite");
    assert_eq!(res.kind("Boat"), Some("sprite"));
}

#[test]
fn bundled_images_exist_and_match_their_frame_grid() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources");
    path.push("resources.json");
    let res = ResourceManager::load(&path).expect("bundled resources should load");

    for name in ["cliff_tiles", "Tonberry", "Boat"] {
        let def = res.sprite(name).expect("bundled sprite resource");
        let image = res.resolve(&def.image);
        assert!(image.exists(), "{} is missing", image.display());

        // PNG IHDR: width and height are big-endian u32 at bytes 16..24
        let bytes = fs::read(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{} is not a PNG", image.display());
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        let rows = def.frame_count.div_ceil(def.columns);
        assert!(width >= def.columns * def.frame_width, "{name} too narrow");
        assert!(height >= rows * def.frame_height, "{name} too short");
    }
}
