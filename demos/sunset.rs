use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use tilescroll::render::Atlas;
use tilescroll::{Blitter, ControlledSprite, DemoConfig, Direction, ResourceManager, TileMap, Viewport};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    DemoConfig::discover().unwrap_or_default().window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let config = match DemoConfig::discover() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "config_unreadable_using_defaults");
            DemoConfig::default()
        }
    };

    if let Err(err) = run(config).await {
        error!(error = %format!("{err:#}"), "startup_failed");
        std::process::exit(1);
    }
}

async fn run(config: DemoConfig) -> anyhow::Result<()> {
    let resources = ResourceManager::load(&config.resources)?;

    let mut map = TileMap::from_resources(&resources, &config.map)?;
    let map_def = resources.tilemap(&config.map)?;
    let mut tiles = Atlas::load(&resources, &map_def.resource).await?;

    let mut player = ControlledSprite::from_resources(&resources, &config.sprite, config.sprite_frames)?;
    let mut player_atlas = Atlas::load(&resources, &config.sprite).await?;
    player.set_coords(config.start.0, config.start.1);

    let mut boat = match &config.boat {
        Some((name, pos)) => Some((Atlas::load(&resources, name).await?, *pos)),
        None => None,
    };

    info!(level = %map.level_name(), "demo_started");
    let started = get_time();

    loop {
        if is_key_down(KeyCode::Escape) {
            break;
        }

        for dir in Direction::ALL {
            if is_key_pressed(dir.key()) {
                player.on_key_down(dir.key());
            }
            if is_key_released(dir.key()) {
                player.on_key_up(dir.key());
            }
        }

        let viewport = Viewport::screen();

        draw_sunset(viewport);
        if let Some((atlas, (x, y))) = boat.as_mut() {
            let elapsed_ms = ((get_time() - started) * 1000.0) as u64;
            let frame = atlas.def().looping_frame(elapsed_ms);
            atlas.blit(frame, *x as i32, *y as i32);
        }
        map.render(viewport, &mut tiles);
        player.render(&mut player_atlas);
        draw_text(
            &config.caption,
            config.caption_pos.0,
            config.caption_pos.1,
            config.caption_size,
            WHITE,
        );

        player.update(&mut map, viewport, None);

        next_frame().await;
    }

    Ok(())
}

fn gradient_fill(x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color) {
    let mesh = Mesh {
        vertices: vec![
            Vertex::new(x, y, 0.0, 0.0, 0.0, top),
            Vertex::new(x + w, y, 0.0, 1.0, 0.0, top),
            Vertex::new(x + w, y + h, 0.0, 1.0, 1.0, bottom),
            Vertex::new(x, y + h, 0.0, 0.0, 1.0, bottom),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
        texture: None,
    };
    draw_mesh(&mesh);
}

fn draw_sunset(viewport: Viewport) {
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    let horizon = h / 2.0;

    let red = Color::from_rgba(155, 60, 68, 255);
    let yellow = Color::from_rgba(255, 234, 117, 255);
    let blue = Color::from_rgba(13, 75, 74, 255);
    let lightblue = Color::from_rgba(16, 91, 90, 255);

    gradient_fill(0.0, 0.0, w, horizon / 1.5, BLACK, red);
    gradient_fill(0.0, horizon / 1.5, w, horizon - horizon / 1.5, red, yellow);
    draw_circle(w / 2.0, horizon, 15.0, WHITE);
    draw_rectangle(0.0, horizon, w, h - horizon, blue);

    // distance lines, doubling the gap each time
    let mut y = horizon + 1.0;
    let mut delta = 2.0;
    while y < h {
        draw_line(0.0, y, w, y, 1.0, lightblue);
        y += delta;
        delta += delta;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
