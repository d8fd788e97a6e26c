use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

mod food;
mod game;
mod input;
mod rendering;
mod snake;
mod ui;

use game::{
    BACKGROUND_COLOR, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, GameConfig, GameRng, GameState,
    STATUS_BAR_HEIGHT,
};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() {
    let mut rng = GameRng::default();
    let game = GameState::new(GameConfig::default(), &mut rng.0);

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(
                        (GRID_WIDTH as f32 * CELL_SIZE) as u32,
                        (GRID_HEIGHT as f32 * CELL_SIZE + STATUS_BAR_HEIGHT) as u32,
                    ),
                    title: "Chroma Snake".to_string(),
                    resizable: false,
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(game)
        .insert_resource(rng)
        .add_plugins((SnakePlugin, RenderingPlugin, UiPlugin))
        .run();
}
