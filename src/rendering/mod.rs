//! Rendering plugin - repaints the board from the game state every frame.
//!
//! [`scene`] turns the state into draw commands in canvas pixels (origin top-left,
//! y down). [`paint_scene`] hands the shapes to the immediate-mode painter and
//! [`show_overlays`] toggles the persistent overlay text nodes.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    BACKGROUND_COLOR, CELL_SIZE, FoodEatenEvent, GRID_LINE_COLOR, GameSet, GameState,
    OVERLAY_TEXT_COLOR, SNAKE_BODY_ALPHA, STATUS_BAR_HEIGHT, Z_BACKGROUND, Z_FOOD, Z_FOOD_GLOW,
    Z_GRID, Z_SNAKE,
};

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_overlays).add_systems(
            Update,
            (
                paint_scene,
                show_overlays,
                spawn_food_eaten_effect,
                pulse_effect_system,
            )
                .chain()
                .in_set(GameSet::Present),
        );
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// The cell at `(x, y)` shrunk by `inset` pixels on every side.
    pub fn cell(x: i32, y: i32, inset: f32) -> Self {
        CanvasRect {
            x: x as f32 * CELL_SIZE + inset,
            y: y as f32 * CELL_SIZE + inset,
            width: CELL_SIZE - 2.0 * inset,
            height: CELL_SIZE - 2.0 * inset,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Overlay text shown over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    StartPrompt,
    Paused,
}

impl Overlay {
    pub fn text(&self) -> &'static str {
        match self {
            Overlay::StartPrompt => "Press arrow key to start!",
            Overlay::Paused => "PAUSED",
        }
    }

    pub fn font_size(&self) -> f32 {
        match self {
            Overlay::StartPrompt => 24.0,
            Overlay::Paused => 48.0,
        }
    }

    /// Vertical offset of the text line from the canvas center.
    pub fn offset_y(&self) -> f32 {
        match self {
            Overlay::StartPrompt => 50.0,
            Overlay::Paused => 0.0,
        }
    }
}

/// One immediate-mode drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: CanvasRect,
        color: Color,
        z: f32,
    },
    /// Additive halo around a food square.
    Glow { rect: CanvasRect, color: Color },
    Text(Overlay),
}

/// Size of the board in canvas pixels.
pub fn canvas_size(state: &GameState) -> Vec2 {
    Vec2::new(
        state.config.grid_width as f32 * CELL_SIZE,
        state.config.grid_height as f32 * CELL_SIZE,
    )
}

/// Builds this frame's draw list. Reads the state, never changes it.
pub fn scene(state: &GameState) -> Vec<DrawCommand> {
    let config = &state.config;
    let size = canvas_size(state);
    let mut commands = Vec::new();

    commands.push(DrawCommand::Fill {
        rect: CanvasRect {
            x: 0.0,
            y: 0.0,
            width: size.x,
            height: size.y,
        },
        color: BACKGROUND_COLOR,
        z: Z_BACKGROUND,
    });

    // Grid lines, 1px wide, on every cell boundary
    for i in 0..=config.grid_width {
        commands.push(DrawCommand::Fill {
            rect: CanvasRect {
                x: i as f32 * CELL_SIZE - 0.5,
                y: 0.0,
                width: 1.0,
                height: size.y,
            },
            color: GRID_LINE_COLOR,
            z: Z_GRID,
        });
    }
    for i in 0..=config.grid_height {
        commands.push(DrawCommand::Fill {
            rect: CanvasRect {
                x: 0.0,
                y: i as f32 * CELL_SIZE - 0.5,
                width: size.x,
                height: 1.0,
            },
            color: GRID_LINE_COLOR,
            z: Z_GRID,
        });
    }

    for food in &state.foods {
        let color = food.color.color();
        commands.push(DrawCommand::Fill {
            rect: CanvasRect::cell(food.position.x, food.position.y, 2.0),
            color,
            z: Z_FOOD,
        });
        commands.push(DrawCommand::Glow {
            rect: CanvasRect::cell(food.position.x, food.position.y, 4.0),
            color,
        });
    }

    // Whole snake in the current target color, body translucent
    let snake_color = state.color.color();
    for (i, segment) in state.snake.iter().enumerate() {
        let color = if i == 0 {
            snake_color
        } else {
            snake_color.with_alpha(SNAKE_BODY_ALPHA)
        };
        commands.push(DrawCommand::Fill {
            rect: CanvasRect::cell(segment.x, segment.y, 1.0),
            color,
            z: Z_SNAKE,
        });
    }

    commands.extend(active_overlays(state).into_iter().map(DrawCommand::Text));
    commands
}

/// Overlays that belong on screen for this state, in drawing order.
pub fn active_overlays(state: &GameState) -> Vec<Overlay> {
    let mut overlays = Vec::new();
    if state.next_direction.is_none() {
        overlays.push(Overlay::StartPrompt);
    }
    if state.paused {
        overlays.push(Overlay::Paused);
    }
    overlays
}

/// Maps a canvas point to world space, with the board centered below the status bar.
fn to_world(point: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(
        point.x - canvas.x / 2.0,
        canvas.y / 2.0 - point.y - STATUS_BAR_HEIGHT / 2.0,
    )
}

/// System to paint the current scene with the immediate-mode painter.
fn paint_scene(mut painter: ShapePainter, game: Res<GameState>) {
    let canvas = canvas_size(&game);
    for command in scene(&game) {
        let (rect, color, z, alpha_mode) = match command {
            DrawCommand::Fill { rect, color, z } => (rect, color, z, ShapeAlphaMode::Blend),
            DrawCommand::Glow { rect, color } => {
                (rect, color.with_alpha(0.5), Z_FOOD_GLOW, ShapeAlphaMode::Add)
            }
            // Text lives on persistent UI nodes, see show_overlays
            DrawCommand::Text(_) => continue,
        };
        let center = to_world(rect.center(), canvas);
        painter.set_translation(center.extend(z));
        painter.color = color;
        painter.alpha_mode = alpha_mode;
        painter.rect(Vec2::new(rect.width, rect.height));
    }
}

/// Overlay text node, hidden unless its overlay is active.
#[derive(Component)]
pub struct OverlayText(pub Overlay);

/// Spawns one hidden text node per overlay, centered over the board.
fn spawn_overlays(mut commands: Commands, game: Res<GameState>) {
    let canvas = canvas_size(&game);
    for overlay in [Overlay::StartPrompt, Overlay::Paused] {
        let top = STATUS_BAR_HEIGHT + canvas.y / 2.0 + overlay.offset_y() - overlay.font_size();
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(top),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
                OverlayText(overlay),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::from(overlay.text()),
                    TextFont {
                        font_size: overlay.font_size(),
                        ..default()
                    },
                    TextColor(OVERLAY_TEXT_COLOR),
                ));
            });
    }
}

/// System to show exactly the overlays the current state asks for.
fn show_overlays(game: Res<GameState>, mut nodes: Query<(&OverlayText, &mut Visibility)>) {
    let active = active_overlays(&game);
    for (node, mut visibility) in nodes.iter_mut() {
        let wanted = if active.contains(&node.0) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// Expanding flash left where food was eaten.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// System to spawn visual effect when food is eaten.
fn spawn_food_eaten_effect(
    mut commands: Commands,
    game: Res<GameState>,
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
) {
    let canvas = canvas_size(&game);
    for event in food_eaten_reader.read() {
        let rect = CanvasRect::cell(event.position.x, event.position.y, 2.0);
        let center = to_world(rect.center(), canvas);

        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: event.color.color().with_alpha(0.8),
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_xyz(center.x, center.y, Z_SNAKE + 0.5),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to grow and then remove food-eaten flashes.
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}
