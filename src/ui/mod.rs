//! UI plugin - camera, status bar (score, length, target color) and the game over panel.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::game::{
    ColorIndicator, FinalLengthText, FinalScoreText, GameOverEvent, GameOverReasonText,
    GameOverUI, GamePhase, GameSet, GameState, LengthText, STATUS_BAR_COLOR, STATUS_BAR_HEIGHT, ScoreText,
};

/// Plugin for UI and status display systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (update_status, fill_game_over_panel, toggle_game_over_panel)
                .chain()
                .in_set(GameSet::Present),
        );
    }
}

/// Initial setup system - camera, status bar, hidden game over panel.
fn setup_system(mut commands: Commands) {
    // Setup camera with HDR and bloom so food glow bleeds a little
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.2,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    spawn_status_bar(&mut commands);
    spawn_game_over_panel(&mut commands);
    info!("Ready, press an arrow key to start");
}

/// Spawns the status bar along the top of the window.
fn spawn_status_bar(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(STATUS_BAR_HEIGHT),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::horizontal(Val::Px(12.0)),
                column_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(STATUS_BAR_COLOR),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("Score: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));

            parent.spawn((
                Text::from("Length: 1"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                LengthText,
            ));

            parent.spawn((
                Text::from("Current Color: RED"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                BackgroundColor(Color::WHITE),
                Node {
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                    ..default()
                },
                ColorIndicator,
            ));
        });
}

/// Spawns the game over panel, hidden until a game ends.
fn spawn_game_over_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            Visibility::Hidden,
            GameOverUI,
        ))
        .with_children(|parent| {
            // "GAME OVER" text
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::default(),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
                GameOverReasonText,
            ));

            parent.spawn((
                Text::from("Final Score: 0"),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
                FinalScoreText,
            ));

            parent.spawn((
                Text::from("Final Length: 1"),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
                FinalLengthText,
            ));

            // Restart instructions
            parent.spawn((
                Text::from("Press R to restart"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
            ));
        });
}

type ScoreQuery<'w, 's> =
    Query<'w, 's, &'static mut Text, (With<ScoreText>, Without<LengthText>, Without<ColorIndicator>)>;
type LengthQuery<'w, 's> =
    Query<'w, 's, &'static mut Text, (With<LengthText>, Without<ScoreText>, Without<ColorIndicator>)>;
type IndicatorQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Text, &'static mut TextColor, &'static mut BackgroundColor),
    (With<ColorIndicator>, Without<ScoreText>, Without<LengthText>),
>;

/// System to update score, length and the color indicator.
fn update_status(
    game: Res<GameState>,
    mut score: ScoreQuery,
    mut length: LengthQuery,
    mut indicator: IndicatorQuery,
) {
    if let Ok(mut text) = score.single_mut() {
        *text = Text::from(format!("Score: {}", game.score));
    }
    if let Ok(mut text) = length.single_mut() {
        *text = Text::from(format!("Length: {}", game.len()));
    }
    if let Ok((mut text, mut text_color, mut background)) = indicator.single_mut() {
        *text = Text::from(format!("Current Color: {}", game.color.name()));
        text_color.0 = game.color.contrast_text();
        background.0 = game.color.color();
    }
}

type ReasonQuery<'w, 's> = Query<
    'w,
    's,
    &'static mut Text,
    (With<GameOverReasonText>, Without<FinalScoreText>, Without<FinalLengthText>),
>;
type FinalScoreQuery<'w, 's> = Query<
    'w,
    's,
    &'static mut Text,
    (With<FinalScoreText>, Without<GameOverReasonText>, Without<FinalLengthText>),
>;
type FinalLengthQuery<'w, 's> = Query<
    'w,
    's,
    &'static mut Text,
    (With<FinalLengthText>, Without<GameOverReasonText>, Without<FinalScoreText>),
>;

/// System to write the cause, final score and length when a game ends.
fn fill_game_over_panel(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut reason: ReasonQuery,
    mut final_score: FinalScoreQuery,
    mut final_length: FinalLengthQuery,
) {
    for event in game_over_reader.read() {
        if let Ok(mut text) = reason.single_mut() {
            *text = Text::from(event.cause.describe());
        }
        if let Ok(mut text) = final_score.single_mut() {
            *text = Text::from(format!("Final Score: {}", event.score));
        }
        if let Ok(mut text) = final_length.single_mut() {
            *text = Text::from(format!("Final Length: {}", event.length));
        }
    }
}

/// System to show the game over panel only while the game is over.
fn toggle_game_over_panel(
    game: Res<GameState>,
    mut panel: Query<&mut Visibility, With<GameOverUI>>,
) {
    let wanted = if game.phase() == GamePhase::GameOver {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in panel.iter_mut() {
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
