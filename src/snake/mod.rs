//! Snake plugin - handles the simulation step, collision detection and the step clock.

use bevy::prelude::*;
use rand::Rng;

use crate::food::spawn_food;
use crate::game::{
    FoodEatenEvent, GameOverCause, GameOverEvent, GamePhase, GameRng, GameSet, GameState,
    Position, SnakeColor, StepClock,
};
use crate::input::read_keyboard;

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StepClock>()
            .add_message::<FoodEatenEvent>()
            .add_message::<GameOverEvent>()
            .configure_sets(Update, (GameSet::Simulate, GameSet::Present).chain())
            .add_systems(
                Update,
                (read_keyboard, advance_game)
                    .chain()
                    .in_set(GameSet::Simulate),
            );
    }
}

/// What a single simulation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not started, paused or already over.
    Idle,
    Moved,
    Ate {
        position: Position,
        color: SnakeColor,
    },
    GameOver(GameOverCause),
}

/// Advances the snake one cell and resolves wall, self and food collisions.
pub fn step(state: &mut GameState, rng: &mut impl Rng) -> StepOutcome {
    if state.phase() != GamePhase::Running {
        return StepOutcome::Idle;
    }

    state.direction = state.next_direction;
    let head = state.head().offset(state.direction);

    if !state.config.in_bounds(head) {
        return end_game(state, GameOverCause::Wall);
    }

    // Checked against the body before the tail moves, so the current tail cell is fatal too.
    if state.occupies(head) {
        return end_game(state, GameOverCause::SelfCollision);
    }

    state.snake.insert(0, head);

    let mut eaten = None;
    for i in (0..state.foods.len()).rev() {
        let food = state.foods[i];
        if !food.position.collides_with(&head) {
            continue;
        }
        if food.color != state.color {
            return end_game(state, GameOverCause::WrongColor(food.color));
        }

        state.foods.remove(i);
        state.award_food();
        state.color = SnakeColor::random(rng);
        spawn_food(state, rng);
        state.speed_up();
        eaten = Some(food);
    }

    match eaten {
        Some(food) => StepOutcome::Ate {
            position: food.position,
            color: food.color,
        },
        None => {
            state.snake.pop();
            StepOutcome::Moved
        }
    }
}

fn end_game(state: &mut GameState, cause: GameOverCause) -> StepOutcome {
    state.running = false;
    StepOutcome::GameOver(cause)
}

/// System to run a simulation step once the current step interval has elapsed.
fn advance_game(
    time: Res<Time>,
    mut clock: ResMut<StepClock>,
    mut game: ResMut<GameState>,
    mut rng: ResMut<GameRng>,
    mut food_eaten_writer: MessageWriter<FoodEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    let now = time.elapsed();
    if !clock.is_due(now, game.step_interval()) {
        return;
    }
    clock.last_step = now;

    match step(&mut game, &mut rng.0) {
        StepOutcome::Ate { position, color } => {
            debug!(
                "Ate {} food at ({}, {}), score {}",
                color.name(),
                position.x,
                position.y,
                game.score
            );
            food_eaten_writer.write(FoodEatenEvent { position, color });
        }
        StepOutcome::GameOver(cause) => {
            info!(
                "Game Over ({:?})! Final score: {}, length: {}",
                cause,
                game.score,
                game.len()
            );
            game_over_writer.write(GameOverEvent {
                cause,
                score: game.score,
                length: game.len(),
            });
        }
        StepOutcome::Moved | StepOutcome::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Food, GameConfig};
    use crate::input::{Key, handle_input};
    use bevy::input::ButtonState;
    use bevy::input::keyboard::{Key as LogicalKey, KeyboardInput};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn new_game(rng: &mut StdRng) -> GameState {
        GameState::new(GameConfig::default(), rng)
    }

    fn food(x: i32, y: i32, color: SnakeColor) -> Food {
        Food {
            position: Position::new(x, y),
            color,
        }
    }

    /// Four foods parked in the far corner plus the ones a test places.
    fn park_foods(state: &mut GameState, extra: &[Food]) {
        state.foods = (0..4).map(|i| food(i, 0, SnakeColor::Orange)).collect();
        state.foods.extend_from_slice(extra);
    }

    #[test]
    fn step_before_start_is_noop() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut state = new_game(&mut rng);
        let before = state.clone();

        assert_eq!(step(&mut state, &mut rng), StepOutcome::Idle);
        assert_eq!(state.snake, vec![Position::new(15, 15)]);
        assert_eq!(state.direction, Direction::NONE);
        assert_eq!(state.foods, before.foods);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn first_move_keeps_length_one() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut state = new_game(&mut rng);
        park_foods(&mut state, &[food(5, 5, SnakeColor::Blue)]);

        handle_input(&mut state, Key::from_name("arrowright").unwrap(), &mut rng);
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Moved);
        assert_eq!(state.direction, Direction::RIGHT);
        assert_eq!(state.snake, vec![Position::new(16, 15)]);
    }

    #[test]
    fn matching_food_grows_and_scores() {
        let mut rng = StdRng::seed_from_u64(33);
        let mut state = new_game(&mut rng);
        park_foods(&mut state, &[food(16, 15, SnakeColor::Red)]);
        state.next_direction = Direction::RIGHT;

        let outcome = step(&mut state, &mut rng);
        assert_eq!(
            outcome,
            StepOutcome::Ate {
                position: Position::new(16, 15),
                color: SnakeColor::Red
            }
        );
        assert_eq!(state.score, 10);
        assert_eq!(
            state.snake,
            vec![Position::new(16, 15), Position::new(15, 15)]
        );
        assert_eq!(state.foods.len(), 5);
        assert_eq!(state.step_interval_ms, 148);
        assert!(state.running);
    }

    #[test]
    fn wrong_color_ends_game() {
        let mut rng = StdRng::seed_from_u64(34);
        let mut state = new_game(&mut rng);
        state.snake = vec![Position::new(15, 15), Position::new(14, 15)];
        state.direction = Direction::RIGHT;
        state.next_direction = Direction::RIGHT;
        state.score = 30;
        park_foods(&mut state, &[food(16, 15, SnakeColor::Green)]);

        assert_eq!(
            step(&mut state, &mut rng),
            StepOutcome::GameOver(GameOverCause::WrongColor(SnakeColor::Green))
        );
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.score, 30);
        // The head was already placed on the food cell when the color was checked.
        assert_eq!(state.len(), 3);
        assert_eq!(state.foods.len(), 5);

        let frozen = state.clone();
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Idle);
        assert_eq!(state.snake, frozen.snake);
        assert_eq!(state.score, frozen.score);
    }

    #[test]
    fn step_only_runs_while_running() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut state = new_game(&mut rng);
        park_foods(&mut state, &[]);

        // Paused before the first move: no direction yet.
        state.paused = true;
        assert_eq!(state.phase(), GamePhase::Paused);
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Idle);

        // Paused mid-game with a pending direction.
        state.direction = Direction::UP;
        state.next_direction = Direction::UP;
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Idle);
        assert_eq!(state.head(), Position::new(15, 15));

        state.paused = false;
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Moved);
        assert_eq!(state.head(), Position::new(15, 14));

        state.running = false;
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Idle);
        assert_eq!(state.head(), Position::new(15, 14));
    }

    #[test]
    fn stacked_match_then_mismatch_scores_then_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = new_game(&mut rng);
        state.snake = vec![Position::new(15, 15), Position::new(14, 15)];
        state.direction = Direction::RIGHT;
        state.next_direction = Direction::RIGHT;

        // The first random draw inside the step picks the new target color.
        let next_color = SnakeColor::random(&mut rng.clone());
        let other = SnakeColor::ALL
            .into_iter()
            .find(|color| *color != next_color)
            .unwrap();
        // Checked last to first: the red food is eaten before the other one.
        state.foods = (0..3).map(|i| food(i, 0, SnakeColor::Orange)).collect();
        state.foods.push(food(16, 15, other));
        state.foods.push(food(16, 15, SnakeColor::Red));

        assert_eq!(
            step(&mut state, &mut rng),
            StepOutcome::GameOver(GameOverCause::WrongColor(other))
        );
        assert_eq!(state.score, 10);
        assert_eq!(state.color, next_color);
        assert_eq!(state.head(), Position::new(16, 15));
        assert_eq!(state.len(), 3);
        assert_eq!(state.foods.len(), 5);
        assert_eq!(state.step_interval_ms, 148);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn stacked_double_match_eats_both() {
        let mut rng = StdRng::seed_from_u64(43);
        let mut state = new_game(&mut rng);
        state.next_direction = Direction::RIGHT;

        let next_color = SnakeColor::random(&mut rng.clone());
        state.foods = (0..3).map(|i| food(i, 0, SnakeColor::Orange)).collect();
        state.foods.push(food(16, 15, next_color));
        state.foods.push(food(16, 15, SnakeColor::Red));

        let outcome = step(&mut state, &mut rng);
        assert_eq!(
            outcome,
            StepOutcome::Ate {
                position: Position::new(16, 15),
                color: next_color
            }
        );
        assert_eq!(state.score, 20);
        assert_eq!(state.len(), 2);
        assert_eq!(state.foods.len(), 5);
        assert_eq!(state.step_interval_ms, 146);
        assert!(state.running);
    }

    #[test]
    fn walls_end_game_without_moving() {
        let mut rng = StdRng::seed_from_u64(35);
        let mut state = new_game(&mut rng);
        state.snake = vec![Position::new(0, 7)];
        state.next_direction = Direction::LEFT;
        park_foods(&mut state, &[]);
        let foods = state.foods.clone();

        assert_eq!(
            step(&mut state, &mut rng),
            StepOutcome::GameOver(GameOverCause::Wall)
        );
        assert_eq!(state.snake, vec![Position::new(0, 7)]);
        assert_eq!(state.foods, foods);
        assert_eq!(state.score, 0);

        let mut state = new_game(&mut rng);
        state.snake = vec![Position::new(29, 7)];
        state.next_direction = Direction::RIGHT;
        assert_eq!(
            step(&mut state, &mut rng),
            StepOutcome::GameOver(GameOverCause::Wall)
        );
    }

    #[test]
    fn moving_into_own_tail_is_fatal() {
        let mut rng = StdRng::seed_from_u64(36);
        let mut state = new_game(&mut rng);
        // A 2x2 loop: the head's next cell is the current tail.
        state.snake = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
        ];
        state.direction = Direction::LEFT;
        state.next_direction = Direction::DOWN;
        park_foods(&mut state, &[]);

        assert_eq!(
            step(&mut state, &mut rng),
            StepOutcome::GameOver(GameOverCause::SelfCollision)
        );
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut rng = StdRng::seed_from_u64(37);
        let mut state = new_game(&mut rng);
        state.snake = vec![Position::new(0, 0)];
        state.next_direction = Direction::UP;
        state.score = 50;
        state.color = SnakeColor::Purple;
        state.step_interval_ms = 90;
        step(&mut state, &mut rng);
        assert!(!state.running);

        handle_input(&mut state, Key::Restart, &mut rng);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake, vec![Position::new(15, 15)]);
        assert_eq!(state.color, SnakeColor::Red);
        assert_eq!(state.foods.len(), 5);
        assert_eq!(state.step_interval_ms, 150);
        assert_eq!(state.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(38);
        let keys = [Key::Up, Key::Down, Key::Left, Key::Right];

        for _ in 0..20 {
            let mut state = new_game(&mut rng);
            for _ in 0..400 {
                if rng.random_bool(0.3) {
                    let key = keys[rng.random_range(0..keys.len())];
                    handle_input(&mut state, key, &mut rng);
                }

                let len_before = state.len();
                let interval_before = state.step_interval_ms;
                let outcome = step(&mut state, &mut rng);

                assert!(state.step_interval_ms <= interval_before);
                assert!(state.step_interval_ms >= 80);
                match outcome {
                    StepOutcome::Ate { .. } => assert_eq!(state.len(), len_before + 1),
                    StepOutcome::Moved | StepOutcome::Idle => {
                        assert_eq!(state.len(), len_before)
                    }
                    StepOutcome::GameOver(_) => break,
                }

                assert!(state.len() >= 1);
                assert_eq!(state.foods.len(), 5);
                for segment in &state.snake {
                    assert!(state.config.in_bounds(*segment));
                }
                for (i, a) in state.snake.iter().enumerate() {
                    assert!(!state.snake[i + 1..].contains(a));
                }
            }
        }
    }

    fn test_app(rng_seed: u64) -> App {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let state = new_game(&mut rng);
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_message::<KeyboardInput>()
            .insert_resource(state)
            .insert_resource(GameRng(rng))
            .add_plugins(SnakePlugin);
        app
    }

    fn press(app: &mut App, key_code: KeyCode, logical_key: LogicalKey) {
        app.world_mut().write_message(KeyboardInput {
            key_code,
            logical_key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn keyboard_system_queues_direction() {
        let mut app = test_app(39);
        press(&mut app, KeyCode::ArrowUp, LogicalKey::ArrowUp);

        app.update();

        let game = app.world().resource::<GameState>();
        assert_eq!(game.next_direction, Direction::UP);
        assert_eq!(game.direction, Direction::NONE);
    }

    #[derive(Resource, Default)]
    struct SeenGameOvers(Vec<(GameOverCause, u32, usize)>);

    fn collect_game_overs(
        mut reader: MessageReader<GameOverEvent>,
        mut seen: ResMut<SeenGameOvers>,
    ) {
        for event in reader.read() {
            seen.0.push((event.cause, event.score, event.length));
        }
    }

    #[test]
    fn game_over_message_carries_final_stats() {
        let mut app = test_app(44);
        app.init_resource::<SeenGameOvers>()
            .add_systems(Update, collect_game_overs.after(GameSet::Simulate));
        {
            let mut game = app.world_mut().resource_mut::<GameState>();
            game.snake = vec![Position::new(15, 15), Position::new(14, 15)];
            game.direction = Direction::RIGHT;
            game.next_direction = Direction::RIGHT;
            game.score = 40;
            park_foods(&mut game, &[food(16, 15, SnakeColor::Purple)]);
        }

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(150));
        app.update();

        assert_eq!(
            app.world().resource::<SeenGameOvers>().0,
            vec![(GameOverCause::WrongColor(SnakeColor::Purple), 40, 3)]
        );
        assert_eq!(
            app.world().resource::<GameState>().phase(),
            GamePhase::GameOver
        );
    }

    #[test]
    fn game_steps_once_interval_elapses() {
        let mut app = test_app(40);
        {
            let mut game = app.world_mut().resource_mut::<GameState>();
            game.foods.clear();
            game.next_direction = Direction::DOWN;
        }

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(100));
        app.update();
        assert_eq!(
            app.world().resource::<GameState>().head(),
            Position::new(15, 15)
        );

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(50));
        app.update();
        assert_eq!(
            app.world().resource::<GameState>().head(),
            Position::new(15, 16)
        );
    }
}
