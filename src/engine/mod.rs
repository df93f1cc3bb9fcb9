//! The game-state engine: everything that decides where the snake is, what
//! it eats, and when it dies.  Nothing in here touches the terminal; the
//! front end drives it through [`GameEngine::tick`] and friends and reads
//! the results out of a [`Snapshot`].
mod collision;
mod direction;
mod food;
mod grid;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::Food;
pub(crate) use self::grid::{Cell, Grid};
use self::snake::Snake;
use crate::config::GameConfig;
use crate::consts;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug)]
pub(crate) struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Food>,
    score: u32,
    lives_lost: u32,
    status: GameStatus,
    frames: u64,
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: GameConfig) -> Self {
        GameEngine::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub(crate) fn new_with_rng(config: GameConfig, mut rng: R) -> GameEngine<R> {
        let grid = config.grid();
        let snake = Snake::new(
            grid,
            grid.center(),
            consts::INITIAL_DIRECTION,
            config.initial_length,
        );
        let food = food::spawn(&mut rng, grid, &snake.occupied(), 0, config.bonus_interval);
        GameEngine {
            config,
            grid,
            snake,
            food,
            score: 0,
            lives_lost: 0,
            status: GameStatus::Stopped,
            frames: 0,
            rng,
        }
    }

    /// Enter `Running` from any idle state.  Calling this while already
    /// running is harmless.
    pub(crate) fn start(&mut self) {
        self.status = GameStatus::Running;
    }

    /// Leave `Running` for `Paused`, keeping all state for a later
    /// [`GameEngine::start`].  Safe to call at any time; only a running
    /// game changes state.
    pub(crate) fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
        }
    }

    /// Buffer a turn for the next acting tick.  Ignored unless the game is
    /// running; a turn straight back into the neck is ignored too.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.set_pending(direction);
        }
    }

    /// Advance one frame.  Only every `frame_divider`-th frame moves the
    /// snake; the others report [`TickOutcome::Idle`].  Calling this while
    /// the game is not running is a caller bug and is rejected rather than
    /// silently ignored.
    pub(crate) fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.status != GameStatus::Running {
            return Err(EngineError::NotRunning(self.status));
        }
        let frame = self.frames;
        self.frames = self.frames.wrapping_add(1);
        if frame % u64::from(self.config.frame_divider) != 0 {
            return Ok(TickOutcome::Idle);
        }
        self.snake.commit_pending();
        let next_head = self.grid.wrap(self.snake.propose_next_head());
        let occupied = self.snake.occupied();
        if !collision::legal_move(
            next_head,
            &occupied,
            self.snake.tail(),
            self.snake.len(),
            self.config.min_safe_length,
        ) {
            self.lives_lost += 1;
            self.reset_board();
            self.status = GameStatus::GameOver;
            return Ok(TickOutcome::Died);
        }
        let ate = self.food.is_some_and(|food| food.cell == next_head);
        self.snake.advance(next_head, ate);
        if ate {
            self.score += 1;
            self.food = food::spawn(
                &mut self.rng,
                self.grid,
                &self.snake.occupied(),
                self.score,
                self.config.bonus_interval,
            );
            Ok(TickOutcome::Ate)
        } else {
            Ok(TickOutcome::Moved)
        }
    }

    /// Replace the snake and food wholesale after a life is lost.  Score
    /// goes back to zero; the lives-lost counter is the one thing that
    /// survives.
    fn reset_board(&mut self) {
        self.score = 0;
        self.snake = Snake::new(
            self.grid,
            self.grid.center(),
            consts::INITIAL_DIRECTION,
            self.config.initial_length,
        );
        self.food = food::spawn(
            &mut self.rng,
            self.grid,
            &self.snake.occupied(),
            0,
            self.config.bonus_interval,
        );
    }
}

impl<R> GameEngine<R> {
    pub(crate) fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn config(&self) -> GameConfig {
        self.config
    }

    /// A read-only view of everything the renderer needs
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            segments: self.snake.segments(),
            direction: self.snake.direction(),
            food: self.food,
            score: self.score,
            lives_lost: self.lives_lost,
            status: self.status,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_food(&mut self, food: Option<Food>) {
        self.food = food;
    }
}

/// Where the engine's state machine currently sits
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    /// Created but never started
    Stopped,
    Running,
    Paused,
    /// A life was just lost; the board is already fresh and waits for
    /// `start()`
    GameOver,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Stopped => "stopped",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "over",
        };
        f.pad(name)
    }
}

/// What a single call to [`GameEngine::tick`] did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// A frame the divider skipped
    Idle,
    Moved,
    /// Moved onto the food cell and grew
    Ate,
    /// Moved into the body; a life was lost and the board was reset
    Died,
}

/// What the renderer reads each frame.  Holding one borrows the engine, so
/// no mutation can sneak in while a frame is being drawn.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Snapshot<'a> {
    pub(crate) segments: &'a VecDeque<Cell>,
    pub(crate) direction: Direction,
    pub(crate) food: Option<Food>,
    pub(crate) score: u32,
    pub(crate) lives_lost: u32,
    pub(crate) status: GameStatus,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub(crate) enum EngineError {
    #[error("tick() called while the game was {0}")]
    NotRunning(GameStatus),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn small_config() -> GameConfig {
        GameConfig {
            columns: 5,
            rows: 5,
            initial_length: 3,
            frame_divider: 1,
            bonus_interval: 5,
            min_safe_length: 2,
        }
    }

    fn engine(config: GameConfig) -> GameEngine<ChaCha12Rng> {
        GameEngine::new_with_rng(config, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn head(game: &GameEngine<ChaCha12Rng>) -> Cell {
        *game.snapshot().segments.front().expect("snake has a head")
    }

    #[test]
    fn new_engine_is_stopped_and_centered() {
        let game = engine(small_config());
        let snap = game.snapshot();
        assert_eq!(snap.status, GameStatus::Stopped);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.lives_lost, 0);
        assert_eq!(snap.direction, Direction::Up);
        assert_eq!(
            snap.segments.iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(2, 2), Cell::new(3, 2), Cell::new(4, 2)]
        );
        let food = snap.food.expect("a fresh board has food");
        assert!(!food.bonus);
        assert!(!snap.segments.contains(&food.cell));
    }

    #[test]
    fn tick_while_stopped_is_rejected() {
        let mut game = engine(small_config());
        let before = game.snapshot().segments.clone();
        assert_eq!(
            game.tick(),
            Err(EngineError::NotRunning(GameStatus::Stopped))
        );
        assert_eq!(*game.snapshot().segments, before);
    }

    #[test]
    fn tick_while_paused_changes_nothing() {
        let mut game = engine(small_config());
        game.start();
        game.tick().expect("game is running");
        game.pause();
        let before = game.snapshot().segments.clone();
        assert_eq!(game.tick(), Err(EngineError::NotRunning(GameStatus::Paused)));
        assert_eq!(game.snapshot().status, GameStatus::Paused);
        assert_eq!(*game.snapshot().segments, before);
        game.start();
        game.tick().expect("game resumed");
        assert_ne!(*game.snapshot().segments, before);
    }

    #[test]
    fn pause_outside_running_is_a_safe_no_op() {
        let mut game = engine(small_config());
        game.pause();
        assert_eq!(game.snapshot().status, GameStatus::Stopped);
    }

    #[test]
    fn head_trace_wraps_exactly_once_on_a_5x5_grid() {
        let mut game = engine(small_config());
        game.force_food(None);
        game.start();
        let mut trace = Vec::new();
        for _ in 0..4 {
            assert_eq!(game.tick(), Ok(TickOutcome::Moved));
            trace.push(head(&game));
        }
        assert_eq!(
            trace,
            vec![
                Cell::new(1, 2),
                Cell::new(0, 2),
                Cell::new(4, 2),
                Cell::new(3, 2)
            ]
        );
    }

    #[test]
    fn frame_divider_gates_movement() {
        let mut game = engine(GameConfig {
            frame_divider: 3,
            ..small_config()
        });
        game.force_food(None);
        game.start();
        let outcomes = (0..7)
            .map(|_| game.tick().expect("game is running"))
            .collect::<Vec<_>>();
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Moved,
                TickOutcome::Idle,
                TickOutcome::Idle,
                TickOutcome::Moved,
                TickOutcome::Idle,
                TickOutcome::Idle,
                TickOutcome::Moved,
            ]
        );
    }

    #[test]
    fn reversal_input_does_not_turn_the_snake() {
        let mut game = engine(small_config());
        game.force_food(None);
        game.start();
        game.set_direction(Direction::Down);
        game.tick().expect("game is running");
        assert_eq!(game.snapshot().direction, Direction::Up);
        assert_eq!(head(&game), Cell::new(1, 2));
    }

    #[test]
    fn direction_input_is_ignored_while_stopped() {
        let mut game = engine(small_config());
        game.force_food(None);
        game.set_direction(Direction::Left);
        game.start();
        game.tick().expect("game is running");
        assert_eq!(game.snapshot().direction, Direction::Up);
    }

    #[test]
    fn turns_are_committed_at_the_tick_boundary() {
        let mut game = engine(small_config());
        game.force_food(None);
        game.start();
        game.set_direction(Direction::Left);
        assert_eq!(game.snapshot().direction, Direction::Up);
        game.tick().expect("game is running");
        assert_eq!(game.snapshot().direction, Direction::Left);
        assert_eq!(head(&game), Cell::new(2, 1));
    }

    #[test]
    fn eating_grows_and_rescores() {
        let mut game = engine(small_config());
        game.start();
        game.force_food(Some(Food {
            cell: Cell::new(1, 2),
            bonus: false,
        }));
        assert_eq!(game.tick(), Ok(TickOutcome::Ate));
        let snap = game.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.segments.len(), 4);
        let food = snap.food.expect("food was respawned");
        assert!(!snap.segments.contains(&food.cell));
    }

    #[test]
    fn fifth_point_spawns_bonus_food_and_sixth_does_not() {
        let mut game = engine(GameConfig {
            columns: 12,
            rows: 12,
            ..small_config()
        });
        game.start();
        for expected_score in 1..=6 {
            let target = game.grid().wrap(Cell::new(
                head(&game).row - 1,
                head(&game).col,
            ));
            game.force_food(Some(Food {
                cell: target,
                bonus: false,
            }));
            assert_eq!(game.tick(), Ok(TickOutcome::Ate));
            assert_eq!(game.snapshot().score, expected_score);
            let spawned = game.snapshot().food.expect("food was respawned");
            assert_eq!(spawned.bonus, expected_score == 5, "score {expected_score}");
        }
    }

    #[test]
    fn driving_into_the_body_costs_a_life_and_resets_the_board() {
        let mut game = engine(GameConfig {
            columns: 7,
            rows: 7,
            initial_length: 5,
            ..small_config()
        });
        game.force_food(None);
        game.start();
        game.tick().expect("game is running");
        game.set_direction(Direction::Left);
        game.tick().expect("game is running");
        game.set_direction(Direction::Down);
        game.tick().expect("game is running");
        game.set_direction(Direction::Right);
        assert_eq!(game.tick(), Ok(TickOutcome::Died));
        let snap = game.snapshot();
        assert_eq!(snap.status, GameStatus::GameOver);
        assert_eq!(snap.lives_lost, 1);
        assert_eq!(snap.score, 0);
        assert_eq!(
            snap.segments.iter().copied().collect::<Vec<_>>(),
            vec![
                Cell::new(3, 3),
                Cell::new(4, 3),
                Cell::new(5, 3),
                Cell::new(6, 3),
                Cell::new(0, 3)
            ]
        );
        assert_eq!(
            game.tick(),
            Err(EngineError::NotRunning(GameStatus::GameOver))
        );
        game.start();
        assert_eq!(game.snapshot().status, GameStatus::Running);
    }

    #[test]
    fn tail_chasing_at_full_loop_is_legal() {
        // A length-4 snake turning in a 2x2 loop forever: every move enters
        // the cell its tail is about to vacate.
        let mut game = engine(GameConfig {
            columns: 8,
            rows: 8,
            initial_length: 4,
            ..small_config()
        });
        game.force_food(None);
        game.start();
        game.tick().expect("game is running");
        game.set_direction(Direction::Left);
        game.tick().expect("game is running");
        game.set_direction(Direction::Down);
        game.tick().expect("game is running");
        game.set_direction(Direction::Right);
        for _ in 0..8 {
            let outcome = game.tick().expect("game is running");
            assert_eq!(outcome, TickOutcome::Moved);
            match game.snapshot().direction {
                Direction::Right => game.set_direction(Direction::Up),
                Direction::Up => game.set_direction(Direction::Left),
                Direction::Left => game.set_direction(Direction::Down),
                Direction::Down => game.set_direction(Direction::Right),
            }
        }
    }
}
