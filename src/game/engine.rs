use super::{
    action::Action,
    config::GameConfig,
    state::{Board, Cell, CollisionType, GameState, SessionState, Snake},
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Random draws before food placement falls back to scanning the board
const MAX_FOOD_ATTEMPTS: usize = 256;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved and nothing else happened
    Continue,
    /// The snake moved onto the food and grew
    AteFood,
    /// The snake hit a wall or itself; the game is over
    Collided(CollisionType),
}

/// The game engine that handles all game rules
///
/// The engine holds the configuration and the random source used for food
/// placement. It never keeps time itself: the host calls [`GameEngine::tick`]
/// and reschedules using [`GameState::tick_interval`].
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh idle game
    pub fn new_game(&mut self) -> GameState {
        let board = self.config.board();
        let snake = Snake::from_body(self.config.start_body(), self.config.start_direction);

        // Only a config that failed validation can leave no room here
        let food = self.spawn_food(&snake, board).unwrap_or_else(|| {
            warn!("No free cell for the first food, board is too small");
            snake.tail()
        });

        GameState::new(snake, food, board, self.config.initial_tick_interval())
    }

    /// Reset the game to its initial idle state, whatever state it is in
    pub fn reset(&mut self, state: &mut GameState) {
        *state = self.new_game();
        info!("Game reset");
    }

    /// Apply a host command. Returns whether it had any effect.
    pub fn apply(&mut self, state: &mut GameState, action: Action) -> bool {
        match action {
            Action::Turn(direction) => state.enqueue_direction(direction),
            Action::Start => state.start(),
            Action::TogglePause => state.toggle_pause(),
            Action::Reset => {
                self.reset(state);
                true
            }
        }
    }

    /// Advance the game by one cell.
    ///
    /// Returns `None` without touching the state unless the game is running.
    pub fn tick(&mut self, state: &mut GameState) -> Option<TickOutcome> {
        if state.session != SessionState::Running {
            return None;
        }

        // At most one queued turn per tick
        if let Some(direction) = state.next_direction() {
            state.snake.direction = direction;
        }

        state.snake.advance();
        state.ticks += 1;

        let head = state.snake.head();
        if let Some(collision_type) = self.check_collision(state, head) {
            state.session = SessionState::GameOver;
            info!(
                "Game over after {} ticks: {:?} at ({}, {}), score {}",
                state.ticks, collision_type, head.x, head.z, state.score
            );
            return Some(TickOutcome::Collided(collision_type));
        }

        if head != state.food {
            return Some(TickOutcome::Continue);
        }

        state.score += self.config.food_score;
        state.foods_eaten += 1;
        state.snake.grow();

        match self.spawn_food(&state.snake, state.board) {
            Some(food) => state.food = food,
            None => warn!("Board is full, no cell left for food"),
        }

        state.tick_interval = self.config.tick_interval_after(state.foods_eaten);
        debug!(
            "Ate food at ({}, {}), score {}, length {}, next tick in {:?}",
            head.x,
            head.z,
            state.score,
            state.snake.len(),
            state.tick_interval
        );

        Some(TickOutcome::AteFood)
    }

    /// Check if the head position causes a collision
    fn check_collision(&self, state: &GameState, head: Cell) -> Option<CollisionType> {
        if !state.board.contains(head) {
            return Some(CollisionType::Boundary);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random playable cell the snake does not cover.
    ///
    /// Uses rejection sampling, and if that keeps missing on a crowded board,
    /// chooses among the free cells directly. `None` when nothing is free.
    fn spawn_food(&mut self, snake: &Snake, board: Board) -> Option<Cell> {
        let is_free = |cell: Cell| board.contains(cell) && !snake.occupies(cell);

        for _ in 0..MAX_FOOD_ATTEMPTS {
            let x = self.rng.gen_range(board.min()..board.max_exclusive());
            let z = self.rng.gen_range(board.min()..board.max_exclusive());
            let cell = Cell::new(x, z);

            if is_free(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (board.min()..board.max_exclusive())
            .flat_map(|x| (board.min()..board.max_exclusive()).map(move |z| Cell::new(x, z)))
            .filter(|&cell| is_free(cell))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
