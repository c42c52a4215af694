use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use super::action::Direction;

/// A cell on the game grid, in whole grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        self.moved_by(dx, dz)
    }
}

/// Square board centred on the origin.
///
/// The nominal span of each axis is `[-size/2, size/2)`. A cell is playable
/// when `|c| <= size/2 - 0.5`, which in integers is `2 * |c| < size`. On an
/// even board this leaves the `-size/2` row and column outside the playable
/// area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Lowest coordinate of the nominal span
    pub fn min(&self) -> i32 {
        -(self.size as i32) / 2
    }

    /// One past the highest coordinate of the nominal span
    pub fn max_exclusive(&self) -> i32 {
        self.min() + self.size as i32
    }

    /// Check if a cell is inside the playable area
    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i32;
        2 * cell.x.abs() < size && 2 * cell.z.abs() < size
    }

    /// Number of playable cells along one axis
    pub fn playable_side(&self) -> usize {
        if self.size % 2 == 0 {
            self.size.saturating_sub(1)
        } else {
            self.size
        }
    }

    pub fn playable_cells(&self) -> usize {
        self.playable_side() * self.playable_side()
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction used on the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting head and direction
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dz) = direction.delta();
        let body = (0..length as i32)
            .map(|i| head.moved_by(-dx * i, -dz * i))
            .collect();

        Self { body, direction }
    }

    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if a cell collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().contains(&cell)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Advance one cell in the current direction.
    ///
    /// Each segment takes the old cell of the one in front of it and the head
    /// steps forward, so the old tail cell is vacated.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.pop();
        self.body.insert(0, new_head);
    }

    /// Append a segment on top of the current tail
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Boundary,
    /// Snake hit itself
    SelfCollision,
}

/// Coarse lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready",
            SessionState::Running => "Running",
            SessionState::Paused => "Paused",
            SessionState::GameOver => "Game Over",
        }
    }
}

/// Complete game state
///
/// Commands that never need randomness live here. Ticking and resetting go
/// through [`GameEngine`](super::GameEngine), which owns the food RNG.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) snake: Snake,
    pub(crate) food: Cell,
    pub(crate) board: Board,
    pub(crate) input_queue: VecDeque<Direction>,
    pub(crate) session: SessionState,
    pub(crate) score: u32,
    pub(crate) foods_eaten: u32,
    pub(crate) ticks: u32,
    pub(crate) tick_interval: Duration,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(snake: Snake, food: Cell, board: Board, tick_interval: Duration) -> Self {
        Self {
            snake,
            food,
            board,
            input_queue: VecDeque::new(),
            session: SessionState::Idle,
            score: 0,
            foods_eaten: 0,
            ticks: 0,
            tick_interval,
        }
    }

    /// Queue a turn for a later tick.
    ///
    /// Rejected when it reverses the last queued direction (or the current
    /// one if nothing is queued), and outside of a running or paused game.
    /// Returns whether the direction was queued.
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.session, SessionState::Running | SessionState::Paused) {
            return false;
        }

        let last = self
            .input_queue
            .back()
            .copied()
            .unwrap_or(self.snake.direction);
        if last.is_opposite(direction) {
            return false;
        }

        self.input_queue.push_back(direction);
        true
    }

    pub(crate) fn next_direction(&mut self) -> Option<Direction> {
        self.input_queue.pop_front()
    }

    /// Idle -> Running. Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        self.transition(SessionState::Idle, SessionState::Running)
    }

    /// Running -> Paused. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        self.transition(SessionState::Running, SessionState::Paused)
    }

    /// Paused -> Running. Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        self.transition(SessionState::Paused, SessionState::Running)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    fn transition(&mut self, from: SessionState, to: SessionState) -> bool {
        if self.session != from {
            return false;
        }
        log::info!("Session {:?} -> {:?}", from, to);
        self.session = to;
        true
    }

    pub fn snake_segments(&self) -> &[Cell] {
        &self.snake.body
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn food_position(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }

    pub fn session_state(&self) -> SessionState {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session == SessionState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.session == SessionState::GameOver
    }

    /// Direction applied on the most recent tick
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_directions(&self) -> usize {
        self.input_queue.len()
    }

    /// Current delay between ticks; the host reschedules with this
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}
