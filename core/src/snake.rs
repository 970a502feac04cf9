use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::random::GameRng;
use crate::*;

pub const GRID_SIZE: Coord2 = (20, 20);
pub const START_HEAD: Coord2 = (10, 10);
pub const START_FOOD: Coord2 = (5, 5);
pub const START_DIRECTION: Direction = Direction::Right;

/// Tick interval of a fresh game.
pub const BASE_SPEED_MS: u32 = 100;

/// Every meal shortens the tick interval by this much...
pub const SPEED_STEP_MS: u32 = 2;

/// ...until it reaches this floor.
pub const MIN_SPEED_MS: u32 = 50;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCell {
    #[default]
    Empty,
    Snake,
    Head,
    Food,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeEvent {
    Tick(Epoch),
    Steer(Direction),
    TogglePause,
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeOutcome {
    NoChange,
    Moved,
    Ate,
    Crashed,
    Steered,
    Paused,
    Resumed,
    Reset,
}

impl SnakeOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug)]
pub struct SnakeGame {
    rng: GameRng,
    body: VecDeque<Coord2>,
    food: Coord2,
    /// Direction used by the last completed tick.
    direction: Direction,
    /// Latest accepted steer, applied by the next tick.
    queued: Option<Direction>,
    score: u32,
    speed_ms: u32,
    paused: bool,
    game_over: bool,
    epoch: Epoch,
}

impl SnakeGame {
    pub fn new(seed: u64) -> Self {
        Self::with_layout(seed, START_HEAD, &[], START_DIRECTION, START_FOOD)
    }

    /// A running game with the given snake, head first, and food.
    pub fn with_layout(
        seed: u64,
        head: Coord2,
        tail: &[Coord2],
        direction: Direction,
        food: Coord2,
    ) -> Self {
        let mut body = VecDeque::with_capacity(tail.len() + 1);
        body.push_back(head);
        body.extend(tail.iter().copied());

        Self {
            rng: GameRng::new(seed),
            body,
            food,
            direction,
            queued: None,
            score: 0,
            speed_ms: BASE_SPEED_MS,
            paused: false,
            game_over: false,
            epoch: Epoch::default(),
        }
    }

    pub fn body(&self) -> &VecDeque<Coord2> {
        &self.body
    }

    pub fn head(&self) -> Coord2 {
        self.body[0]
    }

    pub fn food(&self) -> Coord2 {
        self.food
    }

    /// The heading the next tick will use.
    pub fn direction(&self) -> Direction {
        self.queued.unwrap_or(self.direction)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_running(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Queues a new heading unless it would turn the snake straight back into itself.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.game_over || direction == self.direction.reverse() {
            return false;
        }
        self.queued = Some(direction);
        true
    }

    pub fn toggle_pause(&mut self) -> SnakeOutcome {
        if self.game_over {
            return SnakeOutcome::NoChange;
        }
        self.paused = !self.paused;
        log::debug!("snake: paused = {}", self.paused);
        if self.paused {
            SnakeOutcome::Paused
        } else {
            SnakeOutcome::Resumed
        }
    }

    /// Advances one tick if `epoch` still belongs to this game.
    pub fn tick_at(&mut self, epoch: Epoch) -> SnakeOutcome {
        if !epoch.is_current(self.epoch) {
            log::debug!("snake: discarding stale tick from {:?}", epoch);
            return SnakeOutcome::NoChange;
        }
        self.tick()
    }

    pub fn tick(&mut self) -> SnakeOutcome {
        if !self.is_running() {
            return SnakeOutcome::NoChange;
        }

        if let Some(direction) = self.queued.take() {
            self.direction = direction;
        }

        let Some(next) = apply_delta(self.head(), self.direction.delta(), GRID_SIZE)
            .filter(|pos| !self.body.contains(pos))
        else {
            self.game_over = true;
            log::debug!("snake: crashed with score {}", self.score);
            return SnakeOutcome::Crashed;
        };

        self.body.push_front(next);
        log::trace!("snake: head at {:?}", next);

        if next != self.food {
            self.body.pop_back();
            return SnakeOutcome::Moved;
        }

        self.score += 1;
        if self.speed_ms > MIN_SPEED_MS {
            self.speed_ms = self.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS);
        }

        match self.spawn_food() {
            Some(food) => self.food = food,
            None => {
                log::warn!("snake: no free cell left for food, ending game");
                self.game_over = true;
            }
        }
        SnakeOutcome::Ate
    }

    /// Back to the starting snake with fresh food, invalidating ticks scheduled for the old game.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(START_HEAD);
        self.direction = START_DIRECTION;
        self.queued = None;
        self.score = 0;
        self.speed_ms = BASE_SPEED_MS;
        self.paused = false;
        self.game_over = false;
        self.food = self.spawn_food().unwrap_or(START_FOOD);
        self.epoch.advance();
        log::debug!("snake: reset, epoch {:?}", self.epoch);
    }

    fn occupancy(&self) -> Array2<bool> {
        let mut occupied = Array2::from_elem(GRID_SIZE.to_nd_index(), false);
        for &pos in &self.body {
            occupied[pos.to_nd_index()] = true;
        }
        occupied
    }

    /// Snapshot of the board for rendering, indexed by `[x, y]`.
    pub fn grid(&self) -> Array2<GridCell> {
        let mut grid: Array2<GridCell> = Array2::default(GRID_SIZE.to_nd_index());
        grid[self.food.to_nd_index()] = GridCell::Food;
        for &pos in self.body.iter().skip(1) {
            grid[pos.to_nd_index()] = GridCell::Snake;
        }
        grid[self.head().to_nd_index()] = GridCell::Head;
        grid
    }

    /// Picks uniformly among the cells the snake does not cover.
    fn spawn_food(&mut self) -> Option<Coord2> {
        let occupied = self.occupancy();
        let free = occupied.len().checked_sub(self.body.len())?;
        if free == 0 {
            return None;
        }

        let place = self.rng.below(free);
        occupied
            .indexed_iter()
            .filter(|&(_, &taken)| !taken)
            .nth(place)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl StateMachine for SnakeGame {
    type Event = SnakeEvent;
    type Outcome = SnakeOutcome;

    fn apply(&mut self, event: SnakeEvent) -> SnakeOutcome {
        match event {
            SnakeEvent::Tick(epoch) => self.tick_at(epoch),
            SnakeEvent::Steer(direction) if self.steer(direction) => SnakeOutcome::Steered,
            SnakeEvent::Steer(_) => SnakeOutcome::NoChange,
            SnakeEvent::TogglePause => self.toggle_pause(),
            SnakeEvent::Reset => {
                self.reset();
                SnakeOutcome::Reset
            }
        }
    }
}
