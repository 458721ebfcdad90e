//! Pure grid-simulation logic.
//!
//! Every public function takes an immutable reference to the current
//! `SnakeState` (and, where needed, an RNG handle) and returns a brand-new
//! `SnakeState`.  Side effects are limited to the injected RNG.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info};

use crate::config::SnakeConfig;
use crate::snake::entities::{Cell, Direction, Food, Fruit, SnakePhase, SnakeState};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Wrap a cell onto the torus, each axis independently.
pub fn wrap(cell: Cell, grid_size: i32) -> Cell {
    Cell {
        x: cell.x.rem_euclid(grid_size),
        y: cell.y.rem_euclid(grid_size),
    }
}

pub fn next_head(head: Cell, direction: Direction, grid_size: i32) -> Cell {
    let (dx, dy) = direction.delta();
    wrap(Cell::new(head.x + dx, head.y + dy), grid_size)
}

// ── Food ──────────────────────────────────────────────────────────────────────

/// Pick a uniformly random free cell by rejection sampling, plus a random
/// fruit.  `None` when the snake already covers the whole grid.
pub fn generate_food(body: &VecDeque<Cell>, grid_size: i32, rng: &mut impl Rng) -> Option<Food> {
    let cells = (grid_size * grid_size) as usize;
    if body.len() >= cells {
        return None;
    }
    let cell = loop {
        let candidate = Cell::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !body.contains(&candidate) {
            break candidate;
        }
    };
    let fruit = Fruit::ALL[rng.gen_range(0..Fruit::ALL.len())];
    Some(Food { cell, fruit })
}

// ── Constructors & lifecycle ──────────────────────────────────────────────────

/// Fresh board waiting for the start action.
pub fn init_state(config: &SnakeConfig) -> SnakeState {
    SnakeState {
        body: VecDeque::from([Cell::from(config.start_cell())]),
        food: Food {
            cell: Cell::from(config.first_food_cell()),
            fruit: Fruit::ALL[0],
        },
        direction: Direction::Right,
        pending: None,
        score: 0,
        phase: SnakePhase::NotStarted,
        grid_size: config.grid_size,
        ticks: 0,
    }
}

/// Full reset into a running game with a freshly spawned food.
pub fn restart(config: &SnakeConfig, rng: &mut impl Rng) -> SnakeState {
    let fresh = init_state(config);
    let food = generate_food(&fresh.body, fresh.grid_size, rng).unwrap_or(fresh.food);
    SnakeState {
        food,
        phase: SnakePhase::Running,
        ..fresh
    }
}

/// `NotStarted → Running`.  Any other phase is returned unchanged.
pub fn start(state: &SnakeState, config: &SnakeConfig, rng: &mut impl Rng) -> SnakeState {
    if state.phase != SnakePhase::NotStarted {
        return state.clone();
    }
    restart(config, rng)
}

/// `Running ⇄ Paused`.  No effect before the start or after game over.
pub fn toggle_pause(state: &SnakeState) -> SnakeState {
    let phase = match state.phase {
        SnakePhase::Running => SnakePhase::Paused,
        SnakePhase::Paused => SnakePhase::Running,
        other => other,
    };
    SnakeState {
        phase,
        ..state.clone()
    }
}

/// Buffer a turn for the next tick.  Turns that reverse the current
/// heading are dropped, as are turns outside a running or paused game.
/// A later accepted turn replaces an earlier one.
pub fn queue_direction(state: &SnakeState, direction: Direction) -> SnakeState {
    let live = matches!(state.phase, SnakePhase::Running | SnakePhase::Paused);
    if !live || direction.is_opposite(state.direction) {
        return state.clone();
    }
    SnakeState {
        pending: Some(direction),
        ..state.clone()
    }
}

// ── Per-tick step ─────────────────────────────────────────────────────────────

/// Advance the snake by one cell.  Only a running game moves.
pub fn tick(state: &SnakeState, config: &SnakeConfig, rng: &mut impl Rng) -> SnakeState {
    if state.phase != SnakePhase::Running {
        return state.clone();
    }

    let direction = state.next_direction();
    let head = next_head(state.head(), direction, state.grid_size);

    // Checked against the pre-move body, tail included.
    if state.occupies(head) {
        info!(score = state.score, length = state.body.len(), "snake bit itself");
        return SnakeState {
            direction,
            pending: None,
            phase: SnakePhase::GameOver,
            ..state.clone()
        };
    }

    let mut body = state.body.clone();
    body.push_front(head);

    let mut food = state.food;
    let mut score = state.score;
    let mut phase = SnakePhase::Running;

    if head == state.food.cell {
        score += config.score_per_food;
        debug!(score, length = body.len(), "food eaten");
        match generate_food(&body, state.grid_size, rng) {
            Some(next) => food = next,
            None => {
                info!(score, "board filled");
                phase = SnakePhase::GameOver;
            }
        }
    } else {
        body.pop_back();
    }

    SnakeState {
        body,
        food,
        direction,
        pending: None,
        score,
        phase,
        ticks: state.ticks + 1,
        ..state.clone()
    }
}
