//! Grid-simulation entity types: pure data, no logic.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit step in grid coordinates (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

// ── Food ──────────────────────────────────────────────────────────────────────

/// Decorative icon shown on the food cell.  Has no effect on play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fruit {
    Apple,
    Banana,
    Grapes,
    Pineapple,
    Kiwi,
    Strawberry,
    Mango,
    Watermelon,
}

impl Fruit {
    pub const ALL: [Fruit; 8] = [
        Fruit::Apple,
        Fruit::Banana,
        Fruit::Grapes,
        Fruit::Pineapple,
        Fruit::Kiwi,
        Fruit::Strawberry,
        Fruit::Mango,
        Fruit::Watermelon,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Fruit::Apple => "🍎",
            Fruit::Banana => "🍌",
            Fruit::Grapes => "🍇",
            Fruit::Pineapple => "🍍",
            Fruit::Kiwi => "🥝",
            Fruit::Strawberry => "🍓",
            Fruit::Mango => "🥭",
            Fruit::Watermelon => "🍉",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub fruit: Fruit,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakePhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// The entire snake game.  Cloneable so pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct SnakeState {
    /// Head first.  Never empty.
    pub body: VecDeque<Cell>,
    pub food: Food,
    /// Heading used by the last move.
    pub direction: Direction,
    /// Latest accepted turn, applied at the start of the next tick.
    pub pending: Option<Direction>,
    pub score: u32,
    pub phase: SnakePhase,
    pub grid_size: i32,
    pub ticks: u64,
}

impl SnakeState {
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The heading the next tick will use.
    pub fn next_direction(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }
}
