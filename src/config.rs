//! Tuning constants and runtime configuration for both simulations.
//!
//! The associated constants mirror the reference feel of the games; the
//! `*Config` structs are what the compute functions actually read, so the
//! CLI (or a test) can override individual values.

use std::time::Duration;

// ── Fighting simulation ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FightParams;

impl FightParams {
    // Arena (world units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;
    pub const GROUND_Y: f32 = 350.0;

    // Fighter body box
    pub const FIGHTER_WIDTH: f32 = 60.0;
    pub const FIGHTER_HEIGHT: f32 = 110.0;

    // Movement (per tick)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_FORCE: f32 = -16.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const AI_SPEED_FACTOR: f32 = 0.75;

    // Combat
    pub const ATTACK_RANGE: f32 = 85.0;
    pub const ATTACK_BOX_OFFSET_Y: f32 = 20.0;
    pub const ATTACK_BOX_HEIGHT: f32 = 40.0;
    pub const ENGAGE_MARGIN: f32 = 15.0;
    pub const ATTACK_COOLDOWN_MS: u64 = 350;
    pub const ATTACK_WINDOW_MS: u64 = 250;
    pub const AI_ATTACK_INTERVAL_MS: u64 = 600;
    pub const AI_BLOCK_CHANCE: f64 = 0.55;
    pub const AI_KICK_CHANCE: f64 = 0.4;
    pub const MAX_HEALTH: f32 = 100.0;

    // Damage per landed hit
    pub const PLAYER_PUNCH_DAMAGE: f32 = 0.8;
    pub const PLAYER_KICK_DAMAGE: f32 = 1.2;
    pub const CPU_PUNCH_DAMAGE: f32 = 0.7;
    pub const CPU_KICK_DAMAGE: f32 = 1.0;

    // Particles
    pub const PARTICLES_PER_IMPACT: usize = 12;
    pub const PARTICLE_SPEED: f32 = 5.0;
    pub const PARTICLE_DECAY: f32 = 0.02;

    // Spawn points
    pub const PLAYER_START_X: f32 = 100.0;
    pub const CPU_START_X: f32 = 640.0;

    /// Cosmetic animation advance per tick.
    pub const ANIMATION_STEP: f32 = 0.15;
}

/// Fighting-simulation configuration.
#[derive(Debug, Clone)]
pub struct FightConfig {
    pub arena_width: f32,
    pub ground_y: f32,
    pub fighter_width: f32,
    pub fighter_height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u64,
    pub attack_window_ms: u64,
    pub ai_attack_interval_ms: u64,
    pub ai_block_chance: f64,
    pub ai_kick_chance: f64,
    /// Frame period of the fight loop (stands in for the display refresh).
    pub frame: Duration,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            arena_width: FightParams::ARENA_WIDTH,
            ground_y: FightParams::GROUND_Y,
            fighter_width: FightParams::FIGHTER_WIDTH,
            fighter_height: FightParams::FIGHTER_HEIGHT,
            gravity: FightParams::GRAVITY,
            jump_force: FightParams::JUMP_FORCE,
            move_speed: FightParams::MOVE_SPEED,
            attack_range: FightParams::ATTACK_RANGE,
            attack_cooldown_ms: FightParams::ATTACK_COOLDOWN_MS,
            attack_window_ms: FightParams::ATTACK_WINDOW_MS,
            ai_attack_interval_ms: FightParams::AI_ATTACK_INTERVAL_MS,
            ai_block_chance: FightParams::AI_BLOCK_CHANCE,
            ai_kick_chance: FightParams::AI_KICK_CHANCE,
            frame: Duration::from_millis(16),
        }
    }
}

impl FightConfig {
    /// Y coordinate of a fighter standing on the ground.
    pub fn standing_y(&self) -> f32 {
        self.ground_y - self.fighter_height
    }

    /// Clamp a fighter's X to the arena.
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(0.0, self.arena_width - self.fighter_width)
    }

    /// Distance at which the AI stops approaching.
    pub fn engage_distance(&self) -> f32 {
        self.attack_range + FightParams::ENGAGE_MARGIN
    }
}

// ── Grid simulation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SnakeParams;

impl SnakeParams {
    pub const GRID_SIZE: i32 = 20;
    pub const TICK_MS: u64 = 150;
    pub const SCORE_PER_FOOD: u32 = 10;
    pub const START_CELL: (i32, i32) = (10, 10);
    pub const FIRST_FOOD: (i32, i32) = (5, 5);
}

/// Grid-simulation configuration.
#[derive(Debug, Clone)]
pub struct SnakeConfig {
    pub grid_size: i32,
    pub tick: Duration,
    pub score_per_food: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: SnakeParams::GRID_SIZE,
            tick: Duration::from_millis(SnakeParams::TICK_MS),
            score_per_food: SnakeParams::SCORE_PER_FOOD,
        }
    }
}

impl SnakeConfig {
    pub fn new(grid_size: i32, tick: Duration) -> Self {
        Self {
            grid_size,
            tick,
            ..Self::default()
        }
    }

    /// Starting cell, kept inside grids smaller than the default.
    pub fn start_cell(&self) -> (i32, i32) {
        let (x, y) = SnakeParams::START_CELL;
        (x.rem_euclid(self.grid_size), y.rem_euclid(self.grid_size))
    }

    pub fn first_food_cell(&self) -> (i32, i32) {
        let (x, y) = SnakeParams::FIRST_FOOD;
        (x.rem_euclid(self.grid_size), y.rem_euclid(self.grid_size))
    }
}
