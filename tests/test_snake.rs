use std::collections::VecDeque;

use neon_arcade::config::SnakeConfig;
use neon_arcade::snake::compute::*;
use neon_arcade::snake::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn body(cells: &[(i32, i32)]) -> VecDeque<Cell> {
    cells.iter().map(|&c| Cell::from(c)).collect()
}

/// A running 20×20 game with an explicit snake and food.
fn running(cells: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> SnakeState {
    SnakeState {
        body: body(cells),
        food: Food {
            cell: Cell::from(food),
            fruit: Fruit::Apple,
        },
        direction,
        pending: None,
        score: 0,
        phase: SnakePhase::Running,
        grid_size: 20,
        ticks: 0,
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn init_state_matches_reference_layout() {
    let s = init_state(&SnakeConfig::default());
    assert_eq!(s.body, body(&[(10, 10)]));
    assert_eq!(s.food.cell, Cell::new(5, 5));
    assert_eq!(s.food.fruit, Fruit::Apple);
    assert_eq!(s.direction, Direction::Right);
    assert_eq!(s.phase, SnakePhase::NotStarted);
    assert_eq!(s.score, 0);
}

#[test]
fn nothing_moves_before_start() {
    let config = SnakeConfig::default();
    let s = init_state(&config);
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.body, s.body);
    assert_eq!(s2.ticks, 0);
}

#[test]
fn start_runs_with_fresh_food() {
    let config = SnakeConfig::default();
    let s = start(&init_state(&config), &config, &mut seeded_rng());
    assert_eq!(s.phase, SnakePhase::Running);
    assert!(!s.occupies(s.food.cell));
}

#[test]
fn start_is_ignored_once_running() {
    let config = SnakeConfig::default();
    let s = running(&[(3, 3), (2, 3)], Direction::Right, (9, 9));
    let s2 = start(&s, &config, &mut seeded_rng());
    assert_eq!(s2.body, s.body);
    assert_eq!(s2.food, s.food);
}

#[test]
fn restart_resets_from_game_over() {
    let config = SnakeConfig::default();
    let mut s = running(&[(3, 3), (2, 3), (1, 3)], Direction::Up, (9, 9));
    s.score = 70;
    s.phase = SnakePhase::GameOver;

    let fresh = restart(&config, &mut seeded_rng());
    assert_eq!(fresh.phase, SnakePhase::Running);
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.body, body(&[(10, 10)]));
    assert_eq!(fresh.direction, Direction::Right);
    assert!(fresh.pending.is_none());
    assert!(!fresh.occupies(fresh.food.cell));
}

#[test]
fn pause_freezes_and_resumes() {
    let config = SnakeConfig::default();
    let mut rng = seeded_rng();
    let s = running(&[(3, 3)], Direction::Right, (9, 9));

    let paused = toggle_pause(&s);
    assert_eq!(paused.phase, SnakePhase::Paused);
    assert_eq!(tick(&paused, &config, &mut rng).head(), Cell::new(3, 3));

    let resumed = toggle_pause(&paused);
    assert_eq!(resumed.phase, SnakePhase::Running);
    assert_eq!(tick(&resumed, &config, &mut rng).head(), Cell::new(4, 3));
}

#[test]
fn pause_has_no_effect_outside_play() {
    let s = init_state(&SnakeConfig::default());
    assert_eq!(toggle_pause(&s).phase, SnakePhase::NotStarted);

    let mut over = running(&[(3, 3)], Direction::Right, (9, 9));
    over.phase = SnakePhase::GameOver;
    assert_eq!(toggle_pause(&over).phase, SnakePhase::GameOver);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn moving_right_off_the_edge_wraps_to_zero() {
    let config = SnakeConfig::default();
    let s = running(&[(19, 10)], Direction::Right, (5, 5));
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.head(), Cell::new(0, 10));
}

#[test]
fn moving_up_off_the_edge_wraps_to_bottom() {
    let config = SnakeConfig::default();
    let s = running(&[(3, 0)], Direction::Up, (5, 5));
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.head(), Cell::new(3, 19));
}

#[test]
fn plain_move_keeps_length() {
    let config = SnakeConfig::default();
    let s = running(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (15, 15));
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.body, body(&[(6, 5), (5, 5), (4, 5)]));
    assert_eq!(s2.score, 0);
}

// ── Direction buffer ──────────────────────────────────────────────────────────

#[test]
fn reversal_is_rejected() {
    let config = SnakeConfig::default();
    let s = running(&[(5, 5), (4, 5)], Direction::Right, (15, 15));
    let s2 = queue_direction(&s, Direction::Left);
    assert!(s2.pending.is_none());

    let s3 = tick(&s2, &config, &mut seeded_rng());
    assert_eq!(s3.head(), Cell::new(6, 5));
    assert_eq!(s3.phase, SnakePhase::Running);
}

#[test]
fn queued_turn_applies_on_next_tick() {
    let config = SnakeConfig::default();
    let s = running(&[(5, 5), (4, 5)], Direction::Right, (15, 15));
    let s2 = queue_direction(&s, Direction::Up);
    assert_eq!(s2.pending, Some(Direction::Up));
    assert_eq!(s2.direction, Direction::Right);

    let s3 = tick(&s2, &config, &mut seeded_rng());
    assert_eq!(s3.head(), Cell::new(5, 4));
    assert_eq!(s3.direction, Direction::Up);
    assert!(s3.pending.is_none());
}

#[test]
fn reversal_is_judged_against_the_current_heading() {
    // Up then Left within one tick: Left reverses the actual heading, so
    // the buffered Up survives.
    let s = running(&[(5, 5), (4, 5)], Direction::Right, (15, 15));
    let s2 = queue_direction(&queue_direction(&s, Direction::Up), Direction::Left);
    assert_eq!(s2.pending, Some(Direction::Up));

    // A later valid turn replaces the earlier one.
    let s3 = queue_direction(&s2, Direction::Down);
    assert_eq!(s3.pending, Some(Direction::Down));
}

#[test]
fn turns_ignored_outside_play() {
    let s = init_state(&SnakeConfig::default());
    assert!(queue_direction(&s, Direction::Up).pending.is_none());

    let mut over = running(&[(5, 5)], Direction::Right, (15, 15));
    over.phase = SnakePhase::GameOver;
    assert!(queue_direction(&over, Direction::Up).pending.is_none());
}

#[test]
fn turns_accepted_while_paused() {
    let s = toggle_pause(&running(&[(5, 5)], Direction::Right, (15, 15)));
    assert_eq!(queue_direction(&s, Direction::Down).pending, Some(Direction::Down));
}

// ── Food ──────────────────────────────────────────────────────────────────────

#[test]
fn eating_grows_by_one_and_scores_ten() {
    let config = SnakeConfig::default();
    let s = running(&[(4, 5), (3, 5)], Direction::Right, (5, 5));
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.body.len(), 3);
    assert_eq!(s2.head(), Cell::new(5, 5));
    assert_eq!(s2.score, 10);
    assert!(!s2.occupies(s2.food.cell));
}

#[test]
fn food_never_spawns_on_the_snake() {
    let snake = body(&[(5, 5), (5, 6), (5, 7), (5, 8), (5, 9)]);
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let food = generate_food(&snake, 20, &mut rng).expect("free cells remain");
        assert!(!snake.contains(&food.cell), "spawned on {:?}", food.cell);
        assert!((0..20).contains(&food.cell.x));
        assert!((0..20).contains(&food.cell.y));
    }
}

#[test]
fn food_finds_the_last_free_cell() {
    let snake = body(&[(0, 0), (1, 0), (1, 1)]);
    let food = generate_food(&snake, 2, &mut seeded_rng()).expect("one cell left");
    assert_eq!(food.cell, Cell::new(0, 1));
}

#[test]
fn full_board_has_no_food() {
    let snake = body(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
    assert!(generate_food(&snake, 2, &mut seeded_rng()).is_none());
}

#[test]
fn filling_the_board_ends_the_game() {
    let config = SnakeConfig::new(2, std::time::Duration::from_millis(100));
    let mut s = running(&[(1, 0), (1, 1), (0, 1)], Direction::Left, (0, 0));
    s.grid_size = 2;
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.body.len(), 4);
    assert_eq!(s2.score, 10);
    assert_eq!(s2.phase, SnakePhase::GameOver);
}

// ── Self-collision ────────────────────────────────────────────────────────────

#[test]
fn biting_the_body_ends_the_game_and_freezes() {
    let config = SnakeConfig::default();
    let mut rng = seeded_rng();
    // Head at (5,5) heading down into (5,6).
    let mut s = running(
        &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
        Direction::Down,
        (15, 15),
    );
    s.score = 30;

    let over = tick(&s, &config, &mut rng);
    assert_eq!(over.phase, SnakePhase::GameOver);
    assert_eq!(over.body, s.body);

    let later = tick(&over, &config, &mut rng);
    assert_eq!(later.body, over.body);
    assert_eq!(later.score, 30);
    assert_eq!(later.ticks, over.ticks);
}

#[test]
fn tail_cell_counts_as_body() {
    // A 2×2 loop: the next cell is the tail, which would be vacated this
    // tick, but the check runs against the pre-move body.
    let config = SnakeConfig::default();
    let s = running(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Right, (15, 15));
    let s2 = tick(&s, &config, &mut seeded_rng());
    assert_eq!(s2.phase, SnakePhase::GameOver);
}
