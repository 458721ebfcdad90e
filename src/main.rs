use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use neon_arcade::config::{FightConfig, SnakeConfig, SnakeParams};
use neon_arcade::display::{self, Viewport};
use neon_arcade::fight::compute as fight;
use neon_arcade::fight::entities::FightStatus;
use neon_arcade::input::{fight_input, snake_direction, KeyTracker};
use neon_arcade::prefs::{default_data_dir, PrefStore, Theme};
use neon_arcade::snake::compute as snake;
use neon_arcade::snake::entities::SnakePhase;

/// Render period of the snake screen; the snake itself moves on its own timer.
const SNAKE_FRAME: Duration = Duration::from_millis(33);

const LOG_FILE: &str = "neon_arcade.log";

// ── Command line ──────────────────────────────────────────────────────────────

/// Terminal arcade with the portfolio's two demo games.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Jump straight into a game instead of the menu.
    #[command(subcommand)]
    game: Option<GameArg>,
    /// Seed for a reproducible session.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Cells per side of the snake grid.
    #[arg(
        long = "grid-size",
        value_name = "CELLS",
        default_value_t = SnakeParams::GRID_SIZE,
        value_parser = clap::value_parser!(i32).range(2..=60)
    )]
    grid_size: i32,
    /// Milliseconds between snake moves.
    #[arg(
        long = "snake-tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = SnakeParams::TICK_MS,
        value_parser = clap::value_parser!(u64).range(20..=2000)
    )]
    snake_tick_ms: u64,
    /// Directory holding the theme preference and the log file.
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,
    /// Log file path (defaults to the data directory).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum GameArg {
    /// Neon Strike: duel the CPU fighter.
    Fight,
    /// Wrap-around Snake.
    Snake,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Hand the terminal back before the default hook prints the panic, so the
/// message lands on the normal screen.
fn install_panic_hook(keyboard_enhanced: bool) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = display::restore_terminal(&mut stdout(), keyboard_enhanced);
        let _ = terminal::disable_raw_mode();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        previous(info);
    }));
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything shared across games for one run of the program.
struct Session {
    rng: StdRng,
    theme: Theme,
    store: PrefStore,
    fight: FightConfig,
    snake: SnakeConfig,
    started: Instant,
    /// Terminal delivers key releases, so held keys need no timeout.
    key_releases: bool,
}

impl Session {
    /// Milliseconds since startup; the fight simulation's clock.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn key_tracker(&self) -> KeyTracker {
        if self.key_releases {
            KeyTracker::reporting_releases()
        } else {
            KeyTracker::default()
        }
    }

    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        if let Err(err) = self.store.save(self.theme) {
            warn!(error = %err, "could not persist theme");
        }
    }
}

enum Exit {
    Menu,
    Quit,
}

fn is_quit_chord(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_back(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

fn is_restart(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
}

fn sleep_rest(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        thread::sleep(frame - elapsed);
    }
}

// ── Fight loop ────────────────────────────────────────────────────────────────

/// Per-frame loop: sample held keys, step, render.  Returning drops the
/// state; nothing keeps running after the match screen is left.
fn fight_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> Result<Exit> {
    let config = session.fight.clone();
    let mut state = fight::init_state(&config);
    let mut keys = session.key_tracker();

    loop {
        let frame_start = Instant::now();
        let now = session.now_ms();

        // ── Drain pending input (non-blocking) ───────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            keys.record(&key, now);
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_quit_chord(&key) {
                return Ok(Exit::Quit);
            }
            if is_back(key.code) {
                return Ok(Exit::Menu);
            }
            match key.code {
                KeyCode::Enter if state.status == FightStatus::NotStarted => {
                    state = fight::start(&state);
                    info!("duel started");
                }
                code if is_restart(code) && matches!(state.status, FightStatus::Over { .. }) => {
                    state = fight::restart(&config);
                    keys.clear();
                    info!("duel restarted");
                }
                _ => {}
            }
        }

        // ── Step ─────────────────────────────────────────────────────────────
        let was_playing = state.status == FightStatus::Playing;
        state = fight::tick(&state, fight_input(&keys, now), now, &config, &mut session.rng);
        if let FightStatus::Over { winner } = state.status {
            if was_playing {
                info!(
                    ?winner,
                    player_health = state.player.health,
                    cpu_health = state.cpu.health,
                    frames = state.frame,
                    "duel finished"
                );
            }
        }

        display::fight::render(out, Viewport::current()?, &state, &config)?;
        sleep_rest(frame_start, config.frame);
    }
}

// ── Snake loop ────────────────────────────────────────────────────────────────

/// Renders every `SNAKE_FRAME`; the snake advances on its own deadline.
fn snake_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> Result<Exit> {
    let config = session.snake.clone();
    let mut state = snake::init_state(&config);
    let mut next_move = Instant::now() + config.tick;

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_quit_chord(&key) {
                return Ok(Exit::Quit);
            }
            if is_back(key.code) {
                return Ok(Exit::Menu);
            }
            match key.code {
                KeyCode::Enter if state.phase == SnakePhase::NotStarted => {
                    state = snake::start(&state, &config, &mut session.rng);
                    next_move = Instant::now() + config.tick;
                    info!(grid = config.grid_size, "snake started");
                }
                KeyCode::Char(' ') => state = snake::toggle_pause(&state),
                code if is_restart(code) => {
                    state = snake::restart(&config, &mut session.rng);
                    next_move = Instant::now() + config.tick;
                    info!("snake restarted");
                }
                code => {
                    if let Some(direction) = snake_direction(code) {
                        state = snake::queue_direction(&state, direction);
                    }
                }
            }
        }

        let now = Instant::now();
        if state.phase != SnakePhase::Running {
            // Nothing accrues while stopped, so resuming never bursts.
            next_move = now + config.tick;
        } else if now >= next_move {
            state = snake::tick(&state, &config, &mut session.rng);
            next_move += config.tick;
            if next_move < now {
                next_move = now + config.tick;
            }
            if state.phase == SnakePhase::GameOver {
                info!(score = state.score, length = state.body.len(), "snake game over");
            }
        }

        display::snake::render(out, Viewport::current()?, &state, session.theme)?;
        sleep_rest(frame_start, SNAKE_FRAME);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn play<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    game: GameArg,
) -> Result<Exit> {
    info!(?game, "entering game");
    match game {
        GameArg::Fight => fight_loop(out, rx, session),
        GameArg::Snake => snake_loop(out, rx, session),
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    first: Option<GameArg>,
) -> Result<()> {
    if let Some(game) = first {
        if let Exit::Quit = play(out, rx, session, game)? {
            return Ok(());
        }
    }

    loop {
        display::render_menu(out, Viewport::current()?, session.theme)?;

        // Block until the user makes a choice
        let Ok(ev) = rx.recv() else { return Ok(()) };
        let Event::Key(key) = ev else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit_chord(&key) || is_back(key.code) {
            return Ok(());
        }
        let game = match key.code {
            KeyCode::Char('1') => GameArg::Fight,
            KeyCode::Char('2') => GameArg::Snake,
            KeyCode::Char('t') | KeyCode::Char('T') => {
                session.cycle_theme();
                continue;
            }
            _ => continue,
        };
        if let Exit::Quit = play(out, rx, session, game)? {
            return Ok(());
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;

    let log_path = cli.log_file.clone().unwrap_or_else(|| data_dir.join(LOG_FILE));
    // Playing without a log beats not playing.
    let logging = init_tracing(&log_path);

    let store = PrefStore::new(&data_dir);
    let theme = store.load();
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session {
        rng,
        theme,
        store,
        fight: FightConfig::default(),
        snake: SnakeConfig::new(cli.grid_size, Duration::from_millis(cli.snake_tick_ms)),
        started: Instant::now(),
        key_releases: false,
    };
    if logging.is_ok() {
        info!(
            seed = ?cli.seed,
            theme = theme.name(),
            prefs = %session.store.path().display(),
            "session started"
        );
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    session.key_releases = keyboard_enhanced;
    install_panic_hook(keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loops never block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &mut session, cli.game);

    // Always restore the terminal
    let _ = display::restore_terminal(&mut out, keyboard_enhanced);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "session ended with an error");
    }
    info!("session ended");
    result
}
