//! Neon Strike frame: arena scaled from world units into the terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::{FightConfig, FightParams};
use crate::display::{draw_box, draw_hint, draw_overlay, finish_frame, Viewport, C_HINT, C_TEXT};
use crate::fight::entities::{
    Action, AttackKind, Facing, FightState, FightStatus, Fighter, Particle, ParticleTone, Side,
};

const C_PLAYER: Color = Color::Rgb { r: 0x3b, g: 0x82, b: 0xf6 };
const C_CPU: Color = Color::Rgb { r: 0xf4, g: 0x3f, b: 0x5e };
const C_DEFLECT: Color = Color::Rgb { r: 0x38, g: 0xbd, b: 0xf8 };
const C_GROUND: Color = Color::Rgb { r: 0x33, g: 0x41, b: 0x55 };
const C_SKYLINE: Color = Color::Rgb { r: 0x1e, g: 0x1b, b: 0x4b };
const C_BAR_EMPTY: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: usize = 20;

/// Maps world coordinates onto the terminal play area (inside the border).
#[derive(Clone, Copy, Debug)]
struct Projection {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Projection {
    fn new(view: Viewport) -> Self {
        // Row 0 is the HUD, row 1 and h-2 the border, h-1 the hint.
        Self {
            left: 1,
            top: 2,
            cols: view.width.saturating_sub(2).max(1),
            rows: view.height.saturating_sub(4).max(1),
        }
    }

    fn col(&self, x: f32) -> u16 {
        let c = (x / FightParams::ARENA_WIDTH * self.cols as f32).floor();
        self.left + (c.max(0.0) as u16).min(self.cols - 1)
    }

    fn row(&self, y: f32) -> u16 {
        let r = (y / FightParams::ARENA_HEIGHT * self.rows as f32).floor();
        self.top + (r.max(0.0) as u16).min(self.rows - 1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &FightState,
    config: &FightConfig,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let proj = Projection::new(view);

    draw_box(out, 0, 1, view.width, view.height.saturating_sub(2), C_GROUND)?;
    draw_hud(out, view, state)?;
    draw_backdrop(out, &proj, config)?;

    for particle in &state.particles {
        draw_particle(out, &proj, particle)?;
    }
    draw_fighter(out, &proj, &state.player, C_PLAYER, config)?;
    draw_fighter(out, &proj, &state.cpu, C_CPU, config)?;

    draw_hint(
        out,
        view,
        "A D : Move  W : Jump  S : Block  J : Punch  K : Kick  Q : Menu",
    )?;

    match state.status {
        FightStatus::NotStarted => draw_overlay(
            out,
            view,
            &[
                ("N E O N   S T R I K E", C_PLAYER),
                ("synthetic combat protocol", C_HINT),
                ("", C_TEXT),
                ("ENTER - Initialize duel", C_TEXT),
            ],
        )?,
        FightStatus::Over { winner } => {
            let (title, color) = match winner {
                Side::Player => ("S U C C E S S", C_PLAYER),
                Side::Cpu => ("T E R M I N A T E D", C_CPU),
            };
            draw_overlay(
                out,
                view,
                &[
                    (title, color),
                    ("", C_TEXT),
                    ("R - Re-sync protocol  Q - Menu", C_TEXT),
                ],
            )?;
        }
        FightStatus::Playing => {}
    }

    finish_frame(out, view)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn health_bar(health: f32) -> (String, String) {
    let filled = ((health / FightParams::MAX_HEALTH) * HEALTH_BAR_CELLS as f32).ceil() as usize;
    let filled = filled.min(HEALTH_BAR_CELLS);
    ("█".repeat(filled), "░".repeat(HEALTH_BAR_CELLS - filled))
}

fn draw_hud<W: Write>(out: &mut W, view: Viewport, state: &FightState) -> std::io::Result<()> {
    // Player on the left, bar fills from the left
    let (full, empty) = health_bar(state.player.health);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("PROTAGONIST_01 "))?;
    out.queue(Print(&full))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(&empty))?;

    // VS in the centre
    out.queue(cursor::MoveTo((view.width / 2).saturating_sub(1), 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print("VS"))?;

    // CPU on the right, bar drains toward the right edge
    let (full, empty) = health_bar(state.cpu.health);
    let label = " CORE_STALKER";
    let len = (HEALTH_BAR_CELLS + label.len()) as u16;
    out.queue(cursor::MoveTo(view.width.saturating_sub(len + 1), 0))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(&empty))?;
    out.queue(style::SetForegroundColor(C_CPU))?;
    out.queue(Print(&full))?;
    out.queue(Print(label))?;

    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_backdrop<W: Write>(out: &mut W, proj: &Projection, config: &FightConfig) -> std::io::Result<()> {
    // City silhouette
    out.queue(style::SetForegroundColor(C_SKYLINE))?;
    for (i, x) in [100.0_f32, 250.0, 450.0, 600.0].iter().enumerate() {
        let top = 150.0 + (i % 2) as f32 * 30.0;
        let (c0, c1) = (proj.col(*x), proj.col(x + 80.0));
        for row in proj.row(top)..proj.row(config.ground_y) {
            out.queue(cursor::MoveTo(c0, row))?;
            out.queue(Print("▒".repeat((c1 - c0).max(1) as usize)))?;
        }
    }

    // Ground line
    let ground = proj.row(config.ground_y);
    out.queue(cursor::MoveTo(proj.left, ground))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("▔".repeat(proj.cols as usize)))?;
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, proj: &Projection, p: &Particle) -> std::io::Result<()> {
    let color = match p.tone {
        ParticleTone::PlayerHit => C_PLAYER,
        ParticleTone::CpuHit => C_CPU,
        ParticleTone::Deflect => C_DEFLECT,
    };
    let glyph = if p.life > 0.5 { "*" } else { "·" };
    out.queue(cursor::MoveTo(proj.col(p.x), proj.row(p.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Fighters ──────────────────────────────────────────────────────────────────

/// Three-row sprite for a pose, drawn facing right.
fn sprite(f: &Fighter) -> [&'static str; 3] {
    let stride = (f.anim.sin() * 3.0) > 0.0;
    match f.action {
        Action::Jumping => [" o ", "\\|/", "/ \\"],
        Action::Blocking => [" o ", "/|]", "/ \\"],
        Action::Stunned => ["\\o/", " | ", "/ \\"],
        Action::Walking if stride => [" o ", "/|\\", " |\\"],
        Action::Walking => [" o ", "/|\\", "/| "],
        Action::Attacking(AttackKind::Punch) => [" o ", " |═", "/ \\"],
        Action::Attacking(AttackKind::Kick) => [" o ", "/| ", "/ ═"],
        Action::Idle => [" o ", "/|\\", "/ \\"],
    }
}

fn mirror(row: &str) -> String {
    row.chars()
        .rev()
        .map(|c| match c {
            '/' => '\\',
            '\\' => '/',
            ']' => '[',
            other => other,
        })
        .collect()
}

fn draw_fighter<W: Write>(
    out: &mut W,
    proj: &Projection,
    f: &Fighter,
    color: Color,
    config: &FightConfig,
) -> std::io::Result<()> {
    let centre = proj.col(f.x + config.fighter_width / 2.0);
    let feet = proj.row(f.y + config.fighter_height - 1.0);
    let left = centre.saturating_sub(1).max(proj.left);

    let body_color = if f.action == Action::Stunned { Color::White } else { color };
    out.queue(style::SetForegroundColor(body_color))?;
    if f.is_attacking() {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }

    for (i, row) in sprite(f).iter().enumerate() {
        let y = feet.saturating_sub(2 - i as u16).max(proj.top);
        let text = match f.facing {
            Facing::Right => row.to_string(),
            Facing::Left => mirror(row),
        };
        out.queue(cursor::MoveTo(left, y))?;
        out.queue(Print(text))?;
    }

    // Reach streak while the window is open
    if let Some(attack) = f.attack.filter(|_| f.is_attacking()) {
        let reach = proj.col(f.x + config.fighter_width + config.attack_range) - proj.col(f.x + config.fighter_width);
        let streak = "═".repeat(reach.max(1) as usize);
        let y = match attack.kind {
            AttackKind::Punch => feet.saturating_sub(1),
            AttackKind::Kick => feet,
        };
        let x = match f.facing {
            Facing::Right => left + 3,
            Facing::Left => left.saturating_sub(reach.max(1)),
        };
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(streak))?;
    }

    out.queue(style::SetAttribute(Attribute::Reset))?;
    Ok(())
}
