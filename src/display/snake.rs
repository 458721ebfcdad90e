//! Snake frame: the grid drawn as two-column cells inside a box.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::display::{
    draw_box, draw_hint, draw_overlay, finish_frame, print_centered, Viewport, C_DANGER, C_HINT,
    C_SCORE, C_TEXT,
};
use crate::prefs::Theme;
use crate::snake::entities::{Cell, Direction, SnakePhase, SnakeState};

const C_HEAD: Color = Color::White;
const C_GRID: Color = Color::DarkGrey;

/// Top-left corner of the board border.
fn board_origin(view: Viewport, grid_size: i32) -> (u16, u16) {
    let board_w = grid_size as u16 * 2 + 2;
    ((view.width.saturating_sub(board_w)) / 2, 2)
}

fn cell_pos(origin: (u16, u16), cell: Cell) -> (u16, u16) {
    (origin.0 + 1 + cell.x as u16 * 2, origin.1 + 1 + cell.y as u16)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SnakeState,
    theme: Theme,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let accent = theme.accent();
    let size = state.grid_size as u16;
    let origin = board_origin(view, state.grid_size);

    draw_hud(out, view, state, accent)?;
    draw_box(out, origin.0, origin.1, size * 2 + 2, size + 2, accent)?;

    // Faint dots on empty cells
    out.queue(style::SetForegroundColor(C_GRID))?;
    for y in 0..size {
        out.queue(cursor::MoveTo(origin.0 + 1, origin.1 + 1 + y))?;
        out.queue(Print("· ".repeat(size as usize)))?;
    }

    // Food
    let (fx, fy) = cell_pos(origin, state.food.cell);
    out.queue(cursor::MoveTo(fx, fy))?;
    out.queue(Print(state.food.fruit.glyph()))?;

    // Body, tail first so the head wins any overlap
    out.queue(style::SetForegroundColor(accent))?;
    for segment in state.body.iter().skip(1) {
        let (x, y) = cell_pos(origin, *segment);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print("██"))?;
    }
    let (hx, hy) = cell_pos(origin, state.head());
    out.queue(cursor::MoveTo(hx, hy))?;
    out.queue(style::SetForegroundColor(C_HEAD))?;
    out.queue(Print(head_glyph(state.next_direction())))?;

    draw_hint(out, view, "Arrows : Turn   SPACE : Pause   R : Restart   ENTER : Start   Q : Menu")?;

    let score_line = format!("Final Score: {}", state.score);
    match state.phase {
        SnakePhase::NotStarted => draw_overlay(
            out,
            view,
            &[
                ("Ready to Play?", accent),
                ("ENTER - Start Game", C_TEXT),
                ("You can pass through walls!", C_HINT),
            ],
        )?,
        SnakePhase::Paused => draw_overlay(
            out,
            view,
            &[
                ("P A U S E D", C_SCORE),
                ("SPACE - Resume   R - Restart", C_TEXT),
            ],
        )?,
        SnakePhase::GameOver => draw_overlay(
            out,
            view,
            &[
                ("G A M E   O V E R", C_DANGER),
                (score_line.as_str(), C_SCORE),
                ("R - Restart   Q - Menu", C_TEXT),
            ],
        )?,
        SnakePhase::Running => {}
    }

    finish_frame(out, view)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SnakeState,
    accent: Color,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {:>5}", state.score)))?;

    print_centered(out, view.width / 2, 0, "S N A K E", accent)?;

    let length = format!("Length: {}", state.body.len());
    let col = view.width.saturating_sub(length.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(&length))?;
    Ok(())
}
