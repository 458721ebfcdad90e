//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

pub mod fight;
pub mod snake;

use std::io::Write;

use crossterm::{
    cursor,
    event::PopKeyboardEnhancementFlags,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::prefs::Theme;

// ── Colour palette ────────────────────────────────────────────────────────────

pub(crate) const C_HINT: Color = Color::DarkGrey;
pub(crate) const C_TEXT: Color = Color::White;
pub(crate) const C_SCORE: Color = Color::Yellow;
pub(crate) const C_DANGER: Color = Color::Red;

/// Terminal dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn current() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

pub(crate) fn draw_box<W: Write>(
    out: &mut W,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    color: Color,
) -> std::io::Result<()> {
    let inner = width.saturating_sub(2) as usize;
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;

    let bottom = top + height.saturating_sub(1);
    out.queue(cursor::MoveTo(left, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in top + 1..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(left + width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

/// Print `text` horizontally centred on `cx`.
pub(crate) fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Centred block of lines around the middle of the viewport.
pub(crate) fn draw_overlay<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, cx, start_row + i as u16, msg, *color)?;
    }
    Ok(())
}

pub(crate) fn draw_hint<W: Write>(out: &mut W, view: Viewport, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

/// Park the cursor in a harmless spot and flush the frame.
pub(crate) fn finish_frame<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()
}

/// Undo the screen setup: keyboard flags, hidden cursor and the alternate
/// screen.  Raw mode is left to the caller.
pub fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) -> std::io::Result<()> {
    if keyboard_enhanced {
        out.queue(PopKeyboardEnhancementFlags)?;
    }
    out.queue(style::ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

/// Title screen listing both games and the current theme.
pub fn render_menu<W: Write>(out: &mut W, view: Viewport, theme: Theme) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = view.width / 2;
    let cy = view.height / 2;
    let accent = theme.accent();

    print_centered(out, cx, cy.saturating_sub(6), "★  NEON  ARCADE  ★", accent)?;
    print_centered(out, cx, cy.saturating_sub(4), "Pick a demo:", C_TEXT)?;

    let options: &[(&str, &str, &str)] = &[
        ("1", "Neon Strike", "duel a reactive CPU fighter"),
        ("2", "Snake      ", "wrap-around grid, walls are doors"),
    ];
    for (i, (key, label, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(22), row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(accent))?;
        out.queue(Print(*label))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("  {}", desc)))?;
    }

    let theme_line = format!("[T] Theme: {}", theme.name());
    print_centered(out, cx, cy + 2, &theme_line, accent)?;
    print_centered(out, cx, cy + 4, "Q : Quit", C_HINT)?;

    finish_frame(out, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restored(keyboard_enhanced: bool) -> String {
        let mut buf = Vec::new();
        restore_terminal(&mut buf, keyboard_enhanced).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn restore_leaves_alternate_screen_and_shows_cursor() {
        let out = restored(false);
        assert!(out.contains("\x1b[?25h"));
        assert!(out.ends_with("\x1b[?1049l"));
        assert!(!out.contains("\x1b[<1u"));
    }

    #[test]
    fn restore_pops_keyboard_flags_when_pushed() {
        assert!(restored(true).starts_with("\x1b[<1u"));
    }
}
