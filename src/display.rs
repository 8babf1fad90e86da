/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, scaling the fixed logical arena onto
/// whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use volcano_dash::entities::{Facing, Faller, GameStatus, Platform, World};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_TREX: Color = Color::Green;
const C_PLATFORM: Color = Color::Magenta;
const C_METEOR: Color = Color::Red;
const C_MEAT: Color = Color::White;
const C_RAPTOR: Color = Color::DarkGreen;
const C_VOLCANO: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical arena coordinates onto the terminal play area.
/// Row 0 is the HUD, rows 1 and `rows-2` are the border, the last row is
/// the controls hint; everything in between is play area.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn play_left(&self) -> u16 {
        1
    }

    fn play_top(&self) -> u16 {
        2
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    /// Logical x → terminal column, or None when outside the arena.
    fn col(&self, x: f32, arena_w: f32) -> Option<u16> {
        if x < 0.0 || x >= arena_w || self.play_cols() == 0 {
            return None;
        }
        let c = (x / arena_w * self.play_cols() as f32) as u16;
        Some(self.play_left() + c.min(self.play_cols() - 1))
    }

    /// Logical y → terminal row, or None when outside the arena.
    fn row(&self, y: f32, arena_h: f32) -> Option<u16> {
        if y < 0.0 || y >= arena_h || self.play_rows() == 0 {
            return None;
        }
        let r = (y / arena_h * self.play_rows() as f32) as u16;
        Some(self.play_top() + r.min(self.play_rows() - 1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &World) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, state, &view)?;
    draw_volcano(out, &view)?;

    for platform in &state.platforms {
        draw_platform(out, state, &view, platform)?;
    }
    for meteor in &state.meteors {
        draw_faller(out, state, &view, meteor, "●", C_METEOR)?;
    }
    for item in &state.food {
        draw_faller(out, state, &view, item, "♦", C_MEAT)?;
    }
    for raptor in &state.raptors {
        draw_faller(out, state, &view, raptor, "Ψ", C_RAPTOR)?;
    }

    draw_trex(out, state, &view)?;
    draw_controls_hint(out, &view)?;

    if state.status != GameStatus::Playing {
        draw_game_over(out, state, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

/// The world carries its own status line: the running score while playing,
/// a fixed banner once the game is over.
fn draw_hud<W: Write>(out: &mut W, state: &World, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&state.status_text))?;

    // Faller tally — right side
    let tally = format!(
        "● {}  ♦ {}  Ψ {}",
        state.meteors.len(),
        state.food.len(),
        state.raptors.len()
    );
    let rx = view.cols.saturating_sub(tally.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&tally))?;

    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

/// Decorative volcano: a small triangle rising from the bottom border at
/// the centre of the play area.
fn draw_volcano<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    const VOLCANO_ROWS: u16 = 5;
    if view.play_rows() <= VOLCANO_ROWS || view.play_cols() < VOLCANO_ROWS * 2 {
        return Ok(());
    }

    out.queue(style::SetForegroundColor(C_VOLCANO))?;
    let bottom = view.play_top() + view.play_rows() - 1;
    let cx = view.play_left() + view.play_cols() / 2;

    for i in 0..VOLCANO_ROWS {
        let row = bottom - i;
        let half = VOLCANO_ROWS - i;
        let band = "▲".repeat(half as usize * 2 - 1);
        out.queue(cursor::MoveTo(cx.saturating_sub(half - 1), row))?;
        out.queue(Print(band))?;
    }

    Ok(())
}

fn draw_platform<W: Write>(
    out: &mut W,
    state: &World,
    view: &Viewport,
    platform: &Platform,
) -> std::io::Result<()> {
    let (Some(col), Some(row)) = (
        view.col(platform.x, state.width),
        view.row(platform.y, state.height),
    ) else {
        return Ok(());
    };

    let cells = (platform.width / state.width * view.play_cols() as f32).max(1.0) as u16;
    let right = view.play_left() + view.play_cols();
    let cells = cells.min(right.saturating_sub(col)) as usize;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    out.queue(Print("▬".repeat(cells)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_faller<W: Write>(
    out: &mut W,
    state: &World,
    view: &Viewport,
    faller: &Faller,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    // Fallers above the top edge are not visible yet
    let (Some(col), Some(row)) = (
        view.col(faller.x, state.width),
        view.row(faller.y, state.height),
    ) else {
        return Ok(());
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_trex<W: Write>(out: &mut W, state: &World, view: &Viewport) -> std::io::Result<()> {
    // Two-row sprite, mirrored by facing:
    //   ▟█▶      ◀█▙
    //   ▐ ▌      ▐ ▌
    let (head, legs) = match state.trex.facing {
        Facing::Right => ("▟█▶", "▐ ▌"),
        Facing::Left => ("◀█▙", "▐ ▌"),
    };

    let (Some(col), Some(row)) = (
        view.col(state.trex.x, state.width),
        view.row(state.trex.y, state.height),
    ) else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(C_TREX))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(head))?;

    let legs_row = row + 1;
    if legs_row < view.play_top() + view.play_rows() {
        out.queue(cursor::MoveTo(col, legs_row))?;
        out.queue(Print(legs))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Run   SPACE : Jump   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &World, view: &Viewport) -> std::io::Result<()> {
    let box_color = if state.status == GameStatus::Won {
        Color::Green
    } else {
        Color::Red
    };

    let lines: [String; 3] = [
        format!("╔{}╗", "═".repeat(22)),
        format!("║{:^22}║", state.status_text),
        format!("╚{}╝", "═".repeat(22)),
    ];
    let score_line = format!("Final Score: {:>4}", state.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = view.cols / 2;
    let total_rows = lines.len() as u16 + 2;
    let start_row = (view.rows / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(box_color))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
