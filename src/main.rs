mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use volcano_dash::compute::{
    head_left, head_right, init_world, maybe_spawn_fallers, start_jump, tick,
};
use volcano_dash::entities::{GameStatus, World};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Logical arena dimensions.  The game simulates in this fixed coordinate
/// space; the display layer scales it onto the actual terminal.
const ARENA_W: f32 = 800.0;
const ARENA_H: f32 = 600.0;

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "🌋  VOLCANO  DASH  🦖";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;

    let blurb = "Dodge the meteor rain, eat what falls from the sky.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(blurb.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(blurb))?;

    // Scoring legend
    let legend: &[(&str, Color, &str)] = &[
        ("●", Color::Red,       " Meteor — −1 while it burns you"),
        ("♦", Color::White,     " Meat   — +3 per bite"),
        ("Ψ", Color::DarkGreen, " Raptor — +100, if you dare"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    let goal = "Reach +30 to win.  Fall to −30 and the volcano wins.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(goal.chars().count() as u16 / 2),
        cy + 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(goal))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(16), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Run   SPACE : Jump   Q : Quit"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 6))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print("Press ENTER or SPACE to start"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Controls are latching: a direction press sets a persistent velocity, so
/// only `Press` events matter — no held-key tracking is needed.  Every
/// gameplay key also rolls the shared spawn dice.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(true);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if state.status != GameStatus::Playing =>
                {
                    return Ok(false);
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    *state = head_left(state);
                    *state = maybe_spawn_fallers(state, &mut rng);
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    *state = head_right(state);
                    *state = maybe_spawn_fallers(state, &mut rng);
                }
                KeyCode::Char(' ') => {
                    *state = start_jump(state);
                    *state = maybe_spawn_fallers(state, &mut rng);
                }
                // Unrecognized keys are ignored
                _ => {}
            }
        }

        *state = tick(state);

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut rng = thread_rng();
                let mut state = init_world(ARENA_W, ARENA_H, &mut rng);
                let quit = game_loop(out, &mut state, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
