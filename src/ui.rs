//! Terminal front end: input mapping, layout and drawing.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use slide_puzzle::{Board, Difficulty, Direction, Phase, Position, Session};

const TILE_W: u16 = 6;
const TILE_H: u16 = 3;
const GAP: u16 = 1;
const GRID_LEFT: u16 = 2;
const GRID_TOP: u16 = 8;

const ACCENT: Color = Color::Rgb { r: 255, g: 107, b: 107 };
const MUTED: Color = Color::Rgb { r: 153, g: 153, b: 153 };
const EMPTY_BG: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const GOOD: Color = Color::Rgb { r: 76, g: 175, b: 80 };
const WARN: Color = Color::Rgb { r: 255, g: 82, b: 82 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Start a game unless one is already running.
    Start,
    /// Start over at the current size, even mid-game.
    Restart,
    Difficulty(Difficulty),
    Slide(Direction),
    Click(Position),
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') | KeyCode::Enter => Some(Action::Start),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('1') => Some(Action::Difficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(Action::Difficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(Action::Difficulty(Difficulty::Hard)),
        KeyCode::Up => Some(Action::Slide(Direction::Up)),
        KeyCode::Down => Some(Action::Slide(Direction::Down)),
        KeyCode::Left => Some(Action::Slide(Direction::Left)),
        KeyCode::Right => Some(Action::Slide(Direction::Right)),
        _ => None,
    }
}

pub fn mouse_action(mouse: MouseEvent, size: usize) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            tile_at(mouse.column, mouse.row, size).map(Action::Click)
        }
        _ => None,
    }
}

fn tile_origin(row: usize, col: usize) -> (u16, u16) {
    (
        GRID_LEFT + col as u16 * (TILE_W + GAP),
        GRID_TOP + row as u16 * (TILE_H + GAP),
    )
}

/// Grid cell under a terminal coordinate. Gaps between tiles hit nothing.
pub fn tile_at(x: u16, y: u16, size: usize) -> Option<Position> {
    if x < GRID_LEFT || y < GRID_TOP {
        return None;
    }
    let (dx, dy) = (x - GRID_LEFT, y - GRID_TOP);
    let (col, row) = ((dx / (TILE_W + GAP)) as usize, (dy / (TILE_H + GAP)) as usize);

    if row >= size || col >= size || dx % (TILE_W + GAP) >= TILE_W || dy % (TILE_H + GAP) >= TILE_H
    {
        return None;
    }
    Some(Position::new(row, col))
}

/// Home cell of a tile value in the solved arrangement.
pub fn tile_home(value: u32, size: usize) -> Position {
    let index = value as usize - 1;
    Position::new(index / size, index % size)
}

/// Tile colour as a function of where the tile belongs, so the solved board
/// shows one smooth gradient.
pub fn tile_color(value: u32, size: usize) -> Color {
    let home = tile_home(value, size);
    let span = (size - 1).max(1) as u32;
    let (row, col) = (home.row as u32, home.col as u32);

    Color::Rgb {
        r: (255 - 150 * col / span) as u8,
        g: (107 + 100 * row / span) as u8,
        b: (107 + 120 * col / span) as u8,
    }
}

/// Progress readout: tiles still away from their home cell.
pub fn misplaced_label(board: &Board) -> String {
    format!("MISPLACED {}", board.misplaced())
}

pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// True once 80% of the time limit is used.
pub fn running_late(elapsed: u32, time_limit: u32) -> bool {
    u64::from(elapsed) * 5 >= u64::from(time_limit) * 4
}

/// Raw-mode terminal on the alternate screen; restored on drop.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { out })
    }

    pub fn draw(&mut self, session: &Session, new_best: bool) -> io::Result<()> {
        let out = &mut self.out;
        queue!(out, ResetColor, Clear(ClearType::All))?;

        queue!(
            out,
            MoveTo(GRID_LEFT, 0),
            SetForegroundColor(ACCENT),
            SetAttribute(Attribute::Bold),
            Print("SLIDE PUZZLE"),
            SetAttribute(Attribute::Reset),
            MoveTo(GRID_LEFT, 1),
            SetForegroundColor(MUTED),
            Print("Complete the puzzle within time limit"),
        )?;

        draw_controls(out, session)?;

        if let Some(board) = session.board() {
            draw_status(out, session, board)?;
            draw_board(out, board, session.phase() == Phase::Running)?;
        }

        let below = GRID_TOP + session.size() as u16 * (TILE_H + GAP) + 1;
        draw_banner(out, session, new_best, below)?;

        queue!(out, ResetColor)?;
        out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn draw_controls(out: &mut Stdout, session: &Session) -> io::Result<()> {
    queue!(out, MoveTo(GRID_LEFT, 3), SetForegroundColor(MUTED), Print("DIFFICULTY  "))?;

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let selected = difficulty.size() == session.size();
        let label = format!(
            " [{}] {} ({}x{}) ",
            i + 1,
            difficulty.label(),
            difficulty.size(),
            difficulty.size()
        );
        if selected {
            queue!(out, SetBackgroundColor(ACCENT), SetForegroundColor(Color::White))?;
        } else {
            queue!(out, SetBackgroundColor(Color::Reset), SetForegroundColor(MUTED))?;
        }
        queue!(out, Print(label), SetBackgroundColor(Color::Reset), Print(" "))?;
    }

    let start = match session.phase() {
        Phase::Idle => "[s] START GAME",
        Phase::Running => "[r] RESTART",
        Phase::Complete | Phase::TimedOut => "[s] RESTART",
    };
    queue!(
        out,
        MoveTo(GRID_LEFT, 4),
        SetForegroundColor(Color::White),
        Print(start),
        SetForegroundColor(MUTED),
        Print("   arrows/click: move   [q] quit"),
    )
}

fn draw_status(out: &mut Stdout, session: &Session, board: &Board) -> io::Result<()> {
    let late = running_late(session.elapsed(), session.time_limit());
    let (elapsed_color, left_color) = if late {
        (WARN, WARN)
    } else {
        (GOOD, Color::White)
    };

    queue!(
        out,
        MoveTo(GRID_LEFT, 6),
        SetForegroundColor(MUTED),
        Print("MOVES "),
        SetForegroundColor(Color::White),
        Print(format!("{:<6}", session.move_count())),
        SetForegroundColor(MUTED),
        Print("ELAPSED TIME "),
        SetForegroundColor(elapsed_color),
        Print(format!("{:<8}", format_time(session.elapsed()))),
        SetForegroundColor(MUTED),
        Print("TIME LEFT "),
        SetForegroundColor(left_color),
        Print(format!("{:<8}", format_time(session.remaining()))),
        SetForegroundColor(MUTED),
        Print(misplaced_label(board)),
    )
}

fn draw_board(out: &mut Stdout, board: &Board, active: bool) -> io::Result<()> {
    let size = board.size();
    let empty_value = board.empty_value();

    for (row, values) in board.rows().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let (x, y) = tile_origin(row, col);
            let (bg, label) = if value == empty_value {
                (EMPTY_BG, String::new())
            } else {
                (tile_color(value, size), value.to_string())
            };
            let fg = if active { Color::Black } else { Color::DarkGrey };

            for line in 0..TILE_H {
                let text = if line == TILE_H / 2 { label.as_str() } else { "" };
                queue!(
                    out,
                    MoveTo(x, y + line),
                    SetBackgroundColor(bg),
                    SetForegroundColor(fg),
                    Print(format!("{:^width$}", text, width = TILE_W as usize)),
                )?;
            }
        }
    }
    queue!(out, SetBackgroundColor(Color::Reset))
}

fn draw_banner(out: &mut Stdout, session: &Session, new_best: bool, top: u16) -> io::Result<()> {
    match session.phase() {
        Phase::Complete => {
            queue!(
                out,
                MoveTo(GRID_LEFT, top),
                SetForegroundColor(GOOD),
                SetAttribute(Attribute::Bold),
                Print("CLEAR!"),
                SetAttribute(Attribute::Reset),
                MoveTo(GRID_LEFT, top + 1),
                SetForegroundColor(Color::White),
                Print(format!(
                    "Time: {} | Moves: {}",
                    format_time(session.elapsed()),
                    session.move_count()
                )),
            )?;
            if new_best {
                queue!(
                    out,
                    MoveTo(GRID_LEFT, top + 2),
                    SetForegroundColor(ACCENT),
                    Print("New Best Time!"),
                )?;
            }
        }
        Phase::TimedOut => {
            queue!(
                out,
                MoveTo(GRID_LEFT, top),
                SetForegroundColor(WARN),
                SetAttribute(Attribute::Bold),
                Print("TIME OVER"),
                SetAttribute(Attribute::Reset),
                MoveTo(GRID_LEFT, top + 1),
                SetForegroundColor(Color::White),
                Print("Time limit exceeded"),
            )?;
        }
        Phase::Idle | Phase::Running => {}
    }

    if let Some(best) = session.best_time() {
        queue!(
            out,
            MoveTo(GRID_LEFT, top + 4),
            SetForegroundColor(MUTED),
            Print("BEST TIME "),
            SetForegroundColor(Color::White),
            Print(format_time(best)),
        )?;
    }
    Ok(())
}
