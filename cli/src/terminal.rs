//! Terminal front end: raw-mode keyboard input and a one-lane ASCII view.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use dinorun_core::{
    ActionSignal, FrameSink, FrameSnapshot, InputSource, Obstacle, ObstacleKind, SinkSignal,
    SCREEN_WIDTH,
};

use crate::pacing::FramePacer;

pub const LANE_COLUMNS: usize = 88;
const LANE_TOP: f64 = 100.0;
const ROW_HEIGHT: f64 = 48.0;
const LANE_ROWS: usize = 6;

/// Terminals report presses and repeats, never releases, so a press holds
/// its control for this many ticks.
const HOLD_TICKS: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    ToggleDebug,
    Quit,
    Ignore,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W'), _) => {
            KeyAction::Up
        }
        (KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S'), _) => KeyAction::Down,
        (KeyCode::Char('d') | KeyCode::Char('D'), _) => KeyAction::ToggleDebug,
        (KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'), _) => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Up/down state shared between the view (which reads the keyboard) and
/// the player's input source (which the harness polls).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyLatch {
    up: u8,
    down: u8,
}

impl KeyLatch {
    pub fn press(&mut self, action: KeyAction) {
        match action {
            KeyAction::Up => self.up = HOLD_TICKS,
            KeyAction::Down => self.down = HOLD_TICKS,
            _ => {}
        }
    }

    /// Current intent; counts every held control down by one tick.
    pub fn take_tick(&mut self) -> ActionSignal {
        let signal = ActionSignal {
            wants_up: self.up > 0,
            wants_down: self.down > 0,
        };
        self.up = self.up.saturating_sub(1);
        self.down = self.down.saturating_sub(1);
        signal
    }
}

pub type SharedKeys = Rc<RefCell<KeyLatch>>;

pub struct TerminalInput {
    keys: SharedKeys,
}

impl TerminalInput {
    pub fn new(keys: SharedKeys) -> Self {
        TerminalInput { keys }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> ActionSignal {
        self.keys.borrow_mut().take_tick()
    }
}

/// Raw mode plus alternate screen for as long as it lives.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
    }
}

fn column(x: f64) -> Option<usize> {
    if x < 0.0 || x >= SCREEN_WIDTH {
        return None;
    }
    Some((x / SCREEN_WIDTH * LANE_COLUMNS as f64) as usize)
}

fn row(y: f64) -> usize {
    (((y - LANE_TOP) / ROW_HEIGHT).max(0.0) as usize).min(LANE_ROWS - 1)
}

fn glyph(o: &Obstacle) -> char {
    match o.kind {
        ObstacleKind::SmallBarrier { .. } => '|',
        ObstacleKind::LargeBarrier { .. } => '#',
        ObstacleKind::FlyingHazard { .. } => 'v',
    }
}

fn paint(grid: &mut [Vec<char>], x: f64, y: f64, w: f64, h: f64, ch: char) {
    let left = x.max(0.0);
    let right = (x + w).min(SCREEN_WIDTH - 1.0);
    if right < left {
        return;
    }
    let (Some(c0), Some(c1)) = (column(left), column(right)) else {
        return;
    };
    for r in row(y)..=row(y + h - 1.0) {
        for cell in &mut grid[r][c0..=c1] {
            *cell = ch;
        }
    }
}

/// Lane rows, ground, and status line for one frame.
pub fn render_frame(frame: &FrameSnapshot<'_>) -> Vec<String> {
    let mut grid = vec![vec![' '; LANE_COLUMNS]; LANE_ROWS];
    for o in frame.obstacles {
        paint(&mut grid, o.x, o.y, o.width(), o.height(), glyph(o));
    }
    // Live runners share one column, so one glyph covers them all.
    if let Some(a) = frame.agents.iter().find(|a| a.alive) {
        paint(&mut grid, a.x, a.y, a.width(), a.height(), '@');
    }

    let mut lines: Vec<String> = grid.into_iter().map(|r| r.into_iter().collect()).collect();
    lines.push("_".repeat(LANE_COLUMNS));
    lines.push(format!(
        "Gen {}  Score {}  Speed {:.2}  Alive {}/{}",
        frame.generation,
        frame.score,
        frame.scroll_speed,
        frame.live,
        frame.agents.len()
    ));
    if frame.debug_overlay {
        lines.push(format!("tick {}", frame.tick));
        for o in frame.obstacles {
            lines.push(format!(
                "  {} x={:.1} y={:.0} {}x{}",
                o.kind.name(),
                o.x,
                o.y,
                o.width(),
                o.height()
            ));
        }
    }
    lines
}

/// Draws each frame, reads the keyboard, and optionally paces to real time.
pub struct TerminalView {
    out: Stdout,
    keys: SharedKeys,
    pacer: Option<FramePacer>,
}

impl TerminalView {
    pub fn new(keys: SharedKeys, pacer: Option<FramePacer>) -> Self {
        TerminalView {
            out: io::stdout(),
            keys,
            pacer,
        }
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        self.out.flush()
    }

    /// Drain pending key events without blocking.
    fn read_keys(&mut self) -> io::Result<SinkSignal> {
        let mut signal = SinkSignal::Continue;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match map_key(&key) {
                    KeyAction::Quit => return Ok(SinkSignal::Quit),
                    KeyAction::ToggleDebug => signal = SinkSignal::ToggleDebug,
                    action => self.keys.borrow_mut().press(action),
                }
            }
        }
        Ok(signal)
    }

    /// Show a message and block until any key is pressed.
    pub fn hold(&mut self, message: &str) -> io::Result<()> {
        queue!(self.out, Print("\r\n"), Print(message), Print("\r\n"))?;
        self.out.flush()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}

impl FrameSink for TerminalView {
    fn present(&mut self, frame: &FrameSnapshot<'_>) -> SinkSignal {
        if let Err(err) = self.draw(&render_frame(frame)) {
            tracing::error!(?err, "failed to draw frame");
            return SinkSignal::Quit;
        }
        let signal = match self.read_keys() {
            Ok(signal) => signal,
            Err(err) => {
                tracing::error!(?err, "failed to read keyboard");
                SinkSignal::Quit
            }
        };
        if let Some(pacer) = &mut self.pacer {
            pacer.wait();
        }
        signal
    }
}
