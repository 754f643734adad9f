//! Terminal badge emulator (default binary).
//!
//! Runs one badge: menu, Tetris and score display on an emulated 16x8 LED
//! matrix. Set `TETRIS_LINK_ADDR` on two instances to play against each
//! other over TCP.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use badge_tetris::adapter::{LinkConfig, TcpLink};
use badge_tetris::core::Simulation;
use badge_tetris::engine::{Badge, EmulatorConfig, MemoryScoreLedger, SystemClock};
use badge_tetris::input::{key_to_button, should_quit};
use badge_tetris::term::{Canvas, LedMatrix, MatrixView, TerminalRenderer, Viewport};

type EmulatedBadge = Badge<Option<TcpLink>, LedMatrix, SystemClock>;

/// How long to wait for a key before stepping the badge again.
const FRAME_INTERVAL: Duration = Duration::from_millis(5);
const SCROLL_INTERVAL: Duration = Duration::from_millis(120);

fn main() -> Result<()> {
    let config = EmulatorConfig::from_env()?;
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let link = LinkConfig::from_env()?.map(TcpLink::start).transpose()?;
    let online = link.is_some();

    let mut badge_config = config.badge;
    if config.seed_override.is_none() {
        badge_config.seed = clock_seed();
    }
    let mut badge: EmulatedBadge =
        Badge::new(&badge_config, SystemClock::new(), LedMatrix::new(), link)?;
    if let Some(path) = &config.score_path {
        badge
            .services_mut()
            .set_scores(MemoryScoreLedger::load(path)?);
    }
    tracing::info!(online, seed = badge_config.seed, "badge emulator started");

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut badge);
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(path) = &config.score_path {
        badge.services().scores().save(path)?;
    }
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, badge: &mut EmulatedBadge) -> Result<()> {
    let view = MatrixView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut last_scroll = Instant::now();

    loop {
        badge.step();

        if last_scroll.elapsed() >= SCROLL_INTERVAL {
            last_scroll = Instant::now();
            badge.services_mut().display_mut().advance_scroll();
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let status = status_lines(badge);
        let lines: Vec<&str> = status.iter().map(String::as_str).collect();
        view.render(badge.services().display(), &lines, Viewport::new(w, h), &mut canvas);
        term.draw_swap(&mut canvas)?;

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(button) = key_to_button(key) {
                        badge.press(button);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}

fn status_lines(badge: &EmulatedBadge) -> [String; 2] {
    let tetris = badge.tetris();
    let game = tetris.game();
    [
        format!(
            "{}  |  {}  |  {}",
            badge.focus().as_str(),
            if badge.menu().selected().is_multiplayer() {
                "2P"
            } else {
                "1P"
            },
            match badge.services().link() {
                None => "offline",
                Some(link) if link.is_connected() => "linked",
                Some(_) => "waiting for peer",
            },
        ),
        format!(
            "{}  score {}  lines {}  garbage {}",
            tetris.phase().as_str(),
            game.score(),
            game.cleared_lines(),
            game.pending_garbage(),
        ),
    ]
}
