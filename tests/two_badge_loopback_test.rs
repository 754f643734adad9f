//! Two emulated badges joined by an in-process link.

use badge_tetris::adapter::LoopbackLink;
use badge_tetris::core::Simulation;
use badge_tetris::engine::{Badge, BadgeConfig, ManualClock, MemoryDisplay};
use badge_tetris::types::{
    AppId, Button, Direction, DisplayBuf, GamePhase, GameScoreType, SessionMode, TETRIS_RECV_ID,
};

/// Stand-in game whose hard drops always clear three rows.
#[derive(Debug, Default)]
struct ScriptedGame {
    phase: GamePhase,
    score: u32,
    lines: u32,
    pending: u32,
    drops: u32,
    outgoing: Option<u8>,
}

const DROPS_TO_TOP_OUT: u32 = 3;

impl Simulation for ScriptedGame {
    fn new_game(_seed: u32) -> Self {
        Self::default()
    }
    fn phase(&self) -> GamePhase {
        self.phase
    }
    fn score(&self) -> u32 {
        self.score
    }
    fn cleared_lines(&self) -> u32 {
        self.lines
    }
    fn pending_garbage(&self) -> u32 {
        self.pending
    }
    fn start_playing(&mut self) {
        if self.phase == GamePhase::Waiting {
            self.phase = GamePhase::Playing;
        }
    }
    fn on_input(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing || direction != Direction::FastDown {
            return;
        }
        self.drops += 1;
        self.lines += 3;
        self.score += 500;
        self.outgoing = Some(2);
        if self.drops >= DROPS_TO_TOP_OUT {
            self.phase = GamePhase::GameOver;
        }
    }
    fn fall_down(&mut self) {}
    fn enemy_attack(&mut self, lines: u8) {
        self.pending += u32::from(lines);
    }
    fn force_over(&mut self) {
        self.phase = GamePhase::GameOver;
    }
    fn draw_to_display(&self, buf: &mut DisplayBuf) {
        buf.fill(0);
    }
    fn take_attack(&mut self) -> Option<u8> {
        self.outgoing.take()
    }
}

type ScriptedBadge = Badge<LoopbackLink, MemoryDisplay, ManualClock, ScriptedGame>;
type RealBadge = Badge<LoopbackLink, MemoryDisplay, ManualClock>;

fn config(seed: u32) -> BadgeConfig {
    BadgeConfig {
        seed,
        ..BadgeConfig::default()
    }
}

fn scripted_vs_real() -> (ScriptedBadge, ManualClock, RealBadge, ManualClock) {
    let (link_a, link_b) = LoopbackLink::pair();
    let clock_a = ManualClock::new(0);
    let clock_b = ManualClock::new(0);
    let mut a = Badge::new(&config(1), clock_a.clone(), MemoryDisplay::new(), link_a).unwrap();
    let mut b = Badge::new(&config(2), clock_b.clone(), MemoryDisplay::new(), link_b).unwrap();
    a.launch_tetris(SessionMode::Multiplayer);
    b.launch_tetris(SessionMode::Multiplayer);
    (a, clock_a, b, clock_b)
}

#[test]
fn ok_on_one_badge_starts_both() {
    let (mut a, _, mut b, _) = scripted_vs_real();
    assert_eq!(b.tetris().phase(), GamePhase::Waiting);

    a.press(Button::Ok);
    assert_eq!(a.tetris().phase(), GamePhase::Playing);
    a.step();
    b.step();

    assert_eq!(b.tetris().phase(), GamePhase::Playing);
    assert_eq!(b.focus(), AppId::Tetris);
}

#[test]
fn line_clear_sends_garbage_to_peer() {
    let (mut a, _, mut b, _) = scripted_vs_real();
    a.press(Button::Ok);
    a.step();
    b.step();

    // OK is hard drop while playing.
    a.press(Button::Ok);
    a.step();
    b.step();
    assert_eq!(b.tetris().game().pending_garbage(), 2);

    a.press(Button::Ok);
    a.step();
    b.step();
    assert_eq!(b.tetris().game().pending_garbage(), 4);
}

#[test]
fn game_over_moves_both_to_score_app() {
    let (mut a, clock_a, mut b, clock_b) = scripted_vs_real();
    a.press(Button::Ok);
    a.step();
    b.step();

    for _ in 0..DROPS_TO_TOP_OUT {
        a.press(Button::Ok);
    }
    assert_eq!(a.tetris().phase(), GamePhase::GameOver);

    clock_a.advance(20);
    a.step();
    assert_eq!(a.focus(), AppId::ShowScore);
    assert_eq!(a.services().display().text(), Some("Score 1500"));
    assert_eq!(a.services().scores().best(GameScoreType::Tetris), Some(1500));

    clock_b.advance(20);
    b.step();
    assert_eq!(b.focus(), AppId::ShowScore);
    assert_eq!(b.tetris().phase(), GamePhase::GameOver);
    assert_eq!(b.services().scores().record(GameScoreType::Tetris).unwrap().plays, 1);

    // Neither side is listening any more.
    assert_eq!(a.services().handler(TETRIS_RECV_ID), None);
    assert_eq!(b.services().handler(TETRIS_RECV_ID), None);
}

#[test]
fn back_on_one_badge_sends_peer_to_menu() {
    let (mut a, _, mut b, _) = scripted_vs_real();
    a.press(Button::Ok);
    a.step();
    b.step();

    b.press(Button::LongBack);
    assert_eq!(b.focus(), AppId::Menu);
    b.step();
    a.step();
    assert_eq!(a.focus(), AppId::Menu);
}

#[test]
fn real_games_stay_in_sync_until_top_out() {
    let (link_a, link_b) = LoopbackLink::pair();
    let clock = ManualClock::new(0);
    let mut a: RealBadge = Badge::new(&config(7), clock.clone(), MemoryDisplay::new(), link_a).unwrap();
    let mut b: RealBadge = Badge::new(&config(8), clock.clone(), MemoryDisplay::new(), link_b).unwrap();
    a.launch_tetris(SessionMode::Multiplayer);
    b.launch_tetris(SessionMode::Multiplayer);

    b.press(Button::Ok);
    b.step();
    a.step();
    assert_eq!(a.tetris().phase(), GamePhase::Playing);
    assert_eq!(b.tetris().phase(), GamePhase::Playing);

    // Hard drops at the spawn column never complete a row.
    for _ in 0..64 {
        if a.tetris().phase() == GamePhase::GameOver {
            break;
        }
        a.press(Button::Ok);
    }
    assert_eq!(a.tetris().phase(), GamePhase::GameOver);

    clock.advance(20);
    a.step();
    b.step();
    assert_eq!(a.focus(), AppId::ShowScore);
    assert_eq!(b.focus(), AppId::ShowScore);
    assert!(b.services().scores().best(GameScoreType::Tetris).is_some());
}

#[test]
fn singleplayer_badge_ignores_peer() {
    let (link_a, link_b) = LoopbackLink::pair();
    let clock = ManualClock::new(0);
    let mut a: RealBadge = Badge::new(&config(1), clock.clone(), MemoryDisplay::new(), link_a).unwrap();
    let mut b: RealBadge = Badge::new(&config(2), clock.clone(), MemoryDisplay::new(), link_b).unwrap();
    a.launch_tetris(SessionMode::Multiplayer);
    b.launch_tetris(SessionMode::Singleplayer);

    a.press(Button::Ok);
    a.step();
    b.step();
    assert_eq!(b.tetris().phase(), GamePhase::Waiting);

    b.press(Button::Ok);
    b.step();
    assert_eq!(b.services().link().queued(), 0);
    assert_eq!(b.services().link().sent_bytes(), 0);
}
