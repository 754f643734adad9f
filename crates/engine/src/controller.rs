//! The Tetris app: the state machine between the badge platform and the game.
//!
//! The controller mirrors the simulation's [`GamePhase`] and refreshes the
//! mirror after every call that can change it. All three entry points
//! (tick, button, packet) act on the one simulation created on entry.

use crate::adapter::Packet;
use crate::app::App;
use crate::core::{Simulation, TetrisGame};
use crate::error::SchedulerError;
use crate::input::{button_intent, ButtonIntent};
use crate::net::{decode_packet, send_packet};
use crate::platform::{PeriodicTask, Platform, Scheduler, TaskId};
use crate::timing::{DifficultyCurve, FallTimer};
use crate::types::{
    AppId, Button, DisplayBuf, GamePhase, GameScoreType, SessionMode, Tick, DISPLAY_WIDTH,
    PARTIAL_FLUSH_BUDGET, TETRIS_RECV_ID, UPDATE_PRIORITY,
};

/// Scroll text shown while waiting for OK.
pub const READY_TEXT: &str = "Ready?";

pub struct TetrisApp<S: Simulation = TetrisGame> {
    mode: SessionMode,
    phase: GamePhase,
    fall: FallTimer,
    periodic_task: TaskId,
    /// Set on entry in multiplayer: attacks are forwarded and the packet
    /// handler is registered.
    linked: bool,
    game: S,
    frame: DisplayBuf,
}

impl<S: Simulation> TetrisApp<S> {
    /// Create the controller and register its (disabled) update task.
    pub fn new<Q: Scheduler + ?Sized>(
        scheduler: &mut Q,
        curve: DifficultyCurve,
        interval: Tick,
    ) -> Result<Self, SchedulerError> {
        let periodic_task = scheduler.queue(PeriodicTask {
            owner: AppId::Tetris,
            priority: UPDATE_PRIORITY,
            interval,
        })?;
        Ok(Self {
            mode: SessionMode::default(),
            phase: GamePhase::Waiting,
            fall: FallTimer::new(curve),
            periodic_task,
            linked: false,
            game: S::new_game(0),
            frame: [0; DISPLAY_WIDTH],
        })
    }

    /// Chosen by the menu. Persists across games.
    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game(&self) -> &S {
        &self.game
    }

    pub fn periodic_task(&self) -> TaskId {
        self.periodic_task
    }

    pub fn fall_timer(&self) -> &FallTimer {
        &self.fall
    }

    fn transition(&mut self, to: GamePhase) {
        if self.phase != to {
            tracing::debug!(from = self.phase.as_str(), to = to.as_str(), "tetris phase");
            self.phase = to;
        }
    }

    /// Refresh the mirrored phase and forward any attack the game produced.
    fn after_game_call<P: Platform + ?Sized>(&mut self, p: &mut P) {
        if let Some(lines) = self.game.take_attack() {
            if self.linked {
                send_packet(p, Packet::Attack { lines });
            }
        }
        self.transition(self.game.phase());
    }

    fn start_game<P: Platform + ?Sized>(&mut self, p: &mut P) {
        let was_waiting = self.game.phase() == GamePhase::Waiting;
        self.game.start_playing();
        if was_waiting && self.game.phase() == GamePhase::Playing {
            self.fall.mark_fall(p.now());
        }
        self.after_game_call(p);
    }

    fn quit<P: Platform + ?Sized>(&mut self, p: &mut P) {
        if self.mode.is_multiplayer() {
            send_packet(p, Packet::AbortGame);
        }
        p.back_to_menu(AppId::Tetris);
    }

    /// Hand the score to the score app and the ledger, then leave.
    fn finish<P: Platform + ?Sized>(&mut self, p: &mut P) {
        let score = self.game.score();
        tracing::info!(score, lines = self.game.cleared_lines(), "tetris game finished");
        p.set_show_score(score);
        p.mark_score(GameScoreType::Tetris, score);
        p.change_app(AppId::ShowScore);
    }

    fn update<P: Platform + ?Sized>(&mut self, p: &mut P) {
        let now = p.now();
        if self.fall.should_fall(now, self.game.cleared_lines()) {
            self.game.fall_down();
            self.fall.mark_fall(now);
            self.after_game_call(p);
        }
        self.game.draw_to_display(&mut self.frame);
        p.set_mode_fixed_packed(&self.frame);
    }
}

impl<P, S> App<P> for TetrisApp<S>
where
    P: Platform + ?Sized,
    S: Simulation,
{
    fn id(&self) -> AppId {
        AppId::Tetris
    }

    fn on_entry(&mut self, p: &mut P) {
        self.game = S::new_game(p.next_random());
        self.transition(GamePhase::Waiting);
        self.frame = [0; DISPLAY_WIDTH];
        p.set_mode_scroll_text(READY_TEXT);
        self.linked = self.mode.is_multiplayer();
        if self.linked {
            p.set_on_packet_arrive(TETRIS_RECV_ID, AppId::Tetris);
        }
        p.enable_periodic(self.periodic_task);
    }

    fn on_exit(&mut self, p: &mut P) {
        p.disable_periodic(self.periodic_task);
        if self.linked {
            p.clear_on_packet_arrive(TETRIS_RECV_ID);
            self.linked = false;
        }
    }

    fn on_button(&mut self, p: &mut P, button: Button) {
        match button_intent(self.phase, button) {
            ButtonIntent::Start => {
                if self.mode.is_multiplayer() {
                    send_packet(p, Packet::GameStart);
                }
                self.start_game(p);
            }
            ButtonIntent::Quit => self.quit(p),
            ButtonIntent::Steer(direction) => {
                self.game.on_input(direction);
                self.after_game_call(p);
            }
            ButtonIntent::Ignore => {}
        }
    }

    fn on_packet(&mut self, p: &mut P, data: &[u8]) {
        let Some(packet) = decode_packet(data) else {
            return;
        };
        match packet {
            Packet::GameStart => self.start_game(p),
            Packet::Attack { lines } => self.game.enemy_attack(lines),
            Packet::GameOver => {
                self.game.force_over();
                self.transition(self.game.phase());
                self.finish(p);
            }
            Packet::AbortGame => p.back_to_menu(AppId::Tetris),
        }
    }

    fn on_tick(&mut self, p: &mut P) {
        match self.phase {
            GamePhase::Waiting => {}
            GamePhase::Playing => self.update(p),
            GamePhase::GameOver => {
                if self.mode.is_multiplayer() {
                    send_packet(p, Packet::GameOver);
                    p.send_partial_data(PARTIAL_FLUSH_BUDGET);
                }
                self.finish(p);
            }
        }
    }
}
