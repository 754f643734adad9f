//! Recording doubles shared by the engine's unit tests.
//!
//! The platform and the stub simulation append to one thread-local log so a
//! test can assert the interleaving of game calls and platform calls.

use std::cell::RefCell;

use crate::core::Simulation;
use crate::error::SchedulerError;
use crate::platform::{
    Clock, Display, PeriodicTask, RandomSource, ScoreLedger, Scheduler, Shell, TaskId, Transport,
};
use crate::types::{
    AppId, Direction, DisplayBuf, GamePhase, GameScoreType, RecvId, Tick, RECV_ID_COUNT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Queue(AppId, u8, Tick),
    Enable(TaskId),
    Disable(TaskId),
    ScrollText(String),
    Packed(DisplayBuf),
    Tx(Vec<u8>, RecvId),
    Register(RecvId, AppId),
    Unregister(RecvId),
    Flush(usize),
    ChangeApp(AppId),
    BackToMenu(AppId),
    ShowScore(u32),
    MarkScore(GameScoreType, u32),
    SimNew,
    SimStart,
    SimInput(Direction),
    SimFall,
    SimAttack(u8),
    SimForceOver,
}

thread_local! {
    static LOG: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

pub fn log(event: Event) {
    LOG.with(|l| l.borrow_mut().push(event));
}

pub fn take_log() -> Vec<Event> {
    LOG.with(|l| std::mem::take(&mut *l.borrow_mut()))
}

#[derive(Debug, Default)]
pub struct RecordingPlatform {
    now: Tick,
    random: u32,
    tasks: Vec<bool>,
    handlers: [Option<AppId>; RECV_ID_COUNT],
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&mut self, now: Tick) {
        self.now = now;
    }

    pub fn handler(&self, dest: RecvId) -> Option<AppId> {
        dest.slot().and_then(|slot| self.handlers[slot])
    }

    pub fn is_enabled(&self, task: TaskId) -> bool {
        self.tasks.get(task.0 as usize).copied().unwrap_or(false)
    }
}

impl Clock for RecordingPlatform {
    fn now(&self) -> Tick {
        self.now
    }
}

impl RandomSource for RecordingPlatform {
    fn next_random(&mut self) -> u32 {
        self.random = self.random.wrapping_add(1);
        self.random
    }
}

impl Scheduler for RecordingPlatform {
    fn queue(&mut self, task: PeriodicTask) -> Result<TaskId, SchedulerError> {
        log(Event::Queue(task.owner, task.priority, task.interval));
        self.tasks.push(false);
        Ok(TaskId(self.tasks.len() as u8 - 1))
    }

    fn enable_periodic(&mut self, task: TaskId) {
        log(Event::Enable(task));
        if let Some(enabled) = self.tasks.get_mut(task.0 as usize) {
            *enabled = true;
        }
    }

    fn disable_periodic(&mut self, task: TaskId) {
        log(Event::Disable(task));
        if let Some(enabled) = self.tasks.get_mut(task.0 as usize) {
            *enabled = false;
        }
    }
}

impl Display for RecordingPlatform {
    fn set_mode_scroll_text(&mut self, text: &str) {
        log(Event::ScrollText(text.to_string()));
    }

    fn set_mode_fixed_packed(&mut self, buf: &DisplayBuf) {
        log(Event::Packed(*buf));
    }
}

impl Transport for RecordingPlatform {
    fn queue_data_for_tx(&mut self, data: &[u8], dest: RecvId) {
        log(Event::Tx(data.to_vec(), dest));
    }

    fn set_on_packet_arrive(&mut self, dest: RecvId, app: AppId) {
        log(Event::Register(dest, app));
        if let Some(slot) = dest.slot() {
            self.handlers[slot] = Some(app);
        }
    }

    fn clear_on_packet_arrive(&mut self, dest: RecvId) {
        log(Event::Unregister(dest));
        if let Some(slot) = dest.slot() {
            self.handlers[slot] = None;
        }
    }

    fn send_partial_data(&mut self, budget: usize) {
        log(Event::Flush(budget));
    }
}

impl Shell for RecordingPlatform {
    fn change_app(&mut self, target: AppId) {
        log(Event::ChangeApp(target));
    }

    fn back_to_menu(&mut self, current: AppId) {
        log(Event::BackToMenu(current));
    }

    fn set_show_score(&mut self, score: u32) {
        log(Event::ShowScore(score));
    }
}

impl ScoreLedger for RecordingPlatform {
    fn mark_score(&mut self, game: GameScoreType, score: u32) {
        log(Event::MarkScore(game, score));
    }
}

/// Scriptable simulation: tests poke its fields directly.
#[derive(Debug, Default)]
pub struct StubSim {
    pub phase: GamePhase,
    pub score: u32,
    pub cleared_lines: u32,
    pub pending_garbage: u32,
    pub outgoing: Option<u8>,
}

impl Simulation for StubSim {
    fn new_game(_seed: u32) -> Self {
        log(Event::SimNew);
        Self::default()
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    fn start_playing(&mut self) {
        log(Event::SimStart);
        if self.phase == GamePhase::Waiting {
            self.phase = GamePhase::Playing;
        }
    }

    fn on_input(&mut self, direction: Direction) {
        log(Event::SimInput(direction));
    }

    fn fall_down(&mut self) {
        log(Event::SimFall);
    }

    fn enemy_attack(&mut self, lines: u8) {
        log(Event::SimAttack(lines));
        self.pending_garbage += u32::from(lines);
    }

    fn force_over(&mut self) {
        log(Event::SimForceOver);
        self.phase = GamePhase::GameOver;
    }

    fn draw_to_display(&self, buf: &mut DisplayBuf) {
        buf.fill(0);
    }

    fn take_attack(&mut self) -> Option<u8> {
        self.outgoing.take()
    }
}
