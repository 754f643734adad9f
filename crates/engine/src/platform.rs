//! Contracts of the collaborators the controller talks to.
//!
//! Each external service is a small trait; [`Platform`] bundles them so an
//! app can be handed a single `&mut P`. All calls happen on the one
//! cooperative scheduler thread and none of them may block.

use crate::error::SchedulerError;
use crate::types::{AppId, DisplayBuf, GameScoreType, RecvId, Tick};

/// Handle to a queued periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u8);

/// A periodic task as registered with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    /// App whose `on_tick` runs when the task fires.
    pub owner: AppId,
    /// Higher runs first when several tasks are due together.
    pub priority: u8,
    pub interval: Tick,
}

pub trait Clock {
    /// Monotonic, wrapping tick counter.
    fn now(&self) -> Tick;
}

pub trait RandomSource {
    fn next_random(&mut self) -> u32;
}

pub trait Scheduler {
    /// Register a periodic task once. It starts disabled.
    fn queue(&mut self, task: PeriodicTask) -> Result<TaskId, SchedulerError>;
    fn enable_periodic(&mut self, task: TaskId);
    fn disable_periodic(&mut self, task: TaskId);
}

pub trait Display {
    /// Idle mode: scroll a line of text.
    fn set_mode_scroll_text(&mut self, text: &str);
    /// Game mode: show one packed byte per column.
    fn set_mode_fixed_packed(&mut self, buf: &DisplayBuf);
}

pub trait Transport {
    /// Enqueue bytes for the peer's `dest` endpoint. Fire-and-forget.
    fn queue_data_for_tx(&mut self, data: &[u8], dest: RecvId);
    /// Route inbound packets for `dest` to `app`. One handler per endpoint.
    fn set_on_packet_arrive(&mut self, dest: RecvId, app: AppId);
    fn clear_on_packet_arrive(&mut self, dest: RecvId);
    /// Push up to `budget` queued bytes out immediately.
    fn send_partial_data(&mut self, budget: usize);
}

pub trait Shell {
    /// Move input focus to `target`.
    fn change_app(&mut self, target: AppId);
    /// Return focus to the menu if `current` still has it.
    fn back_to_menu(&mut self, current: AppId);
    /// Score the score display app shows next time it gains focus.
    fn set_show_score(&mut self, score: u32);
}

pub trait ScoreLedger {
    fn mark_score(&mut self, game: GameScoreType, score: u32);
}

/// Everything an app may call.
pub trait Platform:
    Clock + RandomSource + Scheduler + Display + Transport + Shell + ScoreLedger
{
}

impl<T> Platform for T where
    T: Clock + RandomSource + Scheduler + Display + Transport + Shell + ScoreLedger + ?Sized
{
}
