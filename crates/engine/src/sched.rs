//! Cooperative periodic scheduler for the host emulator.
//!
//! Tasks are registered once and toggled with enable/disable. The run loop
//! asks for due tasks one at a time; each fires at most once per call with
//! the same `now`.

use arrayvec::ArrayVec;

use crate::error::SchedulerError;
use crate::platform::{PeriodicTask, Scheduler, TaskId};
use crate::types::{AppId, Tick};

pub const MAX_TASKS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Slot {
    task: PeriodicTask,
    enabled: bool,
    /// Freshly enabled: due on the next check.
    armed: bool,
    last_run: Tick,
}

#[derive(Debug, Default)]
pub struct CoopScheduler {
    slots: ArrayVec<Slot, MAX_TASKS>,
}

impl CoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, task: TaskId) -> bool {
        self.slots
            .get(task.0 as usize)
            .is_some_and(|slot| slot.enabled)
    }

    /// Highest-priority enabled task that is due at `now`, marking it run.
    pub fn next_due(&mut self, now: Tick) -> Option<(TaskId, AppId)> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| {
                slot.enabled
                    && (slot.armed || now.wrapping_sub(slot.last_run) >= slot.task.interval)
            })
            .max_by_key(|(_, slot)| slot.task.priority)?;
        slot.armed = false;
        slot.last_run = now;
        Some((TaskId(index as u8), slot.task.owner))
    }
}

impl Scheduler for CoopScheduler {
    fn queue(&mut self, task: PeriodicTask) -> Result<TaskId, SchedulerError> {
        if task.interval == 0 {
            return Err(SchedulerError::ZeroInterval);
        }
        let id = TaskId(self.slots.len() as u8);
        self.slots
            .try_push(Slot {
                task,
                enabled: false,
                armed: false,
                last_run: 0,
            })
            .map_err(|_| SchedulerError::Full {
                capacity: MAX_TASKS,
            })?;
        tracing::debug!(owner = task.owner.as_str(), task = id.0, "periodic task queued");
        Ok(id)
    }

    fn enable_periodic(&mut self, task: TaskId) {
        if let Some(slot) = self.slots.get_mut(task.0 as usize) {
            if !slot.enabled {
                slot.enabled = true;
                slot.armed = true;
            }
        }
    }

    fn disable_periodic(&mut self, task: TaskId) {
        if let Some(slot) = self.slots.get_mut(task.0 as usize) {
            slot.enabled = false;
            slot.armed = false;
        }
    }
}
