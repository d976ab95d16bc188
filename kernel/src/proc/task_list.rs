use log::{debug, info, warn};
use syscall::{Entry, StackRegion};

use super::{Context, SlotId, SpawnError, Task, MAX_TASKS};

/// What a yield should do, decided by [`TaskList::pick_next`].
pub enum Next {
    /// Keep running the current task.
    Stay,
    /// Save the running task into `from` and resume `to`.
    Switch {
        from: *mut Context,
        to:   *const Context,
    },
    /// The task in `slot` has exited and nothing else is ready.
    Starved { slot: SlotId },
}

/// The task table and its round-robin scheduler.
pub struct TaskList {
    tasks:     [Task; MAX_TASKS],
    current:   Option<SlotId>,
    /// Receives the outgoing cursor of an exiting task, so its freed
    /// slot stays free.
    graveyard: Context,
}

impl TaskList {
    pub const fn new() -> Self {
        TaskList {
            tasks:     [Task::FREE; MAX_TASKS],
            current:   None,
            graveyard: Context::empty(),
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// The slot of the running task, `None` before the first dispatch.
    pub fn current(&self) -> Option<SlotId> {
        self.current
    }

    pub fn current_entry(&self) -> Option<Entry> {
        self.current.and_then(|id| self.tasks[id].entry)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_ready()).count()
    }

    pub fn is_running(&self, entry: Entry) -> bool {
        self.tasks
            .iter()
            .any(|task| task.is_ready() && task.started_from(entry))
    }

    /// Registers a task that starts by calling `start(arg)` on `stack`.
    ///
    /// A free slot last used by the same `entry` is preferred, otherwise
    /// the first free slot is taken. Nothing is modified on failure.
    ///
    /// # Safety
    ///
    /// `stack` must stay valid while the task is registered and must not
    /// back another registered task.
    pub unsafe fn spawn(
        &mut self,
        entry: Entry,
        stack: StackRegion,
        start: extern "C" fn(usize) -> !,
        arg: usize,
    ) -> Result<SlotId, SpawnError> {
        let slot = self
            .tasks
            .iter()
            .position(|task| task.is_free() && task.started_from(entry))
            .or_else(|| self.tasks.iter().position(Task::is_free));

        let Some(slot) = slot else {
            warn!("proc: task table is full ({} slots)", MAX_TASKS);
            return Err(SpawnError::NoFreeSlot);
        };

        let context = Context::seed(stack, start, arg)?;
        self.tasks[slot] = Task {
            context,
            entry: Some(entry),
            stack: Some(stack),
        };

        info!(
            "proc: spawned task in slot {} (stack {:#x}, {} bytes)",
            slot,
            stack.base() as usize,
            stack.size()
        );
        Ok(slot)
    }

    /// Selects the first occupied slot as the running task.
    ///
    /// Returns the context to switch into from the boot context.
    pub fn dispatch(&mut self) -> Option<(SlotId, *const Context)> {
        let slot = self.tasks.iter().position(Task::is_ready)?;
        self.current = Some(slot);
        Some((slot, &self.tasks[slot].context))
    }

    /// Frees the slot of the running task, which is never resumed again.
    pub fn vacate_current(&mut self) -> Option<SlotId> {
        let slot = self.current?;
        self.tasks[slot].context = Context::empty();
        debug!("proc: slot {} vacated", slot);
        Some(slot)
    }

    /// Round-robin selection for a yield.
    ///
    /// Scans the table cyclically from the slot after the current one
    /// and stops at the first occupied slot. `current` is moved to that
    /// slot before the switch happens.
    pub fn pick_next(&mut self) -> Next {
        let Some(current) = self.current else {
            return Next::Stay;
        };

        let next = (1..=MAX_TASKS)
            .map(|offset| (current + offset) % MAX_TASKS)
            .find(|&slot| self.tasks[slot].is_ready());

        match next {
            Some(next) if next == current => Next::Stay,
            Some(next) => {
                let from: *mut Context = if self.tasks[current].is_free() {
                    &mut self.graveyard
                } else {
                    &mut self.tasks[current].context
                };
                self.current = Some(next);
                debug!("sched: switching from slot {} to slot {}", current, next);
                Next::Switch {
                    from,
                    to: &self.tasks[next].context,
                }
            }
            None => Next::Starved { slot: current },
        }
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
