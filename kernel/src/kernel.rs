//! The kernel proper: the task table, the file store and the console,
//! plus the entry and exit paths of every task.

use core::fmt::Write;

use fs::FileStore;
use log::{error, info};
use syscall::{Entry, StackRegion};
use thiserror::Error;

use crate::{
    console::{Console, Keyboard, Screen},
    proc::{switch_to, Context, Next, SlotId, SpawnError, TaskList},
    syscall::Sys,
};

/// Why the kernel stopped scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Halt {
    #[error("task in slot {slot} exited and no other task is ready")]
    Starved { slot: SlotId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BootError {
    #[error("{0} tasks are still registered")]
    Busy(usize),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

pub struct Kernel {
    pub(crate) tasks:   TaskList,
    pub(crate) files:   FileStore,
    pub(crate) console: Console,
    /// The cursor of whoever called `run`, resumed on halt.
    boot:               Context,
    halted:             Option<Halt>,
}

impl Kernel {
    pub fn new(screen: &'static mut dyn Screen, keyboard: &'static mut dyn Keyboard) -> Self {
        Self {
            tasks:   TaskList::new(),
            files:   FileStore::new(),
            console: Console::new(screen, keyboard),
            boot:    Context::empty(),
            halted:  None,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Registers a task that runs `entry` on `stack`.
    ///
    /// # Safety
    ///
    /// `stack` must stay valid while the task is registered, and `self`
    /// must not move once any task has been spawned.
    pub unsafe fn spawn(&mut self, entry: Entry, stack: StackRegion) -> Result<SlotId, SpawnError> {
        let arg = self as *mut Kernel as usize;
        self.tasks.spawn(entry, stack, task_main, arg)
    }

    /// Starts `init` as the first task and schedules until the kernel
    /// halts.
    ///
    /// The caller's own execution is parked in the boot context while
    /// tasks run, so this returns only once no task is left to run.
    ///
    /// # Safety
    ///
    /// `stack` must stay valid until this returns. Every stack a task
    /// spawns must as well.
    pub unsafe fn run(&mut self, init: Entry, stack: StackRegion) -> Result<Halt, BootError> {
        let occupied = self.tasks.occupied();
        if occupied != 0 {
            return Err(BootError::Busy(occupied));
        }
        self.halted = None;
        self.spawn(init, stack)?;

        if let Some((slot, first)) = self.tasks.dispatch() {
            info!("kernel: starting init task in slot {}", slot);
            switch_to(&mut self.boot, first);
        }

        // Back on the boot stack, a task halted the kernel.
        let halt = self.halted.take().unwrap_or(Halt::Starved { slot: 0 });
        info!("kernel: scheduler stopped: {}", halt);
        Ok(halt)
    }
}

/// Gives the processor to the next ready task, or keeps it.
///
/// # Safety
///
/// Must be called from a task of the kernel behind `kernel`.
pub(crate) unsafe fn yield_now(kernel: *mut Kernel) {
    match (*kernel).tasks.pick_next() {
        Next::Stay => {}
        Next::Switch { from, to } => switch_to(from, to),
        Next::Starved { slot } => halt(kernel, Halt::Starved { slot }),
    }
}

/// Frees the slot of the running task and schedules the next one.
///
/// # Safety
///
/// Must be called from a task of the kernel behind `kernel`.
pub(crate) unsafe fn exit_current(kernel: *mut Kernel) -> ! {
    if let Some(slot) = (*kernel).tasks.vacate_current() {
        info!("proc: task in slot {} exited", slot);
    }
    yield_now(kernel);
    unreachable!("an exited task was resumed")
}

unsafe fn halt(kernel: *mut Kernel, reason: Halt) -> ! {
    let kernel = &mut *kernel;
    error!("kernel: halted: {}", reason);
    let _ = writeln!(kernel.console, "kernel halted: {}", reason);
    kernel.halted = Some(reason);

    // The dying stack is never resumed.
    let mut last = Context::empty();
    switch_to(&mut last, &kernel.boot);
    unreachable!("the halted kernel was resumed")
}

/// First procedure of every task, called by the task trampoline.
extern "C" fn task_main(arg: usize) -> ! {
    let kernel = arg as *mut Kernel;
    unsafe {
        if let Some(entry) = (*kernel).tasks.current_entry() {
            entry(&mut Sys::new(kernel));
        }
        exit_current(kernel)
    }
}
