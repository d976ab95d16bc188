//! Cooperative tasks.
//!
//! A fixed table of `MAX_TASKS` slots holds every task. A task keeps the
//! processor until it yields or exits, there is no preemption. Because
//! only one task runs at a time and switches happen only at those two
//! call sites, the table needs no locking.

use core::arch::global_asm;

use thiserror::Error;

pub use self::{
    context::Context,
    task::{SlotId, Task},
    task_list::{Next, TaskList},
};

mod context;
mod task;
mod task_list;

#[cfg(all(target_arch = "x86_64", not(any(windows, target_os = "macos"))))]
global_asm!(include_str!("switch_x86_64.S"));

#[cfg(target_arch = "riscv64")]
global_asm!(include_str!("switch_riscv64.S"));

#[cfg(not(any(
    all(target_arch = "x86_64", not(any(windows, target_os = "macos"))),
    target_arch = "riscv64"
)))]
compile_error!("context switching is implemented for x86_64 (System V, ELF) and riscv64 only");

/// Number of task slots.
pub const MAX_TASKS: usize = 6;

/// The smallest stack a task may be spawned on.
pub const MIN_STACK_SIZE: usize = 1024;

extern "C" {
    /// Saves the callee-saved registers on the current stack, stores
    /// the stack pointer into `old` and resumes the task saved in `new`.
    #[link_name = "coop_switch_to"]
    pub fn switch_to(old: *mut Context, new: *const Context);

    /// The first return address of every new task.
    #[link_name = "coop_task_trampoline"]
    fn task_trampoline();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free task slot")]
    NoFreeSlot,
    #[error("stack of {size} bytes is too small")]
    StackTooSmall { size: usize },
}
