//! A cooperative single-core kernel.
//!
//! Tasks share one processor and switch only when they yield or exit.
//! The kernel owns a console (screen and keyboard) and a small
//! in-memory file store, both reached through system calls.
#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod drivers;
pub mod kernel;
pub mod logger;
pub mod proc;
pub mod syscall;

mod lang_items;

pub use self::{
    console::{Console, Keyboard, Screen, MAX_WRITE_LEN},
    kernel::{BootError, Halt, Kernel},
    proc::{SlotId, SpawnError, MAX_TASKS, MIN_STACK_SIZE},
    syscall::{dispatch, Sys},
};
