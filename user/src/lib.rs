//! Applications hosted by the kernel.
//!
//! Every application is an `Entry`: it only ever talks to the kernel
//! through the `Syscalls` handle it is started with.
#![cfg_attr(not(test), no_std)]

pub use self::{calc::calc, edit::edit, shell::shell};

#[macro_use]
pub mod console;

pub mod calc;
pub mod edit;
pub mod shell;
