//! Device drivers behind the console traits, plus the serial port the
//! logger writes to.

pub mod vga;

#[cfg(target_arch = "x86_64")]
mod port;
#[cfg(target_arch = "x86_64")]
pub mod ps2;
#[cfg(target_arch = "x86_64")]
pub mod serial;
