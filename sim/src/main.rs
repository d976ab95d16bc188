//! Runs the kernel on the host: stdin is the keyboard, stdout the screen.
//!
//! ```text
//! $ printf 'calc\nadd 2 40\nquit\n' | coop-sim
//! ```

use std::{
    io::{self, ErrorKind, Read, Stdin, Stdout, Write},
    process,
};

use anyhow::{Context, Result};
use coop_os::{Keyboard, Kernel, Screen};
use log::{error, info};
use syscall::TaskStack;

const SHELL_STACK_SIZE: usize = 64 * 1024;

static SHELL_STACK: TaskStack<SHELL_STACK_SIZE> = TaskStack::new();

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

struct Terminal(Stdout);

impl Screen for Terminal {
    fn put_byte(&mut self, byte: u8) {
        if let Err(err) = self.0.write_all(&[byte]) {
            lost_stdout(err);
        }
    }

    fn clear(&mut self) {
        if let Err(err) = self.0.write_all(b"\x1b[2J\x1b[H").and_then(|()| self.0.flush()) {
            lost_stdout(err);
        }
    }
}

/// Blocks on stdin, so a task waiting for a key never spins.
struct Keys(Stdin);

impl Keyboard for Keys {
    fn poll(&mut self) -> Option<u8> {
        if let Err(err) = io::stdout().flush() {
            lost_stdout(err);
        }

        let mut byte = [0u8];
        loop {
            match self.0.read(&mut byte) {
                Ok(0) => shut_down(),
                Ok(_) => match byte[0] {
                    b'\r' => continue,
                    DELETE => return Some(BACKSPACE),
                    byte => return Some(byte),
                },
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    error!("coop-sim: reading stdin failed: {}", err);
                    process::exit(2);
                }
            }
        }
    }
}

/// The screen is gone, so is the session.
fn lost_stdout(err: io::Error) -> ! {
    error!("coop-sim: writing stdout failed: {}", err);
    process::exit(2)
}

/// End of input ends the session.
fn shut_down() -> ! {
    let _ = io::stdout().flush();
    info!("coop-sim: end of input");
    process::exit(0)
}

fn main() -> Result<()> {
    env_logger::init();

    let screen = Box::leak(Box::new(Terminal(io::stdout())));
    let keyboard = Box::leak(Box::new(Keys(io::stdin())));
    let kernel = Box::leak(Box::new(Kernel::new(screen, keyboard)));

    info!("coop-sim: booting the shell");
    // SAFETY: the stack is static and the kernel is leaked, neither moves.
    let halt = unsafe { kernel.run(user_lib::shell, SHELL_STACK.region()) }
        .context("failed to boot the shell")?;

    io::stdout().flush()?;
    eprintln!("coop-sim: {}", halt);
    process::exit(1)
}
