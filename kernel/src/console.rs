use core::{
    fmt::{self, Write},
    hint::spin_loop,
};

use log::warn;

/// The most bytes a single write call puts on the screen.
pub const MAX_WRITE_LEN: usize = 1024;

/// An output device that renders bytes.
pub trait Screen {
    fn put_byte(&mut self, byte: u8);
    fn clear(&mut self);
}

/// An input device that has already translated key presses to bytes.
pub trait Keyboard {
    /// Returns the next pending byte, never waits.
    fn poll(&mut self) -> Option<u8>;
}

/// Arbitrates the screen and the keyboard between tasks.
///
/// Only the running task reaches the console, so requests are simply
/// served in the order they arrive.
pub struct Console {
    screen:   &'static mut dyn Screen,
    keyboard: &'static mut dyn Keyboard,
}

impl Console {
    pub fn new(screen: &'static mut dyn Screen, keyboard: &'static mut dyn Keyboard) -> Self {
        Self { screen, keyboard }
    }

    /// Puts at most `MAX_WRITE_LEN` bytes on the screen, returns how
    /// many were written.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let len = bytes.len().min(MAX_WRITE_LEN);
        if len < bytes.len() {
            warn!(
                "console: write of {} bytes truncated to {}",
                bytes.len(),
                MAX_WRITE_LEN
            );
        }

        for &byte in &bytes[..len] {
            self.screen.put_byte(byte);
        }
        len
    }

    /// Waits for the next key.
    ///
    /// This spins in the calling task without yielding, so every other
    /// task is starved until a key arrives.
    pub fn getc(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.keyboard.poll() {
                return byte;
            }
            spin_loop();
        }
    }

    pub fn clear(&mut self) {
        self.screen.clear();
    }
}

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for chunk in s.as_bytes().chunks(MAX_WRITE_LEN) {
            self.write(chunk);
        }
        Ok(())
    }
}
