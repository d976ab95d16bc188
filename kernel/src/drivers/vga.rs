//! VGA text mode screen.
//!
//! The text buffer starts at physical address `0xb8000` and contains the
//! characters displayed on screen. It has 25 rows and 80 columns.
//! Each screen character has the following format:
//!
//! Bit(s) | Value
//! ------ | ----------------
//! 0-7    | ASCII code point
//! 8-11   | Foreground color
//! 12-14  | Background color
//! 15     | Blink

use volatile::Volatile;

use crate::console::Screen;

/// Physical address of the text buffer.
pub const VGA_ADDRESS: usize = 0xb8000;

pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code:      ColorCode,
}

/// The memory layout of the text buffer. Every access is volatile, the
/// writes have side effects the compiler cannot see.
#[repr(transparent)]
pub struct Buffer {
    chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// A cursor-based writer on a text buffer.
///
/// Wraps lines at `BUFFER_WIDTH` and scrolls once the cursor passes the
/// last row.
pub struct TextScreen {
    row:        usize,
    col:        usize,
    color_code: ColorCode,
    buffer:     &'static mut Buffer,
}

impl TextScreen {
    pub fn new(buffer: &'static mut Buffer, color_code: ColorCode) -> Self {
        Self {
            row: 0,
            col: 0,
            color_code,
            buffer,
        }
    }

    /// The screen of the running machine, white on black.
    ///
    /// # Safety
    ///
    /// The text buffer must be identity mapped and owned by the caller.
    pub unsafe fn vga() -> Self {
        Self::new(
            &mut *(VGA_ADDRESS as *mut Buffer),
            ColorCode::new(Color::White, Color::Black),
        )
    }

    /// `(row, column)` of the next glyph.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn char_at(&self, row: usize, col: usize) -> u8 {
        self.buffer.chars[row][col].read().ascii_character
    }

    fn new_line(&mut self) {
        self.col = 0;
        self.row += 1;
        if self.row >= BUFFER_HEIGHT {
            self.scroll();
            self.row = BUFFER_HEIGHT - 1;
        }
    }

    /// Shifts all lines one line up and clears the last row.
    fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let character = self.buffer.chars[row][col].read();
                self.buffer.chars[row - 1][col].write(character);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
    }

    fn clear_row(&mut self, row: usize) {
        let blank = self.glyph(b' ');
        for col in 0..BUFFER_WIDTH {
            self.buffer.chars[row][col].write(blank);
        }
    }

    fn glyph(&self, ascii_character: u8) -> ScreenChar {
        ScreenChar {
            ascii_character,
            color_code: self.color_code,
        }
    }
}

impl Screen for TextScreen {
    fn put_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            // Backspace only moves the cursor, "\b \b" erases.
            0x08 => self.col = self.col.saturating_sub(1),
            byte => {
                if self.col >= BUFFER_WIDTH {
                    self.new_line();
                }

                let glyph = match byte {
                    0x20..=0x7e => self.glyph(byte),
                    // not part of printable ASCII range
                    _ => self.glyph(0xfe),
                };
                self.buffer.chars[self.row][self.col].write(glyph);
                self.col += 1;
            }
        }
    }

    fn clear(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.row = 0;
        self.col = 0;
    }
}
