//! 16550 UART, used as the debug console.

use core::fmt::{self, Write};

use super::port::{inb, outb};

/// I/O base of the first serial port.
pub const COM1: u16 = 0x3f8;

const INTERRUPT_ENABLE: u16 = 1;
const FIFO_CONTROL: u16 = 2;
const LINE_CONTROL: u16 = 3;
const LINE_STATUS: u16 = 5;

/// Divisor latch access.
const DLAB: u8 = 0x80;
/// 8 data bits, no parity, one stop bit.
const LINE_8N1: u8 = 0x03;
const TRANSMIT_EMPTY: u8 = 0x20;

pub struct SerialPort {
    base: u16,
}

impl SerialPort {
    /// # Safety
    ///
    /// `base` must be the I/O base of a 16550 compatible UART.
    pub const unsafe fn new(base: u16) -> Self {
        Self { base }
    }

    /// 38400 baud, 8N1, FIFOs on, interrupts off.
    pub fn init(&mut self) {
        unsafe {
            outb(self.base + INTERRUPT_ENABLE, 0x00);
            outb(self.base + LINE_CONTROL, DLAB);
            outb(self.base, 0x03);
            outb(self.base + INTERRUPT_ENABLE, 0x00);
            outb(self.base + LINE_CONTROL, LINE_8N1);
            outb(self.base + FIFO_CONTROL, 0xc7);
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        unsafe {
            while inb(self.base + LINE_STATUS) & TRANSMIT_EMPTY == 0 {
                core::hint::spin_loop();
            }
            outb(self.base, byte);
        }
    }
}

impl Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}

/// A `logger::Sink` writing to COM1.
pub fn log_sink(args: fmt::Arguments) {
    // SAFETY: COM1 is reserved for log output.
    let _ = unsafe { SerialPort::new(COM1) }.write_fmt(args);
}
