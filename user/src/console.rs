use core::fmt::{self, Write};

use syscall::Syscalls;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Formatting adapter over the write system call.
pub struct Stdout<'a>(pub &'a mut dyn Syscalls);

impl Write for Stdout<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s);
        Ok(())
    }
}

pub fn print(sys: &mut dyn Syscalls, args: fmt::Arguments) {
    let _ = Stdout(sys).write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($sys:expr, $fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print($sys, format_args!($fmt $(, $($arg)+)?))
    }
}

#[macro_export]
macro_rules! println {
    ($sys:expr, $fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print($sys, format_args!(concat!($fmt, "\n") $(, $($arg)+)?))
    }
}

/// Reads one line into `buf`, echoing it as it is typed.
///
/// Backspace removes the last character. Only printable ASCII is kept,
/// input past the end of `buf` is dropped. The newline is not part of
/// the result.
pub fn read_line<'a>(sys: &mut dyn Syscalls, buf: &'a mut [u8]) -> &'a str {
    let mut len = 0;
    loop {
        match sys.getc() {
            b'\n' => {
                sys.write("\n");
                break;
            }
            BACKSPACE | DELETE => {
                if len > 0 {
                    len -= 1;
                    sys.write("\x08 \x08");
                }
            }
            byte @ 0x20..=0x7e if len < buf.len() => {
                buf[len] = byte;
                len += 1;
                sys.write(char_str(&[byte]));
            }
            _ => {}
        }
    }
    char_str(&buf[..len])
}

/// Writes `bytes` as text, each invalid UTF-8 sequence shown as U+FFFD.
pub fn write_lossy(sys: &mut dyn Syscalls, bytes: &[u8]) {
    for chunk in bytes.utf8_chunks() {
        sys.write(chunk.valid());
        if !chunk.invalid().is_empty() {
            sys.write(char::REPLACEMENT_CHARACTER.encode_utf8(&mut [0; 4]));
        }
    }
}

/// Bytes known to be printable ASCII as `&str`.
pub(crate) fn char_str(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or_default()
}
