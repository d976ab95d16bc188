//! Polled PS/2 keyboard.

use super::port::inb;
use crate::console::Keyboard;

const DATA_PORT: u16 = 0x60;
const STATUS_PORT: u16 = 0x64;

const OUTPUT_FULL: u8 = 0x01;
const RELEASED: u8 = 0x80;

const LEFT_SHIFT: u8 = 0x2a;
const RIGHT_SHIFT: u8 = 0x36;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;

/// Scancode set 1 keyboard on the legacy controller ports.
pub struct Ps2Keyboard {
    shift: bool,
}

impl Ps2Keyboard {
    /// # Safety
    ///
    /// The caller must own the keyboard controller.
    pub const unsafe fn new() -> Self {
        Self { shift: false }
    }

    /// Turns one scancode into a byte, tracking the shift keys.
    ///
    /// Releases and keys without a byte give `None`.
    pub fn translate(&mut self, scancode: u8) -> Option<u8> {
        match scancode {
            LEFT_SHIFT | RIGHT_SHIFT => {
                self.shift = true;
                return None;
            }
            code if code == LEFT_SHIFT | RELEASED || code == RIGHT_SHIFT | RELEASED => {
                self.shift = false;
                return None;
            }
            code if code & RELEASED != 0 => return None,
            _ => {}
        }

        let byte = plain(scancode)?;
        Some(match byte {
            b'a'..=b'z' if self.shift => byte.to_ascii_uppercase(),
            _ if self.shift => shifted(byte),
            _ => byte,
        })
    }
}

impl Keyboard for Ps2Keyboard {
    fn poll(&mut self) -> Option<u8> {
        // SAFETY: the controller is owned by this driver.
        let scancode = unsafe {
            if inb(STATUS_PORT) & OUTPUT_FULL == 0 {
                return None;
            }
            inb(DATA_PORT)
        };
        self.translate(scancode)
    }
}

fn plain(scancode: u8) -> Option<u8> {
    const DIGITS: &[u8] = b"1234567890";
    const TOP: &[u8] = b"qwertyuiop";
    const HOME: &[u8] = b"asdfghjkl";
    const BOTTOM: &[u8] = b"zxcvbnm";

    let byte = match scancode {
        0x01 => ESC,
        0x02..=0x0b => DIGITS[(scancode - 0x02) as usize],
        0x0c => b'-',
        0x0d => b'=',
        0x0e => BACKSPACE,
        0x10..=0x19 => TOP[(scancode - 0x10) as usize],
        0x1c => b'\n',
        0x1e..=0x26 => HOME[(scancode - 0x1e) as usize],
        0x2c..=0x32 => BOTTOM[(scancode - 0x2c) as usize],
        0x33 => b',',
        0x34 => b'.',
        0x35 => b'/',
        0x37 => b'*',
        0x39 => b' ',
        0x4a => b'-',
        0x4e => b'+',
        0x53 => b'.',
        _ => return None,
    };
    Some(byte)
}

/// US layout.
fn shifted(byte: u8) -> u8 {
    match byte {
        b'1' => b'!',
        b'2' => b'@',
        b'3' => b'#',
        b'4' => b'$',
        b'5' => b'%',
        b'6' => b'^',
        b'7' => b'&',
        b'8' => b'*',
        b'9' => b'(',
        b'0' => b')',
        b'-' => b'_',
        b'=' => b'+',
        b',' => b'<',
        b'.' => b'>',
        b'/' => b'?',
        byte => byte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> Ps2Keyboard {
        unsafe { Ps2Keyboard::new() }
    }

    fn type_codes(keyboard: &mut Ps2Keyboard, codes: &[u8]) -> Vec<u8> {
        codes.iter().filter_map(|&code| keyboard.translate(code)).collect()
    }

    #[test]
    fn make_codes_become_bytes() {
        let mut keyboard = keyboard();
        // "add 2 40" then Enter, each key pressed and released.
        let codes = [
            0x1e, 0x9e, 0x20, 0xa0, 0x20, 0xa0, 0x39, 0xb9, 0x03, 0x83, 0x39, 0xb9, 0x05, 0x85,
            0x0b, 0x8b, 0x1c, 0x9c,
        ];

        assert_eq!(type_codes(&mut keyboard, &codes), b"add 2 40\n");
    }

    #[test]
    fn shift_applies_while_held() {
        let mut keyboard = keyboard();
        let codes = [0x2a, 0x23, 0x02, 0xaa, 0x23, 0x36, 0x35, 0xb6, 0x35];

        assert_eq!(type_codes(&mut keyboard, &codes), b"H!h?/");
    }

    #[test]
    fn editing_keys() {
        let mut keyboard = keyboard();

        assert_eq!(keyboard.translate(0x01), Some(ESC));
        assert_eq!(keyboard.translate(0x0e), Some(BACKSPACE));
        assert_eq!(keyboard.translate(0x81), None);
    }

    #[test]
    fn unmapped_codes_are_dropped() {
        let mut keyboard = keyboard();

        for code in [0x00, 0x0f, 0x1d, 0x38, 0x3b, 0x7f] {
            assert_eq!(keyboard.translate(code), None, "{:#x}", code);
        }
    }
}
