//! Line-based editor over the file store.

use syscall::{Syscalls, TaskStack, E_NOT_FOUND, E_TOO_SMALL};

use crate::console::{char_str, read_line, write_lossy};

pub const EDIT_STACK_SIZE: usize = 64 * 1024;

pub static EDIT_STACK: TaskStack<EDIT_STACK_SIZE> = TaskStack::new();

/// Capacity of the edit buffer, the size of the largest file.
pub const EDIT_BUFFER_SIZE: usize = 512;

/// Longer names are truncated to this many bytes.
const MAX_NAME_LEN: usize = 15;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// The file being edited, kept entirely in the task.
struct Buffer {
    text: [u8; EDIT_BUFFER_SIZE],
    len:  usize,
    name: [u8; MAX_NAME_LEN],
    /// Zero when no file is open.
    name_len: usize,
}

impl Buffer {
    fn new() -> Self {
        Self {
            text:     [0; EDIT_BUFFER_SIZE],
            len:      0,
            name:     [0; MAX_NAME_LEN],
            name_len: 0,
        }
    }

    fn name(&self) -> Option<&str> {
        (self.name_len > 0).then(|| char_str(&self.name[..self.name_len]))
    }

    fn set_name(&mut self, name: &str) {
        let mut len = name.len().min(MAX_NAME_LEN);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        self.name[..len].copy_from_slice(&name.as_bytes()[..len]);
        self.name_len = len;
    }

    fn close(&mut self) {
        self.len = 0;
        self.name_len = 0;
    }
}

pub fn edit(sys: &mut dyn Syscalls) {
    println!(sys, "Editor (in-memory files)");
    println!(
        sys,
        "Commands: list, new <fn>, open <fn>, edit, save [fn], delete <fn>, quit"
    );

    let mut buffer = Buffer::new();
    let mut line = [0u8; 64];
    loop {
        match buffer.name() {
            Some(name) => print!(sys, "edit [{}]# ", name),
            None => print!(sys, "edit# "),
        }

        let line = read_line(sys, &mut line);
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match (command, argument) {
            ("quit", _) => {
                println!(sys, "Exiting editor...");
                sys.exit();
            }
            ("list", _) => list(sys),
            ("new", "") => println!(sys, "Usage: new <filename>"),
            ("new", name) => {
                buffer.close();
                buffer.set_name(name);
                println!(
                    sys,
                    "New file '{}' in buffer. Use 'edit', then 'save'.",
                    buffer.name().unwrap_or_default()
                );
            }
            ("open", "") => println!(sys, "Usage: open <filename>"),
            ("open", name) => open(sys, &mut buffer, name),
            ("edit", _) if buffer.name().is_none() => {
                println!(sys, "No file. Use 'new <fn>' or 'open <fn>' first.")
            }
            ("edit", _) => edit_text(sys, &mut buffer),
            ("save", name) => save(sys, &mut buffer, name),
            ("delete", "") => println!(sys, "Usage: delete <filename>"),
            ("delete", name) => {
                if sys.delete_file(name) == 0 {
                    println!(sys, "File '{}' deleted.", name);
                    if buffer.name() == Some(name) {
                        buffer.close();
                    }
                } else {
                    println!(sys, "Error deleting '{}'. Not found?", name);
                }
            }
            ("", _) => {}
            (command, _) => println!(sys, "Unknown command: '{}'.", command),
        }
    }
}

fn list(sys: &mut dyn Syscalls) {
    let mut listing = [0u8; 5 * 16];
    match sys.list_files(&mut listing) {
        0 => println!(sys, "No files found."),
        len if len > 0 => {
            println!(sys, "Files:");
            write_lossy(sys, &listing[..len as usize]);
        }
        _ => println!(sys, "Error listing files."),
    }
}

fn open(sys: &mut dyn Syscalls, buffer: &mut Buffer, name: &str) {
    buffer.close();
    match sys.read_file(name, &mut buffer.text) {
        len if len >= 0 => {
            buffer.len = len as usize;
            buffer.set_name(name);
            println!(
                sys,
                "File '{}' opened ({} bytes).\nUse 'edit' to modify/view.",
                name,
                len
            );
        }
        E_NOT_FOUND => println!(sys, "Error: File '{}' not found.", name),
        E_TOO_SMALL => println!(
            sys,
            "Error: Buffer too small for '{}'. File exceeds editor capacity.",
            name
        ),
        _ => println!(sys, "Error reading file."),
    }
}

fn save(sys: &mut dyn Syscalls, buffer: &mut Buffer, name: &str) {
    if !name.is_empty() {
        buffer.set_name(name);
    }
    let Some(name) = buffer.name() else {
        println!(
            sys,
            "Usage: save <filename> (or open/new a file first to save without filename argument)"
        );
        return;
    };

    match sys.write_file(name, &buffer.text[..buffer.len]) {
        0 => println!(sys, "File '{}' saved ({} bytes).", name, buffer.len),
        code => println!(sys, "Error saving file '{}'. Code: {}.", name, code),
    }
}

/// Appends typed text to the buffer until ESC.
fn edit_text(sys: &mut dyn Syscalls, buffer: &mut Buffer) {
    println!(sys, "--- Text Edit Mode (Press ESC to finish) ---");
    // Bytes are kept as read, only the view is lossy.
    write_lossy(sys, &buffer.text[..buffer.len]);

    while buffer.len < EDIT_BUFFER_SIZE {
        match sys.getc() {
            ESC => break,
            BACKSPACE | DELETE => {
                if buffer.len > 0 {
                    buffer.len -= 1;
                    sys.write("\x08 \x08");
                }
            }
            byte @ (b'\n' | 0x20..=0x7e) => {
                buffer.text[buffer.len] = byte;
                buffer.len += 1;
                sys.write(char_str(&[byte]));
            }
            _ => {}
        }
    }

    if buffer.len == EDIT_BUFFER_SIZE {
        println!(
            sys,
            "\nWarning: Edit buffer is full. Some input may have been lost."
        );
    }
    println!(sys, "\n--- Exiting Text Edit Mode ---");
}
