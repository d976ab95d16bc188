//! The system call surface shared by the kernel and hosted tasks.
//!
//! Tasks never touch scheduler, console or file state directly. Every
//! request goes through one of the numbered calls below, and every
//! failure comes back as one of the negative result codes.
#![no_std]

pub use self::stack::{StackRegion, TaskStack};

mod stack;

pub const SYSCALL_GETC: usize = 63;
pub const SYSCALL_WRITE: usize = 64;
pub const SYSCALL_EXIT: usize = 93;
pub const SYSCALL_YIELD: usize = 124;
pub const SYSCALL_SPAWN: usize = 220;
pub const SYSCALL_CLEAR: usize = 500;
pub const SYSCALL_LIST_FILES: usize = 501;
pub const SYSCALL_READ_FILE: usize = 502;
pub const SYSCALL_WRITE_FILE: usize = 503;
pub const SYSCALL_DELETE_FILE: usize = 504;
pub const SYSCALL_IS_RUNNING: usize = 505;

/// No file with the given name.
pub const E_NOT_FOUND: isize = -1;
/// The caller's buffer cannot hold the result.
pub const E_TOO_SMALL: isize = -2;
/// Null pointer, negative length or malformed argument.
pub const E_INVALID: isize = -3;
pub const E_NAME_TOO_LONG: isize = -4;
pub const E_DATA_TOO_LARGE: isize = -5;
/// The file table or the task table is full.
pub const E_NO_FREE_SLOT: isize = -6;
/// Unknown system call number.
pub const E_NO_SYS: isize = -38;

/// The entry procedure of a task.
///
/// A task receives the system call handle of the kernel that runs it.
/// Returning from the entry is the same as calling [`Syscalls::exit`].
pub type Entry = fn(&mut dyn Syscalls);

/// Calls available to a running task.
///
/// File calls return a byte count (or `0`) on success and one of the
/// `E_*` codes on failure.
pub trait Syscalls {
    /// Appends text to the display, returns the number of bytes written.
    fn write(&mut self, text: &str) -> isize;

    /// Waits for one character from the keyboard.
    ///
    /// The wait spins inside the calling task: no other task runs until
    /// a key arrives.
    fn getc(&mut self) -> u8;

    /// Gives the processor to the next ready task.
    fn yield_now(&mut self);

    /// Terminates the calling task.
    fn exit(&mut self) -> !;

    fn clear_screen(&mut self);

    /// Writes the names of all files into `buf`, one per line.
    fn list_files(&mut self, buf: &mut [u8]) -> isize;

    fn read_file(&mut self, name: &str, buf: &mut [u8]) -> isize;

    fn write_file(&mut self, name: &str, data: &[u8]) -> isize;

    fn delete_file(&mut self, name: &str) -> isize;

    /// Registers a new task, returns its slot or a negative code.
    ///
    /// # Safety
    ///
    /// `stack` must stay valid for the lifetime of the task and must not
    /// back any other task that is still registered.
    unsafe fn spawn(&mut self, entry: Entry, stack: StackRegion) -> isize;

    /// Whether a registered task was started from `entry`.
    fn is_running(&mut self, entry: Entry) -> bool;
}
