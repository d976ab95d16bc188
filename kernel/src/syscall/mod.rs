//! The system call boundary.
//!
//! Every request of a task arrives here as a number and four machine
//! words, the same shape a trap handler would hand over. Typed kernel
//! errors are turned into the negative codes of the `syscall` crate at
//! this point and nowhere else.

use core::{slice, str};

use fs::FsError;
use log::{trace, warn};
use syscall::*;

use crate::{
    kernel::{self, Kernel},
    proc::SpawnError,
};

/// Serves system call `id` for the running task.
///
/// Pointer and length pairs are decoded from `args`, lengths are read as
/// signed values.
///
/// # Safety
///
/// `kernel` must point to a live kernel. Pointer arguments must be
/// valid for their lengths. Yield and exit switch stacks, so those two
/// may only be issued by a task of that kernel.
pub unsafe fn dispatch(kernel: *mut Kernel, id: usize, args: [usize; 4]) -> isize {
    trace!("syscall: id={} args={:x?}", id, args);
    match id {
        SYSCALL_WRITE => match bytes(args[0], args[1]) {
            Ok(text) => (*kernel).console.write(text) as isize,
            Err(code) => code,
        },
        SYSCALL_GETC => (*kernel).console.getc() as isize,
        SYSCALL_YIELD => {
            kernel::yield_now(kernel);
            0
        }
        SYSCALL_EXIT => kernel::exit_current(kernel),
        SYSCALL_CLEAR => {
            (*kernel).console.clear();
            0
        }
        SYSCALL_LIST_FILES => match bytes_mut(args[0], args[1]) {
            Ok(buf) => fs_result((*kernel).files.list(buf)),
            Err(code) => code,
        },
        SYSCALL_READ_FILE => match (name(args[0], args[1]), bytes_mut(args[2], args[3])) {
            (Ok(name), Ok(buf)) => fs_result((*kernel).files.read(name, buf)),
            (Err(code), _) | (_, Err(code)) => code,
        },
        SYSCALL_WRITE_FILE => match (name(args[0], args[1]), bytes(args[2], args[3])) {
            (Ok(name), Ok(data)) => fs_result((*kernel).files.write(name, data).map(|()| 0)),
            (Err(code), _) | (_, Err(code)) => code,
        },
        SYSCALL_DELETE_FILE => match name(args[0], args[1]) {
            Ok(name) => fs_result((*kernel).files.delete(name).map(|()| 0)),
            Err(code) => code,
        },
        SYSCALL_SPAWN => match (entry(args[0]), stack(args[1], args[2])) {
            (Some(entry), Ok(stack)) => match (*kernel).spawn(entry, stack) {
                Ok(slot) => slot as isize,
                Err(SpawnError::NoFreeSlot) => E_NO_FREE_SLOT,
                Err(SpawnError::StackTooSmall { .. }) => E_INVALID,
            },
            (None, _) => E_INVALID,
            (_, Err(code)) => code,
        },
        SYSCALL_IS_RUNNING => match entry(args[0]) {
            Some(entry) => (*kernel).tasks.is_running(entry) as isize,
            None => E_INVALID,
        },
        _ => {
            warn!("syscall: unsupported id {}", id);
            E_NO_SYS
        }
    }
}

fn fs_result(result: Result<usize, FsError>) -> isize {
    match result {
        Ok(len) => len as isize,
        Err(FsError::NotFound) => E_NOT_FOUND,
        Err(FsError::BufferTooSmall) => E_TOO_SMALL,
        Err(FsError::InvalidArgument) => E_INVALID,
        Err(FsError::NameTooLong) => E_NAME_TOO_LONG,
        Err(FsError::DataTooLarge) => E_DATA_TOO_LARGE,
        Err(FsError::NoFreeSlot) => E_NO_FREE_SLOT,
    }
}

unsafe fn bytes<'a>(ptr: usize, len: usize) -> Result<&'a [u8], isize> {
    match checked_len(ptr, len)? {
        0 => Ok(&[]),
        len => Ok(slice::from_raw_parts(ptr as *const u8, len)),
    }
}

unsafe fn bytes_mut<'a>(ptr: usize, len: usize) -> Result<&'a mut [u8], isize> {
    match checked_len(ptr, len)? {
        0 => Ok(&mut []),
        len => Ok(slice::from_raw_parts_mut(ptr as *mut u8, len)),
    }
}

unsafe fn name<'a>(ptr: usize, len: usize) -> Result<&'a str, isize> {
    str::from_utf8(bytes(ptr, len)?).map_err(|_| E_INVALID)
}

fn checked_len(ptr: usize, len: usize) -> Result<usize, isize> {
    match len as isize {
        len if len < 0 => Err(E_INVALID),
        len if len > 0 && ptr == 0 => Err(E_INVALID),
        len => Ok(len as usize),
    }
}

/// A stack must be non-null and must not wrap the address space.
unsafe fn stack(base: usize, len: usize) -> Result<StackRegion, isize> {
    let size = checked_len(base, len)?;
    if base == 0 || base.checked_add(size).is_none() {
        return Err(E_INVALID);
    }
    Ok(StackRegion::from_raw_parts(base as *mut u8, size))
}

fn entry(raw: usize) -> Option<Entry> {
    // SAFETY: `raw` was produced from an `Entry` by `Sys`, function
    // pointers are address sized and never null.
    (raw != 0).then(|| unsafe { core::mem::transmute::<usize, Entry>(raw) })
}

/// The system call handle given to every task of a kernel.
pub struct Sys {
    kernel: *mut Kernel,
}

impl Sys {
    pub(crate) fn new(kernel: *mut Kernel) -> Self {
        Self { kernel }
    }

    fn call(&mut self, id: usize, args: [usize; 4]) -> isize {
        unsafe { dispatch(self.kernel, id, args) }
    }
}

impl Syscalls for Sys {
    fn write(&mut self, text: &str) -> isize {
        self.call(SYSCALL_WRITE, [text.as_ptr() as usize, text.len(), 0, 0])
    }

    fn getc(&mut self) -> u8 {
        self.call(SYSCALL_GETC, [0; 4]) as u8
    }

    fn yield_now(&mut self) {
        self.call(SYSCALL_YIELD, [0; 4]);
    }

    fn exit(&mut self) -> ! {
        self.call(SYSCALL_EXIT, [0; 4]);
        unreachable!("exit returned")
    }

    fn clear_screen(&mut self) {
        self.call(SYSCALL_CLEAR, [0; 4]);
    }

    fn list_files(&mut self, buf: &mut [u8]) -> isize {
        self.call(SYSCALL_LIST_FILES, [buf.as_mut_ptr() as usize, buf.len(), 0, 0])
    }

    fn read_file(&mut self, name: &str, buf: &mut [u8]) -> isize {
        self.call(
            SYSCALL_READ_FILE,
            [
                name.as_ptr() as usize,
                name.len(),
                buf.as_mut_ptr() as usize,
                buf.len(),
            ],
        )
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> isize {
        self.call(
            SYSCALL_WRITE_FILE,
            [
                name.as_ptr() as usize,
                name.len(),
                data.as_ptr() as usize,
                data.len(),
            ],
        )
    }

    fn delete_file(&mut self, name: &str) -> isize {
        self.call(SYSCALL_DELETE_FILE, [name.as_ptr() as usize, name.len(), 0, 0])
    }

    unsafe fn spawn(&mut self, entry: Entry, stack: StackRegion) -> isize {
        self.call(
            SYSCALL_SPAWN,
            [entry as *const () as usize, stack.base() as usize, stack.size(), 0],
        )
    }

    fn is_running(&mut self, entry: Entry) -> bool {
        self.call(SYSCALL_IS_RUNNING, [entry as *const () as usize, 0, 0, 0]) == 1
    }
}
