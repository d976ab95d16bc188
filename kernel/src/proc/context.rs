use syscall::StackRegion;

use super::{task_trampoline, SpawnError, MIN_STACK_SIZE};

/// The saved execution cursor of a suspended task.
///
/// Only the stack pointer is kept here. `switch_to` pushes the
/// callee-saved registers and the return address onto the task's own
/// stack before saving the pointer, caller-saved registers are saved
/// by the compiler around the call (if needed).
///
/// An empty context (null stack pointer) marks a free task slot.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    sp: usize,
}

impl Context {
    pub const fn empty() -> Self {
        Self { sp: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Builds the initial stack image of a new task.
    ///
    /// The first `switch_to` into the returned context pops a zeroed
    /// register frame and returns into `task_trampoline`, which calls
    /// `start(arg)`. To `switch_to`, the very first entry looks just like
    /// any later resumption.
    ///
    /// # Safety
    ///
    /// `stack` must be writable and must not be in use by a running task.
    pub unsafe fn seed(
        stack: StackRegion,
        start: extern "C" fn(usize) -> !,
        arg: usize,
    ) -> Result<Self, SpawnError> {
        if stack.size() < MIN_STACK_SIZE {
            return Err(SpawnError::StackTooSmall { size: stack.size() });
        }

        let top = stack.top() & !0xf;
        let sp = top - FRAME_OFFSET;
        let frame = InitialFrame::new(
            start as *const () as usize,
            arg,
            task_trampoline as *const () as usize,
        );
        (sp as *mut InitialFrame).write(frame);

        Ok(Self { sp })
    }
}

/// The frame `switch_to` pops when it resumes a task.
///
/// The layout mirrors the push order in `switch_x86_64.S`. On entry to
/// `task_trampoline` the stack pointer sits 16 bytes below the aligned
/// top, which keeps the SysV alignment for the `call` it makes.
#[cfg(target_arch = "x86_64")]
#[repr(C)]
struct InitialFrame {
    r15: usize,
    r14: usize,
    r13: usize,
    /// `start`, called by the trampoline.
    r12: usize,
    /// `arg`, moved into `rdi` by the trampoline.
    rbx: usize,
    rbp: usize,
    rip: usize,
}

#[cfg(target_arch = "x86_64")]
const FRAME_OFFSET: usize = 72;

#[cfg(target_arch = "x86_64")]
impl InitialFrame {
    fn new(start: usize, arg: usize, trampoline: usize) -> Self {
        Self {
            r15: 0,
            r14: 0,
            r13: 0,
            r12: start,
            rbx: arg,
            rbp: 0,
            rip: trampoline,
        }
    }
}

/// The frame `switch_to` pops when it resumes a task.
///
/// The layout mirrors the store order in `switch_riscv64.S`: `ra`
/// followed by `s0` ~ `s11`, padded to keep `sp` 16-byte aligned.
#[cfg(target_arch = "riscv64")]
#[repr(C)]
struct InitialFrame {
    ra:  usize,
    /// `s0` holds `start`, `s1` holds `arg`.
    s:   [usize; 12],
    pad: usize,
}

#[cfg(target_arch = "riscv64")]
const FRAME_OFFSET: usize = core::mem::size_of::<InitialFrame>();

#[cfg(target_arch = "riscv64")]
impl InitialFrame {
    fn new(start: usize, arg: usize, trampoline: usize) -> Self {
        let mut s = [0; 12];
        s[0] = start;
        s[1] = arg;
        Self {
            ra: trampoline,
            s,
            pad: 0,
        }
    }
}
