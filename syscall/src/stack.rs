use core::cell::UnsafeCell;

/// A raw memory region a task runs its stack in.
///
/// The kernel keeps no ownership of the region; the task creator is
/// responsible for keeping it alive while the task is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackRegion {
    base: *mut u8,
    size: usize,
}

impl StackRegion {
    /// # Safety
    ///
    /// `base..base + size` must be writable memory that outlives every
    /// task spawned on it. `base + size` must not wrap.
    pub const unsafe fn from_raw_parts(base: *mut u8, size: usize) -> Self {
        Self { base, size }
    }

    pub fn from_static(buf: &'static mut [u8]) -> Self {
        Self {
            base: buf.as_mut_ptr(),
            size: buf.len(),
        }
    }

    pub fn base(&self) -> *mut u8 {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the highest address of the region.
    pub fn top(&self) -> usize {
        self.base as usize + self.size
    }
}

/// Statically allocated stack memory for a task.
///
/// ```ignore
/// static CALC_STACK: TaskStack<{ 64 * 1024 }> = TaskStack::new();
/// ```
#[repr(C, align(16))]
pub struct TaskStack<const N: usize>(UnsafeCell<[u8; N]>);

// The memory is only reached through the `StackRegion` handed to spawn,
// and only the single running task touches it.
unsafe impl<const N: usize> Sync for TaskStack<N> {}

impl<const N: usize> TaskStack<N> {
    pub const fn new() -> Self {
        Self(UnsafeCell::new([0; N]))
    }

    pub fn region(&'static self) -> StackRegion {
        // SAFETY: the buffer is 'static.
        unsafe { StackRegion::from_raw_parts(self.0.get().cast(), N) }
    }
}

impl<const N: usize> Default for TaskStack<N> {
    fn default() -> Self {
        Self::new()
    }
}
