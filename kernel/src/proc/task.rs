use syscall::{Entry, StackRegion};

use super::Context;

/// Index of a slot in the task table.
pub type SlotId = usize;

/// One slot of the task table.
///
/// A slot with a non-empty context is either ready to resume or is the
/// running task; only the table's `current` index tells them apart.
#[derive(Clone, Copy)]
pub struct Task {
    pub context: Context,
    /// The entry of the last task placed in this slot. It survives exit,
    /// so relaunching the same entry lands in the same slot again.
    pub entry:   Option<Entry>,
    pub stack:   Option<StackRegion>,
}

impl Task {
    pub const FREE: Task = Task {
        context: Context::empty(),
        entry:   None,
        stack:   None,
    };

    pub fn is_free(&self) -> bool {
        self.context.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        !self.is_free()
    }

    /// Whether this slot was last used by `entry`.
    pub fn started_from(&self, entry: Entry) -> bool {
        self.entry.is_some_and(|own| same_entry(own, entry))
    }
}

/// Entries are compared by address.
pub(crate) fn same_entry(a: Entry, b: Entry) -> bool {
    a as *const () == b as *const ()
}
