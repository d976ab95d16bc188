#![allow(dead_code)]

use std::{
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
};

use syscall::*;

/// Unwinds out of an app that called `exit`.
struct Exited;

/// Unwinds out of an app that waits for a key the script does not have.
struct OutOfKeys;

/// A kernel stand-in that runs one app at a time on the test's stack.
///
/// Spawned apps start at the next yield and run until they exit.
#[derive(Default)]
pub struct MockSys {
    pub screen:  String,
    keys:        VecDeque<u8>,
    pub files:   Vec<(String, Vec<u8>)>,
    pub spawned: Vec<StackRegion>,
    pending:     Vec<Entry>,
    running:     Vec<Entry>,
    pub yields:  usize,
    pub clears:  usize,
}

impl MockSys {
    pub fn new(keys: &[u8]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    /// Marks `entry` as registered without ever running it.
    pub fn pretend_running(&mut self, entry: Entry) {
        self.running.push(entry);
    }

    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(own, _)| own == name)
            .map(|(_, data)| &data[..])
    }

    /// Runs `app` until it exits or runs out of keys. Returns whether it
    /// exited.
    pub fn run(&mut self, app: Entry) -> bool {
        let result = panic::catch_unwind(AssertUnwindSafe(|| app(self)));
        match result {
            Ok(()) => true,
            Err(payload) if payload.is::<Exited>() => true,
            Err(payload) if payload.is::<OutOfKeys>() => false,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

fn same(a: Entry, b: Entry) -> bool {
    a as usize == b as usize
}

impl Syscalls for MockSys {
    fn write(&mut self, text: &str) -> isize {
        self.screen.push_str(text);
        text.len() as isize
    }

    fn getc(&mut self) -> u8 {
        match self.keys.pop_front() {
            Some(key) => key,
            None => panic::panic_any(OutOfKeys),
        }
    }

    fn yield_now(&mut self) {
        self.yields += 1;
        while let Some(entry) = self.pending.pop() {
            self.running.push(entry);
            let exited = self.run(entry);
            self.running.retain(|&own| !same(own, entry));
            if !exited {
                panic::panic_any(OutOfKeys);
            }
        }
    }

    fn exit(&mut self) -> ! {
        panic::panic_any(Exited)
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
        self.screen.clear();
    }

    fn list_files(&mut self, buf: &mut [u8]) -> isize {
        let mut written = 0;
        for (name, _) in &self.files {
            let end = written + name.len() + 1;
            if end > buf.len() {
                break;
            }
            buf[written..end - 1].copy_from_slice(name.as_bytes());
            buf[end - 1] = b'\n';
            written = end;
        }
        if written == 0 && !self.files.is_empty() {
            return E_TOO_SMALL;
        }
        written as isize
    }

    fn read_file(&mut self, name: &str, buf: &mut [u8]) -> isize {
        let Some(data) = self.file(name) else {
            return E_NOT_FOUND;
        };
        if data.len() > buf.len() {
            return E_TOO_SMALL;
        }
        buf[..data.len()].copy_from_slice(data);
        data.len() as isize
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> isize {
        if name.is_empty() || name.contains('\n') {
            return E_INVALID;
        }
        if name.len() >= 16 {
            return E_NAME_TOO_LONG;
        }
        if data.len() > 512 {
            return E_DATA_TOO_LARGE;
        }
        if let Some((_, own)) = self.files.iter_mut().find(|(own, _)| own == name) {
            *own = data.to_vec();
            return 0;
        }
        if self.files.len() == 5 {
            return E_NO_FREE_SLOT;
        }
        self.files.push((name.into(), data.to_vec()));
        0
    }

    fn delete_file(&mut self, name: &str) -> isize {
        let before = self.files.len();
        self.files.retain(|(own, _)| own != name);
        if self.files.len() == before {
            E_NOT_FOUND
        } else {
            0
        }
    }

    unsafe fn spawn(&mut self, entry: Entry, stack: StackRegion) -> isize {
        self.spawned.push(stack);
        self.pending.push(entry);
        self.spawned.len() as isize
    }

    fn is_running(&mut self, entry: Entry) -> bool {
        self.running
            .iter()
            .chain(&self.pending)
            .any(|&own| same(own, entry))
    }
}
