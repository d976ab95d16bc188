#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use coop_os::{Keyboard, Kernel, Screen};
use log::LevelFilter;
use syscall::StackRegion;

pub const STACK_SIZE: usize = 256 * 1024;

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}

/// Collects everything put on the screen.
pub struct RecordingScreen(Arc<Mutex<Vec<u8>>>);

impl Screen for RecordingScreen {
    fn put_byte(&mut self, byte: u8) {
        self.0.lock().unwrap().push(byte);
    }

    fn clear(&mut self) {
        self.0.lock().unwrap().clear();
    }
}

/// Reports no key for `idle` polls, then hands out the script. Once the
/// script runs out it reports no key forever.
pub struct ScriptedKeyboard {
    idle:   usize,
    script: VecDeque<u8>,
    polls:  Arc<Mutex<usize>>,
}

impl Keyboard for ScriptedKeyboard {
    fn poll(&mut self) -> Option<u8> {
        *self.polls.lock().unwrap() += 1;
        if self.idle > 0 {
            self.idle -= 1;
            return None;
        }
        self.script.pop_front()
    }
}

pub struct Machine {
    pub kernel: Box<Kernel>,
    pub screen: Arc<Mutex<Vec<u8>>>,
    pub polls:  Arc<Mutex<usize>>,
}

impl Machine {
    pub fn screen_text(&self) -> String {
        String::from_utf8_lossy(&self.screen.lock().unwrap()).into_owned()
    }

    pub fn polls(&self) -> usize {
        *self.polls.lock().unwrap()
    }
}

pub fn machine() -> Machine {
    machine_with_keys(0, b"")
}

/// A boxed kernel, so it never moves while tasks hold its address.
pub fn machine_with_keys(idle: usize, keys: &[u8]) -> Machine {
    init_test_logger();
    let screen = Arc::new(Mutex::new(Vec::new()));
    let polls = Arc::new(Mutex::new(0));
    let kernel = Kernel::new(
        Box::leak(Box::new(RecordingScreen(screen.clone()))),
        Box::leak(Box::new(ScriptedKeyboard {
            idle,
            script: keys.iter().copied().collect(),
            polls: polls.clone(),
        })),
    );
    Machine {
        kernel: Box::new(kernel),
        screen,
        polls,
    }
}

/// A fresh task stack. Stacks are leaked since a halted task never
/// returns from it.
pub fn stack() -> StackRegion {
    StackRegion::from_static(Box::leak(vec![0u8; STACK_SIZE].into_boxed_slice()))
}

thread_local! {
    static TRACE: RefCell<String> = RefCell::new(String::new());
    static RESULTS: RefCell<Vec<isize>> = RefCell::new(Vec::new());
}

/// Appends to the trace of the current test. Tasks run on the test's
/// own thread, so every test sees only its own trace.
pub fn mark(s: &str) {
    TRACE.with(|trace| trace.borrow_mut().push_str(s));
}

pub fn trace() -> String {
    TRACE.with(|trace| trace.borrow().clone())
}

pub fn record(result: isize) {
    RESULTS.with(|results| results.borrow_mut().push(result));
}

pub fn results() -> Vec<isize> {
    RESULTS.with(|results| results.borrow().clone())
}
