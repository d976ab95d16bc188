mod common;

use common::MockSys;
use syscall::Syscalls;
use user_lib::{calc, console::read_line, edit, shell};

fn line_app(sys: &mut dyn Syscalls) {
    let mut buf = [0u8; 4];
    let line = read_line(sys, &mut buf);
    let echo = format!("[{}]", line);
    sys.write(&echo);
}

#[test]
fn read_line_echoes_and_handles_backspace() {
    let mut sys = MockSys::new(b"ab\x08c\x7fd\n");
    assert!(sys.run(line_app));
    assert_eq!(sys.screen, "ab\x08 \x08c\x08 \x08d\n[ad]");
}

#[test]
fn read_line_drops_input_past_the_buffer() {
    let mut sys = MockSys::new(b"abcdef\x01\n");
    assert!(sys.run(line_app));
    assert_eq!(sys.screen, "abcd\n[abcd]");
}

#[test]
fn calculator_session() {
    let mut sys = MockSys::new(
        b"add 2 3\nsub 2 5\nmul -4 6\ndiv 7 2\ndiv 1 0\nmod 1 2\nadd 1\nquit\nadd 1 1\n",
    );

    assert!(sys.run(calc));

    let out = &sys.screen;
    for expected in [
        "calc> add 2 3\n5\n",
        "calc> sub 2 5\n-3\n",
        "calc> mul -4 6\n-24\n",
        "calc> div 7 2\n3\n",
        "Error: Division by zero.\n",
        "Unknown operation: 'mod'\n",
        "calc> add 1\nSyntax: op num1 num2",
        "Exiting calculator...\n",
    ] {
        assert!(out.contains(expected), "missing {:?} in {:?}", expected, out);
    }
    assert!(!out.contains("add 1 1"));
}

#[test]
fn editor_creates_and_saves_a_file() {
    let mut sys = MockSys::new(b"new notes\nedit\nhi\x08ello\x1bsave\nlist\nquit\n");

    assert!(sys.run(edit));

    assert_eq!(sys.file("notes"), Some(&b"hello"[..]));
    assert!(sys.screen.contains("edit [notes]# "));
    assert!(sys.screen.contains("File 'notes' saved (5 bytes)."));
    assert!(sys.screen.contains("Files:\nnotes\n"));
}

#[test]
fn editor_opens_appends_and_saves_under_new_name() {
    let mut sys = MockSys::new(b"open todo\nedit\n!\x1bsave copy\nopen nope\nquit\n");
    sys.write_file("todo", b"milk");
    sys.screen.clear();

    assert!(sys.run(edit));

    assert!(sys.screen.contains("File 'todo' opened (4 bytes)."));
    assert_eq!(sys.file("todo"), Some(&b"milk"[..]));
    assert_eq!(sys.file("copy"), Some(&b"milk!"[..]));
    assert!(sys.screen.contains("Error: File 'nope' not found."));
    assert!(sys.screen.contains("edit# quit"));
}

#[test]
fn editor_shows_binary_content_and_saves_it_unchanged() {
    let mut sys = MockSys::new(b"open blob\nedit\n\x1bsave\nquit\n");
    sys.write_file("blob", b"h\xffi");
    sys.screen.clear();

    assert!(sys.run(edit));

    assert!(sys
        .screen
        .contains("--- Text Edit Mode (Press ESC to finish) ---\nh\u{fffd}i"));
    assert_eq!(sys.file("blob"), Some(&b"h\xffi"[..]));
}

#[test]
fn editor_reports_usage_and_missing_files() {
    let mut sys = MockSys::new(b"edit\nsave\nnew\ndelete ghost\nlist\nfrobnicate\nquit\n");

    assert!(sys.run(edit));

    for expected in [
        "No file. Use 'new <fn>' or 'open <fn>' first.",
        "Usage: save <filename>",
        "Usage: new <filename>",
        "Error deleting 'ghost'. Not found?",
        "No files found.",
        "Unknown command: 'frobnicate'.",
    ] {
        assert!(sys.screen.contains(expected), "missing {:?}", expected);
    }
}

#[test]
fn deleting_the_open_file_closes_it() {
    let mut sys = MockSys::new(b"open todo\ndelete todo\nedit\nquit\n");
    sys.write_file("todo", b"milk");

    assert!(sys.run(edit));

    assert!(sys.screen.contains("File 'todo' deleted.\nedit# "));
    assert!(sys.screen.contains("No file. Use"));
    assert_eq!(sys.file("todo"), None);
}

#[test]
fn editor_truncates_long_names() {
    let mut sys = MockSys::new(b"new a-very-long-file-name\nsave\nquit\n");

    assert!(sys.run(edit));

    assert_eq!(sys.file("a-very-long-fil"), Some(&b""[..]));
}

#[test]
fn shell_runs_commands_and_apps() {
    let mut sys = MockSys::new(b"help\nls\ncalc\nadd 20 22\nquit\nbogus\nclear\nexit\n");

    assert!(sys.run(shell));

    assert_eq!(sys.spawned.len(), 1);
    assert_eq!(sys.yields, 1);
    assert_eq!(sys.clears, 1);
    // Everything before `clear` is gone.
    assert_eq!(sys.screen, "> exit\nBye.\n");
}

#[test]
fn shell_output_before_clear() {
    let mut sys = MockSys::new(b"help\nls\ncalc\nadd 20 22\nquit\nbogus\n");

    assert!(!sys.run(shell));

    for expected in [
        "> help\nCommands:",
        "> ls\nNo files.\n",
        "> calc\nCalculator App.",
        "calc> add 20 22\n42\n",
        "Exiting calculator...\n> bogus\nUnknown command: 'bogus'. Try 'help'.\n",
    ] {
        assert!(sys.screen.contains(expected), "missing {:?}", expected);
    }
}

#[test]
fn shell_does_not_start_a_second_copy() {
    let mut sys = MockSys::new(b"edit\nexit\n");
    sys.pretend_running(edit);

    assert!(sys.run(shell));

    assert!(sys.spawned.is_empty());
    assert_eq!(sys.yields, 1);
    assert!(sys.screen.contains("edit is already running."));
}

#[test]
fn shell_lists_files() {
    let mut sys = MockSys::new(b"ls\nexit\n");
    sys.write_file("a", b"1");
    sys.write_file("b", b"2");

    assert!(sys.run(shell));

    assert!(sys.screen.contains("> ls\na\nb\n> exit"));
}

#[test]
fn shell_uses_a_distinct_stack_per_app() {
    let mut sys = MockSys::new(b"calc\nquit\nedit\nquit\nexit\n");

    assert!(sys.run(shell));

    assert_eq!(sys.spawned.len(), 2);
    assert_ne!(sys.spawned[0].base(), sys.spawned[1].base());
}
