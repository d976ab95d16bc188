//! The command shell, the first task of the system.

use syscall::{Entry, StackRegion, Syscalls};

use crate::{
    calc::{calc, CALC_STACK},
    console::{read_line, write_lossy},
    edit::{edit, EDIT_STACK},
};

const HELP: &str = "\
Commands:
  help   show this list
  calc   start the calculator
  edit   start the editor
  ls     list files
  clear  clear the screen
  exit   leave the shell
";

pub fn shell(sys: &mut dyn Syscalls) {
    println!(sys, "Welcome to coop-os. Type 'help' for commands.");

    let mut line = [0u8; 64];
    loop {
        print!(sys, "> ");
        match read_line(sys, &mut line).trim() {
            "help" => {
                sys.write(HELP);
            }
            "calc" => launch(sys, "calc", calc, CALC_STACK.region()),
            "edit" => launch(sys, "edit", edit, EDIT_STACK.region()),
            "ls" => list(sys),
            "clear" => sys.clear_screen(),
            "exit" => {
                println!(sys, "Bye.");
                sys.exit();
            }
            "" => {}
            command => println!(sys, "Unknown command: '{}'. Try 'help'.", command),
        }
    }
}

/// Starts `entry` unless a copy is still registered, then lets it run.
///
/// Each app owns a single static stack, so a second copy would run on
/// the stack of the first.
fn launch(sys: &mut dyn Syscalls, name: &str, entry: Entry, stack: StackRegion) {
    if sys.is_running(entry) {
        println!(sys, "{} is already running.", name);
    } else {
        // SAFETY: the stack is static and no running task uses it.
        let slot = unsafe { sys.spawn(entry, stack) };
        if slot < 0 {
            println!(sys, "Cannot start {}: error {}.", name, slot);
            return;
        }
    }
    sys.yield_now();
}

fn list(sys: &mut dyn Syscalls) {
    let mut listing = [0u8; 5 * 16];
    match sys.list_files(&mut listing) {
        0 => println!(sys, "No files."),
        len if len > 0 => {
            write_lossy(sys, &listing[..len as usize]);
        }
        code => println!(sys, "Cannot list files: error {}.", code),
    }
}
