//! Boots the shell on an x86_64 PC.
//!
//! `_start` expects long mode with the VGA text buffer identity mapped and
//! the legacy I/O ports reachable, as a multiboot style loader leaves them.
//! Logs go to COM1, the shell gets the VGA screen and the PS/2 keyboard.
#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(all(target_os = "none", not(target_arch = "x86_64")))]
compile_error!("the bare-metal entry drives VGA and PS/2, it only builds for x86_64");

#[cfg(all(target_os = "none", target_arch = "x86_64"))]
mod boot {
    use core::{hint::spin_loop, mem::MaybeUninit, ptr::addr_of_mut};

    use coop_os::{
        drivers::{
            ps2::Ps2Keyboard,
            serial::{self, SerialPort, COM1},
            vga::TextScreen,
        },
        logger, Kernel,
    };
    use log::{error, info, LevelFilter};
    use syscall::TaskStack;

    const SHELL_STACK_SIZE: usize = 64 * 1024;

    static SHELL_STACK: TaskStack<SHELL_STACK_SIZE> = TaskStack::new();

    static mut SCREEN: MaybeUninit<TextScreen> = MaybeUninit::uninit();
    static mut KEYBOARD: MaybeUninit<Ps2Keyboard> = MaybeUninit::uninit();

    #[no_mangle]
    pub extern "C" fn _start() -> ! {
        // SAFETY: nothing else drives COM1.
        unsafe { SerialPort::new(COM1) }.init();
        // Only fails if a logger is already set, and nothing runs before us.
        let _ = logger::init(serial::log_sink, LevelFilter::Info);
        info!("Welcome to coop-os ~");

        // SAFETY: `_start` runs once and is the only user of both statics.
        let (screen, keyboard) = unsafe {
            (
                (*addr_of_mut!(SCREEN)).write(TextScreen::vga()),
                (*addr_of_mut!(KEYBOARD)).write(Ps2Keyboard::new()),
            )
        };
        let mut kernel = Kernel::new(screen, keyboard);

        // SAFETY: the stack is static, `kernel` lives in this frame, which
        // never returns.
        match unsafe { kernel.run(user_lib::shell, SHELL_STACK.region()) } {
            Ok(halt) => error!("kernel: {}", halt),
            Err(err) => error!("kernel: failed to boot the shell: {}", err),
        }
        loop {
            spin_loop();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("coop-os boots on bare metal, run it on this host with coop-sim");
    std::process::exit(2);
}
