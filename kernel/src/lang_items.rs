#[cfg(all(target_os = "none", not(test)))]
use core::{hint::spin_loop, panic::PanicInfo};

#[cfg(all(target_os = "none", not(test)))]
use log::error;

#[cfg(all(target_os = "none", not(test)))]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    if let Some(location) = info.location() {
        error!(
            "Panicked at {}:{} {}",
            location.file(),
            location.line(),
            info.message()
        );
    } else {
        error!("Panicked: {}", info.message());
    }
    loop {
        spin_loop();
    }
}
