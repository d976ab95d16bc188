use core::arch::asm;

/// # Safety
///
/// Reading `port` must have no side effect the caller does not own.
pub unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    asm!("in al, dx", out("al") value, in("dx") port, options(nomem, nostack));
    value
}

/// # Safety
///
/// The caller must own the device behind `port`.
pub unsafe fn outb(port: u16, value: u8) {
    asm!("out dx, al", in("dx") port, in("al") value, options(nomem, nostack));
}
