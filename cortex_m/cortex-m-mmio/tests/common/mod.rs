#![allow(dead_code)]

/// A device in RAM. Every layout in the crate is made of plain words, for which all-zero is valid.
pub fn zeroed<D>() -> D {
    unsafe { core::mem::zeroed() }
}

/// Stores `value` into a register word the API only reads, standing in for the hardware.
pub fn poke<R>(register: &R, value: u32) {
    assert_eq!(core::mem::size_of::<R>(), 4);
    unsafe { (register as *const R as *mut u32).write_volatile(value) }
}
