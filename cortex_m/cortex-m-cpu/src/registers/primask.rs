#[cfg(target_arch = "arm")]
use core::arch::asm;
#[cfg(not(target_arch = "arm"))]
use core::sync::atomic::{AtomicU32, Ordering};

use regfield::Staged;

regfield::register! {
    /// The priority mask register.
    pub struct Primask {
        /// When set, every exception with configurable priority is masked.
        pub masked: bool [0; 1] = rw,
    }
}

#[cfg(not(target_arch = "arm"))]
static SIMULATED: AtomicU32 = AtomicU32::new(0);

#[cfg(target_arch = "arm")]
pub fn read() -> Primask<Staged> {
    let result: u32;
    unsafe {
        asm!(
            "mrs {r}, PRIMASK",
            r = out(reg) result,
            options(nomem, preserves_flags, nostack),
        );
    }
    Primask::<Staged>::new(result)
}

#[cfg(not(target_arch = "arm"))]
pub fn read() -> Primask<Staged> {
    Primask::<Staged>::new(SIMULATED.load(Ordering::SeqCst))
}

/// # Safety
///
/// Clearing the mask lets pending interrupts run immediately, which can break a critical section
/// held by the caller.
#[cfg(target_arch = "arm")]
pub unsafe fn write(value: &Primask<Staged>) {
    asm!(
        "msr PRIMASK, {r}",
        r = in(reg) value.to_raw(),
        options(preserves_flags, nostack),
    );
}

/// # Safety
///
/// Clearing the mask lets pending interrupts run immediately, which can break a critical section
/// held by the caller.
#[cfg(not(target_arch = "arm"))]
pub unsafe fn write(value: &Primask<Staged>) {
    SIMULATED.store(value.to_raw(), Ordering::SeqCst);
}
