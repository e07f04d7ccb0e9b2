#[cfg(target_arch = "arm")]
use core::arch::asm;
use core::sync::atomic::{compiler_fence, Ordering};

use crate::registers::primask;
#[cfg(not(target_arch = "arm"))]
use crate::registers::primask::Primask;
#[cfg(not(target_arch = "arm"))]
use regfield::Staged;

/// Masks interrupts and returns whether they were unmasked before.
#[inline(always)]
pub unsafe fn disable_interrupts() -> bool {
    let was_masked = primask::read().masked().get();
    #[cfg(target_arch = "arm")]
    asm!("cpsid i", options(nomem, preserves_flags, nostack));
    #[cfg(not(target_arch = "arm"))]
    primask::write(&Primask::<Staged>::zero().with_masked(true));
    compiler_fence(Ordering::SeqCst);
    !was_masked
}

/// Unmasks interrupts.
#[inline(always)]
pub unsafe fn enable_interrupts() {
    compiler_fence(Ordering::SeqCst);
    #[cfg(target_arch = "arm")]
    asm!("cpsie i", options(nomem, preserves_flags, nostack));
    #[cfg(not(target_arch = "arm"))]
    primask::write(&Primask::<Staged>::zero());
}

/// Invokes a function with interrupts masked. The previous mask state is restored after it
/// returns.
#[inline(always)]
pub fn with_interrupts_disabled<T>(f: impl FnOnce() -> T) -> T {
    let was_enabled = unsafe { disable_interrupts() };
    let result = f();
    if was_enabled {
        unsafe { enable_interrupts() };
    }
    result
}

/// Whether interrupts are currently unmasked.
pub fn interrupts_enabled() -> bool {
    !primask::read().masked().get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_restores_the_outer_state() {
        let _guard = crate::SIMULATION.lock();
        assert!(interrupts_enabled());
        with_interrupts_disabled(|| {
            assert!(!interrupts_enabled());
            with_interrupts_disabled(|| assert!(!interrupts_enabled()));
            assert!(!interrupts_enabled());
        });
        assert!(interrupts_enabled());
    }

    #[test]
    fn returns_the_closure_result() {
        let _guard = crate::SIMULATION.lock();
        assert_eq!(with_interrupts_disabled(|| 42), 42);
    }
}
