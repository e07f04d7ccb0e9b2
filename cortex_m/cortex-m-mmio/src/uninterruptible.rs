use core::marker::PhantomData;

use cortex_m_cpu::interrupts::with_interrupts_disabled;

/// A token proving that the execution context cannot be interrupted, for the purpose of MMIO
/// device access.
///
/// While a token exists PRIMASK is set, so no configurable-priority exception handler can run
/// between the load and the store of a read-modify-write sequence. NMI and HardFault still can;
/// their handlers must not touch the devices guarded by this token.
#[derive(Clone, Copy)]
pub struct Uninterruptible<'a> {
    _phantom_lifetime: PhantomData<&'a ()>,
}

impl<'a> Uninterruptible<'a> {
    /// # Safety
    ///
    /// Interrupts must be disabled while `'a` is live.
    pub unsafe fn new_unchecked() -> Self {
        Self {
            _phantom_lifetime: PhantomData,
        }
    }
}

/// Runs a function with interrupts disabled, restoring the previous state afterwards.
pub fn uninterruptible<T>(f: impl FnOnce(Uninterruptible) -> T) -> T {
    with_interrupts_disabled(|| f(unsafe { Uninterruptible::new_unchecked() }))
}
