//! The CMSDK APB timer: a 32-bit down-counter with reload and one interrupt.

use regfield::Staged;

use crate::types::Clear;
use crate::Uninterruptible;

regfield::register! {
    pub struct Control {
        pub enable: bool [0; 1] = rw,
        /// Count only while the external input is high.
        pub ext_enable: bool [1; 1] = rw,
        /// Count rising edges of the external input instead of the system clock.
        pub ext_clock: bool [2; 1] = rw,
        pub interrupt_enable: bool [3; 1] = rw,
    }
}

regfield::register! {
    pub struct Counter {
        pub value: u32 [0; 32] = rw,
    }
}

regfield::register! {
    /// INTSTATUS when read, INTCLEAR when written.
    pub struct Interrupt {
        pub pending: bool [0; 1] = ro,
        pub clear: Clear [0; 1] = wo,
    }
}

regfield::device! {
    pub struct Timer {
        size: 0x10,
        regs: {
            0x0 => pub ctrl: Control,
            0x4 => pub value: Counter,
            0x8 => pub reload: Counter,
            0xc => pub interrupt: Interrupt,
        },
    }
}

/// What the counter counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerInput {
    /// Every system clock cycle.
    #[default]
    System,
    /// System clock cycles while the external input is high.
    ExternalEnable,
    /// Rising edges of the external input.
    ExternalClock,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerConfig {
    pub value: u32,
    pub reload: u32,
    pub enable: bool,
    pub interrupt_enable: bool,
    pub input: TimerInput,
}

impl Timer {
    /// Resets the timer and applies `config` with one control write.
    pub fn configure(&self, u: Uninterruptible, config: &TimerConfig) {
        let _ = u;
        self.ctrl.modify(|ctrl| ctrl.enable().set(false));
        self.interrupt.clear().write(Clear::Clear);
        self.value.value().set(config.value);
        self.reload.value().set(config.reload);

        let ctrl = Control::<Staged>::zero()
            .with_enable(config.enable)
            .with_interrupt_enable(config.interrupt_enable);
        match config.input {
            TimerInput::System => {}
            TimerInput::ExternalEnable => ctrl.ext_enable().set(true),
            TimerInput::ExternalClock => ctrl.ext_clock().set(true),
        }
        ctrl.commit(&self.ctrl);
        log::debug!("timer {config:?}");
    }

    pub fn start(&self) {
        self.ctrl.enable().set(true);
    }

    pub fn stop(&self) {
        self.ctrl.enable().set(false);
    }

    pub fn is_running(&self) -> bool {
        self.ctrl.enable().get()
    }

    pub fn enable_interrupt(&self) {
        self.ctrl.interrupt_enable().set(true);
    }

    pub fn disable_interrupt(&self) {
        self.ctrl.interrupt_enable().set(false);
    }

    pub fn interrupt_pending(&self) -> bool {
        self.interrupt.pending().get()
    }

    pub fn clear_interrupt(&self) {
        self.interrupt.clear().write(Clear::Clear);
    }

    pub fn value(&self) -> u32 {
        self.value.value().get()
    }

    pub fn set_value(&self, value: u32) {
        self.value.value().set(value);
    }

    /// Zeroes the counter.
    pub fn reset(&self) {
        self.set_value(0);
    }

    pub fn reload(&self) -> u32 {
        self.reload.value().get()
    }

    pub fn set_reload(&self, reload: u32) {
        self.reload.value().set(reload);
    }

    /// Busy-waits until the counter has run through `ticks` cycles of its input, leaving the
    /// timer stopped with its interrupt disabled and cleared.
    pub fn delay(&self, ticks: u32) {
        self.stop();
        self.reset();
        self.enable_interrupt();
        self.set_reload(ticks);
        self.start();

        while !self.interrupt_pending() {}

        self.stop();
        self.disable_interrupt();
        self.clear_interrupt();
        self.reset();
    }
}
