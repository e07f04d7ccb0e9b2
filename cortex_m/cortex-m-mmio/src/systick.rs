//! The SysTick timer: a 24-bit down-counter that pends its exception each time it wraps.

use regfield::Staged;
use snafu::{ensure, Snafu};

use crate::system::{Hertz, SystemClock};
use crate::Uninterruptible;

/// The largest value the reload register holds.
pub const MAX_RELOAD: u32 = 0x00ff_ffff;

regfield::field_enum! {
    pub enum ClockSource: 1 {
        External = 0,
        Processor = 1,
    }
}

regfield::register! {
    /// SYST_CSR. Reading clears `countflag`.
    pub struct Control {
        pub enable: bool [0; 1] = rw,
        pub tickint: bool [1; 1] = rw,
        pub clksource: ClockSource [2; 1] = rw,
        pub countflag: bool [16; 1] = ro,
    }
}

regfield::register! {
    /// SYST_RVR.
    pub struct Reload {
        pub value: u32 [0; 24] = rw,
    }
}

regfield::register! {
    /// SYST_CVR. Any write clears the counter and `countflag`.
    pub struct Current {
        pub value: u32 [0; 24] = ro,
        pub clear: u32 [0; 32] = wo,
    }
}

regfield::register! {
    /// SYST_CALIB.
    pub struct Calibration {
        pub tenms: u32 [0; 24] = ro,
        pub skew: bool [30; 1] = ro,
        pub noref: bool [31; 1] = ro,
    }
}

regfield::device! {
    pub struct SysTick {
        base: 0xe000_e010,
        size: 0x10,
        regs: {
            0x0 => pub ctrl: Control,
            0x4 => pub load: Reload,
            0x8 => pub val: Current,
            0xc => pub calib: Calibration,
        },
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum SysTickError {
    #[snafu(display("reload value {reload:#x} does not fit in 24 bits"))]
    ReloadOutOfRange { reload: u32 },

    #[snafu(display("a {rate} tick cannot be derived from a {frequency} clock"))]
    UnreachableRate { rate: Hertz, frequency: Hertz },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysTickConfig {
    /// The counter runs `reload + 1` cycles per wrap.
    pub reload: u32,
    pub source: ClockSource,
    /// Whether wrapping pends the SysTick exception.
    pub interrupt: bool,
}

impl SysTickConfig {
    /// An interrupting, processor-clocked tick at `rate`.
    pub fn periodic(clock: &SystemClock, rate: Hertz) -> Result<Self, SysTickError> {
        let frequency = clock.frequency();
        let cycles = frequency.0.checked_div(rate.0).unwrap_or(0);
        ensure!(cycles != 0, UnreachableRateSnafu { rate, frequency });
        let reload = cycles - 1;
        ensure!(reload <= MAX_RELOAD, ReloadOutOfRangeSnafu { reload });
        Ok(Self {
            reload,
            source: ClockSource::Processor,
            interrupt: true,
        })
    }
}

impl SysTick {
    /// Stops the counter, loads `config`, clears the current value, and starts counting.
    pub fn configure(&self, u: Uninterruptible, config: &SysTickConfig) -> Result<(), SysTickError> {
        let _ = u;
        if config.reload > MAX_RELOAD {
            log::warn!("rejected SysTick reload {:#x}", config.reload);
            return ReloadOutOfRangeSnafu {
                reload: config.reload,
            }
            .fail();
        }

        self.stop();
        self.load.value().set(config.reload);
        self.val.clear().write(0);
        Control::<Staged>::zero()
            .with_clksource(config.source)
            .with_tickint(config.interrupt)
            .with_enable(true)
            .commit(&self.ctrl);
        log::debug!("SysTick {config:?}");
        Ok(())
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

    /// Whether wrapping pends the SysTick exception.
    pub fn interrupt_enabled(&self) -> bool {
        self.ctrl.tickint().get()
    }

    pub fn enable_interrupt(&self) {
        self.ctrl.tickint().set(true);
    }

    pub fn disable_interrupt(&self) {
        self.ctrl.tickint().set(false);
    }

    pub fn source(&self) -> ClockSource {
        self.ctrl.clksource().get()
    }

    pub fn set_source(&self, source: ClockSource) {
        self.ctrl.clksource().replace(source);
    }

    pub fn reload(&self) -> u32 {
        self.load.value().get()
    }

    pub fn set_reload(&self, reload: u32) -> Result<(), SysTickError> {
        ensure!(reload <= MAX_RELOAD, ReloadOutOfRangeSnafu { reload });
        self.load.value().set(reload);
        Ok(())
    }

    pub fn current(&self) -> u32 {
        self.val.value().get()
    }

    pub fn clear_current(&self) {
        self.val.clear().write(0);
    }

    /// Whether the counter reached zero since the control register was last read. Calling this
    /// clears the flag on hardware.
    pub fn has_wrapped(&self) -> bool {
        self.ctrl.countflag().get()
    }

    pub fn calibration(&self) -> Calibration<Staged> {
        self.calib.read()
    }
}
