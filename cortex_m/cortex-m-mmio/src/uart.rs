//! The CMSDK APB UART: eight data bits, no parity, one stop bit, one-byte buffers each way.

use core::fmt;

use regfield::Staged;
use snafu::{ensure, Snafu};

use crate::system::SystemClock;
use crate::types::Clear;
use crate::Uninterruptible;

/// The smallest divisor the baud rate generator accepts.
pub const MIN_DIVISOR: u32 = 16;

/// The largest divisor BAUDDIV holds.
pub const MAX_DIVISOR: u32 = 0x000f_ffff;

regfield::register! {
    pub struct Data {
        pub byte: u8 [0; 8] = rw,
    }
}

regfield::register! {
    /// Buffer state. The overrun bits are write-one-to-clear.
    pub struct State {
        pub tx_full: bool [0; 1] = ro,
        pub rx_full: bool [1; 1] = ro,
        pub tx_overrun: bool [2; 1] = rw,
        pub rx_overrun: bool [3; 1] = rw,
    }
}

regfield::register! {
    pub struct Control {
        pub tx_enable: bool [0; 1] = rw,
        pub rx_enable: bool [1; 1] = rw,
        pub tx_interrupt_enable: bool [2; 1] = rw,
        pub rx_interrupt_enable: bool [3; 1] = rw,
        pub tx_overrun_interrupt_enable: bool [4; 1] = rw,
        pub rx_overrun_interrupt_enable: bool [5; 1] = rw,
        pub hs_test_mode: bool [6; 1] = rw,
        pub raw: u32 [0; 32] = rw,
    }
}

regfield::register! {
    /// INTSTATUS when read, INTCLEAR when written.
    pub struct Interrupt {
        pub tx: bool [0; 1] = ro,
        pub rx: bool [1; 1] = ro,
        pub tx_overrun: bool [2; 1] = ro,
        pub rx_overrun: bool [3; 1] = ro,

        pub tx_clear: Clear [0; 1] = wo,
        pub rx_clear: Clear [1; 1] = wo,
        pub tx_overrun_clear: Clear [2; 1] = wo,
        pub rx_overrun_clear: Clear [3; 1] = wo,

        pub raw: u32 [0; 32] = rw,
    }
}

regfield::register! {
    pub struct BaudDivider {
        pub divisor: u32 [0; 20] = rw(masked),
        pub raw: u32 [0; 32] = rw,
    }
}

regfield::device! {
    pub struct Uart {
        size: 0x14,
        regs: {
            0x00 => pub data: Data,
            0x04 => pub state: State,
            0x08 => pub ctrl: Control,
            0x0c => pub interrupt: Interrupt,
            0x10 => pub bauddiv: BaudDivider,
        },
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum UartError {
    #[snafu(display("baud rate must not be zero"))]
    ZeroBaudRate,

    #[snafu(display("baud rate {baud_rate} needs divisor {divisor}, below the minimum of 16"))]
    BaudRateTooHigh { baud_rate: u32, divisor: u32 },

    #[snafu(display("baud rate {baud_rate} needs divisor {divisor}, which BAUDDIV cannot hold"))]
    BaudRateTooLow { baud_rate: u32, divisor: u32 },
}

/// A setting that applies to each direction separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Duplex {
    pub tx: bool,
    pub rx: bool,
}

impl Duplex {
    pub const BOTH: Self = Self { tx: true, rx: true };
    pub const NONE: Self = Self {
        tx: false,
        rx: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartConfig {
    pub enable: Duplex,
    pub interrupt: Duplex,
    pub overrun_interrupt: Duplex,
    pub hs_test_mode: bool,
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            enable: Duplex::BOTH,
            interrupt: Duplex::NONE,
            overrun_interrupt: Duplex::NONE,
            hs_test_mode: false,
            baud_rate: 115_200,
        }
    }
}

impl UartConfig {
    /// The BAUDDIV value for this baud rate at `clock`'s frequency.
    pub fn divisor(&self, clock: &SystemClock) -> Result<u32, UartError> {
        let baud_rate = self.baud_rate;
        ensure!(baud_rate != 0, ZeroBaudRateSnafu);
        let divisor = clock.frequency().0 / baud_rate;
        ensure!(
            divisor >= MIN_DIVISOR,
            BaudRateTooHighSnafu { baud_rate, divisor }
        );
        ensure!(
            divisor <= MAX_DIVISOR,
            BaudRateTooLowSnafu { baud_rate, divisor }
        );
        Ok(divisor)
    }
}

impl Uart {
    /// Quiesces the UART, then applies `config`. Nothing is written if the baud rate is
    /// unreachable.
    pub fn configure(
        &self,
        u: Uninterruptible,
        config: &UartConfig,
        clock: &SystemClock,
    ) -> Result<(), UartError> {
        let _ = u;
        let divisor = config.divisor(clock).map_err(|error| {
            log::warn!("rejected UART configuration: {error}");
            error
        })?;

        let ctrl = Control::<Staged>::zero()
            .with_tx_enable(config.enable.tx)
            .with_rx_enable(config.enable.rx)
            .with_tx_interrupt_enable(config.interrupt.tx)
            .with_rx_interrupt_enable(config.interrupt.rx)
            .with_tx_overrun_interrupt_enable(config.overrun_interrupt.tx)
            .with_rx_overrun_interrupt_enable(config.overrun_interrupt.rx)
            .with_hs_test_mode(config.hs_test_mode);

        self.ctrl.raw().set(0);
        self.state.modify(|state| {
            state.tx_overrun().set(true);
            state.rx_overrun().set(true);
        });
        self.interrupt.raw().write(0b1111);

        // BAUDDIV is OR-written, so it has to be emptied first.
        self.bauddiv.raw().set(0);
        self.bauddiv.divisor().set(divisor);

        ctrl.commit(&self.ctrl);
        log::debug!("UART {config:?}, divisor {divisor}");
        Ok(())
    }

    pub fn tx_interrupt_enabled(&self) -> bool {
        self.ctrl.tx_interrupt_enable().get()
    }

    pub fn rx_interrupt_enabled(&self) -> bool {
        self.ctrl.rx_interrupt_enable().get()
    }

    pub fn tx_interrupt(&self) -> bool {
        self.interrupt.tx().get()
    }

    pub fn rx_interrupt(&self) -> bool {
        self.interrupt.rx().get()
    }

    pub fn clear_tx_interrupt(&self) {
        self.interrupt.tx_clear().write(Clear::Clear);
    }

    pub fn clear_rx_interrupt(&self) {
        self.interrupt.rx_clear().write(Clear::Clear);
    }

    pub fn tx_overrun_interrupt(&self) -> bool {
        self.interrupt.tx_overrun().get()
    }

    pub fn rx_overrun_interrupt(&self) -> bool {
        self.interrupt.rx_overrun().get()
    }

    pub fn clear_tx_overrun_interrupt(&self) {
        self.interrupt.tx_overrun_clear().write(Clear::Clear);
    }

    pub fn clear_rx_overrun_interrupt(&self) {
        self.interrupt.rx_overrun_clear().write(Clear::Clear);
    }

    pub fn tx_buffer_full(&self) -> bool {
        self.state.tx_full().get()
    }

    pub fn rx_buffer_full(&self) -> bool {
        self.state.rx_full().get()
    }

    pub fn tx_buffer_overrun(&self) -> bool {
        self.state.tx_overrun().get()
    }

    pub fn rx_buffer_overrun(&self) -> bool {
        self.state.rx_overrun().get()
    }

    pub fn reset_tx_buffer_overrun(&self) {
        self.state.tx_overrun().write(true);
    }

    pub fn reset_rx_buffer_overrun(&self) {
        self.state.rx_overrun().write(true);
    }

    /// Busy-waits for room in the transmit buffer, then sends `byte`.
    pub fn put(&self, byte: u8) {
        while self.tx_buffer_full() {}
        self.data.byte().write(byte);
    }

    /// Busy-waits for a received byte.
    pub fn get(&self) -> u8 {
        while !self.rx_buffer_full() {}
        self.data.byte().get()
    }

    pub fn write_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.put(byte);
        }
    }

    pub fn write_str(&self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// A [`fmt::Write`] adapter, for `write!` and `writeln!`.
    pub fn writer(&self) -> Writer<'_> {
        Writer { uart: self }
    }
}

/// Formats text straight into a UART's transmit buffer.
pub struct Writer<'a> {
    uart: &'a Uart,
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.uart.write_str(s);
        Ok(())
    }
}
