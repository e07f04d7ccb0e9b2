//! The system clock: core frequency and a millisecond tick count.

use core::fmt::{self, Display, Formatter};
use core::sync::atomic::{AtomicU32, Ordering};

/// A frequency in hertz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hertz(pub u32);

impl Hertz {
    pub const fn khz(khz: u32) -> Self {
        Self(khz * 1_000)
    }

    pub const fn mhz(mhz: u32) -> Self {
        Self(mhz * 1_000_000)
    }
}

impl Display for Hertz {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            hz if hz >= 1_000_000 && hz % 1_000_000 == 0 => write!(f, "{} MHz", hz / 1_000_000),
            hz if hz >= 1_000 && hz % 1_000 == 0 => write!(f, "{} kHz", hz / 1_000),
            hz => write!(f, "{hz} Hz"),
        }
    }
}

/// A duration or time point in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Milliseconds(pub u32);

impl Milliseconds {
    /// Milliseconds elapsed from `earlier` to `self`, across one counter wrap.
    pub const fn since(self, earlier: Milliseconds) -> Milliseconds {
        Milliseconds(self.0.wrapping_sub(earlier.0))
    }
}

/// The core clock frequency and a tick counter advanced by the SysTick handler.
///
/// The tick is expected once per millisecond, so [`now`](Self::now) reads it as milliseconds since
/// the clock started.
#[derive(Debug)]
pub struct SystemClock {
    frequency: Hertz,
    tick: AtomicU32,
}

impl SystemClock {
    pub const DEFAULT_FREQUENCY: Hertz = Hertz::mhz(54);

    pub const fn new(frequency: Hertz) -> Self {
        Self {
            frequency,
            tick: AtomicU32::new(0),
        }
    }

    pub fn frequency(&self) -> Hertz {
        self.frequency
    }

    pub fn ticks_per_millisecond(&self) -> u32 {
        self.frequency.0 / 1_000
    }

    pub fn tick(&self) -> u32 {
        self.tick.load(Ordering::Relaxed)
    }

    /// Advances the tick. Call this only from the SysTick handler.
    pub fn increment_tick(&self) {
        // Single writer. Armv6-M has no atomic read-modify-write.
        let tick = self.tick.load(Ordering::Relaxed);
        self.tick.store(tick.wrapping_add(1), Ordering::Relaxed);
    }

    pub fn now(&self) -> Milliseconds {
        Milliseconds(self.tick())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        let clock = Self::new(Self::DEFAULT_FREQUENCY);
        log::debug!("system clock at {}", clock.frequency);
        clock
    }
}
