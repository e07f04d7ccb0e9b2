//! Value types shared by the core peripherals.

use core::fmt::{self, Display, Formatter};

regfield::field_enum! {
    /// A write-one-to-set command bit.
    pub enum Set: 1 {
        NoEffect = 0,
        Set = 1,
    }
}

regfield::field_enum! {
    /// A write-one-to-clear command bit.
    pub enum Clear: 1 {
        NoEffect = 0,
        Clear = 1,
    }
}

regfield::field_enum! {
    pub enum Enabled: 1 {
        Disabled = 0,
        Enabled = 1,
    }
}

regfield::field_enum! {
    pub enum Active: 1 {
        Inactive = 0,
        Active = 1,
    }
}

regfield::field_enum! {
    pub enum Pended: 1 {
        NotPended = 0,
        Pended = 1,
    }
}

impl From<bool> for Enabled {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl From<Enabled> for bool {
    fn from(enabled: Enabled) -> Self {
        enabled == Enabled::Enabled
    }
}

regfield::field_enum! {
    /// How an eight-bit priority splits into preemption priority and subpriority.
    ///
    /// `GroupXSubY` has X bits of preemption priority and Y bits of subpriority. Parts that
    /// implement fewer than eight priority bits drop the low subpriority bits first.
    pub enum PriorityGrouping: 3 {
        Group7Sub1 = 0,
        Group6Sub2 = 1,
        Group5Sub3 = 2,
        Group4Sub4 = 3,
        Group3Sub5 = 4,
        Group2Sub6 = 5,
        Group1Sub7 = 6,
        Group0Sub8 = 7,
    }
}

impl PriorityGrouping {
    /// Bits of preemption priority.
    pub fn preemption_bits(self) -> u32 {
        7 - self as u32
    }

    /// Bits of subpriority.
    pub fn subpriority_bits(self) -> u32 {
        self as u32 + 1
    }
}

/// An exception number as the CMSIS headers count them: negative for the processor's own
/// exceptions, zero upwards for external interrupts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Irqn(pub i16);

impl Irqn {
    pub const NON_MASKABLE_INT: Self = Self(-14);
    pub const HARD_FAULT: Self = Self(-13);
    pub const MEMORY_MANAGEMENT: Self = Self(-12);
    pub const BUS_FAULT: Self = Self(-11);
    pub const USAGE_FAULT: Self = Self(-10);
    pub const SVCALL: Self = Self(-5);
    pub const DEBUG_MONITOR: Self = Self(-4);
    pub const PENDSV: Self = Self(-2);
    pub const SYSTICK: Self = Self(-1);

    /// External interrupt `n`. The NVIC implements lines 0 to 239; higher lines read as zero and
    /// ignore writes.
    pub const fn external(n: u8) -> Self {
        Self(n as i16)
    }

    /// Whether this is one of the processor's own exceptions.
    pub const fn is_exception(self) -> bool {
        self.0 < 0
    }

    /// The index into the NVIC tables.
    ///
    /// Processor exceptions have no NVIC entry. They map to an index past the end of every table,
    /// where reads return zero and writes are dropped.
    pub const fn table_index(self) -> usize {
        if self.0 < 0 {
            usize::MAX
        } else {
            self.0 as usize
        }
    }
}

impl Display for Irqn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match SystemHandler::from_irqn(*self) {
            Some(handler) => write!(f, "{handler:?}"),
            None if *self == Self::NON_MASKABLE_INT => f.write_str("NonMaskableInt"),
            None if *self == Self::HARD_FAULT => f.write_str("HardFault"),
            None => write!(f, "IRQ{}", self.0),
        }
    }
}

/// A processor exception with a configurable priority, named by its slot in the SCB
/// system-handler priority table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemHandler {
    MemoryManagement = 0,
    BusFault = 1,
    UsageFault = 2,
    SvCall = 7,
    DebugMonitor = 8,
    PendSv = 10,
    SysTick = 11,
}

impl SystemHandler {
    /// Maps an exception number to its system-handler slot, `(irqn & 0xf) - 4`.
    ///
    /// External interrupts, NMI, and HardFault have no slot.
    pub const fn from_irqn(irqn: Irqn) -> Option<Self> {
        if irqn.0 >= 0 || irqn.0 < -16 {
            return None;
        }
        match (irqn.0 & 0xf) - 4 {
            0 => Some(Self::MemoryManagement),
            1 => Some(Self::BusFault),
            2 => Some(Self::UsageFault),
            7 => Some(Self::SvCall),
            8 => Some(Self::DebugMonitor),
            10 => Some(Self::PendSv),
            11 => Some(Self::SysTick),
            _ => None,
        }
    }

    /// The slot in the system-handler priority table.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn irqn(self) -> Irqn {
        Irqn(self as i16 - 12)
    }
}

regfield::register! {
    /// The CPUID base register, read once into a staged copy by
    /// [`Scb::cpu_id`](crate::scb::Scb::cpu_id).
    pub struct CpuId {
        pub revision: u8 [0; 4] = ro,
        pub partno: u16 [4; 12] = ro,
        pub architecture: u8 [16; 4] = ro,
        pub variant: u8 [20; 4] = ro,
        pub implementer: u8 [24; 8] = ro,
    }
}
