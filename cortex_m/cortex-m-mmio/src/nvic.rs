//! The nested vectored interrupt controller.
//!
//! The set/clear table pairs are write-one-to-act: writing a one to a bit of ISER enables that
//! interrupt and zeros are ignored. Commands therefore go out as single stores of one bit, never
//! as read-modify-write sequences, which on ICER would disable every enabled interrupt that shares
//! the word.

use regfield::{FixedAddress, Handle, Reserved};

use crate::scb::Scb;
use crate::types::{Active, Clear, Enabled, Irqn, Pended, PriorityGrouping, Set, SystemHandler};

/// Interrupts the NVIC can address.
pub const INTERRUPT_COUNT: usize = 240;

regfield::register_block! {
    /// ISER: enable state, written one bit at a time to enable.
    pub struct SetEnable: 8 {
        pub state: [Enabled; 240] [1, 1, 0] = ro,
        pub set: [Set; 240] [1, 1, 0] = wo,
    }
}

regfield::register_block! {
    /// ICER: enable state, written one bit at a time to disable.
    pub struct ClearEnable: 8 {
        pub state: [Enabled; 240] [1, 1, 0] = ro,
        pub clear: [Clear; 240] [1, 1, 0] = wo,
    }
}

regfield::register_block! {
    /// ISPR: pending state, written one bit at a time to pend.
    pub struct SetPending: 8 {
        pub state: [Pended; 240] [1, 1, 0] = ro,
        pub set: [Set; 240] [1, 1, 0] = wo,
    }
}

regfield::register_block! {
    /// ICPR: pending state, written one bit at a time to unpend.
    pub struct ClearPending: 8 {
        pub state: [Pended; 240] [1, 1, 0] = ro,
        pub clear: [Clear; 240] [1, 1, 0] = wo,
    }
}

regfield::register_block! {
    /// IABR.
    pub struct ActiveBits: 8 {
        pub state: [Active; 240] [1, 1, 0] = ro,
    }
}

regfield::register_block! {
    /// IP: one priority byte per interrupt. Unimplemented low bits read as zero.
    pub struct Priorities: 60 {
        pub priority: [u8; 240] [8, 8, 0] = rw,
    }
}

regfield::register! {
    /// STIR.
    pub struct SoftwareTrigger {
        pub intid: u16 [0; 9] = wo,
    }
}

regfield::device! {
    /// The NVIC register block, from ISER0 through STIR.
    pub struct Nvic {
        base: 0xe000_e100,
        size: 0xe04,
        regs: {
            0x000 => pub iser: SetEnable,
            0x020 => _reserved0: [Reserved; 24],
            0x080 => pub icer: ClearEnable,
            0x0a0 => _reserved1: [Reserved; 24],
            0x100 => pub ispr: SetPending,
            0x120 => _reserved2: [Reserved; 24],
            0x180 => pub icpr: ClearPending,
            0x1a0 => _reserved3: [Reserved; 24],
            0x200 => pub iabr: ActiveBits,
            0x220 => _reserved4: [Reserved; 56],
            0x300 => pub ip: Priorities,
            0x3f0 => _reserved5: [Reserved; 644],
            0xe00 => pub stir: SoftwareTrigger,
        },
    }
}

const _: () = assert!(Nvic::END == 0xe000_ef04);

// Processor exceptions passed to the methods below resolve to `usize::MAX`, past the end of every
// table, so they read as zero and writes to them are dropped.
impl Nvic {
    pub fn enable_irq(&self, irqn: Irqn) {
        self.iser.set().write(irqn.table_index(), Set::Set);
    }

    pub fn disable_irq(&self, irqn: Irqn) {
        self.icer.clear().write(irqn.table_index(), Clear::Clear);
    }

    pub fn irq_enabled(&self, irqn: Irqn) -> bool {
        self.iser.state().get(irqn.table_index()) == Enabled::Enabled
    }

    pub fn set_pending(&self, irqn: Irqn) {
        self.ispr.set().write(irqn.table_index(), Set::Set);
    }

    pub fn clear_pending(&self, irqn: Irqn) {
        self.icpr.clear().write(irqn.table_index(), Clear::Clear);
    }

    pub fn is_pending(&self, irqn: Irqn) -> bool {
        self.ispr.state().get(irqn.table_index()) == Pended::Pended
    }

    pub fn is_active(&self, irqn: Irqn) -> bool {
        self.iabr.state().get(irqn.table_index()) == Active::Active
    }

    /// The priority byte of an external interrupt.
    pub fn irq_priority(&self, irqn: Irqn) -> u8 {
        self.ip.priority().get(irqn.table_index())
    }

    /// Replaces the priority byte of an external interrupt, keeping its neighbours.
    pub fn set_irq_priority(&self, irqn: Irqn, priority: u8) {
        self.ip.priority().replace(irqn.table_index(), priority);
    }

    /// Pends an external interrupt from software through STIR.
    pub fn trigger(&self, irqn: Irqn) {
        if irqn.is_exception() {
            log::warn!("STIR cannot trigger {irqn}");
            return;
        }
        self.stir.intid().write(irqn.0 as u16);
    }
}

/// The priority of any exception number, reading the SCB for processor exceptions.
///
/// NMI and HardFault have fixed priorities and read as zero.
pub fn irq_priority(nvic: Handle<Nvic>, scb: Handle<Scb>, irqn: Irqn) -> u8 {
    if irqn.is_exception() {
        SystemHandler::from_irqn(irqn).map_or(0, |handler| scb.priority(handler))
    } else {
        nvic.irq_priority(irqn)
    }
}

/// Sets the priority of any exception number, writing the SCB for processor exceptions.
///
/// Writes for NMI and HardFault are dropped.
pub fn set_irq_priority(nvic: Handle<Nvic>, scb: Handle<Scb>, irqn: Irqn, priority: u8) {
    if irqn.is_exception() {
        match SystemHandler::from_irqn(irqn) {
            Some(handler) => scb.set_priority(handler, priority),
            None => log::warn!("{irqn} has a fixed priority"),
        }
    } else {
        nvic.set_irq_priority(irqn, priority);
    }
}

pub fn priority_grouping(scb: Handle<Scb>) -> PriorityGrouping {
    scb.priority_grouping()
}

pub fn set_priority_grouping(scb: Handle<Scb>, grouping: PriorityGrouping) {
    scb.set_priority_grouping(grouping);
}
