//! The system control block.
//!
//! Bit positions follow the Armv7-M Architecture Reference Manual, section B3.2.

use regfield::Staged;

use crate::types::{Active, Clear, CpuId, Enabled, Pended, PriorityGrouping, Set, SystemHandler};

/// The key AIRCR ignores writes without.
pub const VECTKEY: u16 = 0x05fa;

regfield::field_enum! {
    pub enum SystemReset: 1 {
        NoEffect = 0,
        Request = 1,
    }
}

regfield::field_enum! {
    pub enum Endianness: 1 {
        Little = 0,
        Big = 1,
    }
}

regfield::register! {
    /// Interrupt control and state.
    pub struct Icsr {
        pub vectactive: u16 [0; 9] = ro,
        pub rettobase: bool [11; 1] = ro,
        pub vectpending: u16 [12; 9] = ro,
        pub isrpending: bool [22; 1] = ro,
        pub pendstclr: Clear [25; 1] = wo,
        pub pendstset: Pended [26; 1] = rw as Set,
        pub pendsvclr: Clear [27; 1] = wo,
        pub pendsvset: Pended [28; 1] = rw as Set,
        pub nmipendset: Pended [31; 1] = rw as Set,
    }
}

regfield::register! {
    /// Vector table offset.
    pub struct Vtor {
        pub tbloff: u32 [7; 25] = rw,
        pub address: u32 [0; 32] = rw,
    }
}

regfield::register! {
    /// Application interrupt and reset control. Writes without [`VECTKEY`] are ignored, so the
    /// register is written whole from a staged copy.
    pub struct Aircr {
        pub vectreset: bool [0; 1] = wo,
        pub vectclractive: bool [1; 1] = wo,
        pub sysresetreq: SystemReset [2; 1] = wo,
        pub prigroup: PriorityGrouping [8; 3] = rw,
        pub endianness: Endianness [15; 1] = ro,
        pub vectkeystat: u16 [16; 16] = ro,
        pub vectkey: u16 [16; 16] = wo,
    }
}

regfield::register! {
    /// System control.
    pub struct Scr {
        pub sleeponexit: bool [1; 1] = rw,
        pub sleepdeep: bool [2; 1] = rw,
        pub sevonpend: bool [4; 1] = rw,
    }
}

regfield::register! {
    /// Configuration and control.
    pub struct Ccr {
        pub nonbasethrdena: bool [0; 1] = rw,
        pub usersetmpend: bool [1; 1] = rw,
        pub unalign_trp: Enabled [3; 1] = rw,
        pub div_0_trp: Enabled [4; 1] = rw,
        pub bfhfnmign: bool [8; 1] = rw,
        pub stkalign: bool [9; 1] = rw,
    }
}

regfield::register_block! {
    /// SHPR1 to SHPR3: one priority byte per system handler slot. Slots 3 to 6 and 9 are
    /// reserved.
    pub struct SystemPriorities: 3 {
        pub priority: [u8; 12] [8, 8, 0] = rw,
    }
}

regfield::register! {
    /// System handler control and state.
    pub struct Shcsr {
        pub memfaultact: Active [0; 1] = ro,
        pub busfaultact: Active [1; 1] = ro,
        pub usgfaultact: Active [3; 1] = ro,
        pub svcallact: Active [7; 1] = ro,
        pub monitoract: Active [8; 1] = ro,
        pub pendsvact: Active [10; 1] = ro,
        pub systickact: Active [11; 1] = ro,
        pub usgfaultpended: Pended [12; 1] = ro,
        pub memfaultpended: Pended [13; 1] = ro,
        pub busfaultpended: Pended [14; 1] = ro,
        pub svcallpended: Pended [15; 1] = ro,
        pub memfaultena: Enabled [16; 1] = rw,
        pub busfaultena: Enabled [17; 1] = rw,
        pub usgfaultena: Enabled [18; 1] = rw,
    }
}

regfield::register! {
    /// Configurable fault status: MMFSR, BFSR and UFSR in one word. Bits are write-one-to-clear.
    pub struct Cfsr {
        pub mmfsr: u8 [0; 8] = ro,
        pub bfsr: u8 [8; 8] = ro,
        pub ufsr: u16 [16; 16] = ro,

        pub iaccviol: bool [0; 1] = rw,
        pub daccviol: bool [1; 1] = rw,
        pub munstkerr: bool [3; 1] = rw,
        pub mstkerr: bool [4; 1] = rw,
        pub mmarvalid: bool [7; 1] = rw,

        pub ibuserr: bool [8; 1] = rw,
        pub preciserr: bool [9; 1] = rw,
        pub impreciserr: bool [10; 1] = rw,
        pub unstkerr: bool [11; 1] = rw,
        pub stkerr: bool [12; 1] = rw,
        pub bfarvalid: bool [15; 1] = rw,

        pub undefinstr: bool [16; 1] = rw,
        pub invstate: bool [17; 1] = rw,
        pub invpc: bool [18; 1] = rw,
        pub nocp: bool [19; 1] = rw,
        pub unaligned: bool [24; 1] = rw,
        pub divbyzero: bool [25; 1] = rw,
    }
}

regfield::register! {
    /// HardFault status. Bits are write-one-to-clear.
    pub struct Hfsr {
        pub vecttbl: bool [1; 1] = rw,
        pub forced: bool [30; 1] = rw,
        pub debugevt: bool [31; 1] = rw,
    }
}

regfield::register! {
    /// Debug fault status. Bits are write-one-to-clear.
    pub struct Dfsr {
        pub halted: bool [0; 1] = rw,
        pub bkpt: bool [1; 1] = rw,
        pub dwttrap: bool [2; 1] = rw,
        pub vcatch: bool [3; 1] = rw,
        pub external: bool [4; 1] = rw,
    }
}

regfield::register! {
    /// MMFAR or BFAR.
    pub struct FaultAddress {
        pub address: u32 [0; 32] = rw,
    }
}

regfield::register_block! {
    /// AFSR: one latched flag per AUXFAULT input, write-one-to-clear.
    pub struct AuxiliaryFaults: 1 {
        pub flags: [bool; 32] [1, 1, 0] = rw,
    }
}

regfield::device! {
    pub struct Scb {
        base: 0xe000_ed00,
        size: 0x40,
        regs: {
            0x00 => pub cpuid: CpuId,
            0x04 => pub icsr: Icsr,
            0x08 => pub vtor: Vtor,
            0x0c => pub aircr: Aircr,
            0x10 => pub scr: Scr,
            0x14 => pub ccr: Ccr,
            0x18 => pub shp: SystemPriorities,
            0x24 => pub shcsr: Shcsr,
            0x28 => pub cfsr: Cfsr,
            0x2c => pub hfsr: Hfsr,
            0x30 => pub dfsr: Dfsr,
            0x34 => pub mmfar: FaultAddress,
            0x38 => pub bfar: FaultAddress,
            0x3c => pub afsr: AuxiliaryFaults,
        },
    }
}

/// Faults that are escalated to HardFault unless enabled in SHCSR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigurableFault {
    MemoryManagement,
    BusFault,
    UsageFault,
}

impl Scb {
    pub fn cpu_id(&self) -> CpuId<Staged> {
        self.cpuid.read()
    }

    pub fn priority(&self, handler: SystemHandler) -> u8 {
        self.shp.priority().get(handler.index())
    }

    pub fn set_priority(&self, handler: SystemHandler, priority: u8) {
        self.shp.priority().replace(handler.index(), priority);
    }

    pub fn priority_grouping(&self) -> PriorityGrouping {
        self.aircr.prigroup().get()
    }

    pub fn set_priority_grouping(&self, grouping: PriorityGrouping) {
        log::debug!("priority grouping {grouping:?}");
        Aircr::<Staged>::zero()
            .with_vectkey(VECTKEY)
            .with_prigroup(grouping)
            .commit(&self.aircr);
    }

    /// Asks the system for a reset, keeping the priority grouping. The reset is asynchronous;
    /// execution may continue for a short while after this returns.
    pub fn request_reset(&self) {
        log::warn!("system reset requested");
        Aircr::<Staged>::zero()
            .with_vectkey(VECTKEY)
            .with_prigroup(self.priority_grouping())
            .with_sysresetreq(SystemReset::Request)
            .commit(&self.aircr);
    }

    pub fn endianness(&self) -> Endianness {
        self.aircr.endianness().get()
    }

    pub fn pend_sv(&self) {
        self.icsr.pendsvset().write(Set::Set);
    }

    pub fn clear_pend_sv(&self) {
        self.icsr.pendsvclr().write(Clear::Clear);
    }

    pub fn is_pend_sv_pending(&self) -> bool {
        self.icsr.pendsvset().get() == Pended::Pended
    }

    pub fn pend_systick(&self) {
        self.icsr.pendstset().write(Set::Set);
    }

    pub fn clear_pend_systick(&self) {
        self.icsr.pendstclr().write(Clear::Clear);
    }

    pub fn is_systick_pending(&self) -> bool {
        self.icsr.pendstset().get() == Pended::Pended
    }

    /// The exception number of the running handler, or 0 in thread mode.
    pub fn active_vector(&self) -> u16 {
        self.icsr.vectactive().get()
    }

    /// The exception number of the highest-priority pending exception, or 0 if none.
    pub fn pending_vector(&self) -> u16 {
        self.icsr.vectpending().get()
    }

    pub fn vector_table_offset(&self) -> u32 {
        self.vtor.tbloff().get() << 7
    }

    /// Moves the vector table. The low seven bits of `offset` are ignored by the hardware.
    pub fn set_vector_table_offset(&self, offset: u32) {
        if offset & 0x7f != 0 {
            log::warn!("vector table offset {offset:#010x} is not 128-byte aligned");
        }
        self.vtor.address().set(offset & !0x7f);
    }

    pub fn set_sleep_deep(&self, deep: bool) {
        self.scr.sleepdeep().set(deep);
    }

    pub fn set_sleep_on_exit(&self, sleep_on_exit: bool) {
        self.scr.sleeponexit().set(sleep_on_exit);
    }

    pub fn set_divide_by_zero_trap(&self, enabled: Enabled) {
        self.ccr.div_0_trp().replace(enabled);
    }

    pub fn set_unaligned_trap(&self, enabled: Enabled) {
        self.ccr.unalign_trp().replace(enabled);
    }

    pub fn fault_enabled(&self, fault: ConfigurableFault) -> Enabled {
        match fault {
            ConfigurableFault::MemoryManagement => self.shcsr.memfaultena().get(),
            ConfigurableFault::BusFault => self.shcsr.busfaultena().get(),
            ConfigurableFault::UsageFault => self.shcsr.usgfaultena().get(),
        }
    }

    pub fn set_fault_enabled(&self, fault: ConfigurableFault, enabled: Enabled) {
        match fault {
            ConfigurableFault::MemoryManagement => self.shcsr.memfaultena().replace(enabled),
            ConfigurableFault::BusFault => self.shcsr.busfaultena().replace(enabled),
            ConfigurableFault::UsageFault => self.shcsr.usgfaultena().replace(enabled),
        }
    }

    pub fn configurable_fault_status(&self) -> Cfsr<Staged> {
        self.cfsr.read()
    }

    /// Clears the fault bits set in `faults`, typically a status read earlier.
    pub fn clear_configurable_faults(&self, faults: &Cfsr<Staged>) {
        faults.commit(&self.cfsr);
    }

    pub fn hard_fault_status(&self) -> Hfsr<Staged> {
        self.hfsr.read()
    }

    pub fn clear_hard_faults(&self, faults: &Hfsr<Staged>) {
        faults.commit(&self.hfsr);
    }

    pub fn debug_fault_status(&self) -> Dfsr<Staged> {
        self.dfsr.read()
    }

    pub fn clear_debug_faults(&self, faults: &Dfsr<Staged>) {
        faults.commit(&self.dfsr);
    }

    /// The faulting address of a MemManage fault, if MMFAR holds one.
    pub fn memory_fault_address(&self) -> Option<u32> {
        self.cfsr
            .mmarvalid()
            .get()
            .then(|| self.mmfar.address().get())
    }

    /// The faulting address of a precise BusFault, if BFAR holds one.
    pub fn bus_fault_address(&self) -> Option<u32> {
        self.cfsr
            .bfarvalid()
            .get()
            .then(|| self.bfar.address().get())
    }

    pub fn auxiliary_fault(&self, input: usize) -> bool {
        self.afsr.flags().get(input)
    }

    pub fn clear_auxiliary_fault(&self, input: usize) {
        self.afsr.flags().write(input, true);
    }
}
