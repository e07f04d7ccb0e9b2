use cortex_m_mmio::types::{CpuId, Enabled, Irqn, PriorityGrouping, SystemHandler};
use regfield::Staged;

#[test]
fn system_handler_slots() {
    let cases = [
        (Irqn::MEMORY_MANAGEMENT, Some(SystemHandler::MemoryManagement), 0),
        (Irqn::BUS_FAULT, Some(SystemHandler::BusFault), 1),
        (Irqn::USAGE_FAULT, Some(SystemHandler::UsageFault), 2),
        (Irqn::SVCALL, Some(SystemHandler::SvCall), 7),
        (Irqn::DEBUG_MONITOR, Some(SystemHandler::DebugMonitor), 8),
        (Irqn::PENDSV, Some(SystemHandler::PendSv), 10),
        (Irqn::SYSTICK, Some(SystemHandler::SysTick), 11),
    ];
    for (irqn, handler, index) in cases {
        assert_eq!(SystemHandler::from_irqn(irqn), handler);
        assert_eq!(handler.map(SystemHandler::index), Some(index));
        assert_eq!(handler.map(SystemHandler::irqn), Some(irqn));
    }
    assert_eq!(SystemHandler::from_irqn(Irqn::NON_MASKABLE_INT), None);
    assert_eq!(SystemHandler::from_irqn(Irqn::HARD_FAULT), None);
    assert_eq!(SystemHandler::from_irqn(Irqn(-28)), None);
    assert_eq!(SystemHandler::from_irqn(Irqn(3)), None);
}

#[test]
fn table_indices() {
    assert_eq!(Irqn::external(17).table_index(), 17);
    assert_eq!(Irqn::external(u8::MAX).table_index(), 255);
    assert!(!Irqn::external(u8::MAX).is_exception());
    assert_eq!(Irqn::PENDSV.table_index(), usize::MAX);
    assert!(Irqn::NON_MASKABLE_INT.is_exception());
    assert!(!Irqn(0).is_exception());
}

#[test]
fn irqn_display() {
    assert_eq!(Irqn::SYSTICK.to_string(), "SysTick");
    assert_eq!(Irqn::HARD_FAULT.to_string(), "HardFault");
    assert_eq!(Irqn::NON_MASKABLE_INT.to_string(), "NonMaskableInt");
    assert_eq!(Irqn(7).to_string(), "IRQ7");
}

#[test]
fn grouping_splits() {
    assert_eq!(PriorityGrouping::Group7Sub1.preemption_bits(), 7);
    assert_eq!(PriorityGrouping::Group0Sub8.subpriority_bits(), 8);
    assert_eq!(PriorityGrouping::Group3Sub5.preemption_bits(), 3);
}

#[test]
fn enabled_converts_to_and_from_bool() {
    assert_eq!(Enabled::from(true), Enabled::Enabled);
    assert!(!bool::from(Enabled::Disabled));
}

#[test]
fn cpu_id_decodes_a_cortex_m3() {
    let id = CpuId::<Staged>::new(0x412f_c231);
    assert_eq!(id.implementer().get(), 0x41);
    assert_eq!(id.variant().get(), 0x2);
    assert_eq!(id.architecture().get(), 0xf);
    assert_eq!(id.partno().get(), 0xc23);
    assert_eq!(id.revision().get(), 1);
}
