mod common;

use common::{poke, zeroed};
use cortex_m_mmio::addresses;
use cortex_m_mmio::timer::{Timer, TimerConfig, TimerInput};
use cortex_m_mmio::uninterruptible;
use regfield::Device;

#[test]
fn vendor_addresses() {
    assert_eq!(Timer::SIZE, 0x10);
    assert_eq!(addresses::TIMER0, 0x4000_0000);
    assert_eq!(addresses::TIMER1, 0x4000_1000);
    assert_eq!(addresses::UART0, 0x4000_4000);
    assert_eq!(addresses::UART1, 0x4000_5000);
}

fn configured(input: TimerInput) -> u32 {
    let timer: Timer = zeroed();
    let config = TimerConfig {
        value: 100,
        reload: 200,
        enable: true,
        interrupt_enable: false,
        input,
    };
    uninterruptible(|u| timer.configure(u, &config));
    assert_eq!(timer.value(), 100);
    assert_eq!(timer.reload(), 200);
    timer.ctrl.read().to_raw()
}

#[test]
fn inputs_select_one_mode_each() {
    assert_eq!(configured(TimerInput::System), 0b0001);
    assert_eq!(configured(TimerInput::ExternalEnable), 0b0011);
    assert_eq!(configured(TimerInput::ExternalClock), 0b0101);
}

#[test]
fn configure_replaces_the_previous_control() {
    let timer: Timer = zeroed();
    poke(&timer.ctrl, 0b1111);
    let config = TimerConfig {
        interrupt_enable: true,
        ..TimerConfig::default()
    };
    uninterruptible(|u| timer.configure(u, &config));
    assert_eq!(timer.ctrl.read().to_raw(), 0b1000);
    assert!(!timer.is_running());
}

#[test]
fn control_bits() {
    let timer: Timer = zeroed();
    timer.start();
    timer.enable_interrupt();
    assert!(timer.is_running());
    assert_eq!(timer.ctrl.read().to_raw(), 0b1001);
    timer.disable_interrupt();
    timer.stop();
    assert_eq!(timer.ctrl.read().to_raw(), 0);
}

#[test]
fn interrupt_status_and_clear_share_a_word() {
    let timer: Timer = zeroed();
    assert!(!timer.interrupt_pending());
    timer.clear_interrupt();
    assert!(timer.interrupt_pending());
}

#[test]
fn delay_leaves_the_timer_idle() {
    let timer: Timer = zeroed();
    timer.set_value(9);
    poke(&timer.interrupt, 1);
    timer.delay(500);
    assert_eq!(timer.reload(), 500);
    assert_eq!(timer.value(), 0);
    assert_eq!(timer.ctrl.read().to_raw(), 0);
}
