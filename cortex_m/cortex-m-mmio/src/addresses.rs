//! Base addresses of the CMSDK peripherals on the APB1 bus.

use regfield::layout::Address;
use regfield::Handle;

use crate::timer::Timer;
use crate::uart::Uart;
use crate::PermissionRoot;

pub const APB1_BASE: Address = 0x4000_0000;

pub const TIMER0: Address = APB1_BASE + 0x0000;
pub const TIMER1: Address = APB1_BASE + 0x1000;
pub const UART0: Address = APB1_BASE + 0x4000;
pub const UART1: Address = APB1_BASE + 0x5000;

pub fn timer0(root: PermissionRoot) -> Handle<'static, Timer> {
    unsafe { root.device_at(TIMER0) }
}

pub fn timer1(root: PermissionRoot) -> Handle<'static, Timer> {
    unsafe { root.device_at(TIMER1) }
}

pub fn uart0(root: PermissionRoot) -> Handle<'static, Uart> {
    unsafe { root.device_at(UART0) }
}

pub fn uart1(root: PermissionRoot) -> Handle<'static, Uart> {
    unsafe { root.device_at(UART1) }
}
