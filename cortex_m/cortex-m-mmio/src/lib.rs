#![no_std]

//! Cortex-M3 core peripherals and CMSDK APB peripherals, declared with `regfield`.
//!
//! Every device is a `repr(C)` register layout reached through a [`regfield::Handle`]. Handles to
//! the fixed hardware instances come from a [`PermissionRoot`]; tests and simulators build devices
//! in RAM and wrap them with [`regfield::Handle::new`].

pub mod nvic;
pub mod scb;
pub mod system;
pub mod systick;
pub mod types;

#[cfg(feature = "cmsdk")]
pub mod addresses;
#[cfg(feature = "cmsdk")]
pub mod timer;
#[cfg(feature = "cmsdk")]
pub mod uart;

mod permission;
mod uninterruptible;

pub use crate::permission::PermissionRoot;
pub use crate::uninterruptible::{uninterruptible, Uninterruptible};
