#![cfg_attr(not(test), no_std)]

pub mod interrupts;
pub mod registers;

/// Serializes host tests that touch the simulated core registers.
#[cfg(test)]
pub(crate) static SIMULATION: std::sync::Mutex<()> = std::sync::Mutex::new(());
