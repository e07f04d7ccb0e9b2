//! Core registers reached with `mrs`/`msr` rather than through memory.
//!
//! Off target, each register is simulated by a process-wide word so that code built on top of it
//! can be exercised by host tests.

pub mod primask;
