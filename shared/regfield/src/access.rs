//! Access modes that gate which field operations exist.

mod sealed {
    pub trait Sealed {}
}

/// Runtime tag naming an access mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessMode {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// An access mode marker.
pub trait Access: sealed::Sealed + 'static {
    const MODE: AccessMode;
}

/// Marks access modes that allow reads.
pub trait Readable: Access {}

/// Marks access modes that allow writes.
pub trait Writable: Access {}

/// Reads and writes are both allowed.
pub enum ReadWrite {}

/// Only reads are allowed.
pub enum ReadOnly {}

/// Only writes are allowed.
pub enum WriteOnly {}

impl sealed::Sealed for ReadWrite {}
impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for WriteOnly {}

impl Access for ReadWrite {
    const MODE: AccessMode = AccessMode::ReadWrite;
}

impl Access for ReadOnly {
    const MODE: AccessMode = AccessMode::ReadOnly;
}

impl Access for WriteOnly {
    const MODE: AccessMode = AccessMode::WriteOnly;
}

impl Readable for ReadWrite {}
impl Readable for ReadOnly {}
impl Writable for ReadWrite {}
impl Writable for WriteOnly {}
