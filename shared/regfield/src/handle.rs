use core::fmt::{self, Debug, Formatter};
use core::ops::Deref;

use crate::layout::{Address, Device, FixedAddress};

/// A non-owning reference to a device.
///
/// Handles are cheap to create and freely copied; copying one copies the reference, never the
/// device. Any number of handles may name the same device. Devices themselves are neither `Clone`
/// nor `Copy` and have no public constructor, so hardware cannot be duplicated by value.
pub struct Handle<'r, D> {
    device: &'r D,
}

impl<'r, D> Handle<'r, D> {
    /// Wraps a reference to a device, for example one in RAM.
    pub const fn new(device: &'r D) -> Self {
        Self { device }
    }

    /// Creates a handle to the device at `address`.
    ///
    /// # Safety
    ///
    /// `address` must be the base of a `D` register block that stays mapped for `'r`, and must be
    /// suitably aligned.
    pub unsafe fn from_address(address: Address) -> Self {
        Self {
            device: unsafe { &*(address as *const D) },
        }
    }

    /// The device's base address.
    pub fn address(&self) -> Address {
        self.device as *const D as Address
    }

    /// The referenced device, with the handle's lifetime.
    pub fn device(&self) -> &'r D {
        self.device
    }
}

impl<D: FixedAddress> Handle<'static, D> {
    /// Creates a handle to the device at its fixed base address.
    ///
    /// # Safety
    ///
    /// The code must run on hardware that maps `D` at [`FixedAddress::BASE`].
    pub unsafe fn fixed() -> Self {
        unsafe { Self::from_address(D::BASE) }
    }
}

impl<'r, D> Clone for Handle<'r, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, D> Copy for Handle<'r, D> {}

impl<'r, D> Deref for Handle<'r, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.device
    }
}

impl<'r, D> PartialEq for Handle<'r, D> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.device, other.device)
    }
}

impl<'r, D> Eq for Handle<'r, D> {}

impl<'r, D: Device> Debug for Handle<'r, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#010x}", D::NAME, self.address())
    }
}
