use regfield::layout::Address;
use regfield::{Device, FixedAddress, Handle};

/// Permission to reach the memory-mapped hardware.
#[derive(Clone, Copy)]
pub struct PermissionRoot {
    _private: (),
}

impl PermissionRoot {
    /// # Safety
    ///
    /// This function is marked unsafe to make calls noisy. Call it only from the beginning of
    /// `main` or an interrupt handler to establish a permission root, and only on hardware that
    /// maps the devices this crate declares.
    pub unsafe fn new_unchecked() -> Self {
        Self { _private: () }
    }

    /// A handle to a device at its architectural address.
    pub fn device<D: FixedAddress>(self) -> Handle<'static, D> {
        unsafe { Handle::fixed() }
    }

    /// A handle to a device whose address depends on the part, such as a vendor peripheral.
    ///
    /// # Safety
    ///
    /// `address` must be the base of a `D` register block.
    pub unsafe fn device_at<D: Device>(self, address: Address) -> Handle<'static, D> {
        unsafe { Handle::from_address(address) }
    }
}
