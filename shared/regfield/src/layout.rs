//! Register and device layout descriptors.
//!
//! A device layout is a `repr(C)` struct whose members are registers, register blocks, and
//! reserved words, declared in address order with [`device!`](crate::device). The macro checks
//! the total size and every member offset at build time and records the layout as a table of
//! [`RegisterDescriptor`]s, which [`validate`] can check again at run time.

use snafu::{ensure, Snafu};

use crate::access::AccessMode;
use crate::strategy::Composition;

/// A hardware address.
pub type Address = usize;

/// Bytes in one storage word.
pub const WORD_BYTES: usize = core::mem::size_of::<u32>();

/// One field of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: u32,
    pub width: u32,
    pub access: AccessMode,
    pub composition: Composition,
}

/// One member of a device layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub name: &'static str,
    /// Byte offset from the device base.
    pub offset: usize,
    /// Size in bytes.
    pub size: usize,
}

impl RegisterDescriptor {
    /// The byte offset just past this member.
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// A register declared with [`register!`](crate::register).
pub trait Register {
    const NAME: &'static str;
    const FIELDS: &'static [FieldDescriptor];

    /// Looks up a field by name.
    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

/// A device declared with [`device!`](crate::device).
pub trait Device: Sized {
    const NAME: &'static str;
    /// Size of the register block in bytes.
    const SIZE: usize;
    /// Every member in address order, reserved words included.
    const REGISTERS: &'static [RegisterDescriptor];

    /// Checks [`Self::REGISTERS`] against [`Self::SIZE`].
    fn validate_layout() -> Result<(), LayoutError> {
        validate(Self::REGISTERS, Self::SIZE)
    }

    /// Looks up a member by name.
    fn register(name: &str) -> Option<&'static RegisterDescriptor> {
        Self::REGISTERS.iter().find(|register| register.name == name)
    }
}

/// A device that lives at one fixed address.
pub trait FixedAddress: Device {
    const BASE: Address;

    /// The address just past the device.
    const END: Address = Self::BASE + Self::SIZE;
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum LayoutError {
    #[snafu(display("register {name} at offset {offset:#x} is not word aligned"))]
    Misaligned { name: &'static str, offset: usize },

    #[snafu(display("register {name} at offset {offset:#x} overlaps the one ending at {expected:#x}"))]
    Overlap {
        name: &'static str,
        offset: usize,
        expected: usize,
    },

    #[snafu(display("register {name} at offset {offset:#x} leaves a gap after {expected:#x}"))]
    Gap {
        name: &'static str,
        offset: usize,
        expected: usize,
    },

    #[snafu(display("layout covers {actual:#x} bytes but the device spans {expected:#x}"))]
    SizeMismatch { expected: usize, actual: usize },
}

/// Checks that `registers` tile `size` bytes exactly, in order, one word at a time.
pub fn validate(registers: &[RegisterDescriptor], size: usize) -> Result<(), LayoutError> {
    let mut expected = 0;
    for register in registers {
        ensure!(
            register.offset % WORD_BYTES == 0 && register.size % WORD_BYTES == 0,
            MisalignedSnafu {
                name: register.name,
                offset: register.offset,
            }
        );
        ensure!(
            register.offset >= expected,
            OverlapSnafu {
                name: register.name,
                offset: register.offset,
                expected,
            }
        );
        ensure!(
            register.offset == expected,
            GapSnafu {
                name: register.name,
                offset: register.offset,
                expected,
            }
        );
        expected = register.end();
    }
    ensure!(
        expected == size,
        SizeMismatchSnafu {
            expected: size,
            actual: expected,
        }
    );
    Ok(())
}

/// Declares a device register block.
///
/// Members are listed in address order with their documented byte offsets. The macro asserts at
/// build time that the struct is exactly `size` bytes and that every member sits at its offset,
/// and implements [`Device`]. With a `base`, it also implements [`FixedAddress`].
///
/// ```
/// use regfield::layout::{Device, FixedAddress};
/// use regfield::Reserved;
///
/// regfield::register! {
///     pub struct Counter {
///         pub value: u32 [0; 24] = rw,
///     }
/// }
///
/// regfield::device! {
///     /// A small timer.
///     pub struct Timer {
///         base: 0x4000_0000,
///         size: 0x10,
///         regs: {
///             0x0 => pub load: Counter,
///             0x4 => pub count: Counter,
///             0x8 => _reserved: [Reserved; 2],
///         },
///     }
/// }
///
/// assert_eq!(Timer::END, 0x4000_0010);
/// assert!(Timer::validate_layout().is_ok());
/// ```
///
/// A member at the wrong offset fails to build:
///
/// ```compile_fail
/// regfield::register! {
///     pub struct Counter {
///         pub value: u32 [0; 32] = rw,
///     }
/// }
///
/// regfield::device! {
///     pub struct Timer {
///         size: 0x8,
///         regs: {
///             0x0 => pub load: Counter,
///             0x8 => pub count: Counter,
///         },
///     }
/// }
/// ```
#[macro_export]
macro_rules! device {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(base: $base:literal,)?
            size: $size:literal,
            regs: {
                $(
                    $(#[$reg_attr:meta])*
                    $offset:literal => $reg_vis:vis $reg:ident: $reg_type:ty
                ),*
                $(,)?
            },
        }
    ) => {
        $(#[$attr])*
        #[repr(C)]
        $vis struct $name {
            $(
                $(#[$reg_attr])*
                $reg_vis $reg: $reg_type,
            )*
        }

        const _: () = assert!(
            ::core::mem::size_of::<$name>() == $size,
            concat!(stringify!($name), " does not match its documented size"),
        );

        $(
            const _: () = assert!(
                ::core::mem::offset_of!($name, $reg) == $offset,
                concat!(
                    stringify!($name), ".", stringify!($reg),
                    " does not sit at its documented offset",
                ),
            );
        )*

        impl $crate::layout::Device for $name {
            const NAME: &'static str = stringify!($name);
            const SIZE: usize = $size;
            const REGISTERS: &'static [$crate::layout::RegisterDescriptor] = &[
                $(
                    $crate::layout::RegisterDescriptor {
                        name: stringify!($reg),
                        offset: $offset,
                        size: ::core::mem::size_of::<$reg_type>(),
                    },
                )*
            ];
        }

        $(
            impl $crate::layout::FixedAddress for $name {
                const BASE: $crate::layout::Address = $base;
            }
        )?
    };
}
