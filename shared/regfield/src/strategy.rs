//! The two field storage strategies.
//!
//! Both strategies extract a field with `(word & mask) >> offset`. They differ in how a value is
//! put back:
//!
//! - [`Direct`] behaves like a native bitfield. The field's bits are cleared and the new value is
//!   inserted, leaving every other bit of the word untouched. When the field starts at bit 0 no
//!   shift is needed.
//! - [`Masked`] ORs the shifted value into the word. Bits already set inside the field's mask stay
//!   set, so two sets of different values accumulate. Clearing a masked field is the caller's job,
//!   usually through a raw store or a hardware write-one-to-clear protocol.

use crate::mask::bit_mask;

mod sealed {
    pub trait Sealed {}
}

/// How a field's bits are laid out and written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Composition {
    /// A native bitfield preceded by padding bits.
    PaddedBitfield,
    /// A native bitfield starting at bit 0.
    Bitfield,
    /// A whole word viewed through a mask, written with OR.
    MaskedWord,
}

/// A field storage strategy. Implemented only by [`Direct`] and [`Masked`].
pub trait Strategy: sealed::Sealed + 'static {
    /// Whether this strategy is the masked-word strategy.
    const MASKED: bool;

    /// Returns the word that results from putting `value` into the field at `offset`.
    fn insert(word: u32, value: u32, offset: u32, width: u32) -> u32;

    /// Extracts the field at `offset` from `word`.
    #[inline(always)]
    fn extract(word: u32, offset: u32, width: u32) -> u32 {
        (word & bit_mask(offset, width)) >> offset
    }

    /// Names the composition a field of this strategy at `offset` uses.
    fn composition(offset: u32) -> Composition {
        composition(Self::MASKED, offset)
    }
}

/// Names the composition of a field at `offset`, given whether it is masked.
pub const fn composition(masked: bool, offset: u32) -> Composition {
    if masked {
        Composition::MaskedWord
    } else if offset == 0 {
        Composition::Bitfield
    } else {
        Composition::PaddedBitfield
    }
}

/// Native bitfield insertion: clear the field, then insert.
pub enum Direct {}

/// Masked-word insertion: OR the value into the field.
pub enum Masked {}

impl sealed::Sealed for Direct {}
impl sealed::Sealed for Masked {}

impl Strategy for Direct {
    const MASKED: bool = false;

    #[inline(always)]
    fn insert(word: u32, value: u32, offset: u32, width: u32) -> u32 {
        let mask = bit_mask(offset, width);
        if offset == 0 {
            (word & !mask) | (value & mask)
        } else {
            (word & !mask) | ((value << offset) & mask)
        }
    }
}

impl Strategy for Masked {
    const MASKED: bool = true;

    #[inline(always)]
    fn insert(word: u32, value: u32, offset: u32, width: u32) -> u32 {
        word | ((value << offset) & bit_mask(offset, width))
    }
}

/// Returns the word holding only `value` at `offset`, every other bit zero.
#[inline(always)]
pub(crate) fn isolate(value: u32, offset: u32, width: u32) -> u32 {
    (value << offset) & bit_mask(offset, width)
}
