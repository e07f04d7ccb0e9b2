//! Value types that can back a field, and the strategy each defaults to.

use crate::strategy::{Direct, Strategy};

/// A type that can be stored in a register field.
///
/// Integers and `bool` default to the [`Direct`] strategy. Enumerations declared with
/// [`field_enum!`](crate::field_enum) default to the [`Masked`](crate::strategy::Masked)
/// strategy. Types that do not implement this trait cannot back a field at all:
///
/// ```compile_fail
/// regfield::register! {
///     pub struct Bad {
///         pub value: f32 [0; 8] = rw,
///     }
/// }
/// ```
///
/// The trait stays open so that [`field_enum!`](crate::field_enum) can implement it in other
/// crates. Hand-written implementations must decode every raw pattern in
/// [`from_raw`](Self::from_raw) and should keep [`to_raw`](Self::to_raw) within
/// [`BITS`](Self::BITS). Fields mask stored bits to their declared width, so wider results are
/// truncated and never reach neighbouring fields. Signed integers are not implemented: a field
/// holds a bit pattern, not a sign.
pub trait FieldValue: Copy + 'static {
    /// The number of significant bits.
    const BITS: u32;

    /// The value whose raw representation is 0.
    const ZERO: Self;

    /// The strategy used when a field does not name one.
    type Strategy: Strategy;

    /// Converts raw bits to a value. Bits above [`Self::BITS`] are ignored.
    fn from_raw(raw: u32) -> Self;

    /// Converts a value to raw bits.
    fn to_raw(self) -> u32;
}

impl FieldValue for bool {
    const BITS: u32 = 1;
    const ZERO: Self = false;
    type Strategy = Direct;

    #[inline(always)]
    fn from_raw(raw: u32) -> Self {
        raw & 1 != 0
    }

    #[inline(always)]
    fn to_raw(self) -> u32 {
        self as u32
    }
}

macro_rules! impl_field_value_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                type Strategy = Direct;

                #[inline(always)]
                fn from_raw(raw: u32) -> Self {
                    raw as $ty
                }

                #[inline(always)]
                fn to_raw(self) -> u32 {
                    self as u32
                }
            }
        )*
    };
}

impl_field_value_for_unsigned!(u8, u16, u32);

/// Declares a fieldless enumeration usable as a [`FieldValue`].
///
/// The enumeration must name every bit pattern of its declared width, so that any raw field
/// contents decode to a variant. It defaults to the [`Masked`](crate::strategy::Masked) strategy.
///
/// ```
/// regfield::field_enum! {
///     /// Clock source selection.
///     pub enum ClockSource: 1 {
///         External = 0,
///         Processor = 1,
///     }
/// }
///
/// use regfield::FieldValue;
/// assert_eq!(ClockSource::from_raw(3), ClockSource::Processor);
/// assert_eq!(ClockSource::ZERO, ClockSource::External);
/// ```
///
/// Leaving out a bit pattern is a build failure:
///
/// ```compile_fail
/// regfield::field_enum! {
///     pub enum Partial: 2 {
///         A = 0,
///         B = 1,
///         C = 2,
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident: $bits:literal {
            $(
                $(#[$variant_attr:meta])*
                $variant:ident = $value:literal
            ),+
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_attr])*
                $variant = $value,
            )+
        }

        const _: () = {
            let values: &[u8] = &[$($value),+];
            assert!($bits >= 1 && $bits <= 8, "field enums hold between 1 and 8 bits");
            assert!(
                values.len() == 1 << $bits,
                concat!(stringify!($name), " must name every bit pattern of its width"),
            );
            let mut i = 0;
            while i < values.len() {
                assert!((values[i] as u32) < (1 << $bits));
                i += 1;
            }
        };

        impl $crate::FieldValue for $name {
            const BITS: u32 = $bits;
            // SAFETY: every pattern below 1 << BITS, including 0, names a variant.
            const ZERO: Self = unsafe { ::core::mem::transmute::<u8, $name>(0) };
            type Strategy = $crate::strategy::Masked;

            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                let raw = (raw & $crate::mask::bit_sequence($bits)) as u8;
                // SAFETY: every pattern below 1 << BITS names a variant.
                unsafe { ::core::mem::transmute::<u8, $name>(raw) }
            }

            #[inline(always)]
            fn to_raw(self) -> u32 {
                self as u32
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Composition;

    crate::field_enum! {
        enum Split: 2 {
            Even = 0,
            Low = 1,
            High = 2,
            Max = 3,
        }
    }

    #[test]
    fn integers_truncate() {
        assert_eq!(u8::from_raw(0x1ff), 0xff);
        assert_eq!(u16::from_raw(0x1_2345), 0x2345);
        assert_eq!(u32::from_raw(u32::MAX), u32::MAX);
        assert!(bool::from_raw(3));
        assert!(!bool::from_raw(2));
    }

    #[test]
    fn enums_decode_every_pattern() {
        assert_eq!(Split::from_raw(0), Split::Even);
        assert_eq!(Split::from_raw(2), Split::High);
        assert_eq!(Split::from_raw(7), Split::Max);
        assert_eq!(Split::Low.to_raw(), 1);
        assert_eq!(Split::ZERO, Split::Even);
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Overwide(u32);

    impl FieldValue for Overwide {
        const BITS: u32 = 4;
        const ZERO: Self = Overwide(0);
        type Strategy = Direct;

        fn from_raw(raw: u32) -> Self {
            Overwide(raw & 0xf)
        }

        fn to_raw(self) -> u32 {
            self.0
        }
    }

    #[test]
    fn overwide_raw_values_stay_in_their_field() {
        use crate::access::ReadWrite;
        use crate::field::Field;
        use crate::storage::{Live, Word};
        use crate::strategy::Masked;

        let word = Word::<Live>::new(0);
        let direct = Field::<Overwide, 8, 4, ReadWrite, Direct, Live>::new(&word);
        direct.set(Overwide(u32::MAX));
        assert_eq!(word.load(), 0x0000_0f00);
        assert_eq!(direct.get(), Overwide(0xf));

        let word = Word::<Live>::new(0);
        let masked = Field::<Overwide, 8, 4, ReadWrite, Masked, Live>::new(&word);
        masked.write(Overwide(0x1234));
        assert_eq!(word.load(), 0x0000_0400);
    }

    #[test]
    fn default_strategies() {
        assert_eq!(
            <<u8 as FieldValue>::Strategy as Strategy>::composition(0),
            Composition::Bitfield,
        );
        assert_eq!(
            <<bool as FieldValue>::Strategy as Strategy>::composition(4),
            Composition::PaddedBitfield,
        );
        assert_eq!(
            <<Split as FieldValue>::Strategy as Strategy>::composition(4),
            Composition::MaskedWord,
        );
    }
}
