//! Compile-time bit mask arithmetic.

/// Number of bits in one storage word.
pub const WORD_BITS: u32 = u32::BITS;

/// Returns whether a field of `width` bits starting at bit `offset` fits in one storage word.
pub const fn fits(offset: u32, width: u32) -> bool {
    width <= WORD_BITS && offset <= WORD_BITS - width
}

/// Returns `width` contiguous one bits starting at bit 0.
///
/// Panics if `width` exceeds [`WORD_BITS`]. In a constant context this is a build failure.
pub const fn bit_sequence(width: u32) -> u32 {
    assert!(width <= WORD_BITS, "bit width exceeds the storage word");
    if width == WORD_BITS {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Returns `width` contiguous one bits starting at bit `offset`, counting from the LSB.
///
/// Panics if the range does not fit in one storage word. In a constant context this is a build
/// failure:
///
/// ```compile_fail
/// const OVERFLOW: u32 = regfield::mask::bit_mask(30, 3);
/// ```
pub const fn bit_mask(offset: u32, width: u32) -> u32 {
    assert!(fits(offset, width), "bit range exceeds the storage word");
    if width == 0 {
        0
    } else {
        bit_sequence(width) << offset
    }
}

// Every width, placed at the top of the word.
seq_macro::seq!(W in 0..=32 {
    const _: () = assert!(bit_sequence(W).count_ones() == W);
    const _: () = assert!(bit_mask(32 - W, W).count_ones() == W);
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_edges() {
        assert_eq!(bit_sequence(0), 0);
        assert_eq!(bit_sequence(1), 1);
        assert_eq!(bit_sequence(5), 0b11111);
        assert_eq!(bit_sequence(31), 0x7fff_ffff);
        assert_eq!(bit_sequence(32), 0xffff_ffff);
    }

    #[test]
    fn mask_examples() {
        assert_eq!(bit_mask(3, 5), 0b1111_1000);
        assert_eq!(bit_mask(0, 32), u32::MAX);
        assert_eq!(bit_mask(31, 1), 0x8000_0000);
        assert_eq!(bit_mask(5, 3), 0x0000_00e0);
    }

    #[test]
    fn mask_properties_hold_for_every_range() {
        for width in 0..=WORD_BITS {
            for offset in 0..=(WORD_BITS - width) {
                let mask = bit_mask(offset, width);
                assert_eq!(mask.count_ones(), width);
                assert_eq!(mask, bit_sequence(width).checked_shl(offset).unwrap_or(0));
                if width > 0 {
                    assert_eq!(mask.trailing_zeros(), offset);
                    assert_eq!(WORD_BITS - mask.leading_zeros(), offset + width);
                }
            }
        }
    }

    #[test]
    fn fits_rejects_overflow() {
        assert!(fits(0, 32));
        assert!(fits(31, 1));
        assert!(fits(32, 0));
        assert!(!fits(30, 3));
        assert!(!fits(0, 33));
        assert!(!fits(u32::MAX, 2));
    }

    #[test]
    #[should_panic]
    fn mask_panics_outside_constant_context() {
        let offset = std::hint::black_box(30);
        bit_mask(offset, 3);
    }
}
