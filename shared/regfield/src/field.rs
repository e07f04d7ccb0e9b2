//! Typed views over a bit range of one storage word.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::access::{Access, AccessMode, Readable, Writable};
use crate::mask::{bit_mask, fits};
use crate::storage::{Storage, Word};
use crate::strategy::{isolate, Composition, Direct, Strategy};
use crate::value::FieldValue;

/// A view of `WIDTH` bits at bit `OFFSET` of a storage word.
///
/// - `V` is the type read from the field.
/// - `A` is the access mode. [`get`](Self::get) exists only for [`Readable`] modes and
///   [`set`](Self::set) only for [`Writable`] modes.
/// - `S` is the storage strategy, [`Direct`](crate::strategy::Direct) or
///   [`Masked`](crate::strategy::Masked).
/// - `K` is the storage kind of the word, [`Live`](crate::Live) or [`Staged`](crate::Staged).
/// - `W` is the type written to the field. It is usually `V`; write-one-to-act registers often
///   read state through one type and accept commands through another.
///
/// Fields are locations rather than values, so a view is neither `Clone` nor `Copy`. Read results
/// are plain values. Comparisons between fields, or between a field and a value, compare what
/// [`get`](Self::get) returns.
///
/// Registers are normally declared with [`register!`](crate::register), which builds these views
/// on demand. Writing a read-only field does not compile:
///
/// ```compile_fail
/// regfield::register! {
///     pub struct Status {
///         pub busy: bool [0; 1] = ro,
///     }
/// }
///
/// let status = Status::<regfield::Staged>::zero();
/// status.busy().set(true);
/// ```
///
/// Neither does reading a write-only field:
///
/// ```compile_fail
/// regfield::register! {
///     pub struct Command {
///         pub start: bool [0; 1] = wo,
///     }
/// }
///
/// let command = Command::<regfield::Staged>::zero();
/// let _ = command.start().get();
/// ```
pub struct Field<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K: Storage, W = V> {
    word: &'r Word<K>,
    _marker: PhantomData<fn() -> (V, A, S, W)>,
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    V: FieldValue,
    A: Access,
    S: Strategy,
    K: Storage,
    W: FieldValue,
{
    /// Evaluates to `()` when the field fits its word and its value type.
    pub const LAYOUT: () = {
        assert!(WIDTH >= 1, "a field holds at least one bit");
        assert!(fits(OFFSET, WIDTH), "field exceeds the storage word");
        assert!(WIDTH <= V::BITS, "field is wider than its value type");
    };

    /// The bits this field occupies.
    pub const MASK: u32 = bit_mask(OFFSET, WIDTH);

    /// Creates a view of the field inside `word`.
    #[inline(always)]
    pub fn new(word: &'r Word<K>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT;
        Self {
            word,
            _marker: PhantomData,
        }
    }

    /// The bit offset of the field.
    pub const fn offset(&self) -> u32 {
        OFFSET
    }

    /// The bit width of the field.
    pub const fn width(&self) -> u32 {
        WIDTH
    }

    /// The access mode of the field.
    pub const fn access(&self) -> AccessMode {
        A::MODE
    }

    /// How the field is stored and written.
    pub fn composition(&self) -> Composition {
        S::composition(OFFSET)
    }
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    V: FieldValue,
    A: Readable,
    S: Strategy,
    K: Storage,
    W: FieldValue,
{
    /// Reads the field.
    #[inline(always)]
    pub fn get(&self) -> V {
        V::from_raw(S::extract(self.word.load(), OFFSET, WIDTH))
    }
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    V: FieldValue,
    A: Writable,
    S: Strategy,
    K: Storage,
    W: FieldValue,
{
    /// Writes the field according to its strategy.
    ///
    /// A direct field replaces its own bits and keeps every other bit of the word. A masked field
    /// ORs the value into its bits, so earlier values are not cleared. On live storage both load
    /// the word, compute, and store it back; an interrupt handler touching the same word in
    /// between loses its update.
    #[inline(always)]
    pub fn set(&self, value: W) {
        let word = self.word.load();
        self.word.store(S::insert(word, value.to_raw(), OFFSET, WIDTH));
    }

    /// Stores a word holding only this field's value, with every other bit zero.
    ///
    /// This is one store with no load. It suits write-one-to-set and write-one-to-clear registers
    /// where zero bits have no effect.
    #[inline(always)]
    pub fn write(&self, value: W) {
        self.word.store(isolate(value.to_raw(), OFFSET, WIDTH));
    }

    /// Clears the field, then inserts `value`, whatever the field's strategy.
    ///
    /// For a masked field this is the read-modify-write that [`set`](Self::set) leaves out.
    #[inline(always)]
    pub fn replace(&self, value: W) {
        let word = self.word.load();
        self.word.store(Direct::insert(word, value.to_raw(), OFFSET, WIDTH));
    }
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> Debug
    for Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    A: Access,
    K: Storage,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("offset", &OFFSET)
            .field("width", &WIDTH)
            .field("access", &A::MODE)
            .field("storage", &K::MODE)
            .finish()
    }
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> PartialEq<V>
    for Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    V: FieldValue + PartialEq,
    A: Readable,
    S: Strategy,
    K: Storage,
    W: FieldValue,
{
    fn eq(&self, other: &V) -> bool {
        self.get() == *other
    }
}

impl<'r, V, const OFFSET: u32, const WIDTH: u32, A, S, K, W> PartialOrd<V>
    for Field<'r, V, OFFSET, WIDTH, A, S, K, W>
where
    V: FieldValue + PartialOrd,
    A: Readable,
    S: Strategy,
    K: Storage,
    W: FieldValue,
{
    fn partial_cmp(&self, other: &V) -> Option<Ordering> {
        self.get().partial_cmp(other)
    }
}

impl<'a, 'b, V, const O1: u32, const W1: u32, A1, S1, K1, X1, const O2: u32, const W2: u32, A2, S2, K2, X2>
    PartialEq<Field<'b, V, O2, W2, A2, S2, K2, X2>> for Field<'a, V, O1, W1, A1, S1, K1, X1>
where
    V: FieldValue + PartialEq,
    A1: Readable,
    A2: Readable,
    S1: Strategy,
    S2: Strategy,
    K1: Storage,
    K2: Storage,
    X1: FieldValue,
    X2: FieldValue,
{
    fn eq(&self, other: &Field<'b, V, O2, W2, A2, S2, K2, X2>) -> bool {
        self.get() == other.get()
    }
}

impl<'a, 'b, V, const O1: u32, const W1: u32, A1, S1, K1, X1, const O2: u32, const W2: u32, A2, S2, K2, X2>
    PartialOrd<Field<'b, V, O2, W2, A2, S2, K2, X2>> for Field<'a, V, O1, W1, A1, S1, K1, X1>
where
    V: FieldValue + PartialOrd,
    A1: Readable,
    A2: Readable,
    S1: Strategy,
    S2: Strategy,
    K1: Storage,
    K2: Storage,
    X1: FieldValue,
    X2: FieldValue,
{
    fn partial_cmp(&self, other: &Field<'b, V, O2, W2, A2, S2, K2, X2>) -> Option<Ordering> {
        self.get().partial_cmp(&other.get())
    }
}

// Comparisons with the value on the left.
macro_rules! impl_value_comparisons {
    ($($ty:ty),*) => {
        $(
            impl<'r, const OFFSET: u32, const WIDTH: u32, A, S, K, W>
                PartialEq<Field<'r, $ty, OFFSET, WIDTH, A, S, K, W>> for $ty
            where
                A: Readable,
                S: Strategy,
                K: Storage,
                W: FieldValue,
            {
                fn eq(&self, other: &Field<'r, $ty, OFFSET, WIDTH, A, S, K, W>) -> bool {
                    *self == other.get()
                }
            }

            impl<'r, const OFFSET: u32, const WIDTH: u32, A, S, K, W>
                PartialOrd<Field<'r, $ty, OFFSET, WIDTH, A, S, K, W>> for $ty
            where
                A: Readable,
                S: Strategy,
                K: Storage,
                W: FieldValue,
            {
                fn partial_cmp(
                    &self,
                    other: &Field<'r, $ty, OFFSET, WIDTH, A, S, K, W>,
                ) -> Option<Ordering> {
                    self.partial_cmp(&other.get())
                }
            }
        )*
    };
}

impl_value_comparisons!(bool, u8, u16, u32);
