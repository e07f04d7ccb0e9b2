//! Same-shaped fields packed across consecutive storage words.
//!
//! Element `i` starts at bit `i * STRIDE + INITIAL` of the backing words, counted across word
//! boundaries: word `bit / 32`, bit `bit % 32` inside it. Elements are read and written with the
//! masked-word technique. Indices past the end never touch hardware: reads return the value type's
//! zero and writes do nothing.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::access::{Access, AccessMode, Readable, Writable};
use crate::mask::WORD_BITS;
use crate::storage::{Live, Staged, Storage, Word};
use crate::strategy::{isolate, Direct, Masked, Strategy};
use crate::value::FieldValue;

/// `N` consecutive storage words backing a multi-word register.
#[repr(transparent)]
pub struct Block<const N: usize, K: Storage = Live> {
    words: [Word<K>; N],
}

impl<const N: usize> Block<N, Live> {
    const ZERO_WORD: Word<Live> = Word::<Live>::new(0);

    /// Creates a zeroed live block, for RAM-backed devices.
    pub const fn zeroed() -> Self {
        Self {
            words: [Self::ZERO_WORD; N],
        }
    }
}

impl<const N: usize> Block<N, Staged> {
    const ZERO_WORD: Word<Staged> = Word::<Staged>::new(0);

    /// Creates a zeroed staged block.
    pub const fn zeroed() -> Self {
        Self {
            words: [Self::ZERO_WORD; N],
        }
    }
}

impl<const N: usize, K: Storage> Block<N, K> {
    /// All backing words.
    pub fn words(&self) -> &[Word<K>; N] {
        &self.words
    }

    /// One backing word, if `index` is in range.
    pub fn word(&self, index: usize) -> Option<&Word<K>> {
        self.words.get(index)
    }
}

impl<const N: usize, K: Storage> Debug for Block<N, K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.words.iter()).finish()
    }
}

/// A view of `COUNT` elements of `WIDTH` bits each, `STRIDE` bits apart, starting `INITIAL` bits
/// into `WORDS` storage words.
///
/// A layout that does not fit its words fails to build once the view is used, or when its
/// [`LAYOUT`](Self::LAYOUT) constant is named:
///
/// ```compile_fail
/// use regfield::{FieldArray, ReadWrite};
///
/// const _: () = FieldArray::<'static, u8, 8, 241, 60, ReadWrite, 8, 0>::LAYOUT;
/// ```
pub struct FieldArray<
    'r,
    V,
    const WIDTH: u32,
    const COUNT: usize,
    const WORDS: usize,
    A,
    const STRIDE: u32,
    const INITIAL: u32,
    K: Storage = Live,
> {
    words: &'r [Word<K>; WORDS],
    _marker: PhantomData<fn() -> (V, A)>,
}

/// A [`FieldArray`] whose elements are packed back to back from bit 0.
pub type PackedArray<'r, V, const WIDTH: u32, const COUNT: usize, const WORDS: usize, A, K = Live> =
    FieldArray<'r, V, WIDTH, COUNT, WORDS, A, WIDTH, 0, K>;

impl<
        'r,
        V,
        const WIDTH: u32,
        const COUNT: usize,
        const WORDS: usize,
        A,
        const STRIDE: u32,
        const INITIAL: u32,
        K,
    > FieldArray<'r, V, WIDTH, COUNT, WORDS, A, STRIDE, INITIAL, K>
where
    V: FieldValue,
    A: Access,
    K: Storage,
{
    /// Evaluates to `()` when every element fits inside one backing word.
    pub const LAYOUT: () = {
        assert!(WIDTH >= 1 && WIDTH <= V::BITS, "element width out of range");
        assert!(STRIDE >= WIDTH, "elements overlap");
        assert!(
            COUNT * STRIDE as usize + INITIAL as usize <= WORDS * WORD_BITS as usize,
            "elements exceed the backing words",
        );
        let mut i = 0;
        while i < COUNT {
            let bit = i * STRIDE as usize + INITIAL as usize;
            assert!(
                bit % WORD_BITS as usize + WIDTH as usize <= WORD_BITS as usize,
                "an element straddles two words",
            );
            i += 1;
        }
    };

    /// Creates a view over `words`.
    #[inline(always)]
    pub fn new(words: &'r [Word<K>; WORDS]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT;
        Self {
            words,
            _marker: PhantomData,
        }
    }

    /// Creates a view over a block.
    #[inline(always)]
    pub fn from_block(block: &'r Block<WORDS, K>) -> Self {
        Self::new(block.words())
    }

    /// The number of elements.
    pub const fn len(&self) -> usize {
        COUNT
    }

    /// Whether the array has no elements.
    pub const fn is_empty(&self) -> bool {
        COUNT == 0
    }

    /// The access mode of every element.
    pub const fn access(&self) -> AccessMode {
        A::MODE
    }

    /// Returns the backing word index and the bit offset inside it of element `index`.
    #[inline(always)]
    pub fn locate(&self, index: usize) -> Option<(usize, u32)> {
        if index >= COUNT {
            return None;
        }
        let bit = index * STRIDE as usize + INITIAL as usize;
        Some((bit / WORD_BITS as usize, (bit % WORD_BITS as usize) as u32))
    }

    /// Binds an accessor to element `index`. Past the end the accessor is inert.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Element<'r, V, WIDTH, A, K> {
        match self.locate(index) {
            Some((word, offset)) => Element {
                word: Some(&self.words[word]),
                offset,
                _marker: PhantomData,
            },
            None => Element::inert(),
        }
    }
}

impl<
        'r,
        V,
        const WIDTH: u32,
        const COUNT: usize,
        const WORDS: usize,
        A,
        const STRIDE: u32,
        const INITIAL: u32,
        K,
    > FieldArray<'r, V, WIDTH, COUNT, WORDS, A, STRIDE, INITIAL, K>
where
    V: FieldValue,
    A: Readable,
    K: Storage,
{
    /// Reads element `index`, or the zero value past the end.
    #[inline(always)]
    pub fn get(&self, index: usize) -> V {
        self.at(index).get()
    }

    /// Reads every element in order.
    pub fn values(&self) -> impl Iterator<Item = V> + 'r {
        let view = Self::new(self.words);
        (0..COUNT).map(move |index| view.get(index))
    }
}

impl<
        'r,
        V,
        const WIDTH: u32,
        const COUNT: usize,
        const WORDS: usize,
        A,
        const STRIDE: u32,
        const INITIAL: u32,
        K,
    > FieldArray<'r, V, WIDTH, COUNT, WORDS, A, STRIDE, INITIAL, K>
where
    V: FieldValue,
    A: Writable,
    K: Storage,
{
    /// ORs `value` into element `index`. Past the end nothing is written.
    #[inline(always)]
    pub fn set(&self, index: usize, value: V) {
        self.at(index).set(value)
    }

    /// Stores a word holding only element `index`, with every other bit of that word zero. Past
    /// the end nothing is written.
    ///
    /// This suits tables of write-one-to-set or write-one-to-clear bits.
    #[inline(always)]
    pub fn write(&self, index: usize, value: V) {
        self.at(index).write(value)
    }

    /// Clears element `index`, then inserts `value`. Past the end nothing is written.
    #[inline(always)]
    pub fn replace(&self, index: usize, value: V) {
        self.at(index).replace(value)
    }
}

impl<
        'r,
        V,
        const WIDTH: u32,
        const COUNT: usize,
        const WORDS: usize,
        A,
        const STRIDE: u32,
        const INITIAL: u32,
        K,
    > Debug for FieldArray<'r, V, WIDTH, COUNT, WORDS, A, STRIDE, INITIAL, K>
where
    A: Access,
    K: Storage,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldArray")
            .field("width", &WIDTH)
            .field("count", &COUNT)
            .field("words", &WORDS)
            .field("stride", &STRIDE)
            .field("initial", &INITIAL)
            .field("access", &A::MODE)
            .finish()
    }
}

/// An accessor bound to one element of a [`FieldArray`].
///
/// An accessor made for an index past the end is inert: reads return zero and writes do nothing.
pub struct Element<'r, V, const WIDTH: u32, A, K: Storage = Live> {
    word: Option<&'r Word<K>>,
    offset: u32,
    _marker: PhantomData<fn() -> (V, A)>,
}

impl<'r, V, const WIDTH: u32, A, K> Element<'r, V, WIDTH, A, K>
where
    V: FieldValue,
    A: Access,
    K: Storage,
{
    fn inert() -> Self {
        Self {
            word: None,
            offset: 0,
            _marker: PhantomData,
        }
    }

    /// Whether this accessor is bound to no element.
    pub fn is_inert(&self) -> bool {
        self.word.is_none()
    }

    /// The bit offset of the element inside its word.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl<'r, V, const WIDTH: u32, A, K> Element<'r, V, WIDTH, A, K>
where
    V: FieldValue,
    A: Readable,
    K: Storage,
{
    /// Reads the element, or the zero value when inert.
    #[inline(always)]
    pub fn get(&self) -> V {
        match self.word {
            Some(word) => V::from_raw(Masked::extract(word.load(), self.offset, WIDTH)),
            None => V::ZERO,
        }
    }
}

impl<'r, V, const WIDTH: u32, A, K> Element<'r, V, WIDTH, A, K>
where
    V: FieldValue,
    A: Writable,
    K: Storage,
{
    /// ORs `value` into the element. Does nothing when inert.
    #[inline(always)]
    pub fn set(&self, value: V) {
        if let Some(word) = self.word {
            word.store(Masked::insert(word.load(), value.to_raw(), self.offset, WIDTH));
        }
    }

    /// Stores a word holding only this element. Does nothing when inert.
    #[inline(always)]
    pub fn write(&self, value: V) {
        if let Some(word) = self.word {
            word.store(isolate(value.to_raw(), self.offset, WIDTH));
        }
    }

    /// Clears the element, then inserts `value`. Does nothing when inert.
    #[inline(always)]
    pub fn replace(&self, value: V) {
        if let Some(word) = self.word {
            word.store(Direct::insert(word.load(), value.to_raw(), self.offset, WIDTH));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{ReadOnly, ReadWrite, WriteOnly};

    type Flags<'r, A> = PackedArray<'r, bool, 1, 240, 8, A>;
    type Priorities<'r> = PackedArray<'r, u8, 8, 240, 60, ReadWrite>;

    #[test]
    fn flags_resolve_to_word_and_bit() {
        let block = Block::<8>::zeroed();
        let flags = Flags::<ReadWrite>::from_block(&block);
        assert_eq!(flags.locate(0), Some((0, 0)));
        assert_eq!(flags.locate(31), Some((0, 31)));
        assert_eq!(flags.locate(32), Some((1, 0)));
        assert_eq!(flags.locate(239), Some((7, 15)));
        assert_eq!(flags.locate(240), None);

        for index in [0, 31, 32, 239] {
            flags.set(index, true);
            let (word, bit) = (index / 32, index % 32);
            assert_eq!(block.words()[word].load() & (1 << bit), 1 << bit);
            assert!(flags.get(index));
        }
        assert_eq!(block.words()[0].load(), 0x8000_0001);
        assert_eq!(block.words()[1].load(), 0x0000_0001);
        assert_eq!(block.words()[7].load(), 0x0000_8000);
    }

    #[test]
    fn past_the_end_is_harmless() {
        let block = Block::<60>::zeroed();
        let priorities = Priorities::from_block(&block);
        priorities.set(239, 0x40);
        assert_eq!(priorities.get(240), 0);
        priorities.set(240, 0xff);
        priorities.write(usize::MAX, 0xff);
        assert_eq!(priorities.get(239), 0x40);
        assert!(block.words()[..59].iter().all(|word| word.load() == 0));
        assert_eq!(block.words()[59].load(), 0x4000_0000);
        priorities.replace(239, 0x20);
        priorities.replace(240, 0xff);
        assert_eq!(block.words()[59].load(), 0x2000_0000);
    }

    #[test]
    fn inert_accessor() {
        let block = Block::<8>::zeroed();
        let flags = Flags::<ReadWrite>::from_block(&block);
        let element = flags.at(500);
        assert!(element.is_inert());
        element.set(true);
        element.write(true);
        assert!(!element.get());
        assert!(block.words().iter().all(|word| word.load() == 0));
    }

    #[test]
    fn accessor_writes_later() {
        let block = Block::<8>::zeroed();
        let flags = Flags::<ReadWrite>::from_block(&block);
        let element = flags.at(33);
        assert!(!element.is_inert());
        assert_eq!(element.offset(), 1);
        element.set(true);
        assert!(flags.get(33));
        assert_eq!(block.words()[1].load(), 0b10);
    }

    #[test]
    fn set_accumulates_and_write_isolates() {
        let block = Block::<8>::zeroed();
        let writer = Flags::<WriteOnly>::from_block(&block);
        let reader = Flags::<ReadOnly>::from_block(&block);
        writer.set(1, true);
        writer.set(2, true);
        assert_eq!(block.words()[0].load(), 0b110);
        writer.write(4, true);
        assert_eq!(block.words()[0].load(), 0b1_0000);
        assert!(reader.get(4));
        assert!(!reader.get(1));
    }

    #[test]
    fn strided_elements_with_initial_offset() {
        let block = Block::<2>::zeroed();
        let nibbles = FieldArray::<u8, 3, 8, 2, ReadWrite, 4, 0>::from_block(&block);
        nibbles.set(1, 0b111);
        nibbles.set(7, 0b101);
        assert_eq!(block.words()[0].load(), 0x5000_0070);
        assert_eq!(nibbles.get(7), 0b101);

        let shifted = FieldArray::<bool, 1, 4, 2, ReadWrite, 1, 28>::from_block(&block);
        assert_eq!(shifted.locate(3), Some((0, 31)));
        assert!(shifted.get(0));
        assert!(!shifted.get(1));
        assert!(shifted.get(2));
    }

    #[test]
    fn values_iterates_in_order() {
        let block = Block::<1>::zeroed();
        block.words()[0].store(0x0403_0201);
        let bytes = PackedArray::<u8, 8, 4, 1, ReadOnly>::from_block(&block);
        let mut seen = [0u8; 4];
        for (slot, value) in seen.iter_mut().zip(bytes.values()) {
            *slot = value;
        }
        assert_eq!(seen, [1, 2, 3, 4]);
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn staged_blocks() {
        let block = Block::<3, Staged>::zeroed();
        let slots = PackedArray::<u8, 8, 12, 3, ReadWrite, Staged>::from_block(&block);
        slots.set(11, 0xe0);
        assert_eq!(block.word(2).map(Word::load), Some(0xe000_0000));
        assert!(block.word(3).is_none());
    }
}
