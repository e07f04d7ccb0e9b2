//! Storage words and the two storage kinds that back them.
//!
//! A [`Live`] word is memory-mapped hardware: every load and store is a real volatile bus access
//! that the optimizer may not elide, merge, or reorder with other volatile accesses. A [`Staged`]
//! word is an ordinary in-memory shadow used to assemble a register's contents before committing
//! them to hardware in one store.

use core::cell::Cell;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use vcell::VolatileCell;

mod sealed {
    pub trait Sealed {}
}

/// Runtime tag naming a storage kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageMode {
    /// Volatile hardware storage.
    Live,
    /// Non-volatile shadow storage, committed explicitly.
    Staged,
}

/// A storage kind. Implemented only by [`Live`] and [`Staged`].
pub trait Storage: sealed::Sealed + 'static {
    /// The cell type holding one word.
    type Cell;

    /// The tag for this kind.
    const MODE: StorageMode;

    #[doc(hidden)]
    fn load(cell: &Self::Cell) -> u32;

    #[doc(hidden)]
    fn store(cell: &Self::Cell, value: u32);
}

/// Volatile hardware storage.
pub enum Live {}

/// In-memory shadow storage.
pub enum Staged {}

impl sealed::Sealed for Live {}
impl sealed::Sealed for Staged {}

impl Storage for Live {
    type Cell = VolatileCell<u32>;

    const MODE: StorageMode = StorageMode::Live;

    #[inline(always)]
    fn load(cell: &VolatileCell<u32>) -> u32 {
        cell.get()
    }

    #[inline(always)]
    fn store(cell: &VolatileCell<u32>, value: u32) {
        cell.set(value)
    }
}

impl Storage for Staged {
    type Cell = Cell<u32>;

    const MODE: StorageMode = StorageMode::Staged;

    #[inline(always)]
    fn load(cell: &Cell<u32>) -> u32 {
        cell.get()
    }

    #[inline(always)]
    fn store(cell: &Cell<u32>, value: u32) {
        cell.set(value)
    }
}

/// One 32-bit storage word.
///
/// Words are locations, not data: they are neither `Clone` nor `Copy`, and all access goes
/// through a shared reference.
#[repr(transparent)]
pub struct Word<K: Storage = Live> {
    cell: K::Cell,
    _kind: PhantomData<K>,
}

impl Word<Live> {
    /// Creates a live word holding `value`. Real hardware words are never constructed; this
    /// exists for RAM-backed device blocks.
    pub const fn new(value: u32) -> Self {
        Self {
            cell: VolatileCell::new(value),
            _kind: PhantomData,
        }
    }
}

impl Word<Staged> {
    /// Creates a staged word holding `value`.
    pub const fn new(value: u32) -> Self {
        Self {
            cell: Cell::new(value),
            _kind: PhantomData,
        }
    }
}

impl<K: Storage> Word<K> {
    /// Loads the whole word.
    #[inline(always)]
    pub fn load(&self) -> u32 {
        K::load(&self.cell)
    }

    /// Stores the whole word.
    #[inline(always)]
    pub fn store(&self, value: u32) {
        K::store(&self.cell, value)
    }

    /// The storage kind of this word.
    pub const fn mode(&self) -> StorageMode {
        K::MODE
    }
}

impl<K: Storage> Debug for Word<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:#010x})", self.load())
    }
}

/// A reserved hardware word. It has no accessors and exists only to pad a device layout.
#[repr(transparent)]
pub struct Reserved(Word<Live>);
