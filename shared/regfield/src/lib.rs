#![cfg_attr(not(test), no_std)]

//! Typed views over memory-mapped register words.
//!
//! A register is one 32-bit storage word seen through any number of field views. Each view knows
//! its bit offset and width, the type it reads and writes, its access mode, and how it writes
//! back:
//!
//! - **direct** fields behave like native bitfields: a write replaces the field's bits and keeps
//!   its neighbours;
//! - **masked** fields OR the written value into the word and never clear bits.
//!
//! Integers and `bool` are direct by default; enumerations declared with [`field_enum!`] are
//! masked by default. Either can be forced per field.
//!
//! Storage is either [`Live`], where every access is a volatile bus transaction, or [`Staged`], an
//! ordinary shadow word that is committed to hardware in one store.
//!
//! Registers are declared with [`register!`] (one word) or [`register_block!`] (several words
//! viewed as [`FieldArray`]s), collected into device layouts with [`device!`], and reached
//! through [`Handle`]s.
//!
//! Malformed layouts, enumerations that leave bit patterns unnamed, reads of write-only fields,
//! and writes of read-only fields are all build failures. Out-of-range array indices are the only
//! run-time edge, and they degrade to zero reads and ignored writes.

mod macros;

pub mod access;
pub mod array;
pub mod field;
pub mod handle;
pub mod layout;
pub mod mask;
pub mod storage;
pub mod strategy;
pub mod value;

pub use crate::access::{AccessMode, ReadOnly, ReadWrite, Readable, Writable, WriteOnly};
pub use crate::array::{Block, Element, FieldArray, PackedArray};
pub use crate::field::Field;
pub use crate::handle::Handle;
pub use crate::layout::{Device, FixedAddress, Register};
pub use crate::storage::{Live, Reserved, Staged, Storage, StorageMode, Word};
pub use crate::value::FieldValue;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
