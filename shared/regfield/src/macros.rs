/// Declares a one-word register as a set of typed field views.
///
/// Each field line names the value type, the bit offset and width, and the access mode (`rw`,
/// `ro`, or `wo`). The storage strategy defaults to the value type's, and can be forced with
/// `rw(direct)` or `rw(masked)`. A field written through a different type than it reads adds
/// `as Type`. A raw full-word view is just a field spanning `[0; 32]`.
///
/// ```
/// use regfield::{Live, Staged};
///
/// regfield::field_enum! {
///     pub enum Source: 1 {
///         External = 0,
///         Core = 1,
///     }
/// }
///
/// regfield::register! {
///     /// A timer control word.
///     pub struct Control {
///         pub enable: bool [0; 1] = rw,
///         pub source: Source [2; 1] = rw,
///         pub prescale: u8 [4; 4] = rw(masked),
///         pub raw: u32 [0; 32] = rw,
///     }
/// }
///
/// let staged = Control::<Staged>::zero()
///     .with_enable(true)
///     .with_source(Source::Core);
/// assert_eq!(staged.to_raw(), 0b101);
///
/// let live: Control<Live> = unsafe { core::mem::zeroed() };
/// staged.commit(&live);
/// assert!(live.enable().get());
/// assert_eq!(live.raw().get(), 0b101);
/// ```
///
/// A field that does not fit its word fails to build:
///
/// ```compile_fail
/// regfield::register! {
///     pub struct Overflow {
///         pub value: u8 [28; 8] = rw,
///     }
/// }
/// ```
#[macro_export]
macro_rules! register {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident: $value:ty [$offset:literal; $width:literal]
                    = $access:ident $(($strategy:ident))? $(as $set:ty)?
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[repr(transparent)]
        $vis struct $name<K: $crate::Storage = $crate::Live> {
            word: $crate::Word<K>,
        }

        const _: () = {
            $(
                assert!(
                    $width >= 1 && $crate::mask::fits($offset, $width),
                    concat!(
                        stringify!($name), ".", stringify!($field),
                        " does not fit in one storage word",
                    ),
                );
                assert!(
                    $width <= <$value as $crate::FieldValue>::BITS,
                    concat!(
                        stringify!($name), ".", stringify!($field),
                        " is wider than its value type",
                    ),
                );
            )*
        };

        impl<K: $crate::Storage> $name<K> {
            $(
                $(#[$field_attr])*
                #[inline(always)]
                $field_vis fn $field(
                    &self,
                ) -> $crate::Field<
                    '_,
                    $value,
                    $offset,
                    $width,
                    $crate::__access!($access),
                    $crate::__strategy!(($value) $($strategy)?),
                    K,
                    $crate::__set_type!(($value) $($set)?),
                > {
                    $crate::Field::new(&self.word)
                }
            )*
        }

        impl<K: $crate::Storage> $crate::layout::Register for $name<K> {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::layout::FieldDescriptor] = &[
                $(
                    $crate::layout::FieldDescriptor {
                        name: stringify!($field),
                        offset: $offset,
                        width: $width,
                        access: <$crate::__access!($access) as $crate::access::Access>::MODE,
                        composition: $crate::strategy::composition(
                            <$crate::__strategy!(($value) $($strategy)?)
                                as $crate::strategy::Strategy>::MASKED,
                            $offset,
                        ),
                    },
                )*
            ];
        }

        impl $name<$crate::Staged> {
            /// Creates a staged copy holding `raw`.
            #[inline(always)]
            pub const fn new(raw: u32) -> Self {
                Self {
                    word: $crate::Word::<$crate::Staged>::new(raw),
                }
            }

            /// Creates a staged copy holding zero.
            #[inline(always)]
            pub const fn zero() -> Self {
                Self::new(0)
            }

            /// Creates a staged copy of the current hardware contents.
            #[inline(always)]
            pub fn snapshot(live: &$name<$crate::Live>) -> Self {
                Self::new(live.word.load())
            }

            /// The staged word.
            #[inline(always)]
            pub fn to_raw(&self) -> u32 {
                self.word.load()
            }

            /// Stores the staged word into `target` with one store.
            #[inline(always)]
            pub fn commit(&self, target: &$name<$crate::Live>) {
                target.word.store(self.word.load());
            }

            $(
                $crate::__with_method! {
                    $access $field_vis $field ($crate::__set_type!(($value) $($set)?))
                }
            )*
        }

        impl $name<$crate::Live> {
            /// Reads the hardware word once into a staged copy.
            #[inline(always)]
            pub fn read(&self) -> $name<$crate::Staged> {
                $name::<$crate::Staged>::snapshot(self)
            }

            /// Reads the hardware word once, lets `f` edit a staged copy, and stores it back once.
            ///
            /// The sequence is not atomic with respect to interrupts.
            #[inline(always)]
            pub fn modify(&self, f: impl FnOnce(&$name<$crate::Staged>)) {
                let staged = self.read();
                f(&staged);
                staged.commit(self);
            }
        }

        impl ::core::fmt::Debug for $name<$crate::Staged> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, concat!(stringify!($name), "({:#010x})"), self.to_raw())
            }
        }
    };
}

/// Declares a register spanning several consecutive words, viewed as field arrays.
///
/// Each line names the element type and count, then `[width, stride, initial offset]` in bits,
/// then the access mode. Views of one block may alias: a table read as state through one type can
/// be written as commands through another.
///
/// ```
/// use regfield::Live;
///
/// regfield::register_block! {
///     pub struct Enables: 2 {
///         pub state: [bool; 64] [1, 1, 0] = ro,
///         pub set: [bool; 64] [1, 1, 0] = wo,
///     }
/// }
///
/// let enables: Enables<Live> = unsafe { core::mem::zeroed() };
/// enables.set().write(40, true);
/// assert!(enables.state().get(40));
/// assert!(!enables.state().get(64));
/// ```
///
/// A table that does not fit its words fails to build:
///
/// ```compile_fail
/// regfield::register_block! {
///     pub struct TooSmall: 1 {
///         pub flags: [bool; 33] [1, 1, 0] = rw,
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_block {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $words:literal {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident: [$value:ty; $count:literal]
                    [$width:literal, $stride:literal, $initial:literal] = $access:ident
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[repr(transparent)]
        $vis struct $name<K: $crate::Storage = $crate::Live> {
            block: $crate::Block<$words, K>,
        }

        const _: () = {
            $(
                #[allow(clippy::let_unit_value)]
                let () = $crate::FieldArray::<
                    'static,
                    $value,
                    $width,
                    $count,
                    $words,
                    $crate::__access!($access),
                    $stride,
                    $initial,
                >::LAYOUT;
            )*
        };

        impl<K: $crate::Storage> $name<K> {
            $(
                $(#[$field_attr])*
                #[inline(always)]
                $field_vis fn $field(
                    &self,
                ) -> $crate::FieldArray<
                    '_,
                    $value,
                    $width,
                    $count,
                    $words,
                    $crate::__access!($access),
                    $stride,
                    $initial,
                    K,
                > {
                    $crate::FieldArray::from_block(&self.block)
                }
            )*

            /// The backing words.
            #[inline(always)]
            pub fn block(&self) -> &$crate::Block<$words, K> {
                &self.block
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __access {
    (rw) => {
        $crate::ReadWrite
    };
    (ro) => {
        $crate::ReadOnly
    };
    (wo) => {
        $crate::WriteOnly
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __strategy {
    (($value:ty)) => {
        <$value as $crate::FieldValue>::Strategy
    };
    (($value:ty) direct) => {
        $crate::strategy::Direct
    };
    (($value:ty) masked) => {
        $crate::strategy::Masked
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __set_type {
    (($value:ty)) => {
        $value
    };
    (($value:ty) $set:ty) => {
        $set
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __with_method {
    (ro $vis:vis $field:ident ($set:ty)) => {};
    (rw $vis:vis $field:ident ($set:ty)) => {
        $crate::__with_method! { @emit $vis $field ($set) }
    };
    (wo $vis:vis $field:ident ($set:ty)) => {
        $crate::__with_method! { @emit $vis $field ($set) }
    };
    (@emit $vis:vis $field:ident ($set:ty)) => {
        $crate::__private::paste! {
            #[doc = concat!("Sets `", stringify!($field), "` and returns the staged copy.")]
            #[inline(always)]
            #[must_use]
            $vis fn [<with_ $field>](self, value: $set) -> Self {
                self.$field().set(value);
                self
            }
        }
    };
}
