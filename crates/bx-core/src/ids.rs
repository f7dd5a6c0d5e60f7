//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Arrival sequence number of a customer.  Doubles as the index into the
    /// customer arena, so ids are dense and start at 0.
    pub struct CustomerId(u32);
}

typed_id! {
    /// Counter number, **1-based** (`CounterId(1)` is the first counter).
    pub struct CounterId(u8);
}

impl CustomerId {
    /// Cast to `usize` for direct use as an arena index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl CounterId {
    /// The counter stored at zero-based position `slot`.
    #[inline]
    pub fn from_slot(slot: usize) -> Self {
        CounterId(slot as u8 + 1)
    }

    /// Zero-based position of this counter in the engine's counter vector.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self.0 as usize - 1
    }
}
