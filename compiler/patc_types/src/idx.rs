//! Type handle.

use std::fmt;

/// Index into a [`Pool`](crate::Pool).
///
/// Primitives live at fixed indices so they can be named without a pool.
/// Type equality is index equality.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    /// Placeholder for anything that failed to resolve. Never reported twice.
    pub const ERROR: Self = Self(0);
    /// Bottom type.
    pub const NOTHING: Self = Self(1);
    pub const UNIT: Self = Self(2);
    pub const BOOLEAN: Self = Self(3);
    pub const INT: Self = Self(4);
    pub const LONG: Self = Self(5);
    pub const FLOAT: Self = Self(6);
    pub const DOUBLE: Self = Self(7);
    pub const STRING: Self = Self(8);
    /// Top non-null type.
    pub const ANY: Self = Self(9);

    /// Pool-allocated types start here.
    pub const PRIMITIVE_COUNT: u32 = 10;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Source name of a primitive, `None` for pool-allocated types.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("<error>"),
            1 => Some("Nothing"),
            2 => Some("Unit"),
            3 => Some("Boolean"),
            4 => Some("Int"),
            5 => Some("Long"),
            6 => Some("Float"),
            7 => Some("Double"),
            8 => Some("String"),
            9 => Some("Any"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}
