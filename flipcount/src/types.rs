//! Core type definitions for the counter simulator.
//!
//! Provides zero-cost newtypes to prevent field mixups at compile time.
//! All types use `#[repr(transparent)]` for guaranteed zero runtime cost.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Macro to generate counter newtype wrappers with common implementations
macro_rules! counter_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
        $(, custom_methods: { $($custom:tt)* })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }

            $($($custom)*)?
        }

        // Display with custom prefix
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        // Deref for transparent access
        impl Deref for $name {
            type Target = $inner;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        // From/Into conversions
        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Enable direct comparisons with raw values
        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for $inner {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl PartialOrd<$inner> for $name {
            #[inline]
            fn partial_cmp(&self, other: &$inner) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl PartialOrd<$name> for $inner {
            #[inline]
            fn partial_cmp(&self, other: &$name) -> Option<std::cmp::Ordering> {
                self.partial_cmp(&other.0)
            }
        }
    };
}

counter_newtype!(
    /// Displayed count of the simulated counter circuit.
    ///
    /// Always within `0..N` for the active modulus `N`; the engine re-establishes
    /// the bound on every advance.
    CounterValue(u32) => ""
);

counter_newtype!(
    /// The `N` in Mod-N counting. Always `>= 1`.
    Modulus(u32) => "N=",
    custom_methods: {
        /// Number of flip-flop stages needed to represent values `0..N`.
        ///
        /// A Mod-1 counter still occupies one (permanently low) stage.
        pub const fn stage_count(self) -> usize {
            if self.0 <= 2 {
                1
            } else {
                (32 - (self.0 - 1).leading_zeros()) as usize
            }
        }
    }
);

counter_newtype!(
    /// Percentage share (0-100) of the winning mode within the history window.
    Confidence(u8) => "",
    custom_methods: {
        /// Confidence as a rounded percentage of `part` in `whole`.
        ///
        /// Rounds half away from zero, so 1 of 8 is 13%, not 12%.
        pub const fn from_ratio(part: usize, whole: usize) -> Self {
            debug_assert!(whole > 0 && part <= whole);
            Self(((100 * part as u64 + whole as u64 / 2) / whole as u64) as u8)
        }
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_basic_operations() {
        let value = CounterValue::new(7);
        assert_eq!(value.value(), 7);
        assert_eq!(value, 7u32);
        assert_eq!(u32::from(value), 7);
        assert_eq!(CounterValue::from(7u32), value);
        assert_eq!(format!("{}", value), "7");
    }

    #[test]
    fn modulus_display_carries_prefix() {
        assert_eq!(format!("{}", Modulus::new(10)), "N=10");
    }

    #[test]
    fn modulus_stage_count_covers_value_range() {
        assert_eq!(Modulus::new(1).stage_count(), 1);
        assert_eq!(Modulus::new(2).stage_count(), 1);
        assert_eq!(Modulus::new(3).stage_count(), 2);
        assert_eq!(Modulus::new(8).stage_count(), 3);
        assert_eq!(Modulus::new(10).stage_count(), 4);
        assert_eq!(Modulus::new(16).stage_count(), 4);
        assert_eq!(Modulus::new(17).stage_count(), 5);
    }

    #[test]
    fn confidence_from_ratio_rounds_half_up() {
        assert_eq!(Confidence::from_ratio(3, 5), Confidence::new(60));
        assert_eq!(Confidence::from_ratio(1, 2), Confidence::new(50));
        assert_eq!(Confidence::from_ratio(1, 3), Confidence::new(33));
        assert_eq!(Confidence::from_ratio(2, 3), Confidence::new(67));
        assert_eq!(Confidence::from_ratio(1, 8), Confidence::new(13));
        assert_eq!(Confidence::from_ratio(5, 5), Confidence::new(100));
    }

    #[test]
    fn newtypes_compare_against_raw_values() {
        assert!(Modulus::new(4) > 3u32);
        assert!(3u32 < Modulus::new(4));
        assert!(Confidence::new(50) == 50u8);
    }
}
