//! Compile-time helpers for carrying validated invariants.

use std::fmt;

/// Proof wrapper indicating a value has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    /// Wrap a validated value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the inner value.
    pub const fn as_ref(&self) -> &T {
        &self.0
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Out-of-range error for bounded numeric wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError<T> {
    /// Raw value provided.
    pub value: T,
    /// Inclusive minimum.
    pub min: T,
    /// Inclusive maximum.
    pub max: T,
}

impl<T: fmt::Display> fmt::Display for BoundsError<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "value {} is outside [{}, {}]",
            self.value, self.min, self.max
        )
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for BoundsError<T> {}

/// Bounded `u32` with const generic limits (page sizes, counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedU32<const MIN: u32, const MAX: u32>(u32);

impl<const MIN: u32, const MAX: u32> BoundedU32<MIN, MAX> {
    /// Create a bounded value or return a bounds error.
    pub const fn try_new(value: u32) -> Result<Self, BoundsError<u32>> {
        if value < MIN || value > MAX {
            Err(BoundsError {
                value,
                min: MIN,
                max: MAX,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the wrapped value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Bounded `u64` with const generic limits (timeouts, durations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedU64<const MIN: u64, const MAX: u64>(u64);

impl<const MIN: u64, const MAX: u64> BoundedU64<MIN, MAX> {
    /// Create a bounded value or return a bounds error.
    pub const fn try_new(value: u64) -> Result<Self, BoundsError<u64>> {
        if value < MIN || value > MAX {
            Err(BoundsError {
                value,
                min: MIN,
                max: MAX,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the wrapped value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_values_respect_inclusive_limits() {
        let low = BoundedU32::<1, 1000>::try_new(1);
        assert_eq!(low.map(|value| value.get()), Ok(1));
        let high = BoundedU32::<1, 1000>::try_new(1000);
        assert_eq!(high.map(|value| value.get()), Ok(1000));
        assert_eq!(
            BoundedU32::<1, 1000>::try_new(0),
            Err(BoundsError {
                value: 0,
                min: 1,
                max: 1000
            })
        );
        assert!(BoundedU64::<100, 600_000>::try_new(600_001).is_err());
    }

    #[test]
    fn bounds_error_display_names_range() {
        let error = BoundsError {
            value: 0_u32,
            min: 1,
            max: 10,
        };
        assert_eq!(error.to_string(), "value 0 is outside [1, 10]");
    }
}
