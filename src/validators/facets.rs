//! Bound facets
//!
//! Inclusive lower/upper bounds shared by string lengths, array lengths and
//! numeric values. The `min <= max` invariant is enforced when a bound is
//! set, so a built validator can never hold an empty range.

use std::fmt;

use crate::error::{Error, Result};

/// Inclusive pair of optional bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<N> {
    min: Option<N>,
    max: Option<N>,
}

impl<N> Default for Bounds<N> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<N: PartialOrd + Copy + fmt::Debug> Bounds<N> {
    /// Create an unbounded pair
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    ///
    /// Fails with `conflict` if the value lies above the current upper bound.
    pub fn set_min(&mut self, value: N, conflict: &str) -> Result<()> {
        if let Some(max) = self.max {
            if value > max {
                return Err(Error::config(conflict));
            }
        }
        self.min = Some(value);
        Ok(())
    }

    /// Set the upper bound
    ///
    /// Fails with `conflict` if the value lies below the current lower bound.
    pub fn set_max(&mut self, value: N, conflict: &str) -> Result<()> {
        if let Some(min) = self.min {
            if value < min {
                return Err(Error::config(conflict));
            }
        }
        self.max = Some(value);
        Ok(())
    }

    /// Lower bound, if set
    pub fn min(&self) -> Option<N> {
        self.min
    }

    /// Upper bound, if set
    pub fn max(&self) -> Option<N> {
        self.max
    }

    /// Whether either bound is set
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Whether `value` lies within both bounds
    pub fn contains(&self, value: N) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Sign constraint of a numeric validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `> 0`
    Positive,
    /// `< 0`
    Negative,
    /// `>= 0`
    NonNegative,
}

impl Sign {
    /// Whether `value` satisfies this constraint
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            Sign::Positive => value > 0.0,
            Sign::Negative => value < 0.0,
            Sign::NonNegative => value >= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let mut bounds = Bounds::new();
        bounds.set_min(2usize, "min").unwrap();
        bounds.set_max(4usize, "max").unwrap();

        assert!(!bounds.contains(1));
        assert!(bounds.contains(2));
        assert!(bounds.contains(4));
        assert!(!bounds.contains(5));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let mut bounds = Bounds::new();
        bounds.set_max(4usize, "max").unwrap();

        let err = bounds.set_min(5, "min greater").unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == "min greater"));
        assert_eq!(bounds.min(), None);
    }

    #[test]
    fn test_max_below_min_is_rejected() {
        let mut bounds = Bounds::new();
        bounds.set_min(2.0, "min").unwrap();

        assert!(bounds.set_max(1.0, "max smaller").is_err());
        assert!(bounds.set_max(2.0, "max smaller").is_ok());
        assert!(bounds.contains(2.0));
    }

    #[test]
    fn test_unbounded() {
        let bounds: Bounds<i64> = Bounds::new();
        assert!(!bounds.is_set());
        assert!(bounds.contains(i64::MIN));
        assert!(bounds.contains(i64::MAX));
    }

    #[test]
    fn test_sign() {
        assert!(Sign::Positive.accepts(0.5));
        assert!(!Sign::Positive.accepts(0.0));
        assert!(Sign::Negative.accepts(-1.0));
        assert!(!Sign::Negative.accepts(0.0));
        assert!(Sign::NonNegative.accepts(0.0));
        assert!(!Sign::NonNegative.accepts(-0.1));
    }
}
