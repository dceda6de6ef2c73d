//! Scalar quantities used by the search: [`Distance`], [`Duration`] and
//! [`Velocity`].
//!
//! All three are `f64` newtypes in SI units (metres, seconds, metres per
//! second). They are totally ordered through [`f64::total_cmp`] so they can
//! key a heap directly.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div};

use crate::geom::Position;

macro_rules! total_order {
    ($ty:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other) == Ordering::Equal
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// A length in metres.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance(f64);

total_order!(Distance);

impl Distance {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    #[inline]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Straight-line (Euclidean) distance between two positions.
    #[inline]
    pub fn between(a: Position, b: Position) -> Self {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        Self(dx.hypot(dy))
    }
}

impl Add for Distance {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Div<Velocity> for Distance {
    type Output = Duration;
    #[inline]
    fn div(self, rhs: Velocity) -> Duration {
        Duration(self.0 / rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}m", self.0)
    }
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

/// A span of time in seconds.
///
/// Unlike [`std::time::Duration`] this may hold fractional, infinite or NaN
/// values; NaN sorts above every number.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration(f64);

total_order!(Duration);

impl Duration {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    #[inline]
    pub const fn seconds(self) -> f64 {
        self.0
    }
}

impl Add for Duration {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

// ---------------------------------------------------------------------------
// Velocity
// ---------------------------------------------------------------------------

/// A speed in metres per second.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity(f64);

total_order!(Velocity);

impl Velocity {
    #[inline]
    pub const fn from_meters_per_second(mps: f64) -> Self {
        Self(mps)
    }

    #[inline]
    pub fn from_kilometers_per_hour(kph: f64) -> Self {
        Self(kph / 3.6)
    }

    #[inline]
    pub const fn meters_per_second(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn kilometers_per_hour(self) -> f64 {
        self.0 * 3.6
    }

    /// Whether the velocity can be used as a divisor: finite and strictly
    /// positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}m/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_over_velocity_is_duration() {
        let d = Distance::from_meters(10.0);
        let v = Velocity::from_meters_per_second(4.0);
        assert_eq!(d / v, Duration::from_seconds(2.5));
    }

    #[test]
    fn euclidean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(Distance::between(a, b), Distance::from_meters(5.0));
        assert_eq!(Distance::between(b, a), Distance::from_meters(5.0));
        assert_eq!(Distance::between(a, a), Distance::ZERO);
    }

    #[test]
    fn kilometers_per_hour_conversion() {
        let v = Velocity::from_kilometers_per_hour(36.0);
        assert!((v.meters_per_second() - 10.0).abs() < 1e-12);
        assert!((v.kilometers_per_hour() - 36.0).abs() < 1e-12);
    }

    #[test]
    fn durations_sum_and_order() {
        let total: Duration = [1.0, 2.0, 0.5]
            .into_iter()
            .map(Duration::from_seconds)
            .sum();
        assert_eq!(total, Duration::from_seconds(3.5));
        assert!(Duration::ZERO < total);
        assert_eq!(
            Duration::from_seconds(2.0).max(Duration::from_seconds(1.0)),
            Duration::from_seconds(2.0)
        );
    }

    #[test]
    fn nan_is_totally_ordered() {
        let nan = Duration::from_seconds(f64::NAN);
        // total_cmp places positive NaN above every number.
        assert!(nan > Duration::from_seconds(f64::INFINITY));
        assert_eq!(nan, nan);
    }

    #[test]
    fn velocity_validity() {
        assert!(Velocity::from_meters_per_second(1.0).is_valid());
        assert!(!Velocity::from_meters_per_second(0.0).is_valid());
        assert!(!Velocity::from_meters_per_second(-2.0).is_valid());
        assert!(!Velocity::from_meters_per_second(f64::INFINITY).is_valid());
        assert!(!Velocity::from_meters_per_second(f64::NAN).is_valid());
    }
}
