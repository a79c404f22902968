use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

/// Track length between stations in whole kilometers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Distance(u32);

impl From<u32> for Distance {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// Saturates at u32::MAX km rather than wrapping
impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}km", self.0)
    }
}

impl Distance {
    pub const ZERO: Self = Self(0);

    pub const fn from_kilometers(distance: u32) -> Self {
        Self(distance)
    }

    pub const fn as_kilometers(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `None` when `rhs` is longer than `self`.
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

#[test]
fn distance_sum_test() {
    let total: Distance = [2, 3, 4].into_iter().map(Distance::from).sum();
    assert_eq!(total, Distance::from_kilometers(9));
}

#[test]
fn distance_add_saturates_test() {
    let long = Distance::from_kilometers(u32::MAX - 1);
    assert_eq!(long + long, Distance::from_kilometers(u32::MAX));
    let mut total = long;
    total += Distance::from_kilometers(5);
    assert_eq!(total, Distance::from_kilometers(u32::MAX));
}

#[test]
fn distance_checked_sub_test() {
    let long = Distance::from_kilometers(7);
    let short = Distance::from_kilometers(3);
    assert_eq!(long.checked_sub(short), Some(Distance::from_kilometers(4)));
    assert_eq!(short.checked_sub(long), None);
}
