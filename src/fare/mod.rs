mod config;
pub use config::*;

use std::{
    fmt::Display,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::shared::Distance;

/// Amount of money in won.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fare(u32);

impl From<u32> for Fare {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Add for Fare {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fare {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Display for Fare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} won", self.0)
    }
}

impl Fare {
    pub const ZERO: Self = Self(0);

    pub const fn from_won(won: u32) -> Self {
        Self(won)
    }

    pub const fn as_won(&self) -> u32 {
        self.0
    }
}

/// Fare for riding `distance` on lines whose highest surcharge is `extra_fare`,
/// using the default tier table.
pub fn calculate(distance: Distance, extra_fare: Fare) -> Fare {
    Config::default().calculate(distance, extra_fare)
}

/// Discount group of a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    Child,
    Teenager,
    Adult,
}

impl AgeGroup {
    const DEDUCTION: u32 = 350;

    pub fn from_age(age: u32) -> Self {
        match age {
            6..13 => Self::Child,
            13..19 => Self::Teenager,
            _ => Self::Adult,
        }
    }

    /// Percentage of the fare (after the fixed deduction) the group pays.
    const fn rate(&self) -> Option<u32> {
        match self {
            Self::Child => Some(50),
            Self::Teenager => Some(80),
            Self::Adult => None,
        }
    }

    /// Children and teenagers get a fixed deduction and then a percentage off.
    pub fn apply(&self, fare: Fare) -> Fare {
        match self.rate() {
            Some(rate) => Fare(fare.0.saturating_sub(Self::DEDUCTION) * rate / 100),
            None => fare,
        }
    }
}
