use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Ids are generated by counting up from the highest one in use.
pub(crate) trait NextId {
    fn next_id(&self) -> Self;
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl NextId for $name {
            fn next_id(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id!(
    /// Identity of a station, generated on insert.
    StationId
);
numeric_id!(
    /// Identity of a line, generated on insert.
    LineId
);
numeric_id!(
    /// Identity of a section, generated on insert.
    SectionId
);
