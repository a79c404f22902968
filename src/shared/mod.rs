pub mod distance;
pub mod ids;

pub use distance::*;
pub use ids::*;

use serde::Serialize;

/// The two ways a request against the network can be rejected.
///
/// Hosting layers map `Rule` to a client error and `NotFound` to a
/// not-found response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A business rule was violated, e.g. a duplicate line name or a section
    /// that is too long to fit between two existing stations.
    Rule,
    /// Something the request refers to does not exist.
    NotFound,
}

impl ErrorKind {
    pub const fn is_rule(&self) -> bool {
        matches!(self, Self::Rule)
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
