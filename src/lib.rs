//! Subway network engine.
//!
//! Keeps every line a single chain of sections between two termini, and
//! answers shortest-path and fare queries over the union of all lines.

pub mod fare;
pub mod lines;
pub mod network;
pub mod repository;
pub mod shared;
pub mod source;
pub mod topology;

pub mod prelude {
    pub use crate::{
        fare::{AgeGroup, Fare},
        lines::Lines,
        network::{Network, Path},
        repository::{Itinerary, Line, Repository, Section, Station},
        shared::{Distance, ErrorKind, LineId, SectionId, StationId},
        source::Source,
        topology::Topology,
    };
}
