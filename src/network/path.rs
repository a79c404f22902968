use std::collections::BTreeSet;

use serde::Serialize;

use crate::shared::{Distance, LineId, SectionId, StationId};

/// A route through the network as found by [`super::Network::shortest_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    /// Stations in riding order, source first and target last.
    pub station_ids: Vec<StationId>,
    /// The section ridden between each pair of consecutive stations.
    pub section_ids: Vec<SectionId>,
    /// Every line the path rides at least one section of.
    pub line_ids: BTreeSet<LineId>,
    pub distance: Distance,
}

impl Path {
    pub(crate) fn new(distance: Distance) -> Self {
        Self {
            station_ids: Vec::new(),
            section_ids: Vec::new(),
            line_ids: BTreeSet::new(),
            distance,
        }
    }

    // Legs are pushed while walking back from the target
    pub(crate) fn push_leg(&mut self, station_id: StationId, line_id: LineId, section_id: SectionId) {
        self.station_ids.push(station_id);
        self.section_ids.push(section_id);
        self.line_ids.insert(line_id);
    }

    pub(crate) fn finish(&mut self, source: StationId) {
        self.station_ids.push(source);
        self.station_ids.reverse();
        self.section_ids.reverse();
    }

    pub fn source(&self) -> Option<StationId> {
        self.station_ids.first().copied()
    }

    pub fn target(&self) -> Option<StationId> {
        self.station_ids.last().copied()
    }
}
