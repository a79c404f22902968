use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    fare::Fare,
    repository::Station,
    shared::{Distance, LineId},
};

/// A priced route between two stations, ready to be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    /// Stations in riding order, source first.
    pub stations: Vec<Station>,
    pub line_ids: BTreeSet<LineId>,
    pub distance: Distance,
    pub fare: Fare,
}

impl Itinerary {
    pub fn station_names(&self) -> Vec<&str> {
        self.stations.iter().map(|station| &*station.name).collect()
    }
}
