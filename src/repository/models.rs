use std::sync::Arc;

use serde::Serialize;

use crate::{
    fare::Fare,
    shared::{Distance, LineId, SectionId, StationId},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: Arc<str>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    pub name: Arc<str>,
    pub color: Arc<str>,
    /// Surcharge added to the distance fare when a route rides this line.
    pub extra_fare: Fare,
}

impl Line {
    pub fn new(
        id: LineId,
        name: impl Into<Arc<str>>,
        color: impl Into<Arc<str>>,
        extra_fare: Fare,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            extra_fare,
        }
    }

    pub fn is_same_name(&self, other: &Line) -> bool {
        self.name == other.name
    }

    pub fn is_same_color(&self, other: &Line) -> bool {
        self.color == other.color
    }
}

/// A directed edge between two adjacent stations of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
}

impl Section {
    pub fn new(
        id: SectionId,
        line_id: LineId,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Self {
        Self {
            id,
            line_id,
            up_station_id,
            down_station_id,
            distance,
        }
    }

    pub fn contains(&self, station_id: StationId) -> bool {
        self.up_station_id == station_id || self.down_station_id == station_id
    }
}

#[test]
fn models_serialize_test() {
    fn assert_serialize<T: Serialize>() {}
    assert_serialize::<Station>();
    assert_serialize::<Line>();
    assert_serialize::<Section>();
    assert_serialize::<super::Itinerary>();
    assert_serialize::<crate::network::Path>();
}
