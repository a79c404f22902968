use serde::{Deserialize, Serialize};

use crate::{
    fare::Fare,
    repository::{Line, Section, Station},
    shared::{Distance, LineId, SectionId, StationId},
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceStation {
    pub station_id: u64,
    pub station_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceLine {
    pub line_id: u64,
    pub line_name: String,
    pub line_color: String,
    pub extra_fare: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub section_id: u64,
    pub line_id: u64,
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: u32,
}

impl From<SourceStation> for Station {
    fn from(value: SourceStation) -> Self {
        Station::new(StationId::new(value.station_id), value.station_name)
    }
}

impl From<SourceLine> for Line {
    fn from(value: SourceLine) -> Self {
        Line::new(
            LineId::new(value.line_id),
            value.line_name,
            value.line_color,
            Fare::from_won(value.extra_fare.unwrap_or(0)),
        )
    }
}

impl From<SourceSection> for Section {
    fn from(value: SourceSection) -> Self {
        Section::new(
            SectionId::new(value.section_id),
            LineId::new(value.line_id),
            StationId::new(value.up_station_id),
            StationId::new(value.down_station_id),
            Distance::from_kilometers(value.distance),
        )
    }
}
