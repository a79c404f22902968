use serde::Serialize;
use subway::repository::{Itinerary, Station};

#[derive(Debug, Clone, Serialize)]
pub struct StationDto {
    pub id: u64,
    pub name: String,
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        Self {
            id: station.id.get(),
            name: station.name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PathDto {
    pub stations: Vec<StationDto>,
    pub distance: u32,
    pub fare: u32,
}

impl PathDto {
    pub fn from(itinerary: &Itinerary) -> Self {
        Self {
            stations: itinerary.stations.iter().map(StationDto::from).collect(),
            distance: itinerary.distance.as_kilometers(),
            fare: itinerary.fare.as_won(),
        }
    }
}
