use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

mod itinerary;
mod models;
pub use itinerary::*;
pub use models::*;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    fare::{self, AgeGroup, Fare},
    lines::{self, Lines},
    network::{self, Network},
    shared::{Distance, ErrorKind, LineId, NextId, SectionId, StationId},
    source::{self, Source},
    topology::{self, Topology},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Topology(#[from] topology::Error),
    #[error(transparent)]
    Network(#[from] network::Error),
    #[error(transparent)]
    Lines(#[from] lines::Error),
    #[error("Station id {0} does not match any entry")]
    InvalidStationID(StationId),
    #[error("Line id {0} does not match any entry")]
    InvalidLineID(LineId),
    #[error("A station named {0} already exists")]
    DuplicateStationName(Arc<str>),
    #[error("Station {0} is still used by a line")]
    StationInUse(StationId),
    #[error("The up and down station of a section can not be the same")]
    SameUpAndDownStation,
    #[error("The source and target station can not be the same")]
    SameSourceAndTarget,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Topology(err) => err.kind(),
            Self::Network(err) => err.kind(),
            Self::Lines(err) => err.kind(),
            Self::InvalidStationID(_) | Self::InvalidLineID(_) => ErrorKind::NotFound,
            Self::DuplicateStationName(_)
            | Self::StationInUse(_)
            | Self::SameUpAndDownStation
            | Self::SameSourceAndTarget => ErrorKind::Rule,
        }
    }
}

/// A structural change to the stored sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChange {
    Insert(Section),
    Replace(Section),
    Delete(SectionId),
}

/// In memory store of stations, lines and sections.
///
/// Every structural change is validated against a fresh [`Topology`] of the
/// line before anything is written, so a rejected change leaves the store
/// as it was. Callers sharing a repository across threads must serialize
/// writes themselves.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    sections: BTreeMap<SectionId, Section>,

    station_lookup: HashMap<Arc<str>, StationId>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads a network snapshot and checks that every line forms a valid chain.
    pub fn with_source(mut self, source: Source) -> Result<Self, source::Error> {
        info!("Loading stations...");
        let mut invalid: Option<String> = None;
        source.stream_stations(|(_, row)| {
            let station: Station = row.into();
            if invalid.is_some() {
                return;
            }
            if self.stations.contains_key(&station.id) {
                invalid = Some(format!("Station id {} is used twice", station.id));
            } else if let Err(err) = self.insert_station(station) {
                invalid = Some(err.to_string());
            }
        })?;
        check(&mut invalid)?;

        info!("Loading lines...");
        source.stream_lines(|(_, row)| {
            let line: Line = row.into();
            if invalid.is_some() {
                return;
            }
            if self.lines.contains_key(&line.id) {
                invalid = Some(format!("Line id {} is used twice", line.id));
            } else {
                self.lines.insert(line.id, line);
            }
        })?;
        check(&mut invalid)?;
        let loaded = self.line_snapshot();
        if let Some(err) = loaded
            .lines()
            .iter()
            .find_map(|line| loaded.validate_duplication(line).err())
        {
            return Err(source::Error::Invalid(err.to_string()));
        }

        info!("Loading sections...");
        source.stream_sections(|(_, row)| {
            let section: Section = row.into();
            if invalid.is_some() {
                return;
            }
            if self.sections.contains_key(&section.id) {
                invalid = Some(format!("Section id {} is used twice", section.id));
            } else if section.distance.is_zero() {
                invalid = Some(format!(
                    "Section {}: {}",
                    section.id,
                    topology::Error::NonPositiveDistance
                ));
            } else if !self.lines.contains_key(&section.line_id) {
                invalid = Some(Error::InvalidLineID(section.line_id).to_string());
            } else if let Some(station_id) = [section.up_station_id, section.down_station_id]
                .into_iter()
                .find(|station_id| !self.stations.contains_key(station_id))
            {
                invalid = Some(Error::InvalidStationID(station_id).to_string());
            } else {
                self.sections.insert(section.id, section);
            }
        })?;
        check(&mut invalid)?;

        info!("Validating line topologies...");
        self.lines
            .par_iter()
            .try_for_each(|(line_id, line)| {
                self.topology(*line_id)
                    .map(|_| ())
                    .map_err(|err| source::Error::Invalid(format!("Line {}: {err}", line.name)))
            })?;
        info!(
            "Loaded {} stations, {} lines and {} sections",
            self.stations.len(),
            self.lines.len(),
            self.sections.len()
        );
        Ok(self)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn station_by_id(&self, id: StationId) -> Result<&Station, self::Error> {
        self.stations
            .get(&id)
            .ok_or(self::Error::InvalidStationID(id))
    }

    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        let id = self.station_lookup.get(name)?;
        self.stations.get(id)
    }

    pub fn line_by_id(&self, id: LineId) -> Result<&Line, self::Error> {
        self.lines.get(&id).ok_or(self::Error::InvalidLineID(id))
    }

    /// All sections of one line in storage order.
    pub fn sections_by_line(&self, line_id: LineId) -> Vec<Section> {
        self.sections
            .values()
            .filter(|section| section.line_id == line_id)
            .copied()
            .collect()
    }

    /// The ordered chain of a line's sections.
    pub fn topology(&self, line_id: LineId) -> Result<Topology, self::Error> {
        Ok(Topology::new(self.sections_by_line(line_id))?)
    }

    /// Stations of a line from the top terminus to the bottom one.
    pub fn stations_by_line(&self, line_id: LineId) -> Result<Vec<&Station>, self::Error> {
        self.line_by_id(line_id)?;
        self.topology(line_id)?
            .station_ids()
            .into_iter()
            .map(|station_id| self.station_by_id(station_id))
            .collect()
    }

    pub fn add_station(&mut self, name: &str) -> Result<StationId, self::Error> {
        let id = next_id(&self.stations, StationId::new(1));
        self.insert_station(Station::new(id, name))?;
        debug!("Added station {id} {name}");
        Ok(id)
    }

    pub fn remove_station(&mut self, id: StationId) -> Result<(), self::Error> {
        let name = self.station_by_id(id)?.name.clone();
        if self.sections.values().any(|section| section.contains(id)) {
            return Err(self::Error::StationInUse(id));
        }
        self.station_lookup.remove(&name);
        self.stations.remove(&id);
        debug!("Removed station {id}");
        Ok(())
    }

    /// Creates a line together with its first section.
    pub fn add_line(
        &mut self,
        name: &str,
        color: &str,
        extra_fare: Fare,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Result<LineId, self::Error> {
        let line = Line::new(next_id(&self.lines, LineId::new(1)), name, color, extra_fare);
        self.line_snapshot().validate_duplication(&line)?;
        let section = self.new_section(line.id, up_station_id, down_station_id, distance)?;
        let changes = plan_insert(&Topology::default(), section)?;

        let id = line.id;
        self.lines.insert(id, line);
        self.apply(changes);
        debug!("Added line {id} {name}");
        Ok(id)
    }

    pub fn update_line(
        &mut self,
        id: LineId,
        name: &str,
        color: &str,
        extra_fare: Fare,
    ) -> Result<(), self::Error> {
        self.line_by_id(id)?;
        let line = Line::new(id, name, color, extra_fare);
        self.line_snapshot().validate_duplication(&line)?;
        self.lines.insert(id, line);
        debug!("Updated line {id}");
        Ok(())
    }

    /// Removes a line and every section on it.
    pub fn remove_line(&mut self, id: LineId) -> Result<(), self::Error> {
        self.line_by_id(id)?;
        self.lines.remove(&id);
        self.sections.retain(|_, section| section.line_id != id);
        debug!("Removed line {id}");
        Ok(())
    }

    /// Adds a section to a line, shortening the section it splits if needed.
    pub fn add_section(
        &mut self,
        line_id: LineId,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Result<SectionId, self::Error> {
        self.line_by_id(line_id)?;
        let section = self.new_section(line_id, up_station_id, down_station_id, distance)?;
        let changes = plan_insert(&self.topology(line_id)?, section)?;
        self.apply(changes);
        Ok(section.id)
    }

    /// Takes a station off a line, merging the sections around it if needed.
    pub fn remove_station_from_line(
        &mut self,
        line_id: LineId,
        station_id: StationId,
    ) -> Result<(), self::Error> {
        self.line_by_id(line_id)?;
        let deletion = self.topology(line_id)?.prepare_delete(station_id)?;
        let mut changes = Vec::with_capacity(2);
        if let Some(merged) = deletion.merged {
            changes.push(SectionChange::Replace(merged));
        }
        changes.push(SectionChange::Delete(deletion.deleted_section_id));
        self.apply(changes);
        Ok(())
    }

    /// Shortest route between two stations with its fare.
    ///
    /// The fare uses the highest extra fare among the lines the route rides.
    /// When `age` is given the matching age discount is applied last.
    pub fn find_path(
        &self,
        source: StationId,
        target: StationId,
        age: Option<u32>,
    ) -> Result<Itinerary, self::Error> {
        if source == target {
            return Err(self::Error::SameSourceAndTarget);
        }
        self.station_by_id(source)?;
        self.station_by_id(target)?;

        let path = Network::new()
            .with_stations(self.stations.keys().copied())
            .with_sections(self.sections.values())
            .shortest_path(source, target)?;
        let extra_fare = self.line_snapshot().find_max_extra_fare(&path.line_ids)?;
        let mut fare = fare::calculate(path.distance, extra_fare);
        if let Some(age) = age {
            fare = AgeGroup::from_age(age).apply(fare);
        }

        let stations = path
            .station_ids
            .iter()
            .map(|station_id| self.station_by_id(*station_id).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Route {source} -> {target} rides {} lines for {}",
            path.line_ids.len(),
            fare
        );
        Ok(Itinerary {
            stations,
            line_ids: path.line_ids,
            distance: path.distance,
            fare,
        })
    }

    fn line_snapshot(&self) -> Lines {
        self.lines.values().cloned().collect()
    }

    fn insert_station(&mut self, station: Station) -> Result<(), self::Error> {
        if self.station_lookup.contains_key(&station.name) {
            return Err(self::Error::DuplicateStationName(station.name));
        }
        self.station_lookup.insert(station.name.clone(), station.id);
        self.stations.insert(station.id, station);
        Ok(())
    }

    fn new_section(
        &self,
        line_id: LineId,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Result<Section, self::Error> {
        self.station_by_id(up_station_id)?;
        self.station_by_id(down_station_id)?;
        if up_station_id == down_station_id {
            return Err(self::Error::SameUpAndDownStation);
        }
        Ok(Section::new(
            next_id(&self.sections, SectionId::new(1)),
            line_id,
            up_station_id,
            down_station_id,
            distance,
        ))
    }

    fn apply(&mut self, changes: Vec<SectionChange>) {
        for change in changes {
            debug!("Applying {change:?}");
            match change {
                SectionChange::Insert(section) | SectionChange::Replace(section) => {
                    self.sections.insert(section.id, section);
                }
                SectionChange::Delete(id) => {
                    self.sections.remove(&id);
                }
            }
        }
    }
}

fn plan_insert(topology: &Topology, section: Section) -> Result<Vec<SectionChange>, self::Error> {
    let mut changes = Vec::with_capacity(2);
    if let Some(updated) = topology.prepare_insert(&section)? {
        changes.push(SectionChange::Replace(updated));
    }
    changes.push(SectionChange::Insert(section));
    Ok(changes)
}

fn next_id<K, V>(map: &BTreeMap<K, V>, first: K) -> K
where
    K: Ord + NextId,
{
    map.last_key_value()
        .map(|(id, _)| id.next_id())
        .unwrap_or(first)
}

fn check(invalid: &mut Option<String>) -> Result<(), source::Error> {
    match invalid.take() {
        Some(reason) => Err(source::Error::Invalid(reason)),
        None => Ok(()),
    }
}
