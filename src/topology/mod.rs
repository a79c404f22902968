use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    repository::Section,
    shared::{ErrorKind, SectionId, StationId},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Could not find the top terminus of the line")]
    TopStationNotFound,
    #[error("Could not find the section leaving station {0}")]
    NextSectionNotFound(StationId),
    #[error("Station {0} is used by more than one section in the same direction")]
    Branching(StationId),
    #[error("Exactly one of the up and down stations must already be on the line")]
    ExactlyOneStationRequired,
    #[error("A new section must be strictly shorter than the section it splits")]
    SectionTooLong,
    #[error("A section must have a positive distance")]
    NonPositiveDistance,
    #[error("Station {0} is not registered on this line")]
    StationNotRegistered(StationId),
    #[error("Can not delete the last section of a single section line")]
    LastSection,
    #[error("Could not find a section containing station {0}")]
    SectionNotFound(StationId),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExactlyOneStationRequired
            | Self::SectionTooLong
            | Self::NonPositiveDistance
            | Self::LastSection => ErrorKind::Rule,
            Self::TopStationNotFound
            | Self::NextSectionNotFound(_)
            | Self::Branching(_)
            | Self::StationNotRegistered(_)
            | Self::SectionNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// What has to be written back after removing a station from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    /// Replaces the section that arrived at an internal station, now spanning
    /// both removed sections. `None` when a terminus was removed.
    pub merged: Option<Section>,
    pub deleted_section_id: SectionId,
}

/// The sections of one line ordered as a single chain, top terminus first.
///
/// Built fresh from persisted sections and never stored itself. Every station
/// leaves through at most one section and is reached through at most one, so
/// the chain has exactly one top and one bottom terminus.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    sections: Box<[Section]>,
    // station id -> index of the section leaving it
    by_up: HashMap<StationId, usize>,
    // station id -> index of the section arriving at it
    by_down: HashMap<StationId, usize>,
}

impl Topology {
    /// Orders an unordered set of sections belonging to one line.
    ///
    /// Fails on data that does not form a single unbranched chain.
    pub fn new(sections: Vec<Section>) -> Result<Self, self::Error> {
        if sections.is_empty() {
            return Ok(Self::default());
        }

        let count = sections.len();
        let mut leaving: HashMap<StationId, Section> = HashMap::with_capacity(count);
        let mut arriving: HashSet<StationId> = HashSet::with_capacity(count);
        for section in sections {
            if !arriving.insert(section.down_station_id) {
                return Err(self::Error::Branching(section.down_station_id));
            }
            if leaving.insert(section.up_station_id, section).is_some() {
                return Err(self::Error::Branching(section.up_station_id));
            }
        }

        let mut current = leaving
            .keys()
            .copied()
            .find(|station_id| !arriving.contains(station_id))
            .ok_or(self::Error::TopStationNotFound)?;

        let mut ordered: Vec<Section> = Vec::with_capacity(count);
        while ordered.len() < count {
            let section = leaving
                .remove(&current)
                .ok_or(self::Error::NextSectionNotFound(current))?;
            trace!("Chained section {} leaving {current}", section.id);
            current = section.down_station_id;
            ordered.push(section);
        }

        let by_up = ordered
            .iter()
            .enumerate()
            .map(|(i, section)| (section.up_station_id, i))
            .collect();
        let by_down = ordered
            .iter()
            .enumerate()
            .map(|(i, section)| (section.down_station_id, i))
            .collect();

        Ok(Self {
            sections: ordered.into(),
            by_up,
            by_down,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Sections in chain order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn contains(&self, station_id: StationId) -> bool {
        self.by_up.contains_key(&station_id) || self.by_down.contains_key(&station_id)
    }

    pub fn top_station_id(&self) -> Option<StationId> {
        self.sections.first().map(|section| section.up_station_id)
    }

    pub fn bottom_station_id(&self) -> Option<StationId> {
        self.sections.last().map(|section| section.down_station_id)
    }

    /// The ordered stations of the line, top terminus first.
    /// Holds one more station than there are sections, or none for an empty line.
    pub fn station_ids(&self) -> Vec<StationId> {
        let Some(top) = self.top_station_id() else {
            return Vec::new();
        };
        let mut station_ids = Vec::with_capacity(self.sections.len() + 1);
        station_ids.push(top);
        station_ids.extend(self.sections.iter().map(|section| section.down_station_id));
        station_ids
    }

    /// Validates `new_section` against the chain and returns the existing
    /// section shortened to make room for it, if one has to change.
    ///
    /// Extending either terminus, or adding the first section of an empty
    /// line, leaves every existing section untouched.
    pub fn prepare_insert(&self, new_section: &Section) -> Result<Option<Section>, self::Error> {
        if new_section.distance.is_zero() {
            return Err(self::Error::NonPositiveDistance);
        }
        if self.is_empty() {
            return Ok(None);
        }

        let has_up = self.contains(new_section.up_station_id);
        let has_down = self.contains(new_section.down_station_id);
        if has_up == has_down {
            return Err(self::Error::ExactlyOneStationRequired);
        }

        if self.top_station_id() == Some(new_section.down_station_id)
            || self.bottom_station_id() == Some(new_section.up_station_id)
        {
            debug!("Section {} extends a terminus", new_section.id);
            return Ok(None);
        }

        let existing = if has_down {
            self.arriving(new_section.down_station_id)?
        } else {
            self.leaving(new_section.up_station_id)?
        };

        let distance = existing
            .distance
            .checked_sub(new_section.distance)
            .filter(|distance| !distance.is_zero())
            .ok_or(self::Error::SectionTooLong)?;

        // The new section takes over the side it shares with the existing one.
        let updated = if has_down {
            Section {
                down_station_id: new_section.up_station_id,
                distance,
                ..*existing
            }
        } else {
            Section {
                up_station_id: new_section.down_station_id,
                distance,
                ..*existing
            }
        };
        debug!(
            "Section {} splits section {}, now {} -> {} ({})",
            new_section.id, updated.id, updated.up_station_id, updated.down_station_id, distance
        );
        Ok(Some(updated))
    }

    /// Validates removing `station_id` from the line and returns the changes
    /// that have to be written back.
    pub fn prepare_delete(&self, station_id: StationId) -> Result<Deletion, self::Error> {
        if !self.contains(station_id) {
            return Err(self::Error::StationNotRegistered(station_id));
        }
        if self.sections.len() == 1 {
            return Err(self::Error::LastSection);
        }

        let arriving = self.by_down.get(&station_id).map(|i| &self.sections[*i]);
        let leaving = self.by_up.get(&station_id).map(|i| &self.sections[*i]);
        let deletion = match (arriving, leaving) {
            (Some(up_section), Some(down_section)) => Deletion {
                merged: Some(Section {
                    down_station_id: down_section.down_station_id,
                    distance: up_section.distance + down_section.distance,
                    ..*up_section
                }),
                deleted_section_id: down_section.id,
            },
            (None, Some(section)) | (Some(section), None) => Deletion {
                merged: None,
                deleted_section_id: section.id,
            },
            (None, None) => return Err(self::Error::SectionNotFound(station_id)),
        };
        debug!(
            "Removing station {station_id} deletes section {} and merges {:?}",
            deletion.deleted_section_id,
            deletion.merged.map(|section| section.id)
        );
        Ok(deletion)
    }

    fn arriving(&self, station_id: StationId) -> Result<&Section, self::Error> {
        self.by_down
            .get(&station_id)
            .map(|i| &self.sections[*i])
            .ok_or(self::Error::SectionNotFound(station_id))
    }

    fn leaving(&self, station_id: StationId) -> Result<&Section, self::Error> {
        self.by_up
            .get(&station_id)
            .map(|i| &self.sections[*i])
            .ok_or(self::Error::SectionNotFound(station_id))
    }
}
