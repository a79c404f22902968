mod path;
pub use path::*;

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    repository::Section,
    shared::{Distance, ErrorKind, LineId, SectionId, StationId},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Station {0} is not part of the network")]
    InvalidStationID(StationId),
    #[error("No path exists between station {0} and station {1}")]
    NoPathFound(StationId, StationId),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: usize,
    distance: Distance,
    line_id: LineId,
    section_id: SectionId,
}

/// Weighted multigraph over every section of every line.
///
/// Sections can be ridden in both directions and parallel sections of
/// different lines between the same stations are all kept.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<StationId>,
    lookup: HashMap<StationId, usize>,
    edges: Vec<Vec<Edge>>,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds stations as vertices, including ones no section touches yet.
    pub fn with_stations<I>(mut self, station_ids: I) -> Self
    where
        I: IntoIterator<Item = StationId>,
    {
        station_ids.into_iter().for_each(|station_id| {
            self.vertex(station_id);
        });
        self
    }

    pub fn with_sections<'a, I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = &'a Section>,
    {
        for section in sections {
            let up = self.vertex(section.up_station_id);
            let down = self.vertex(section.down_station_id);
            let edge = Edge {
                to: down,
                distance: section.distance,
                line_id: section.line_id,
                section_id: section.id,
            };
            self.edges[up].push(edge);
            self.edges[down].push(Edge { to: up, ..edge });
        }
        debug!(
            "Built network with {} stations and {} sections",
            self.stations.len(),
            self.edges.iter().map(Vec::len).sum::<usize>() / 2
        );
        self
    }

    pub fn contains(&self, station_id: StationId) -> bool {
        self.lookup.contains_key(&station_id)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Shortest path by total distance.
    ///
    /// When several paths share the minimum distance, whichever the search
    /// settles first is returned.
    pub fn shortest_path(&self, source: StationId, target: StationId) -> Result<Path, self::Error> {
        let from = self.index(source)?;
        let to = self.index(target)?;

        let mut best: Vec<Option<Distance>> = vec![None; self.stations.len()];
        let mut parents: Vec<Option<(usize, Edge)>> = vec![None; self.stations.len()];
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
        best[from] = Some(Distance::ZERO);
        heap.push(Candidate {
            index: from,
            distance: Distance::ZERO,
        });

        while let Some(Candidate { index, distance }) = heap.pop() {
            if index == to {
                break;
            }
            // Stale entry, a shorter way here was already settled
            if best[index].is_some_and(|known| known < distance) {
                continue;
            }
            trace!("Settled station {} at {distance}", self.stations[index]);
            for edge in &self.edges[index] {
                let next = distance + edge.distance;
                if best[edge.to].is_none_or(|known| next < known) {
                    best[edge.to] = Some(next);
                    parents[edge.to] = Some((index, *edge));
                    heap.push(Candidate {
                        index: edge.to,
                        distance: next,
                    });
                }
            }
        }

        let distance = best[to].ok_or(self::Error::NoPathFound(source, target))?;
        let mut path = Path::new(distance);
        let mut current = to;
        while let Some((previous, edge)) = parents[current] {
            path.push_leg(self.stations[current], edge.line_id, edge.section_id);
            current = previous;
        }
        path.finish(source);
        debug!(
            "Shortest path {source} -> {target}: {} stations, {distance}",
            path.station_ids.len()
        );
        Ok(path)
    }

    pub fn shortest_distance(
        &self,
        source: StationId,
        target: StationId,
    ) -> Result<Distance, self::Error> {
        Ok(self.shortest_path(source, target)?.distance)
    }

    fn vertex(&mut self, station_id: StationId) -> usize {
        if let Some(index) = self.lookup.get(&station_id) {
            return *index;
        }
        let index = self.stations.len();
        self.stations.push(station_id);
        self.edges.push(Vec::new());
        self.lookup.insert(station_id, index);
        index
    }

    fn index(&self, station_id: StationId) -> Result<usize, self::Error> {
        self.lookup
            .get(&station_id)
            .copied()
            .ok_or(self::Error::InvalidStationID(station_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    index: usize,
    distance: Distance,
}

// Reversed so the max-heap pops the closest station first
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
