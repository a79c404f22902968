use subway::{
    network::{Error, Network},
    repository::Section,
    shared::{Distance, LineId, SectionId, StationId},
};

fn section(id: u64, line: u64, up: u64, down: u64, distance: u32) -> Section {
    Section::new(
        SectionId::new(id),
        LineId::new(line),
        StationId::new(up),
        StationId::new(down),
        Distance::from_kilometers(distance),
    )
}

fn ids(values: &[u64]) -> Vec<StationId> {
    values.iter().copied().map(StationId::new).collect()
}

// A=1 B=2 C=3 D=4 E=5, line 1: A-B-C-D, line 2: B-E-D
fn network() -> Network {
    let sections = [
        section(1, 1, 1, 2, 2),
        section(2, 1, 2, 3, 2),
        section(3, 1, 3, 4, 7),
        section(4, 2, 2, 5, 3),
        section(5, 2, 5, 4, 4),
    ];
    Network::new()
        .with_stations((1..=6).map(StationId::new))
        .with_sections(&sections)
}

#[test]
fn shortest_path_test() {
    let path = network()
        .shortest_path(StationId::new(1), StationId::new(4))
        .unwrap();
    assert_eq!(path.station_ids, ids(&[1, 2, 5, 4]));
    assert_eq!(path.distance, Distance::from_kilometers(9));
    assert_eq!(
        path.line_ids.into_iter().collect::<Vec<_>>(),
        vec![LineId::new(1), LineId::new(2)]
    );
    assert_eq!(
        path.section_ids,
        vec![SectionId::new(1), SectionId::new(4), SectionId::new(5)]
    );
}

#[test]
fn shortest_distance_test() {
    let distance = network()
        .shortest_distance(StationId::new(1), StationId::new(3))
        .unwrap();
    assert_eq!(distance, Distance::from_kilometers(4));
}

#[test]
fn sections_ride_both_ways_test() {
    let path = network()
        .shortest_path(StationId::new(4), StationId::new(1))
        .unwrap();
    assert_eq!(path.station_ids, ids(&[4, 5, 2, 1]));
    assert_eq!(path.distance, Distance::from_kilometers(9));
}

#[test]
fn parallel_sections_pick_the_shorter_test() {
    let sections = [section(1, 1, 1, 2, 8), section(2, 2, 1, 2, 5)];
    let path = Network::new()
        .with_sections(&sections)
        .shortest_path(StationId::new(1), StationId::new(2))
        .unwrap();
    assert_eq!(path.distance, Distance::from_kilometers(5));
    assert_eq!(path.line_ids.into_iter().collect::<Vec<_>>(), vec![LineId::new(2)]);
}

#[test]
fn isolated_station_has_no_path_test() {
    let err = network()
        .shortest_path(StationId::new(1), StationId::new(6))
        .unwrap_err();
    assert_eq!(err, Error::NoPathFound(StationId::new(1), StationId::new(6)));
    assert!(err.kind().is_not_found());
}

#[test]
fn unknown_station_test() {
    let err = network()
        .shortest_path(StationId::new(100), StationId::new(1))
        .unwrap_err();
    assert_eq!(err, Error::InvalidStationID(StationId::new(100)));
    assert!(err.kind().is_not_found());
}

#[test]
fn same_station_is_a_zero_length_path_test() {
    let path = network()
        .shortest_path(StationId::new(2), StationId::new(2))
        .unwrap();
    assert_eq!(path.station_ids, ids(&[2]));
    assert!(path.distance.is_zero());
    assert!(path.line_ids.is_empty());
}

#[test]
fn very_long_sections_saturate_test() {
    let sections = [
        section(1, 1, 1, 2, u32::MAX - 1),
        section(2, 1, 2, 3, u32::MAX - 1),
    ];
    let network = Network::new().with_sections(&sections);
    let path = network
        .shortest_path(StationId::new(1), StationId::new(3))
        .unwrap();
    assert_eq!(path.station_ids, ids(&[1, 2, 3]));
    assert_eq!(path.distance, Distance::from_kilometers(u32::MAX));
}
