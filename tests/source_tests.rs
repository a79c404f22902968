use std::path::PathBuf;

use subway::{
    fare::Fare,
    repository::Repository,
    shared::{Distance, LineId},
    source::{self, Source},
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/{name}", env!("CARGO_MANIFEST_DIR")))
}

fn check_snapshot(repository: &Repository) {
    assert_eq!(repository.stations().count(), 6);
    assert_eq!(repository.lines().count(), 2);
    assert_eq!(repository.sections().count(), 5);

    let names: Vec<_> = repository
        .stations_by_line(LineId::new(1))
        .unwrap()
        .into_iter()
        .map(|station| station.name.to_string())
        .collect();
    assert_eq!(names, vec!["Seolleung", "Jamsil", "Yeoksam", "Gangnam"]);

    let from = repository.station_by_name("Seolleung").unwrap().id;
    let to = repository.station_by_name("Gangnam").unwrap().id;
    let itinerary = repository.find_path(from, to, Some(10)).unwrap();
    assert_eq!(itinerary.distance, Distance::from_kilometers(9));
    assert_eq!(itinerary.fare, Fare::from_won(600));
}

#[test]
fn load_from_zip_test() {
    let source = Source::new(source::Config::default()).from_zip(fixture_path("network.zip"));
    let repository = Repository::new().with_source(source).unwrap();
    check_snapshot(&repository);
}

#[test]
fn load_from_directory_test() {
    let source = Source::new(source::Config::default()).from_directory(fixture_path("network"));
    let repository = Repository::new().with_source(source).unwrap();
    check_snapshot(&repository);
}

#[test]
fn stream_rows_test() {
    let source = Source::default().from_directory(fixture_path("network"));
    let mut rows = Vec::new();
    source
        .stream_lines(|(i, line)| rows.push((i, line.line_name, line.extra_fare)))
        .unwrap();
    assert_eq!(
        rows,
        vec![
            (0, "Line 1".to_string(), Some(200)),
            (1, "Line 2".to_string(), Some(300)),
        ]
    );
}

#[test]
fn missing_file_test() {
    let config = source::Config {
        sections_file_name: "missing.txt".into(),
        ..Default::default()
    };
    let source = Source::new(config).from_zip(fixture_path("network.zip"));
    let err = Repository::new().with_source(source).unwrap_err();
    assert!(matches!(err, source::Error::FileNotFound(name) if name == "missing.txt"));
}

#[test]
fn next_ids_follow_loaded_ids_test() {
    let source = Source::default().from_directory(fixture_path("network"));
    let mut repository = Repository::new().with_source(source).unwrap();
    let id = repository.add_station("Samsung").unwrap();
    assert_eq!(id.get(), 7);
}

#[test]
fn zero_distance_section_is_rejected_test() {
    let source = Source::default().from_directory(fixture_path("zero_distance"));
    let err = Repository::new().with_source(source).unwrap_err();
    assert!(
        matches!(&err, source::Error::Invalid(reason) if reason.contains("positive distance")),
        "{err}"
    );
}

#[test]
fn duplicate_line_name_is_rejected_test() {
    let source = Source::default().from_directory(fixture_path("duplicate_line"));
    let err = Repository::new().with_source(source).unwrap_err();
    assert!(
        matches!(&err, source::Error::Invalid(reason) if reason.contains("Line 1")),
        "{err}"
    );
}
