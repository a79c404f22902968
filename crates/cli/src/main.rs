mod dto;

use std::{path::PathBuf, process::ExitCode, time::Instant};
use subway::{
    repository::Repository,
    source::{self, Source},
};
use tracing::{error, info};

use crate::dto::PathDto;

const USAGE: &str = "Usage: subway-cli <snapshot.zip|snapshot dir> <from station> <to station> [age] [--json]";

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.iter().position(|arg| arg == "--json") {
        Some(index) => {
            args.remove(index);
            true
        }
        None => false,
    };
    let [path, from, to, rest @ ..] = args.as_slice() else {
        error!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let age = match rest.first().map(|age| age.parse::<u32>()) {
        Some(Ok(age)) => Some(age),
        Some(Err(err)) => {
            error!("Invalid age: {err}");
            return ExitCode::FAILURE;
        }
        None => None,
    };

    info!("Loading snapshot...");
    let now = Instant::now();
    let path = PathBuf::from(path);
    let source = if path.is_dir() {
        Source::new(source::Config::default()).from_directory(path)
    } else {
        Source::new(source::Config::default()).from_zip(path)
    };
    let repository = match Repository::new().with_source(source) {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load snapshot: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!("Loading snapshot took {:?}", now.elapsed());

    let (Some(from), Some(to)) = (
        repository.station_by_name(from),
        repository.station_by_name(to),
    ) else {
        error!("Unknown station, expected one of the loaded station names");
        return ExitCode::FAILURE;
    };

    let itinerary = match repository.find_path(from.id, to.id, age) {
        Ok(itinerary) => itinerary,
        Err(err) => {
            error!("{err} ({:?})", err.kind());
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&PathDto::from(&itinerary)) {
            Ok(body) => println!("{body}"),
            Err(err) => {
                error!("Failed to serialize route: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", itinerary.station_names().join(" -> "));
        println!("Distance: {}", itinerary.distance);
        println!("Fare: {}", itinerary.fare);
    }
    ExitCode::SUCCESS
}
