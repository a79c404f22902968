use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Where a network snapshot is read from.
///
/// A snapshot is three csv tables, see [`Config`] for their file names.
#[derive(Default)]
pub struct Source {
    config: Config,
    storage: StorageType,
}

impl Source {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_directory(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Directory(path);
        self
    }

    pub fn stream_stations<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceStation)),
    {
        self.stream(&self.config.stations_file_name, f)
    }

    pub fn stream_lines<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceLine)),
    {
        self.stream(&self.config.lines_file_name, f)
    }

    pub fn stream_sections<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceSection)),
    {
        self.stream(&self.config.sections_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let index = archive
                    .index_for_name(file_name)
                    .ok_or(self::Error::FileNotFound(file_name.to_string()))?;
                let file = archive.by_index(index)?;
                stream_csv(file, f)
            }
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if !path.is_file() {
                    return Err(self::Error::FileNotFound(file_name.to_string()));
                }
                stream_csv(File::open(path)?, f)
            }
        }
    }
}

fn stream_csv<R, T, F>(reader: R, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    for (i, record) in reader.deserialize().enumerate() {
        f((i, record?));
    }
    Ok(())
}
