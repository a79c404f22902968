use std::{collections::BTreeSet, sync::Arc};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    fare::Fare,
    repository::Line,
    shared::{ErrorKind, LineId},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A line named {0} already exists")]
    DuplicateName(Arc<str>),
    #[error("A line colored {0} already exists")]
    DuplicateColor(Arc<str>),
    #[error("Could not find the extra fare of any used line")]
    ExtraFareNotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName(_) | Self::DuplicateColor(_) => ErrorKind::Rule,
            Self::ExtraFareNotFound => ErrorKind::NotFound,
        }
    }
}

/// A snapshot of every line in the network.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    lines: Vec<Line>,
}

impl From<Vec<Line>> for Lines {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl FromIterator<Line> for Lines {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Lines {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Checks `line` against every other line. A line never clashes with
    /// itself, so an update may keep its own name and color.
    pub fn validate_duplication(&self, line: &Line) -> Result<(), self::Error> {
        if self.others(line).any(|other| other.is_same_name(line)) {
            return Err(self::Error::DuplicateName(line.name.clone()));
        }
        if self.others(line).any(|other| other.is_same_color(line)) {
            return Err(self::Error::DuplicateColor(line.color.clone()));
        }
        Ok(())
    }

    /// The highest surcharge among the lines in `used_line_ids`.
    pub fn find_max_extra_fare(&self, used_line_ids: &BTreeSet<LineId>) -> Result<Fare, self::Error> {
        self.lines
            .par_iter()
            .filter(|line| used_line_ids.contains(&line.id))
            .map(|line| line.extra_fare)
            .max()
            .ok_or(self::Error::ExtraFareNotFound)
    }

    fn others<'a>(&'a self, line: &'a Line) -> impl ParallelIterator<Item = &'a Line> + 'a {
        self.lines.par_iter().filter(move |other| other.id != line.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, name: &str, color: &str, extra_fare: u32) -> Line {
        Line::new(id.into(), name, color, Fare::from_won(extra_fare))
    }

    #[test]
    fn update_may_keep_its_own_name() {
        let lines = Lines::new(vec![line(1, "Line 1", "red", 0), line(2, "Line 2", "green", 0)]);
        assert_eq!(lines.validate_duplication(&line(1, "Line 1", "red", 500)), Ok(()));
    }

    #[test]
    fn name_is_checked_before_color() {
        let lines = Lines::new(vec![line(1, "Line 1", "red", 0)]);
        let err = lines
            .validate_duplication(&line(2, "Line 1", "red", 0))
            .unwrap_err();
        assert_eq!(err, Error::DuplicateName("Line 1".into()));
    }
}
