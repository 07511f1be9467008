//! Film model and its export line rendering
//!
//! A [`Film`] is the read-only view of a catalog entry that the exporter
//! consumes. An [`ExportLine`] is its textual form in the export file.

use crate::domain::ids::FilmId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of a catalog film eligible for export
///
/// Produced by the source query and never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Catalog identifier
    pub id: FilmId,

    /// Film title
    pub title: String,

    /// Release year
    pub release_year: i32,
}

impl Film {
    /// Create a new film view
    pub fn new(id: impl Into<FilmId>, title: impl Into<String>, release_year: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year,
        }
    }
}

/// One line of the export file
///
/// Format is `<id>,<title>,<year>` followed by `\n`. The title is written
/// verbatim: a comma or newline inside a title corrupts the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine(String);

impl ExportLine {
    /// Render the export line for a film
    ///
    /// # Examples
    ///
    /// ```
    /// use filmo_batch::domain::{ExportLine, Film};
    ///
    /// let line = ExportLine::render(&Film::new(7, "Matrix", 1999));
    /// assert_eq!(line.as_str(), "7,Matrix,1999\n");
    /// ```
    pub fn render(film: &Film) -> Self {
        Self(format!("{},{},{}\n", film.id, film.title, film.release_year))
    }

    /// The full line including the terminator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The line bytes, as written to the file
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for ExportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.trim_end())
    }
}
