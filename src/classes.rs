//! Class index map construction.
//!
//! A trained YOLO model identifies categories by dense integer index, and
//! that index is fixed by the order classes appear in a hand-written list
//! file (one class identifier per line, e.g. Open Images label codes like
//! `/m/01g317`). The map built here must therefore be a pure function of
//! line order: no sorting, no deduplication, no skipping.
//!
//! # Deliberately preserved quirks
//!
//! Two surprising behaviors are kept as-is rather than "fixed", because
//! changing them would silently renumber classes for existing models:
//!
//! - A duplicate identifier keeps only its *last* occurrence's index
//!   (last-write-wins), leaving the earlier index unused by any key.
//! - A blank line (after trimming) maps the empty-string identifier to
//!   that line's index; blank lines are not skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Oi2YoloError;

/// Mapping from class identifier to its dense zero-based index.
///
/// The index of an identifier equals the rank of the line it appeared on
/// in the source list. Re-reading the same list always yields an
/// identical map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassIndexMap {
    indices: HashMap<String, usize>,
    /// Number of lines consumed, including duplicates and blanks.
    line_count: usize,
}

impl ClassIndexMap {
    /// Builds a map from a class list file, one identifier per line.
    ///
    /// # Errors
    /// Returns [`Oi2YoloError::ClassListRead`] if the file is missing or
    /// unreadable.
    pub fn from_path(path: &Path) -> Result<Self, Oi2YoloError> {
        let file = File::open(path).map_err(|source| Oi2YoloError::ClassListRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|source| Oi2YoloError::ClassListRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds a map from any line-oriented reader.
    ///
    /// Useful for testing without file I/O. Each line is trimmed of
    /// surrounding whitespace (covering trailing `\r` on CRLF input) and
    /// becomes one entry at the next index.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, std::io::Error> {
        let mut indices = HashMap::new();
        let mut line_count = 0;

        for line in reader.lines() {
            let line = line?;
            indices.insert(line.trim().to_string(), line_count);
            line_count += 1;
        }

        Ok(Self {
            indices,
            line_count,
        })
    }

    /// Returns the class index for an identifier, if the identifier was
    /// present in the source list.
    #[inline]
    pub fn index_of(&self, identifier: &str) -> Option<usize> {
        self.indices.get(identifier).copied()
    }

    /// Returns true if the identifier was present in the source list.
    ///
    /// This is exact key membership, never substring or prefix matching.
    #[inline]
    pub fn contains(&self, identifier: &str) -> bool {
        self.indices.contains_key(identifier)
    }

    /// Number of distinct identifiers in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of lines consumed from the source list. Differs from
    /// [`len`](Self::len) only when the list held duplicate identifiers.
    #[inline]
    pub fn lines_read(&self) -> usize {
        self.line_count
    }
}
