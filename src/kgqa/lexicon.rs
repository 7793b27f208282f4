use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::schema::NAME_FIELD;

/// Known disease names in match-priority order.
///
/// Invariants: entries are trimmed, non-empty and unique; the sequence is
/// sorted by descending length in characters, equal lengths keeping their
/// load order. Longer names are therefore tried before any shorter name they
/// contain ("seasonal flu" before "flu").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    names: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from raw names, applying the cleaning and ordering rules.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for raw in names {
            if let Some(name) = clean_name(raw.as_ref()) {
                if seen.insert(name.clone()) {
                    unique.push(name);
                }
            }
        }

        // stable: ties keep insertion order
        unique.sort_by_key(|name| Reverse(name.chars().count()));
        Self { names: unique }
    }

    /// Load from a CSV file with a `name` column, failing open.
    ///
    /// A missing or unreadable source yields an empty lexicon plus a
    /// diagnostic; entity recognition is then disabled for the session.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(path.as_ref()) {
            Ok(lexicon) => lexicon,
            Err(Error::LexiconNotFound(path)) => {
                warn!("Lexicon source {} does not exist", path.display());
                Self::default()
            }
            Err(err) => {
                error!("Failed to load lexicon from {}: {}", path.as_ref().display(), err);
                Self::default()
            }
        }
    }

    /// Load from a CSV file with a `name` column.
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::LexiconNotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

        let name_idx = reader
            .headers()?
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == NAME_FIELD)
            .ok_or_else(|| Error::LexiconLoad(format!("missing '{}' column", NAME_FIELD)))?;

        let mut raw_names = Vec::new();
        for record in reader.records() {
            let record = record?;
            match record.get(name_idx) {
                Some(value) => raw_names.push(value.to_string()),
                None => debug!("Skipping lexicon row without a name field"),
            }
        }

        let lexicon = Self::from_names(raw_names);
        debug!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Trim whitespace and control characters; blank names are dropped.
fn clean_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn sorts_longest_first() {
        let lexicon = Lexicon::from_names(["B", "AB"]);
        assert_eq!(lexicon.names(), ["AB", "B"]);
    }

    #[test]
    fn equal_lengths_keep_insertion_order() {
        let lexicon = Lexicon::from_names(["cold", "gout", "flu", "mump"]);
        assert_eq!(lexicon.names(), ["cold", "gout", "mump", "flu"]);
    }

    #[test]
    fn trims_and_deduplicates() {
        let lexicon = Lexicon::from_names([" flu ", "flu", "\tseasonal flu\r\n", "", "   ", "flu\u{0}"]);
        assert_eq!(lexicon.names(), ["seasonal flu", "flu"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 3 chars / 9 bytes vs 4 chars / 4 bytes
        let lexicon = Lexicon::from_names(["感冒病", "gout"]);
        assert_eq!(lexicon.names(), ["gout", "感冒病"]);
    }

    #[test]
    fn loads_name_column_from_csv() {
        let file = write_csv("id,name\n1,flu\n2, seasonal flu \n3,\n4,flu\n");
        let lexicon = Lexicon::try_load(file.path()).unwrap();
        assert_eq!(lexicon.names(), ["seasonal flu", "flu"]);
    }

    #[test]
    fn tolerates_short_rows_and_bom() {
        let file = write_csv("\u{feff}name,extra\nasthma\n,only extra\ngout,x\n");
        let lexicon = Lexicon::try_load(file.path()).unwrap();
        assert_eq!(lexicon.names(), ["asthma", "gout"]);
    }

    #[test]
    fn missing_file_fails_open() {
        let missing = std::env::temp_dir().join("medical_kgqa_missing_lexicon.csv");
        assert!(matches!(
            Lexicon::try_load(&missing),
            Err(Error::LexiconNotFound(_))
        ));
        assert!(Lexicon::load(&missing).is_empty());
    }

    #[test]
    fn missing_name_column_fails_open() {
        let file = write_csv("title\nflu\n");
        assert!(matches!(
            Lexicon::try_load(file.path()),
            Err(Error::LexiconLoad(_))
        ));
        assert!(Lexicon::load(file.path()).is_empty());
    }

    #[test]
    fn empty_lexicon_is_valid() {
        let lexicon = Lexicon::from_names(Vec::<String>::new());
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.len(), 0);
        assert_eq!(lexicon.iter().count(), 0);
    }
}
