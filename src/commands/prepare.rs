//! Data preparation: split the raw disease table into per-label CSV files
//!
//! The raw table has the disease name in its first column followed by one
//! column per [`ATTRIBUTES`] entry. Each attribute cell holds whitespace
//! separated values. Output files are the lexicon source (`Disease.csv`),
//! one vertex file and one edge file per attribute, and the import manifest.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::schema::{
    disease_file, ImportManifest, ATTRIBUTES, DST_FIELD, MANIFEST_FILE, NAME_FIELD,
    SRC_FIELD,
};

/// Placeholder the raw export uses for empty cells.
const MISSING_CELL: &str = "nan";

/// Insertion-ordered set of names.
#[derive(Debug, Default)]
struct UniqueNames<T> {
    seen: HashSet<T>,
    ordered: Vec<T>,
}

impl<T: Clone + Eq + std::hash::Hash> UniqueNames<T> {
    fn insert(&mut self, value: T) {
        if self.seen.insert(value.clone()) {
            self.ordered.push(value);
        }
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }
}

/// Counts of what one preparation run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub diseases: usize,
    /// Unique names per vertex label, in schema order.
    pub vertices: Vec<(&'static str, usize)>,
    /// Unique (disease, value) pairs per relationship, in schema order.
    pub edges: Vec<(&'static str, usize)>,
    pub output_dir: PathBuf,
}

impl PrepareSummary {
    pub fn vertex_count(&self, label: &str) -> Option<usize> {
        self.vertices.iter().find(|(l, _)| *l == label).map(|(_, n)| *n)
    }

    pub fn edge_count(&self, edge: &str) -> Option<usize> {
        self.edges.iter().find(|(l, _)| *l == edge).map(|(_, n)| *n)
    }
}

/// Every file a run writes, relative to the output directory.
pub fn output_files() -> Vec<String> {
    let mut files = vec![disease_file(), MANIFEST_FILE.to_string()];
    for attr in ATTRIBUTES.iter() {
        files.push(attr.vertex_file());
        files.push(attr.edge_file());
    }
    files
}

/// Remove outputs of an earlier run so no stale file survives.
pub fn clear_outputs(output_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for file in output_files() {
        match fs::remove_file(output_dir.join(&file)) {
            Ok(()) => removed += 1,
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    debug!(removed, dir = %output_dir.display(), "Cleared previous outputs");
    Ok(removed)
}

/// Split `input` into the files the importer and the lexicon loader expect.
pub fn run(input: &Path, output_dir: &Path) -> Result<PrepareSummary> {
    if !input.is_file() {
        return Err(Error::InvalidArgument(format!(
            "raw disease table not found: {}",
            input.display()
        )));
    }

    fs::create_dir_all(output_dir)?;
    clear_outputs(output_dir)?;

    let mut reader = ReaderBuilder::new().flexible(true).from_path(input)?;

    let mut diseases: UniqueNames<String> = UniqueNames::default();
    let mut vertices: Vec<UniqueNames<String>> =
        ATTRIBUTES.iter().map(|_| UniqueNames::default()).collect();
    let mut edges: Vec<UniqueNames<(String, String)>> =
        ATTRIBUTES.iter().map(|_| UniqueNames::default()).collect();

    for record in reader.records() {
        let record = record?;
        let disease = match record.get(0).map(str::trim) {
            Some(name) if !is_missing(name) => name.to_string(),
            _ => continue,
        };
        diseases.insert(disease.clone());

        for (idx, cell) in record.iter().skip(1).take(ATTRIBUTES.len()).enumerate() {
            if is_missing(cell.trim()) {
                continue;
            }
            for value in cell.split_whitespace() {
                vertices[idx].insert(value.to_string());
                edges[idx].insert((disease.clone(), value.to_string()));
            }
        }
    }

    write_names(&output_dir.join(disease_file()), &diseases.ordered)?;

    let mut summary = PrepareSummary {
        diseases: diseases.len(),
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };

    for ((attr, names), pairs) in ATTRIBUTES.iter().zip(&vertices).zip(&edges) {
        write_names(&output_dir.join(attr.vertex_file()), &names.ordered)?;
        write_pairs(&output_dir.join(attr.edge_file()), &pairs.ordered)?;
        summary.vertices.push((attr.vertex, names.len()));
        summary.edges.push((attr.edge, pairs.len()));
    }

    write_manifest(output_dir)?;

    info!(
        diseases = summary.diseases,
        dir = %output_dir.display(),
        "Prepared graph import files"
    );
    Ok(summary)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == MISSING_CELL
}

fn write_names(path: &Path, names: &[String]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record([NAME_FIELD])?;
    for name in names {
        writer.write_record([name])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_pairs(path: &Path, pairs: &[(String, String)]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record([SRC_FIELD, DST_FIELD])?;
    for (src, dst) in pairs {
        writer.write_record([src, dst])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_manifest(output_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&ImportManifest::build())?;
    fs::write(output_dir.join(MANIFEST_FILE), json)?;
    Ok(())
}
