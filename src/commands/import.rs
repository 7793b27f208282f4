//! Graph import: load prepared CSV files into the knowledge graph
//!
//! Vertices are merged by name first, then each edge is merged between two
//! existing endpoints. Edges whose endpoints cannot be found are counted and
//! reported, never created.

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::schema::{disease_file, Attribute, ATTRIBUTES, DST_FIELD, NAME_FIELD, SRC_FIELD};
use crate::store::GraphStore;

/// Write side of the knowledge graph.
pub trait ImportSink {
    fn merge_disease(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    fn merge_attribute(
        &self,
        attribute: &Attribute,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `Ok(false)` when an endpoint is missing.
    fn merge_edge(
        &self,
        attribute: &Attribute,
        disease: &str,
        target: &str,
    ) -> impl Future<Output = Result<bool>> + Send;
}

impl ImportSink for GraphStore {
    async fn merge_disease(&self, name: &str) -> Result<()> {
        GraphStore::merge_disease(self, name).await
    }

    async fn merge_attribute(&self, attribute: &Attribute, name: &str) -> Result<()> {
        GraphStore::merge_attribute(self, attribute, name).await
    }

    async fn merge_edge(&self, attribute: &Attribute, disease: &str, target: &str) -> Result<bool> {
        GraphStore::merge_edge(self, attribute, disease, target).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub diseases: usize,
    pub vertices: usize,
    pub edges: usize,
    pub unmatched_edges: usize,
    pub skipped_files: Vec<String>,
}

/// Import everything `prepare` wrote into `data_dir`.
pub async fn run<S: ImportSink>(sink: &S, data_dir: &Path) -> Result<ImportSummary> {
    if !data_dir.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "data directory not found: {}",
            data_dir.display()
        )));
    }

    let mut summary = ImportSummary::default();

    let disease_csv = disease_file();
    match read_names(&data_dir.join(&disease_csv))? {
        Some(names) => {
            for name in &names {
                sink.merge_disease(name).await?;
            }
            summary.diseases = names.len();
        }
        None => summary.skipped_files.push(disease_csv),
    }

    for attr in ATTRIBUTES.iter() {
        let vertex_csv = attr.vertex_file();
        match read_names(&data_dir.join(&vertex_csv))? {
            Some(names) => {
                for name in &names {
                    sink.merge_attribute(attr, name).await?;
                }
                summary.vertices += names.len();
            }
            None => summary.skipped_files.push(vertex_csv),
        }

        let edge_csv = attr.edge_file();
        let Some(pairs) = read_pairs(&data_dir.join(&edge_csv))? else {
            summary.skipped_files.push(edge_csv);
            continue;
        };

        for (src, dst) in &pairs {
            if sink.merge_edge(attr, src, dst).await? {
                summary.edges += 1;
            } else {
                warn!(
                    src = %src,
                    dst = %dst,
                    label = attr.vertex,
                    edge = attr.edge,
                    "Edge endpoints not found, edge not created"
                );
                summary.unmatched_edges += 1;
            }
        }
        debug!(edge = attr.edge, pairs = pairs.len(), "Imported edge file");
    }

    info!(
        diseases = summary.diseases,
        vertices = summary.vertices,
        edges = summary.edges,
        unmatched = summary.unmatched_edges,
        "Graph import finished"
    );
    Ok(summary)
}

/// Unique, trimmed, non-blank values of the `name` column; `None` if the file is absent.
pub fn read_names(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let col = column(reader.headers()?, NAME_FIELD, path)?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(name) = record.get(col).map(str::trim).filter(|n| !n.is_empty()) else {
            continue;
        };
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    Ok(Some(names))
}

/// Trimmed `(SRC_ID, DST_ID)` pairs; `None` if the file is absent.
pub fn read_pairs(path: &Path) -> Result<Option<Vec<(String, String)>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let src_col = column(&headers, SRC_FIELD, path)?;
    let dst_col = column(&headers, DST_FIELD, path)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let src = record.get(src_col).map(str::trim).unwrap_or_default();
        let dst = record.get(dst_col).map(str::trim).unwrap_or_default();
        if src.is_empty() || dst.is_empty() {
            continue;
        }
        pairs.push((src.to_string(), dst.to_string()));
    }
    Ok(Some(pairs))
}

fn column(headers: &csv::StringRecord, field: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == field)
        .ok_or_else(|| {
            Error::CsvError(format!("{}: missing '{}' column", path.display(), field))
        })
}
