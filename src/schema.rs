//! Graph schema shared by data preparation, import and querying.
//!
//! Every attribute column of the raw disease table becomes one vertex label
//! and one relationship type pointing from `Disease` to that label. Labels
//! are only ever taken from [`ATTRIBUTES`], which is what makes it safe to
//! interpolate them into Cypher text.

use serde::Serialize;

/// Label of the central vertex type.
pub const DISEASE_LABEL: &str = "Disease";
/// Property holding the display name of every vertex.
pub const NAME_FIELD: &str = "name";
/// Header of the source column in relationship files.
pub const SRC_FIELD: &str = "SRC_ID";
/// Header of the destination column in relationship files.
pub const DST_FIELD: &str = "DST_ID";
/// File name of the import manifest.
pub const MANIFEST_FILE: &str = "import_config.json";

/// One attribute column: the vertex label it produces and the edge that links it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub vertex: &'static str,
    pub edge: &'static str,
}

impl Attribute {
    const fn new(vertex: &'static str, edge: &'static str) -> Self {
        Self { vertex, edge }
    }

    /// File holding the deduplicated vertex names.
    pub fn vertex_file(&self) -> String {
        format!("{}.csv", self.vertex)
    }

    /// File holding `SRC_ID,DST_ID` pairs.
    pub fn edge_file(&self) -> String {
        format!("{}.csv", self.edge)
    }
}

/// Attribute columns in raw-table order (column 1 onwards).
pub const ATTRIBUTES: [Attribute; 14] = [
    Attribute::new("Alias", "HAS_ALIAS"),
    Attribute::new("Part", "IS_OF_PART"),
    Attribute::new("Age", "IS_OF_AGE"),
    Attribute::new("Infection", "IS_INFECTIOUS"),
    Attribute::new("Insurance", "In_Insurance"),
    Attribute::new("Department", "IS_OF_Department"),
    Attribute::new("Checklist", "HAS_Checklist"),
    Attribute::new("Symptom", "HAS_SYMPTOM"),
    Attribute::new("Complication", "HAS_Complication"),
    Attribute::new("Treatment", "HAS_Treatment"),
    Attribute::new("Drug", "HAS_Drug"),
    Attribute::new("Period", "Cure_Period"),
    Attribute::new("Rate", "Cure_Rate"),
    Attribute::new("Money", "NEED_Money"),
];

/// File holding the disease names (the lexicon source).
pub fn disease_file() -> String {
    format!("{}.csv", DISEASE_LABEL)
}

/// Look up an attribute by its relationship type.
pub fn attribute_for_edge(edge: &str) -> Option<&'static Attribute> {
    ATTRIBUTES.iter().find(|a| a.edge == edge)
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub optional: bool,
    pub index: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelSpec {
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<&'static str>,
    pub properties: Vec<PropertySpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<[&'static str; 2]>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSpec {
    pub path: String,
    pub format: &'static str,
    pub label: &'static str,
    pub header: u32,
    #[serde(rename = "SRC_ID", skip_serializing_if = "Option::is_none")]
    pub src_label: Option<&'static str>,
    #[serde(rename = "DST_ID", skip_serializing_if = "Option::is_none")]
    pub dst_label: Option<&'static str>,
    pub columns: Vec<&'static str>,
}

/// Bulk-import manifest: vertex/edge labels plus file-to-label mappings.
#[derive(Debug, Clone, Serialize)]
pub struct ImportManifest {
    pub schema: Vec<LabelSpec>,
    pub files: Vec<FileSpec>,
}

impl ImportManifest {
    pub fn build() -> Self {
        let mut schema = vec![vertex_spec(DISEASE_LABEL)];
        let mut files = vec![vertex_file_spec(disease_file(), DISEASE_LABEL)];

        for attr in ATTRIBUTES.iter() {
            schema.push(vertex_spec(attr.vertex));
            schema.push(LabelSpec {
                label: attr.edge,
                kind: "EDGE",
                primary: None,
                properties: Vec::new(),
                constraints: Some(vec![[DISEASE_LABEL, attr.vertex]]),
            });

            files.push(vertex_file_spec(attr.vertex_file(), attr.vertex));
            files.push(FileSpec {
                path: attr.edge_file(),
                format: "CSV",
                label: attr.edge,
                header: 1,
                src_label: Some(DISEASE_LABEL),
                dst_label: Some(attr.vertex),
                columns: vec![SRC_FIELD, DST_FIELD],
            });
        }

        Self { schema, files }
    }
}

fn vertex_spec(label: &'static str) -> LabelSpec {
    LabelSpec {
        label,
        kind: "VERTEX",
        primary: Some(NAME_FIELD),
        properties: vec![PropertySpec {
            name: NAME_FIELD,
            value_type: "STRING",
            optional: false,
            index: true,
        }],
        constraints: None,
    }
}

fn vertex_file_spec(path: String, label: &'static str) -> FileSpec {
    FileSpec {
        path,
        format: "CSV",
        label,
        header: 1,
        src_label: None,
        dst_label: None,
        columns: vec![NAME_FIELD],
    }
}
