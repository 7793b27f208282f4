//! Tests for the graph import command

use std::collections::HashSet;
use std::fs;
use std::sync::Mutex;

use medical_kgqa::commands::{import, prepare, ImportSink};
use medical_kgqa::schema::Attribute;
use medical_kgqa::{IntentTable, IntentTag, Lexicon, MedicalQa, MemoryStore, QueryExecutor};

/// Builds a [`MemoryStore`] from imported edges whose relationship is an intent.
#[derive(Default)]
struct MemorySink {
    vertices: Mutex<HashSet<(String, String)>>,
    store: Mutex<MemoryStore>,
}

impl MemorySink {
    fn knows(&self, label: &str, name: &str) -> bool {
        self.vertices
            .lock()
            .unwrap()
            .contains(&(label.to_string(), name.to_string()))
    }
}

impl ImportSink for MemorySink {
    async fn merge_disease(&self, name: &str) -> medical_kgqa::Result<()> {
        self.vertices
            .lock()
            .unwrap()
            .insert(("Disease".into(), name.into()));
        Ok(())
    }

    async fn merge_attribute(&self, attribute: &Attribute, name: &str) -> medical_kgqa::Result<()> {
        self.vertices
            .lock()
            .unwrap()
            .insert((attribute.vertex.into(), name.into()));
        Ok(())
    }

    async fn merge_edge(
        &self,
        attribute: &Attribute,
        disease: &str,
        target: &str,
    ) -> medical_kgqa::Result<bool> {
        if !self.knows("Disease", disease) || !self.knows(attribute.vertex, target) {
            return Ok(false);
        }
        if let Some(tag) = IntentTag::ALL
            .into_iter()
            .find(|t| t.relationship() == attribute.edge)
        {
            self.store.lock().unwrap().insert(disease, tag, [target]);
        }
        Ok(true)
    }
}

#[tokio::test]
async fn test_prepare_import_answer() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.csv");
    fs::write(
        &raw,
        "name,alias,part,age,infection,insurance,department,checklist,symptom\n\
         chickenpox,varicella,skin,child,yes,yes,dermatology,blood_test,rash fever\n",
    )
    .unwrap();
    prepare::run(&raw, dir.path()).unwrap();

    let sink = MemorySink::default();
    let summary = import::run(&sink, dir.path()).await.unwrap();
    assert_eq!(summary.diseases, 1);
    assert_eq!(summary.unmatched_edges, 0);
    assert!(summary.skipped_files.is_empty());

    let store = sink.store.into_inner().unwrap();
    let qa = MedicalQa::new(
        Lexicon::load(dir.path().join("Disease.csv")),
        IntentTable::standard(),
        QueryExecutor::new(store),
    );

    let reply = qa.answer("what symptom does chickenpox have").await;
    assert!(reply.contains("rash, fever"));

    let reply = qa.answer("is chickenpox contagious").await;
    assert!(reply.contains("yes"));
}

#[tokio::test]
async fn test_import_counts_unmatched_edges() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Disease.csv"), "name\nflu\n").unwrap();
    fs::write(dir.path().join("HAS_Drug.csv"), "SRC_ID,DST_ID\nflu,oseltamivir\n").unwrap();

    let summary = import::run(&MemorySink::default(), dir.path()).await.unwrap();
    assert_eq!(summary.edges, 0);
    assert_eq!(summary.unmatched_edges, 1);
    assert!(summary.skipped_files.contains(&"Drug.csv".to_string()));
}
