//! Medical Knowledge-Graph Question Answering Library
//!
//! This library provides tools to:
//! - Recognize a known disease name inside a free-text question
//! - Classify which attribute of the disease is asked about
//! - Look the answer up in a Bolt-speaking graph database
//! - Compose a natural-language reply
//! - Prepare the raw disease table for import and load it into the graph

pub mod config;
pub mod error;
pub mod kgqa;
pub mod metrics;
pub mod schema;
pub mod store;

// Re-export common types
pub use config::{Config, GraphSettings};
pub use error::{Error, Result};
pub use kgqa::{
    compose, EntityExtractor, IntentClassifier, IntentTable, IntentTag, KnowledgeStore, Lexicon,
    MedicalQa, MemoryStore, QueryExecutor, QueryOutcome, TraversalQuery,
};
pub use store::GraphStore;

pub mod commands;
