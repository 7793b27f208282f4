//! Knowledge-graph question answering.
//!
//! A question flows through four small pieces, strictly in order:
//! - [`EntityExtractor`]: longest-first substring scan over the disease [`Lexicon`]
//! - [`IntentClassifier`]: first matching rule of the keyword [`IntentTable`]
//! - [`QueryExecutor`]: one traversal against a [`KnowledgeStore`]
//! - [`compose`]: renders the reply from whatever the earlier stages found
//!
//! [`MedicalQa`] wires them together.

pub mod composer;
pub mod entity_extractor;
pub mod intent;
pub mod lexicon;
pub mod memory;
pub mod pipeline;
pub mod query;

pub use composer::{compose, Branch, LIST_SEPARATOR, UNKNOWN_ENTITY_REPLY};
pub use entity_extractor::EntityExtractor;
pub use intent::{IntentClassifier, IntentRule, IntentTable, IntentTag};
pub use lexicon::Lexicon;
pub use memory::MemoryStore;
pub use pipeline::MedicalQa;
pub use query::{KnowledgeStore, QueryExecutor, QueryOutcome, TraversalQuery};
