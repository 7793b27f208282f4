use std::collections::HashMap;

use super::intent::IntentTag;
use super::query::{KnowledgeStore, TraversalQuery};
use crate::error::{Error, Result};

/// In-process knowledge store for tests, benchmarks and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    edges: HashMap<(String, IntentTag), Vec<String>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every traversal fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            edges: HashMap::new(),
            failure: Some(message.into()),
        }
    }

    /// Append `targets` to the `entity -[intent]->` adjacency list.
    pub fn insert<I, T>(&mut self, entity: &str, intent: IntentTag, targets: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.edges
            .entry((entity.to_string(), intent))
            .or_default()
            .extend(targets.into_iter().map(Into::into));
    }

    pub fn with<I, T>(mut self, entity: &str, intent: IntentTag, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.insert(entity, intent, targets);
        self
    }
}

impl KnowledgeStore for MemoryStore {
    async fn traverse(&self, query: &TraversalQuery) -> Result<Vec<String>> {
        if let Some(message) = &self.failure {
            return Err(Error::GraphError(message.clone()));
        }

        Ok(self
            .edges
            .get(&(query.entity.clone(), query.intent))
            .cloned()
            .unwrap_or_default())
    }
}
