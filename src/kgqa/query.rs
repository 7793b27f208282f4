use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::intent::IntentTag;
use crate::error::{Error, Result};
use crate::metrics;
use crate::schema::{DISEASE_LABEL, NAME_FIELD};

/// Parameter name carrying the disease name.
pub const ENTITY_PARAM: &str = "name";
/// Column name of every reached node's name.
pub const RESULT_COLUMN: &str = "result";

/// "From this disease, follow this relationship, return every reached name."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalQuery {
    pub entity: String,
    pub intent: IntentTag,
}

impl TraversalQuery {
    pub fn new(entity: impl Into<String>, intent: IntentTag) -> Self {
        Self {
            entity: entity.into(),
            intent,
        }
    }

    /// Cypher text; the entity is bound as `$name`, the relationship comes
    /// from the closed [`IntentTag`] set.
    pub fn cypher(&self) -> String {
        format!(
            "MATCH (d:{} {{{}: ${}}})-[:{}]->(m) RETURN m.{} AS {}",
            DISEASE_LABEL,
            NAME_FIELD,
            ENTITY_PARAM,
            self.intent.relationship(),
            NAME_FIELD,
            RESULT_COLUMN
        )
    }
}

/// Read side of the knowledge graph.
pub trait KnowledgeStore {
    /// Run a traversal in a scoped session and return reached names in order.
    fn traverse(&self, query: &TraversalQuery) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Result of one traversal: data, no data, or a failed execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Found(Vec<String>),
    Empty,
    Failed(String),
}

impl QueryOutcome {
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            QueryOutcome::Empty
        } else {
            QueryOutcome::Found(names)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

/// Builds traversal queries and runs them against a [`KnowledgeStore`].
///
/// Failures never propagate: an unreachable store, a rejected query or a
/// timeout all become [`QueryOutcome::Failed`].
#[derive(Debug, Clone)]
pub struct QueryExecutor<S> {
    store: S,
    timeout: Option<Duration>,
}

impl<S: KnowledgeStore> QueryExecutor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Bound every query; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(entity: &str, intent: IntentTag) -> TraversalQuery {
        TraversalQuery::new(entity, intent)
    }

    pub async fn execute(&self, query: &TraversalQuery) -> QueryOutcome {
        let start = Instant::now();

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.store.traverse(query))
                .await
                .unwrap_or(Err(Error::QueryTimeout(limit))),
            None => self.store.traverse(query).await,
        };

        metrics::record_query(query.intent.relationship(), start.elapsed(), result.is_ok());

        match result {
            Ok(names) => {
                debug!(
                    "{} -[{}]-> {} result(s)",
                    query.entity,
                    query.intent,
                    names.len()
                );
                QueryOutcome::from_names(names)
            }
            Err(err) => {
                warn!("Query for '{}' ({}) failed: {}", query.entity, query.intent, err);
                QueryOutcome::Failed(err.to_string())
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
