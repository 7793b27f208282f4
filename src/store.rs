//! Graph store backed by a Bolt-speaking graph database

use neo4rs::{query, ConfigBuilder, Graph};
use tracing::{debug, info, warn};

use crate::config::GraphSettings;
use crate::error::Result;
use crate::kgqa::query::{ENTITY_PARAM, RESULT_COLUMN};
use crate::kgqa::{KnowledgeStore, TraversalQuery};
use crate::schema::{Attribute, DISEASE_LABEL, NAME_FIELD};

/// Connection pool to the knowledge graph.
///
/// Each traversal borrows a connection for the lifetime of its row stream;
/// the connection returns to the pool when the stream is dropped, whether the
/// traversal finished or failed half way.
#[derive(Clone)]
pub struct GraphStore {
    graph: Graph,
}

impl GraphStore {
    /// Connect to the graph server
    pub async fn connect(settings: &GraphSettings) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .max_connections(settings.max_connections)
            .build()?;

        let graph = Graph::connect(config).await?;
        info!(
            uri = %settings.uri,
            database = %settings.database,
            "Connected to knowledge graph"
        );

        Ok(Self { graph })
    }

    /// Create the disease node if it is not there yet.
    pub async fn merge_disease(&self, name: &str) -> Result<()> {
        let q = query(&format!(
            "MERGE (n:{DISEASE_LABEL} {{{NAME_FIELD}: ${ENTITY_PARAM}}})"
        ))
        .param(ENTITY_PARAM, name);

        self.graph.run(q).await?;
        Ok(())
    }

    /// Create an attribute node (Symptom, Drug, ...) if it is not there yet.
    pub async fn merge_attribute(&self, attribute: &Attribute, name: &str) -> Result<()> {
        let q = query(&format!(
            "MERGE (n:{} {{{NAME_FIELD}: ${ENTITY_PARAM}}})",
            attribute.vertex
        ))
        .param(ENTITY_PARAM, name);

        self.graph.run(q).await?;
        Ok(())
    }

    /// Link `disease -[edge]-> target`.
    ///
    /// Returns `false` when either endpoint is missing; nothing is created then.
    pub async fn merge_edge(&self, attribute: &Attribute, disease: &str, target: &str) -> Result<bool> {
        let q = query(&format!(
            "MATCH (d:{DISEASE_LABEL} {{{NAME_FIELD}: $src}}) \
             MATCH (t:{} {{{NAME_FIELD}: $dst}}) \
             MERGE (d)-[:{}]->(t) \
             RETURN count(*) AS matched",
            attribute.vertex, attribute.edge
        ))
        .param("src", disease)
        .param("dst", target);

        let mut rows = self.graph.execute(q).await?;
        let matched = match rows.next().await? {
            Some(row) => row.get::<i64>("matched").unwrap_or(0) > 0,
            None => false,
        };

        Ok(matched)
    }
}

impl KnowledgeStore for GraphStore {
    async fn traverse(&self, traversal: &TraversalQuery) -> Result<Vec<String>> {
        let q = query(&traversal.cypher()).param(ENTITY_PARAM, traversal.entity.as_str());

        let mut rows = self.graph.execute(q).await?;
        let mut names = Vec::new();

        while let Some(row) = rows.next().await? {
            match row.get::<String>(RESULT_COLUMN) {
                Ok(name) => names.push(name),
                Err(err) => warn!(entity = %traversal.entity, "Skipping row without a name: {}", err),
            }
        }

        debug!(
            entity = %traversal.entity,
            relationship = traversal.intent.relationship(),
            rows = names.len(),
            "Traversal finished"
        );
        Ok(names)
    }
}

