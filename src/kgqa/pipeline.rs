use tracing::{debug, info, warn};

use super::composer::{compose, Branch};
use super::entity_extractor::EntityExtractor;
use super::intent::{IntentClassifier, IntentTable};
use super::lexicon::Lexicon;
use super::query::{KnowledgeStore, QueryExecutor};
use crate::metrics;

/// Question → entity → intent → traversal → reply.
///
/// Lexicon and intent table are fixed at construction; nothing is carried
/// over between questions.
pub struct MedicalQa<S> {
    extractor: EntityExtractor,
    classifier: IntentClassifier,
    executor: QueryExecutor<S>,
}

impl<S: KnowledgeStore> MedicalQa<S> {
    pub fn new(lexicon: Lexicon, intents: IntentTable, executor: QueryExecutor<S>) -> Self {
        if lexicon.is_empty() {
            warn!("Lexicon is empty: no disease names will be recognized this session");
        } else {
            info!("Lexicon ready with {} disease entities", lexicon.len());
        }

        Self {
            extractor: EntityExtractor::new(lexicon),
            classifier: IntentClassifier::new(intents),
            executor,
        }
    }

    /// Answer one question. Never fails; store errors become a reply.
    pub async fn answer(&self, question: &str) -> String {
        let entity = self.extractor.extract(question);
        let intent = entity.and_then(|_| self.classifier.classify(question));

        let outcome = match (entity, intent) {
            (Some(entity), Some(intent)) => {
                let query = QueryExecutor::<S>::build(entity, intent);
                Some(self.executor.execute(&query).await)
            }
            _ => None,
        };

        let branch = Branch::of(entity, intent, outcome.as_ref());
        metrics::record_answer(branch.as_str());
        debug!(?entity, ?intent, branch = branch.as_str(), "Answered question");

        compose(entity, intent, outcome.as_ref())
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Release the pipeline and hand back the store.
    pub fn into_store(self) -> S {
        self.executor.into_store()
    }
}
