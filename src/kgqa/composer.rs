use super::intent::IntentTag;
use super::query::QueryOutcome;

/// Separator between listed results.
pub const LIST_SEPARATOR: &str = ", ";

/// Reply when no known disease name occurs in the question.
pub const UNKNOWN_ENTITY_REPLY: &str = "Sorry, I could not recognize a disease name in your question. \
Please make sure the question contains the full name of a disease from the knowledge base.";

/// Terminal outcome of one question, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    UnknownEntity,
    UnknownIntent,
    NoData,
    QueryFailed,
    Answered,
}

impl Branch {
    pub fn of(entity: Option<&str>, intent: Option<IntentTag>, outcome: Option<&QueryOutcome>) -> Self {
        match (entity, intent, outcome) {
            (None, _, _) => Branch::UnknownEntity,
            (Some(_), None, _) => Branch::UnknownIntent,
            (Some(_), Some(_), Some(QueryOutcome::Failed(_))) => Branch::QueryFailed,
            (Some(_), Some(_), Some(QueryOutcome::Found(names))) if !names.is_empty() => {
                Branch::Answered
            }
            (Some(_), Some(_), _) => Branch::NoData,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::UnknownEntity => "unknown_entity",
            Branch::UnknownIntent => "unknown_intent",
            Branch::NoData => "no_data",
            Branch::QueryFailed => "query_failed",
            Branch::Answered => "answered",
        }
    }
}

/// Render the reply for one question. Pure; the branch is chosen by [`Branch::of`].
pub fn compose(entity: Option<&str>, intent: Option<IntentTag>, outcome: Option<&QueryOutcome>) -> String {
    let branch = Branch::of(entity, intent, outcome);
    let entity = entity.unwrap_or_default();

    match (branch, outcome) {
        (Branch::UnknownEntity, _) => UNKNOWN_ENTITY_REPLY.to_string(),
        (Branch::UnknownIntent, _) => format!(
            "I know about '{}', but I'm not sure what you want to know about it. \
(For example: symptoms, drugs, department)",
            entity
        ),
        (Branch::QueryFailed, Some(QueryOutcome::Failed(diagnostic))) => format!(
            "Sorry, looking up '{}' in the knowledge graph failed (query error: {}).",
            entity, diagnostic
        ),
        (Branch::Answered, Some(QueryOutcome::Found(names))) => format!(
            "Regarding your question, here is the information related to '{}': {}.",
            entity,
            names.join(LIST_SEPARATOR)
        ),
        _ => format!(
            "Sorry, my knowledge graph currently has no related information about '{}'.",
            entity
        ),
    }
}
