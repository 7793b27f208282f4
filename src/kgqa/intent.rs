use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Requested attribute of a disease; each tag is a relationship type in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentTag {
    #[serde(rename = "HAS_SYMPTOM")]
    Symptom,
    #[serde(rename = "HAS_Drug")]
    Drug,
    #[serde(rename = "IS_OF_Department")]
    Department,
    #[serde(rename = "NEED_Money")]
    Cost,
    #[serde(rename = "HAS_Complication")]
    Complication,
    #[serde(rename = "IS_INFECTIOUS")]
    Infectious,
    #[serde(rename = "HAS_Checklist")]
    Checklist,
    #[serde(rename = "In_Insurance")]
    Insurance,
}

impl IntentTag {
    pub const ALL: [IntentTag; 8] = [
        IntentTag::Symptom,
        IntentTag::Drug,
        IntentTag::Department,
        IntentTag::Cost,
        IntentTag::Complication,
        IntentTag::Infectious,
        IntentTag::Checklist,
        IntentTag::Insurance,
    ];

    /// Relationship type followed in the graph.
    pub fn relationship(&self) -> &'static str {
        match self {
            IntentTag::Symptom => "HAS_SYMPTOM",
            IntentTag::Drug => "HAS_Drug",
            IntentTag::Department => "IS_OF_Department",
            IntentTag::Cost => "NEED_Money",
            IntentTag::Complication => "HAS_Complication",
            IntentTag::Infectious => "IS_INFECTIOUS",
            IntentTag::Checklist => "HAS_Checklist",
            IntentTag::Insurance => "In_Insurance",
        }
    }
}

impl fmt::Display for IntentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relationship())
    }
}

/// Trigger keywords for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub tag: IntentTag,
    pub keywords: Vec<String>,
}

impl IntentRule {
    pub fn new(tag: IntentTag, keywords: &[&str]) -> Self {
        Self {
            tag,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered intent → keywords table. Declaration order is the tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentTable {
    rules: Vec<IntentRule>,
}

impl Default for IntentTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl IntentTable {
    /// Validate and build a table: tags must be unique, blank keywords are dropped.
    pub fn new(rules: Vec<IntentRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.tag) {
                return Err(Error::ConfigError(format!(
                    "intent {} declared more than once",
                    rule.tag
                )));
            }
            let keywords: Vec<String> = rule
                .keywords
                .into_iter()
                .filter(|k| !k.trim().is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(Error::ConfigError(format!(
                    "intent {} has no keywords",
                    rule.tag
                )));
            }
            cleaned.push(IntentRule {
                tag: rule.tag,
                keywords,
            });
        }

        Ok(Self { rules: cleaned })
    }

    /// Built-in English keyword table.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                IntentRule::new(
                    IntentTag::Symptom,
                    &["symptom", "presentation", "what's wrong", "reaction", "condition"],
                ),
                IntentRule::new(
                    IntentTag::Drug,
                    &["drug", "what to take", "treatment plan", "medication"],
                ),
                IntentRule::new(
                    IntentTag::Department,
                    &["department", "which clinic", "which specialty", "division"],
                ),
                IntentRule::new(
                    IntentTag::Cost,
                    &["money", "cost", "how much", "price", "expense"],
                ),
                IntentRule::new(
                    IntentTag::Complication,
                    &["complication", "what disease does it cause", "induces"],
                ),
                IntentRule::new(
                    IntentTag::Infectious,
                    &["contagious", "infectious", "is it contagious"],
                ),
                IntentRule::new(
                    IntentTag::Checklist,
                    &["examination", "lab test", "what to check"],
                ),
                IntentRule::new(
                    IntentTag::Insurance,
                    &["medical insurance", "reimbursement"],
                ),
            ],
        }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn keywords(&self, tag: IntentTag) -> Option<&[String]> {
        self.rules
            .iter()
            .find(|r| r.tag == tag)
            .map(|r| r.keywords.as_slice())
    }
}

/// Keyword-table intent lookup.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    table: IntentTable,
}

impl IntentClassifier {
    pub fn new(table: IntentTable) -> Self {
        Self { table }
    }

    /// Earliest-declared tag with any keyword occurring in the question.
    pub fn classify(&self, question: &str) -> Option<IntentTag> {
        self.table
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| question.contains(k.as_str())))
            .map(|rule| rule.tag)
    }

    pub fn table(&self) -> &IntentTable {
        &self.table
    }
}
