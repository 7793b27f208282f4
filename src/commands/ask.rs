//! One-shot question command

use std::io::Write;

use crate::commands::chat::REPLY_PREFIX;
use crate::error::{Error, Result};
use crate::kgqa::{KnowledgeStore, MedicalQa};

/// Answer `question` and print the reply in the same form the chat loop uses.
pub async fn run<S, W>(qa: &MedicalQa<S>, question: &str, output: &mut W) -> Result<String>
where
    S: KnowledgeStore,
    W: Write,
{
    if question.trim().is_empty() {
        return Err(Error::InvalidArgument("question must not be blank".into()));
    }

    let reply = qa.answer(question).await;
    writeln!(output, "{REPLY_PREFIX} {reply}")?;
    Ok(reply)
}
