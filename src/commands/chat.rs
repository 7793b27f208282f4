//! Interactive question loop
//!
//! One line per turn: blank lines re-prompt, `quit` ends the session, anything
//! else is answered and printed with [`REPLY_PREFIX`].

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::kgqa::{KnowledgeStore, MedicalQa};

pub const BANNER: &str = "--- Local medical knowledge-graph assistant ---";
pub const PROMPT: &str = "Enter your question ('quit' to exit): ";
pub const REPLY_PREFIX: &str = "assistant reply:";
pub const QUIT_COMMAND: &str = "quit";

/// What a single input line asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn<'a> {
    Skip,
    Quit,
    Ask(&'a str),
}

pub fn parse_turn(line: &str) -> Turn<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Turn::Skip
    } else if trimmed.eq_ignore_ascii_case(QUIT_COMMAND) {
        Turn::Quit
    } else {
        Turn::Ask(line.trim_end_matches(['\r', '\n']))
    }
}

/// How the session went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatSummary {
    pub answered: usize,
    /// `false` when input ran out before `quit`
    pub quit: bool,
}

/// Drive the loop until `quit` or end of input.
///
/// Only I/O errors on `input`/`output` end the session early; every question
/// produces a reply.
pub async fn run<S, R, W>(qa: &MedicalQa<S>, mut input: R, output: &mut W) -> Result<ChatSummary>
where
    S: KnowledgeStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = ChatSummary::default();
    let mut buf = Vec::new();

    writeln!(output, "{BANNER}")?;

    loop {
        write!(output, "\n{PROMPT}")?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            debug!("Input closed");
            writeln!(output)?;
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(err) => {
                warn!("Ignoring line that is not valid UTF-8: {}", err);
                continue;
            }
        };

        match parse_turn(line) {
            Turn::Skip => continue,
            Turn::Quit => {
                summary.quit = true;
                break;
            }
            Turn::Ask(question) => {
                let reply = qa.answer(question).await;
                writeln!(output, "{REPLY_PREFIX} {reply}")?;
                summary.answered += 1;
            }
        }
    }

    info!(answered = summary.answered, "Chat session finished");
    Ok(summary)
}
