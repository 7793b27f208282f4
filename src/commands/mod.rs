//! Command implementations
//!
//! Each module corresponds to a subcommand of the `medical_kgqa` CLI.

pub mod ask;
pub mod chat;
pub mod import;
pub mod prepare;

// Re-export commonly used types
pub use ask::run as ask_run;
pub use chat::{parse_turn, run as chat_run, ChatSummary, Turn, REPLY_PREFIX};
pub use import::{run as import_run, ImportSink, ImportSummary};
pub use prepare::{run as prepare_run, PrepareSummary};
