//! Tests for the interactive chat command

use medical_kgqa::commands::{chat, ChatSummary, REPLY_PREFIX};
use medical_kgqa::{IntentTable, IntentTag, Lexicon, MedicalQa, MemoryStore, QueryExecutor};

fn qa() -> MedicalQa<MemoryStore> {
    let store = MemoryStore::new()
        .with("diabetes", IntentTag::Drug, ["insulin", "metformin"])
        .with("diabetes", IntentTag::Insurance, ["yes"]);
    MedicalQa::new(
        Lexicon::from_names(["diabetes"]),
        IntentTable::standard(),
        QueryExecutor::new(store),
    )
}

#[tokio::test]
async fn test_chat_transcript() {
    let input: &[u8] = b"which medication for diabetes\n   \nis diabetes covered by medical insurance\n quit \n";
    let mut out = Vec::new();

    let summary = chat::run(&qa(), input, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(summary, ChatSummary { answered: 2, quit: true });

    let replies: Vec<&str> = out
        .lines()
        .filter_map(|l| l.split_once(&format!("{REPLY_PREFIX} ")).map(|(_, r)| r))
        .collect();
    assert_eq!(replies.len(), 2);
    assert!(replies[0].contains("insulin, metformin"));
    assert!(replies[1].contains("yes"));
}

#[tokio::test]
async fn test_chat_ends_on_eof_without_quit() {
    let input: &[u8] = b"";
    let mut out = Vec::new();

    let summary = chat::run(&qa(), input, &mut out).await.unwrap();
    assert_eq!(summary, ChatSummary::default());
    assert!(String::from_utf8(out).unwrap().starts_with(chat::BANNER));
}

#[tokio::test]
async fn test_ask_uses_same_reply_format() {
    let mut out = Vec::new();
    let reply = medical_kgqa::commands::ask::run(&qa(), "diabetes drug", &mut out)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{REPLY_PREFIX} {reply}\n"));
}
