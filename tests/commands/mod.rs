//! Command-level tests

mod test_chat;
mod test_import;
mod test_prepare;
