//! tunekit: a FLAC -> MP3 converter and an interactive MP3 tagger.
//!
//! - `core`: everything that decides what happens to files
//! - `term`: the terminal sessions and macOS dialogs driving it

pub mod core;
pub mod term;
