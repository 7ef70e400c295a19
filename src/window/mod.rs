//! The bounded line window kept in the output file.
//!
//! `count` derives the initial line count from existing file content;
//! `append` records new lines, evicting the oldest so the file never holds
//! more than the configured limit.

pub mod append;
pub mod count;
