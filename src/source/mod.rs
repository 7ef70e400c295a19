//! Line sources feeding the tee loop: standard input, or a followed file.

mod follow;
mod stdin;

pub use follow::FollowedFile;
pub use stdin::StdinLines;
