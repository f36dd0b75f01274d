//! Terminal output.
//!
//! - [`display`]: status lines for outcomes, warnings and summaries
//! - [`progress`]: spinner shown while a directory tree is processed

pub mod display;
pub mod progress;
