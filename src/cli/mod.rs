// src/cli/mod.rs
pub mod args;
pub mod paths;

pub use args::{Cli, ColorMode, Commands};
pub use paths::{PathError, expand_paths, is_tags_file};
