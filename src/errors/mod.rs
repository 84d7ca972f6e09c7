// src/errors/mod.rs
//! Diagnostic rendering for the enigma CLI.

pub mod report;

pub use enigma_frontend::TagError;
pub use enigma_sema::{SemanticError, SemanticWarning};

pub use report::{render_to_string, render_to_writer_terminal, snapshot_handler, terminal_handler};
