// src/lib.rs

// Public modules (the enigma driver API)
pub mod cli;
pub mod commands;
pub mod errors;

// Internal crate aliases
pub(crate) use enigma_frontend as frontend;
pub(crate) use enigma_sema as sema;
