// src/commands/mod.rs
pub mod check;
pub mod common;
pub mod find;
pub mod inspect;
