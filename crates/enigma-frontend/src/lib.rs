//! Input boundary of the declaration model.
//!
//! Declarations arrive already parsed: either built in memory with
//! [`ProgramBuilder`] or lowered from a ctags file by [`tags::TagLowering`].

pub mod ast;
pub mod builder;
pub mod errors;
pub mod tags;

pub use ast::{
    BaseRef, DeclNode, EnumDecl, EnumScoping, Enumerator, FieldDecl, OperationDecl,
    OperationSignature, Program, RecordDecl, RecordKind, normalize_params,
};
pub use builder::{OperationBuilder, ProgramBuilder, RecordBuilder};
pub use enigma_identity::{Interner, Span, Symbol, UnderlyingType};
pub use errors::TagError;
