// lib.rs
//
// Shared identity primitives for the declaration model.
// Defines Symbol, Span, Interner and the entity ids every other crate keys on.

mod entities;
mod intern;
mod span;
mod symbol;
mod underlying_type;

pub use entities::{EnumId, FieldId, NodeId, OperationId};
pub use intern::Interner;
pub use span::Span;
pub use symbol::Symbol;
pub use underlying_type::UnderlyingType;
