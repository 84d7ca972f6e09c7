//! Enigma semantic model: enumerations, record types, inheritance and
//! virtual-dispatch obligations over an already-parsed declaration list.

pub mod entity_defs;
pub mod enum_model;
pub mod errors;
pub mod ingest;
pub mod model;
pub mod obligations;
pub mod output;
pub mod query;
pub mod type_graph;

pub use entity_defs::{DeclRef, EnumInfo, EnumeratorInfo, FieldDef, OperationDef, RecordDef};
pub use enum_model::classify;
pub use errors::{SemanticError, SemanticWarning};
pub use ingest::ingest;
pub use model::{EnumeratorRef, Model};
pub use obligations::ResolutionResult;
pub use output::{TypeError, TypeWarning};
pub use query::{HitKind, ModelQuery, QueryHit, match_abbrev};
pub use type_graph::{Ancestors, TypeGraph};
