//! Definition structs for modelled entities.
//!
//! These hold the normalized information about enums, records, operations and
//! fields. The corresponding ID types (EnumId, NodeId, ...) are indices into
//! vectors of these.

use enigma_frontend::{BaseRef, EnumScoping, OperationSignature, RecordKind};
use enigma_identity::{EnumId, FieldId, NodeId, OperationId, Span, Symbol, UnderlyingType};

/// A top-level declaration in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclRef {
    Enum(EnumId),
    Record(NodeId),
}

/// A validated enumeration
#[derive(Debug, Clone)]
pub struct EnumInfo {
    pub id: EnumId,
    pub name: Symbol,
    pub scoping: EnumScoping,
    pub underlying_type: UnderlyingType,
    /// False when `underlying_type` is the implicit default
    pub underlying_explicit: bool,
    pub enumerators: Vec<EnumeratorInfo>,
    pub span: Span,
}

impl EnumInfo {
    pub fn is_scoped(&self) -> bool {
        self.scoping == EnumScoping::Scoped
    }

    pub fn enumerator(&self, name: Symbol) -> Option<&EnumeratorInfo> {
        self.enumerators.iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct EnumeratorInfo {
    pub name: Symbol,
    /// Zero-based position in the declaration
    pub position: u32,
    pub span: Span,
}

/// A record type (class or struct) stored in the type graph
#[derive(Debug, Clone)]
pub struct RecordDef {
    pub id: NodeId,
    pub name: Symbol,
    pub kind: RecordKind,
    /// Weak reference to the base, resolved by name through the graph
    pub base: Option<BaseRef>,
    pub operations: Vec<OperationId>,
    pub fields: Vec<FieldId>,
    pub span: Span,
}

/// An operation (always belongs to a record)
#[derive(Debug, Clone)]
pub struct OperationDef {
    pub id: OperationId,
    pub defining_record: NodeId,
    pub signature: OperationSignature,
    pub is_virtual: bool,
    pub is_pure: bool,
    pub is_override: bool,
    pub has_body: bool,
    pub span: Span,
}

impl OperationDef {
    /// Whether this declaration can discharge a pure obligation
    pub fn implements(&self) -> bool {
        self.has_body && !self.is_pure
    }
}

/// A field definition (always belongs to a record)
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub id: FieldId,
    pub defining_record: NodeId,
    pub name: Symbol,
    pub ty: Symbol,
    pub slot: usize,
    pub span: Span,
}
