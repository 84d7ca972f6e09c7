//! Builders for constructing a [`Program`] in memory.
//!
//! Parsers other than the ctags lowering, and tests, use these to hand the
//! model a declaration list without spelling out every symbol by hand.
//!
//! # Example
//! ```
//! use enigma_frontend::{OperationBuilder, ProgramBuilder, RecordBuilder};
//!
//! let mut builder = ProgramBuilder::new();
//! builder.add_record(
//!     RecordBuilder::class("Test").operation(OperationBuilder::new("PureVirtual", "()").pure()),
//! );
//! let (program, _interner) = builder.build();
//! assert_eq!(program.declarations.len(), 1);
//! ```

use enigma_identity::{Interner, Span, UnderlyingType};

use crate::ast::{
    BaseRef, DeclNode, EnumDecl, EnumScoping, Enumerator, FieldDecl, OperationDecl,
    OperationSignature, Program, RecordDecl, RecordKind, normalize_params,
};

/// Accumulates declarations and owns the interner their symbols live in.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    interner: Interner,
    declarations: Vec<DeclNode>,
    next_line: u32,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line numbers are assigned in insertion order so diagnostics stay ordered.
    fn next_span(&mut self) -> Span {
        self.next_line += 1;
        Span::at_line(self.next_line)
    }

    pub fn add_enum(
        &mut self,
        name: &str,
        scoping: EnumScoping,
        underlying: Option<UnderlyingType>,
        enumerators: &[&str],
    ) -> &mut Self {
        let span = self.next_span();
        let name = self.interner.intern(name);
        let enumerators = enumerators
            .iter()
            .map(|enumerator| {
                let span = self.next_span();
                Enumerator {
                    name: self.interner.intern(enumerator),
                    span,
                }
            })
            .collect();
        self.declarations.push(DeclNode::Enum(EnumDecl {
            name,
            scoping,
            underlying,
            enumerators,
            span,
        }));
        self
    }

    pub fn add_record(&mut self, record: RecordBuilder) -> &mut Self {
        let span = self.next_span();
        let name = self.interner.intern(&record.name);
        let bases = record
            .bases
            .iter()
            .map(|base| BaseRef {
                name: self.interner.intern(base),
                span,
            })
            .collect();
        let operations = record
            .operations
            .into_iter()
            .map(|op| {
                let span = self.next_span();
                OperationDecl {
                    signature: OperationSignature {
                        name: self.interner.intern(&op.name),
                        params: self.interner.intern(&normalize_params(&op.params)),
                    },
                    is_virtual: op.is_virtual || op.is_pure,
                    is_pure: op.is_pure,
                    is_override: op.is_override,
                    has_body: op.has_body,
                    span,
                }
            })
            .collect();
        let fields = record
            .fields
            .into_iter()
            .map(|(field, ty)| {
                let span = self.next_span();
                FieldDecl {
                    name: self.interner.intern(&field),
                    ty: self.interner.intern(&ty),
                    span,
                }
            })
            .collect();
        self.declarations.push(DeclNode::Record(RecordDecl {
            name,
            kind: record.kind,
            bases,
            operations,
            fields,
            span,
        }));
        self
    }

    pub fn build(self) -> (Program, Interner) {
        (
            Program {
                declarations: self.declarations,
            },
            self.interner,
        )
    }
}

/// Owned description of a record, interned when added to a [`ProgramBuilder`].
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    name: String,
    kind: RecordKind,
    bases: Vec<String>,
    operations: Vec<OperationBuilder>,
    fields: Vec<(String, String)>,
}

impl RecordBuilder {
    pub fn new(name: &str, kind: RecordKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            bases: Vec::new(),
            operations: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(name, RecordKind::Class)
    }

    pub fn structure(name: &str) -> Self {
        Self::new(name, RecordKind::Struct)
    }

    pub fn base(mut self, name: &str) -> Self {
        self.bases.push(name.to_string());
        self
    }

    pub fn operation(mut self, op: OperationBuilder) -> Self {
        self.operations.push(op);
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        self.fields.push((name.to_string(), ty.to_string()));
        self
    }
}

/// Operation description with sensible defaults:
/// - `has_body`: true
/// - `is_virtual`, `is_pure`, `is_override`: false
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    name: String,
    params: String,
    is_virtual: bool,
    is_pure: bool,
    is_override: bool,
    has_body: bool,
}

impl OperationBuilder {
    pub fn new(name: &str, params: &str) -> Self {
        Self {
            name: name.to_string(),
            params: params.to_string(),
            is_virtual: false,
            is_pure: false,
            is_override: false,
            has_body: true,
        }
    }

    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Mark as `virtual ... = 0`; a pure operation never has a body.
    pub fn pure(mut self) -> Self {
        self.is_virtual = true;
        self.is_pure = true;
        self.has_body = false;
        self
    }

    pub fn override_(mut self) -> Self {
        self.is_override = true;
        self
    }

    /// Declaration without a body, e.g. a prototype defined elsewhere.
    pub fn without_body(mut self) -> Self {
        self.has_body = false;
        self
    }
}
