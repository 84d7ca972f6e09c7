//! Declaration ingest: turns a parsed [`Program`] into a frozen [`Model`].
//!
//! All errors found in one pass are collected and returned together. No model
//! is produced if any error was found.

use rustc_hash::FxHashMap;

use enigma_frontend::{DeclNode, EnumDecl, OperationSignature, Program, RecordDecl};
use enigma_identity::{EnumId, Interner, NodeId, Span, Symbol};

use crate::entity_defs::{DeclRef, EnumInfo};
use crate::enum_model::classify;
use crate::errors::{SemanticError, SemanticWarning};
use crate::model::Model;
use crate::output::{TypeError, TypeWarning};
use crate::type_graph::TypeGraph;

/// Build the semantic model for a declaration list.
pub fn ingest(program: &Program, interner: &Interner) -> Result<Model, Vec<TypeError>> {
    let started = std::time::Instant::now();
    let mut ingestor = Ingestor::new(interner);

    for decl in &program.declarations {
        ingestor.declare(decl);
    }
    ingestor.check_unscoped_enumerators();
    ingestor.check_bases();
    ingestor.check_overrides();

    tracing::info!(
        enums = ingestor.enums.len(),
        records = ingestor.graph.len(),
        errors = ingestor.errors.len(),
        warnings = ingestor.warnings.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "ingest complete"
    );

    ingestor.finish()
}

struct Ingestor<'a> {
    interner: &'a Interner,
    enums: Vec<EnumInfo>,
    graph: TypeGraph,
    order: Vec<DeclRef>,
    /// Top-level names and where they were first declared
    scope: FxHashMap<Symbol, Span>,
    errors: Vec<TypeError>,
    warnings: Vec<TypeWarning>,
}

impl<'a> Ingestor<'a> {
    fn new(interner: &'a Interner) -> Self {
        Self {
            interner,
            enums: Vec::new(),
            graph: TypeGraph::new(),
            order: Vec::new(),
            scope: FxHashMap::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_error(&mut self, error: SemanticError, span: Span) {
        self.errors.push(TypeError::new(error, span));
    }

    fn add_warning(&mut self, warning: SemanticWarning, span: Span) {
        self.warnings.push(TypeWarning::new(warning, span));
    }

    fn name(&self, sym: Symbol) -> &'a str {
        self.interner.resolve(sym)
    }

    /// Claim `name` in the enclosing scope. Returns false on a collision.
    fn claim(&mut self, name: Symbol, span: Span) -> bool {
        if let Some(first) = self.scope.get(&name).copied() {
            self.add_error(
                SemanticError::DuplicateDeclaration {
                    name: self.name(name).to_string(),
                    span: span.into(),
                    first: first.into(),
                },
                span,
            );
            return false;
        }
        self.scope.insert(name, span);
        true
    }

    fn declare(&mut self, decl: &DeclNode) {
        tracing::debug!(name = self.name(decl.name()), line = decl.span().line, "declaration");
        if !self.claim(decl.name(), decl.span()) {
            return;
        }
        match decl {
            DeclNode::Enum(enum_decl) => self.declare_enum(enum_decl),
            DeclNode::Record(record_decl) => self.declare_record(record_decl),
        }
    }

    fn declare_enum(&mut self, decl: &EnumDecl) {
        let id = EnumId::new(self.enums.len() as u32);
        match classify(decl, id, self.interner) {
            Ok(info) => {
                tracing::debug!(
                    name = self.name(info.name),
                    scoped = info.is_scoped(),
                    underlying = %info.underlying_type,
                    enumerators = info.enumerators.len(),
                    "enum classified"
                );
                self.enums.push(info);
                self.order.push(DeclRef::Enum(id));
            }
            Err(err) => self.errors.push(err),
        }
    }

    fn declare_record(&mut self, decl: &RecordDecl) {
        self.check_members(decl);

        let id = match self.graph.add_record(decl, self.interner) {
            Ok(id) => id,
            Err(err) => {
                let span = decl.span;
                self.add_error(err, span);
                // keep the record so later lookups don't cascade
                self.graph.insert_record(decl, None)
            }
        };
        tracing::debug!(
            name = self.name(decl.name),
            kind = decl.kind.as_str(),
            operations = decl.operations.len(),
            fields = decl.fields.len(),
            "record registered"
        );
        self.order.push(DeclRef::Record(id));
    }

    /// Fields and operation signatures must be unique within one record.
    fn check_members(&mut self, decl: &RecordDecl) {
        let mut fields: FxHashMap<Symbol, Span> = FxHashMap::default();
        for field in &decl.fields {
            if let Some(first) = fields.insert(field.name, field.span) {
                self.add_error(
                    SemanticError::DuplicateDeclaration {
                        name: format!("{}::{}", self.name(decl.name), self.name(field.name)),
                        span: field.span.into(),
                        first: first.into(),
                    },
                    field.span,
                );
            }
        }

        let mut operations: FxHashMap<OperationSignature, Span> = FxHashMap::default();
        for op in &decl.operations {
            if let Some(first) = operations.insert(op.signature, op.span) {
                self.add_error(
                    SemanticError::DuplicateDeclaration {
                        name: format!(
                            "{}::{}",
                            self.name(decl.name),
                            op.signature.display(self.interner)
                        ),
                        span: op.span.into(),
                        first: first.into(),
                    },
                    op.span,
                );
            }
        }
    }

    /// Unscoped enumerators live in the enclosing scope and must not
    /// collide with any other name there.
    fn check_unscoped_enumerators(&mut self) {
        let enumerators: Vec<(Symbol, Span)> = self
            .enums
            .iter()
            .filter(|info| !info.is_scoped())
            .flat_map(|info| info.enumerators.iter().map(|e| (e.name, e.span)))
            .collect();
        for (name, span) in enumerators {
            self.claim(name, span);
        }
    }

    fn check_bases(&mut self) {
        for (id, base) in self.graph.unresolved_bases() {
            let record = self.name(self.graph.record(id).name);
            self.add_error(
                SemanticError::UnknownBase {
                    record: record.to_string(),
                    base: self.name(base.name).to_string(),
                    span: base.span.into(),
                },
                base.span,
            );
            self.graph.detach_base(id);
        }
    }

    /// Warn about operations flagged override that no ancestor declares
    /// virtual.
    fn check_overrides(&mut self) {
        let mut pending = Vec::new();
        for record in self.graph.records() {
            for op in self.graph.operations_of(record.id) {
                if op.is_override && !self.has_virtual_ancestor(record.id, op.signature) {
                    pending.push((record.name, op.signature, op.span));
                }
            }
        }
        for (record, signature, span) in pending {
            self.add_warning(
                SemanticWarning::OverrideWithoutTarget {
                    record: self.name(record).to_string(),
                    operation: signature.display(self.interner),
                    span: span.into(),
                },
                span,
            );
        }
    }

    fn has_virtual_ancestor(&self, id: NodeId, signature: OperationSignature) -> bool {
        self.graph.ancestors(id).any(|ancestor| {
            self.graph
                .operations_of(ancestor)
                .any(|op| op.is_virtual && op.signature == signature)
        })
    }

    fn finish(self) -> Result<Model, Vec<TypeError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(Model::new(
            self.interner.clone(),
            self.enums,
            self.graph,
            self.order,
            self.warnings,
        ))
    }
}

#[cfg(test)]
mod tests;
