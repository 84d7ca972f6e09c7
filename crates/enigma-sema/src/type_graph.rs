//! Record types and their single-inheritance edges.
//!
//! The graph owns every record, operation and field. A record refers to its
//! base only by name; `base_of` resolves that name on each call, so a base
//! may be added after the records deriving from it.

use rustc_hash::{FxHashMap, FxHashSet};

use enigma_frontend::{BaseRef, RecordDecl};
use enigma_identity::{FieldId, Interner, NodeId, OperationId, Symbol};

use crate::entity_defs::{FieldDef, OperationDef, RecordDef};
use crate::errors::SemanticError;

#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    // Storage - IDs are indices into these vectors
    records: Vec<RecordDef>,
    operations: Vec<OperationDef>,
    fields: Vec<FieldDef>,

    record_by_name: FxHashMap<Symbol, NodeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record with its operations and fields.
    ///
    /// A record naming more than one base is rejected and nothing is added.
    pub fn add_record(
        &mut self,
        decl: &RecordDecl,
        interner: &Interner,
    ) -> Result<NodeId, SemanticError> {
        if decl.bases.len() > 1 {
            let bases = decl
                .bases
                .iter()
                .map(|base| interner.resolve(base.name))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SemanticError::MultipleInheritanceUnsupported {
                record: interner.resolve(decl.name).to_string(),
                bases,
                span: decl.bases[1].span.into(),
            });
        }
        Ok(self.insert_record(decl, decl.bases.first().copied()))
    }

    /// Register a record with an explicit base edge (or none).
    pub(crate) fn insert_record(&mut self, decl: &RecordDecl, base: Option<BaseRef>) -> NodeId {
        let id = NodeId::new(self.records.len() as u32);

        let operations = decl
            .operations
            .iter()
            .map(|op| {
                let op_id = OperationId::new(self.operations.len() as u32);
                self.operations.push(OperationDef {
                    id: op_id,
                    defining_record: id,
                    signature: op.signature,
                    is_virtual: op.is_virtual || op.is_pure,
                    is_pure: op.is_pure,
                    is_override: op.is_override,
                    has_body: op.has_body,
                    span: op.span,
                });
                op_id
            })
            .collect();

        let fields = decl
            .fields
            .iter()
            .enumerate()
            .map(|(slot, field)| {
                let field_id = FieldId::new(self.fields.len() as u32);
                self.fields.push(FieldDef {
                    id: field_id,
                    defining_record: id,
                    name: field.name,
                    ty: field.ty,
                    slot,
                    span: field.span,
                });
                field_id
            })
            .collect();

        self.records.push(RecordDef {
            id,
            name: decl.name,
            kind: decl.kind,
            base,
            operations,
            fields,
            span: decl.span,
        });
        self.record_by_name.entry(decl.name).or_insert(id);
        id
    }

    /// Drop a record's base edge
    pub(crate) fn detach_base(&mut self, id: NodeId) {
        self.records[id.index() as usize].base = None;
    }

    /// Records whose base name does not resolve to any record
    pub fn unresolved_bases(&self) -> Vec<(NodeId, BaseRef)> {
        self.records
            .iter()
            .filter_map(|record| {
                let base = record.base?;
                (!self.record_by_name.contains_key(&base.name)).then_some((record.id, base))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, id: NodeId) -> &RecordDef {
        &self.records[id.index() as usize]
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordDef> + '_ {
        self.records.iter()
    }

    pub fn record_by_name(&self, name: Symbol) -> Option<NodeId> {
        self.record_by_name.get(&name).copied()
    }

    pub fn operation(&self, id: OperationId) -> &OperationDef {
        &self.operations[id.index() as usize]
    }

    pub fn field(&self, id: FieldId) -> &FieldDef {
        &self.fields[id.index() as usize]
    }

    /// Operations declared directly on a record, in declaration order
    pub fn operations_of(&self, id: NodeId) -> impl Iterator<Item = &OperationDef> + '_ {
        self.record(id)
            .operations
            .iter()
            .map(|op| self.operation(*op))
    }

    /// Fields declared directly on a record, in declaration order
    pub fn fields_of(&self, id: NodeId) -> impl Iterator<Item = &FieldDef> + '_ {
        self.record(id).fields.iter().map(|f| self.field(*f))
    }

    pub fn base_of(&self, id: NodeId) -> Option<NodeId> {
        let base = self.record(id).base?;
        self.record_by_name(base.name)
    }

    /// Walk the base chain from `id` (exclusive) to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            current: id,
            visited: FxHashSet::from_iter([id]),
        }
    }

    /// Check if `ancestor` is on the base chain of `id` (not reflexive)
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Every record that has `id` as an ancestor, in declaration order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.records
            .iter()
            .map(|record| record.id)
            .filter(|candidate| self.is_ancestor(id, *candidate))
            .collect()
    }
}

/// Lazy iterator over a record's ancestors.
///
/// Always finite: it stops at the root or on reaching any record it has
/// already visited, so each record is yielded at most once.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    graph: &'a TypeGraph,
    current: NodeId,
    visited: FxHashSet<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let base = self.graph.base_of(self.current)?;
        if !self.visited.insert(base) {
            return None;
        }
        self.current = base;
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigma_frontend::{DeclNode, OperationBuilder, ProgramBuilder, RecordBuilder};

    fn graph_of(records: Vec<RecordBuilder>) -> (TypeGraph, Interner) {
        let mut builder = ProgramBuilder::new();
        for record in records {
            builder.add_record(record);
        }
        let (program, interner) = builder.build();
        let mut graph = TypeGraph::new();
        for decl in &program.declarations {
            if let DeclNode::Record(record) = decl {
                graph.add_record(record, &interner).unwrap();
            }
        }
        (graph, interner)
    }

    fn node(graph: &TypeGraph, interner: &Interner, name: &str) -> NodeId {
        graph
            .record_by_name(interner.lookup(name).unwrap())
            .unwrap()
    }

    #[test]
    fn two_level_chain_has_single_ancestor() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("Test"),
            RecordBuilder::class("SubTest").base("Test"),
        ]);
        let test = node(&graph, &interner, "Test");
        let sub = node(&graph, &interner, "SubTest");

        assert_eq!(graph.base_of(sub), Some(test));
        assert_eq!(graph.base_of(test), None);
        assert_eq!(graph.ancestors(sub).collect::<Vec<_>>(), vec![test]);
        assert_eq!(graph.ancestors(test).count(), 0);
    }

    #[test]
    fn ancestors_is_restartable() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("A"),
            RecordBuilder::class("B").base("A"),
            RecordBuilder::class("C").base("B"),
        ]);
        let c = node(&graph, &interner, "C");
        let walk = graph.ancestors(c);
        let first: Vec<_> = walk.clone().collect();
        let second: Vec<_> = walk.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(graph.ancestors(c).collect::<Vec<_>>(), first);
    }

    #[test]
    fn base_declared_after_derived_still_resolves() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("SubTest").base("Test"),
            RecordBuilder::class("Test"),
        ]);
        let sub = node(&graph, &interner, "SubTest");
        let test = node(&graph, &interner, "Test");
        assert_eq!(graph.base_of(sub), Some(test));
        assert!(graph.unresolved_bases().is_empty());
    }

    #[test]
    fn descendants_and_ancestry() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("A"),
            RecordBuilder::class("B").base("A"),
            RecordBuilder::class("C").base("B"),
            RecordBuilder::class("D"),
        ]);
        let a = node(&graph, &interner, "A");
        let b = node(&graph, &interner, "B");
        let c = node(&graph, &interner, "C");
        assert_eq!(graph.descendants(a), vec![b, c]);
        assert!(graph.is_ancestor(a, c));
        assert!(!graph.is_ancestor(c, a));
        assert!(!graph.is_ancestor(a, a));
    }

    #[test]
    fn unknown_base_is_listed() {
        let (graph, interner) = graph_of(vec![RecordBuilder::class("Derived").base("Missing")]);
        let unresolved = graph.unresolved_bases();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(interner.resolve(unresolved[0].1.name), "Missing");
        assert_eq!(graph.base_of(unresolved[0].0), None);
    }

    #[test]
    fn second_base_is_rejected() {
        let mut builder = ProgramBuilder::new();
        builder.add_record(RecordBuilder::class("Both").base("A").base("B"));
        let (program, interner) = builder.build();
        let DeclNode::Record(decl) = &program.declarations[0] else {
            panic!("expected record");
        };

        let mut graph = TypeGraph::new();
        let err = graph.add_record(decl, &interner).unwrap_err();
        assert!(matches!(
            err,
            SemanticError::MultipleInheritanceUnsupported { ref bases, .. } if bases == "A, B"
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn cyclic_chain_terminates() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("A").base("B"),
            RecordBuilder::class("B").base("A"),
            RecordBuilder::class("C").base("A"),
        ]);
        let a = node(&graph, &interner, "A");
        let b = node(&graph, &interner, "B");
        let c = node(&graph, &interner, "C");
        assert_eq!(graph.ancestors(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(graph.ancestors(c).collect::<Vec<_>>(), vec![a, b]);
        // a later call to `next` stays exhausted
        let mut walk = graph.ancestors(c);
        assert_eq!(walk.by_ref().count(), 2);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn operations_keep_declaration_order() {
        let (graph, interner) = graph_of(vec![
            RecordBuilder::class("Test")
                .operation(OperationBuilder::new("DoTest", "() const"))
                .operation(OperationBuilder::new("PureVirtual", "()").pure())
                .field("count", "int"),
        ]);
        let test = node(&graph, &interner, "Test");
        let names: Vec<&str> = graph
            .operations_of(test)
            .map(|op| interner.resolve(op.signature.name))
            .collect();
        assert_eq!(names, vec!["DoTest", "PureVirtual"]);
        let field = graph.fields_of(test).next().unwrap();
        assert_eq!(field.slot, 0);
        assert_eq!(interner.resolve(field.ty), "int");
    }
}
