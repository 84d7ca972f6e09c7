//! Virtual obligation resolution.
//!
//! A pure operation declared on a type is an obligation for every type below
//! it. An obligation is discharged when the type itself or one of the types
//! between it and the declaring type provides a body with the same signature.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;

use enigma_frontend::OperationSignature;
use enigma_identity::{Interner, NodeId};

use crate::errors::SemanticError;
use crate::type_graph::TypeGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub concrete: bool,
    pub unresolved: BTreeSet<OperationSignature>,
    /// Record that declared each unresolved operation pure (closest to the
    /// resolved type when several did)
    pub origins: BTreeMap<OperationSignature, NodeId>,
}

impl ResolutionResult {
    /// Unresolved signatures rendered as `name(params)`, comma separated
    pub fn describe_unresolved(&self, interner: &Interner) -> String {
        self.unresolved
            .iter()
            .map(|sig| sig.display(interner))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Determine whether `node` is concrete.
///
/// Walks from `node` to the root. The override flag plays no part: any body
/// on or below the declaring type discharges the obligation.
pub fn resolve(
    graph: &TypeGraph,
    node: NodeId,
    interner: &Interner,
) -> Result<ResolutionResult, SemanticError> {
    let mut discharged: FxHashSet<OperationSignature> = FxHashSet::default();
    let mut unresolved = BTreeSet::new();
    let mut origins = BTreeMap::new();

    let mut path = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = Some(node);

    while let Some(id) = current {
        if !visited.insert(id) {
            return Err(cycle_error(graph, node, &path, id, interner));
        }
        path.push(id);

        for op in graph.operations_of(id) {
            if op.implements() {
                discharged.insert(op.signature);
            }
        }
        for op in graph.operations_of(id) {
            if op.is_pure && !discharged.contains(&op.signature) {
                unresolved.insert(op.signature);
                origins.entry(op.signature).or_insert(id);
            }
        }

        current = graph.base_of(id);
    }

    tracing::trace!(
        record = interner.resolve(graph.record(node).name),
        depth = path.len(),
        unresolved = unresolved.len(),
        "resolved obligations"
    );

    Ok(ResolutionResult {
        concrete: unresolved.is_empty(),
        unresolved,
        origins,
    })
}

fn cycle_error(
    graph: &TypeGraph,
    start: NodeId,
    path: &[NodeId],
    repeated: NodeId,
    interner: &Interner,
) -> SemanticError {
    let name = |id: NodeId| interner.resolve(graph.record(id).name);
    let cycle_start = path.iter().position(|id| *id == repeated).unwrap_or(0);
    let mut names: Vec<&str> = path[cycle_start..].iter().map(|id| name(*id)).collect();
    names.push(name(repeated));

    let record = graph.record(start);
    SemanticError::CyclicInheritance {
        record: name(start).to_string(),
        path: names.join(" -> "),
        span: record.span.into(),
    }
}
