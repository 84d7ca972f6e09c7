//! The frozen semantic model produced by ingest.

use std::sync::OnceLock;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use enigma_identity::{EnumId, Interner, NodeId, Symbol};

use crate::entity_defs::{DeclRef, EnumInfo, EnumeratorInfo, RecordDef};
use crate::errors::SemanticError;
use crate::obligations::{self, ResolutionResult};
use crate::output::TypeWarning;
use crate::type_graph::{Ancestors, TypeGraph};

/// An enumerator located by [`Model::lookup_enumerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratorRef {
    pub enum_id: EnumId,
    pub position: u32,
}

/// Immutable result of ingesting one declaration list.
///
/// Resolution results are computed on first request and cached per record.
#[derive(Debug)]
pub struct Model {
    interner: Interner,
    enums: Vec<EnumInfo>,
    enum_by_name: FxHashMap<Symbol, EnumId>,
    /// Unscoped enumerators visible in the enclosing scope
    unscoped_enumerators: FxHashMap<Symbol, EnumeratorRef>,
    graph: TypeGraph,
    order: Vec<DeclRef>,
    warnings: Vec<TypeWarning>,
    resolutions: Vec<OnceLock<Result<ResolutionResult, SemanticError>>>,
}

impl Model {
    pub(crate) fn new(
        interner: Interner,
        enums: Vec<EnumInfo>,
        graph: TypeGraph,
        order: Vec<DeclRef>,
        warnings: Vec<TypeWarning>,
    ) -> Self {
        let enum_by_name = enums.iter().map(|info| (info.name, info.id)).collect();
        let unscoped_enumerators = enums
            .iter()
            .filter(|info| !info.is_scoped())
            .flat_map(|info| {
                info.enumerators.iter().map(|e| {
                    (
                        e.name,
                        EnumeratorRef {
                            enum_id: info.id,
                            position: e.position,
                        },
                    )
                })
            })
            .collect();
        let resolutions = (0..graph.len()).map(|_| OnceLock::new()).collect();
        Self {
            interner,
            enums,
            enum_by_name,
            unscoped_enumerators,
            graph,
            order,
            warnings,
            resolutions,
        }
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn warnings(&self) -> &[TypeWarning] {
        &self.warnings
    }

    /// Top-level declarations in declaration order
    pub fn declarations(&self) -> &[DeclRef] {
        &self.order
    }

    pub fn decl_name(&self, decl: DeclRef) -> &str {
        let name = match decl {
            DeclRef::Enum(id) => self.enum_info(id).name,
            DeclRef::Record(id) => self.graph.record(id).name,
        };
        self.interner.resolve(name)
    }

    pub fn enums(&self) -> &[EnumInfo] {
        &self.enums
    }

    pub fn enum_info(&self, id: EnumId) -> &EnumInfo {
        &self.enums[id.index() as usize]
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&EnumInfo> {
        let sym = self.interner.lookup(name)?;
        self.enum_by_name.get(&sym).map(|id| self.enum_info(*id))
    }

    pub fn enumerator(&self, reference: EnumeratorRef) -> &EnumeratorInfo {
        &self.enum_info(reference.enum_id).enumerators[reference.position as usize]
    }

    /// Look up `Enum::Name` or, for unscoped enums only, a bare `Name`.
    pub fn lookup_enumerator(&self, path: &str) -> Option<EnumeratorRef> {
        match path.rsplit_once("::") {
            Some((enum_name, name)) => {
                let info = self.enum_by_name(enum_name)?;
                let sym = self.interner.lookup(name)?;
                let enumerator = info.enumerator(sym)?;
                Some(EnumeratorRef {
                    enum_id: info.id,
                    position: enumerator.position,
                })
            }
            None => {
                let sym = self.interner.lookup(path)?;
                self.unscoped_enumerators.get(&sym).copied()
            }
        }
    }

    pub fn record(&self, id: NodeId) -> &RecordDef {
        self.graph.record(id)
    }

    pub fn record_by_name(&self, name: &str) -> Option<NodeId> {
        self.graph.record_by_name(self.interner.lookup(name)?)
    }

    pub fn base_of(&self, id: NodeId) -> Option<NodeId> {
        self.graph.base_of(id)
    }

    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.graph.ancestors(id)
    }

    /// Resolve the virtual obligations of a record, caching the outcome.
    pub fn resolve(&self, id: NodeId) -> Result<&ResolutionResult, SemanticError> {
        self.resolutions[id.index() as usize]
            .get_or_init(|| obligations::resolve(&self.graph, id, &self.interner))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Resolve every record in parallel. Results follow declaration order.
    pub fn resolve_all(&self) -> Vec<(NodeId, Result<&ResolutionResult, SemanticError>)> {
        let ids: Vec<NodeId> = self.graph.records().map(|record| record.id).collect();
        ids.into_par_iter()
            .map(|id| (id, self.resolve(id)))
            .collect()
    }

    /// Fail with `NotConcrete` unless the record can be instantiated.
    pub fn require_concrete(&self, id: NodeId) -> Result<(), SemanticError> {
        let result = self.resolve(id)?;
        if result.concrete {
            return Ok(());
        }
        let record = self.graph.record(id);
        Err(SemanticError::NotConcrete {
            record: self.interner.resolve(record.name).to_string(),
            missing: result.describe_unresolved(&self.interner),
            span: record.span.into(),
        })
    }
}
