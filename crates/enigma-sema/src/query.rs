//! Abbreviation search over a frozen model.

use std::fmt;

use crate::model::Model;

/// Case-insensitive prefix match, or CamelCase humps found in order.
///
/// `ProjSpLoc`, `PSL` and `proj` all match `ProjectileSpawnLocation`.
pub fn match_abbrev(value: &str, query: &str) -> bool {
    if value.to_lowercase().starts_with(&query.to_lowercase()) {
        return true;
    }

    let mut humps: Vec<String> = Vec::new();
    for c in query.chars() {
        match humps.last_mut() {
            Some(hump) if !c.is_uppercase() => hump.push(c),
            _ => humps.push(c.to_string()),
        }
    }

    let mut rest = value;
    for hump in &humps {
        match rest.find(hump.as_str()) {
            Some(at) => rest = &rest[at + hump.len()..],
            None => return false,
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Enum,
    Enumerator,
    Record,
    Operation,
}

impl HitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HitKind::Enum => "enum",
            HitKind::Enumerator => "enumerator",
            HitKind::Record => "record",
            HitKind::Operation => "operation",
        }
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    /// Qualified name, e.g. `EnumClass::EC_First` or `Test::DoTest() const`
    pub name: String,
    pub kind: HitKind,
    pub line: u32,
}

/// Read-only search over a [`Model`].
pub struct ModelQuery<'a> {
    model: &'a Model,
}

impl<'a> ModelQuery<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Every declaration whose unqualified name matches `query`, in
    /// declaration order with members following their container.
    pub fn find(&self, query: &str) -> Vec<QueryHit> {
        let interner = self.model.interner();
        let mut hits = Vec::new();

        for info in self.model.enums() {
            let enum_name = interner.resolve(info.name);
            if match_abbrev(enum_name, query) {
                hits.push(QueryHit {
                    name: enum_name.to_string(),
                    kind: HitKind::Enum,
                    line: info.span.line,
                });
            }
            for enumerator in &info.enumerators {
                let name = interner.resolve(enumerator.name);
                if match_abbrev(name, query) {
                    hits.push(QueryHit {
                        name: format!("{enum_name}::{name}"),
                        kind: HitKind::Enumerator,
                        line: enumerator.span.line,
                    });
                }
            }
        }

        let graph = self.model.graph();
        for record in graph.records() {
            let record_name = interner.resolve(record.name);
            if match_abbrev(record_name, query) {
                hits.push(QueryHit {
                    name: record_name.to_string(),
                    kind: HitKind::Record,
                    line: record.span.line,
                });
            }
            for op in graph.operations_of(record.id) {
                if match_abbrev(interner.resolve(op.signature.name), query) {
                    hits.push(QueryHit {
                        name: format!("{record_name}::{}", op.signature.display(interner)),
                        kind: HitKind::Operation,
                        line: op.span.line,
                    });
                }
            }
        }

        tracing::debug!(query, hits = hits.len(), "find");
        hits
    }
}
