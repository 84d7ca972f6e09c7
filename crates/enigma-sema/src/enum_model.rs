//! Enumeration classification.

use rustc_hash::FxHashMap;

use enigma_frontend::EnumDecl;
use enigma_identity::{EnumId, Interner, UnderlyingType};

use crate::entity_defs::{EnumInfo, EnumeratorInfo};
use crate::errors::SemanticError;
use crate::output::TypeError;

/// Validate an enum declaration and normalize it into an [`EnumInfo`].
///
/// Scoping is copied from the declaration. An explicit underlying type is
/// carried through exactly; an absent one becomes [`UnderlyingType::DEFAULT`].
pub fn classify(decl: &EnumDecl, id: EnumId, interner: &Interner) -> Result<EnumInfo, TypeError> {
    let mut seen = FxHashMap::default();
    let mut enumerators = Vec::with_capacity(decl.enumerators.len());

    for (position, enumerator) in decl.enumerators.iter().enumerate() {
        if let Some(first) = seen.insert(enumerator.name, enumerator.span) {
            return Err(TypeError::new(
                SemanticError::DuplicateEnumerator {
                    enum_name: interner.resolve(decl.name).to_string(),
                    enumerator: interner.resolve(enumerator.name).to_string(),
                    span: enumerator.span.into(),
                    first: first.into(),
                },
                enumerator.span,
            ));
        }
        enumerators.push(EnumeratorInfo {
            name: enumerator.name,
            position: position as u32,
            span: enumerator.span,
        });
    }

    Ok(EnumInfo {
        id,
        name: decl.name,
        scoping: decl.scoping,
        underlying_type: decl.underlying.unwrap_or(UnderlyingType::DEFAULT),
        underlying_explicit: decl.underlying.is_some(),
        enumerators,
        span: decl.span,
    })
}
