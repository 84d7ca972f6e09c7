// tags/lower.rs
//
// Lowering of tag records into declaration nodes.

use rustc_hash::FxHashMap;

use enigma_identity::{Interner, UnderlyingType};

use super::{TagDefinition, TagFile, TagKind};
use crate::ast::{
    BaseRef, DeclNode, EnumDecl, EnumScoping, Enumerator, FieldDecl, OperationDecl,
    OperationSignature, Program, RecordDecl, RecordKind, normalize_params,
};
use crate::errors::TagError;

/// Lowers the enum/class/member subset of a tags file into a [`Program`].
///
/// Containers (enums, classes, structs) are lowered first so members may
/// appear before their container in the file. Declarations come out in
/// source order (file, then line).
#[derive(Debug, Default)]
pub struct TagLowering {
    interner: Interner,
}

impl TagLowering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_interner(self) -> Interner {
        self.interner
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn lower(&mut self, file: &TagFile) -> Result<Program, Vec<TagError>> {
        if file.is_sorted()
            && let Some(tag) = file
                .tags()
                .iter()
                .find(|tag| tag.line == 0 && orders_declarations(tag))
        {
            return Err(vec![TagError::MissingLineNumbers {
                name: tag.name.clone(),
                span: tag.span.into(),
            }]);
        }

        let mut ordered: Vec<&TagDefinition> = file.tags().iter().collect();
        ordered.sort_by(|a, b| (a.file.as_str(), a.line).cmp(&(b.file.as_str(), b.line)));

        let mut declarations = Vec::new();
        let mut enum_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut record_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut errors = Vec::new();
        // (record, signature) -> (operation slot, kind of the tag that added it)
        let mut unpaired: FxHashMap<(usize, OperationSignature), (usize, TagKind)> =
            FxHashMap::default();

        for tag in &ordered {
            match tag.kind {
                TagKind::Enum => match self.lower_enum(tag) {
                    Ok(decl) => {
                        enum_index.entry(tag.name.as_str()).or_insert(declarations.len());
                        declarations.push(DeclNode::Enum(decl));
                    }
                    Err(err) => errors.push(err),
                },
                TagKind::Class | TagKind::Struct => {
                    record_index
                        .entry(tag.name.as_str())
                        .or_insert(declarations.len());
                    declarations.push(DeclNode::Record(self.lower_record(tag)));
                }
                _ => {}
            }
        }

        for tag in &ordered {
            let Some((scope_kind, scope)) = tag.scope() else {
                continue;
            };
            let container = match (tag.kind, scope_kind) {
                (TagKind::Enumerator, "enum") => lookup_scope(&enum_index, scope),
                (TagKind::Function | TagKind::Prototype | TagKind::Member, "class" | "struct") => {
                    lookup_scope(&record_index, scope)
                }
                _ => {
                    tracing::trace!(name = %tag.name, kind = ?tag.kind, "skipping tag");
                    continue;
                }
            };
            let Some(index) = container else {
                errors.push(TagError::OrphanMember {
                    name: tag.name.clone(),
                    scope_kind: scope_kind.to_string(),
                    scope: scope.to_string(),
                    span: tag.span.into(),
                });
                continue;
            };

            match &mut declarations[index] {
                DeclNode::Enum(decl) => decl.enumerators.push(Enumerator {
                    name: self.interner.intern(&tag.name),
                    span: tag.span,
                }),
                DeclNode::Record(decl) if tag.kind == TagKind::Member => {
                    let field = self.lower_field(tag);
                    decl.fields.push(field);
                }
                DeclNode::Record(decl) => {
                    let operation = self.lower_operation(tag);
                    let key = (index, operation.signature);
                    match unpaired.get(&key).copied() {
                        Some((slot, kind)) if is_declaration_pair(kind, tag.kind) => {
                            merge_definition(&mut decl.operations[slot], operation, tag.kind);
                            unpaired.remove(&key);
                        }
                        _ => {
                            unpaired.insert(key, (decl.operations.len(), tag.kind));
                            decl.operations.push(operation);
                        }
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        tracing::debug!(
            path = file.path(),
            declarations = declarations.len(),
            "lowered tags"
        );
        Ok(Program { declarations })
    }

    fn lower_enum(&mut self, tag: &TagDefinition) -> Result<EnumDecl, TagError> {
        let pattern = tag
            .pattern
            .as_deref()
            .ok_or_else(|| TagError::UndeterminedEnumShape {
                name: tag.name.clone(),
                span: tag.span.into(),
            })?;
        let shape = EnumShape::read(pattern, &tag.name);
        let underlying = match shape.underlying {
            Some(spelling) => Some(UnderlyingType::from_c_spelling(spelling).ok_or_else(|| {
                TagError::UnsupportedUnderlyingType {
                    name: tag.name.clone(),
                    spelling: spelling.to_string(),
                    span: tag.span.into(),
                }
            })?),
            None => None,
        };

        Ok(EnumDecl {
            name: self.interner.intern(&tag.name),
            scoping: shape.scoping,
            underlying,
            enumerators: Vec::new(),
            span: tag.span,
        })
    }

    fn lower_record(&mut self, tag: &TagDefinition) -> RecordDecl {
        let kind = if tag.kind == TagKind::Struct {
            RecordKind::Struct
        } else {
            RecordKind::Class
        };
        let bases = tag
            .inherits()
            .into_iter()
            .map(|base| BaseRef {
                name: self.interner.intern(base),
                span: tag.span,
            })
            .collect();
        RecordDecl {
            name: self.interner.intern(&tag.name),
            kind,
            bases,
            operations: Vec::new(),
            fields: Vec::new(),
            span: tag.span,
        }
    }

    fn lower_operation(&mut self, tag: &TagDefinition) -> OperationDecl {
        let pattern = tag.pattern.as_deref().unwrap_or("");
        let is_pure = tag.has_property("pure") || declares_pure(pattern);
        let is_virtual = is_pure || tag.has_property("virtual") || has_word(pattern, "virtual");
        let is_override = tag.has_property("override") || has_word(pattern, "override");
        // A prototype that is not `= 0` is defined out of line.
        let has_body = tag.kind == TagKind::Function || !is_pure;

        let params = match tag.signature() {
            Some(signature) => normalize_params(signature),
            None => normalize_params(&signature_from_pattern(pattern, &tag.name)),
        };

        OperationDecl {
            signature: OperationSignature {
                name: self.interner.intern(&tag.name),
                params: self.interner.intern(&params),
            },
            is_virtual,
            is_pure,
            is_override,
            has_body,
            span: tag.span,
        }
    }

    fn lower_field(&mut self, tag: &TagDefinition) -> FieldDecl {
        FieldDecl {
            name: self.interner.intern(&tag.name),
            ty: self.interner.intern(tag.typeref().unwrap_or("")),
            span: tag.span,
        }
    }
}

/// Tags whose position decides declaration, enumerator or member order
fn orders_declarations(tag: &TagDefinition) -> bool {
    match tag.kind {
        TagKind::Enum | TagKind::Class | TagKind::Struct => true,
        TagKind::Enumerator | TagKind::Function | TagKind::Prototype | TagKind::Member => {
            tag.scope().is_some()
        }
        _ => false,
    }
}

/// An in-class prototype and its out-of-line definition
fn is_declaration_pair(first: TagKind, second: TagKind) -> bool {
    matches!(
        (first, second),
        (TagKind::Prototype, TagKind::Function) | (TagKind::Function, TagKind::Prototype)
    )
}

/// Fold a prototype/definition pair into one operation with a body.
fn merge_definition(existing: &mut OperationDecl, other: OperationDecl, other_kind: TagKind) {
    existing.is_virtual |= other.is_virtual;
    existing.is_pure |= other.is_pure;
    existing.is_override |= other.is_override;
    existing.has_body = true;
    // report against the declaration inside the class body
    if other_kind == TagKind::Prototype {
        existing.span = other.span;
    }
}

/// Look a scope up by its full name, then by its last `::` segment.
fn lookup_scope(index: &FxHashMap<&str, usize>, scope: &str) -> Option<usize> {
    index.get(scope).copied().or_else(|| {
        scope
            .rsplit_once("::")
            .and_then(|(_, last)| index.get(last).copied())
    })
}

/// What an enum's declaration line says about it
struct EnumShape<'a> {
    scoping: EnumScoping,
    underlying: Option<&'a str>,
}

impl<'a> EnumShape<'a> {
    fn read(pattern: &'a str, name: &str) -> Self {
        let after_keyword = pattern
            .match_indices("enum")
            .find(|(at, _)| {
                let before_ok = pattern[..*at]
                    .chars()
                    .next_back()
                    .is_none_or(|c| !is_ident_char(c));
                let after_ok = pattern[at + 4..]
                    .chars()
                    .next()
                    .is_some_and(char::is_whitespace);
                before_ok && after_ok
            })
            .map(|(at, _)| &pattern[at + 4..])
            .unwrap_or(pattern);

        let trimmed = after_keyword.trim_start();
        let scoped_rest = ["class", "struct"].iter().find_map(|kw| {
            trimmed
                .strip_prefix(kw)
                .filter(|rest| rest.starts_with(char::is_whitespace))
        });
        let (scoping, rest) = match scoped_rest {
            Some(rest) => (EnumScoping::Scoped, rest),
            None => (EnumScoping::Unscoped, trimmed),
        };

        let header = find_word(rest, name)
            .map(|at| &rest[at + name.len()..])
            .unwrap_or("");
        let header = header
            .split(['{', ';'])
            .next()
            .unwrap_or("")
            .trim();
        let underlying = header
            .strip_prefix(':')
            .filter(|rest| !rest.starts_with(':'))
            .map(str::trim)
            .filter(|spelling| !spelling.is_empty());

        EnumShape {
            scoping,
            underlying,
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offset of `word` where it stands as a whole identifier
fn find_word(text: &str, word: &str) -> Option<usize> {
    text.match_indices(word).map(|(at, _)| at).find(|at| {
        let before_ok = text[..*at]
            .chars()
            .next_back()
            .is_none_or(|c| !is_ident_char(c));
        let after_ok = text[at + word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_char(c));
        before_ok && after_ok
    })
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !is_ident_char(c)).any(|w| w == word)
}

/// `= 0` after the parameter list
fn declares_pure(pattern: &str) -> bool {
    let Some(close) = pattern.rfind(')') else {
        return false;
    };
    let tail: String = pattern[close + 1..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    tail.contains("=0")
}

/// Recover `(params) qualifiers` from a declaration line when the tag has
/// no `signature` field.
fn signature_from_pattern(pattern: &str, name: &str) -> String {
    let Some(start) = pattern
        .match_indices(name)
        .map(|(at, _)| at + name.len())
        .find(|end| pattern[*end..].trim_start().starts_with('('))
    else {
        return String::from("()");
    };
    let rest = pattern[start..].trim_start();

    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return String::from("()");
    };

    let params = &rest[..=close];
    let qualifiers = rest[close + 1..]
        .split(['{', ';', '=', ':'])
        .next()
        .unwrap_or("")
        .split_whitespace()
        .filter(|word| !matches!(*word, "override" | "final"))
        .collect::<Vec<_>>()
        .join(" ");

    if qualifiers.is_empty() {
        params.to_string()
    } else {
        format!("{params} {qualifiers}")
    }
}
