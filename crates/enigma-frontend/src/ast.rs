// ast.rs
//
// Declaration nodes handed to the model by an external parser.

use enigma_identity::{Interner, Span, Symbol, UnderlyingType};

/// An ordered list of top-level declarations
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub declarations: Vec<DeclNode>,
}

/// A top-level declaration
#[derive(Debug, Clone)]
pub enum DeclNode {
    Enum(EnumDecl),
    Record(RecordDecl),
}

impl DeclNode {
    pub fn name(&self) -> Symbol {
        match self {
            DeclNode::Enum(decl) => decl.name,
            DeclNode::Record(decl) => decl.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            DeclNode::Enum(decl) => decl.span,
            DeclNode::Record(decl) => decl.span,
        }
    }
}

/// Whether enumerators leak into the enclosing scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumScoping {
    /// `enum class`: enumerators only reachable as `Enum::Name`
    Scoped,
    /// plain `enum`: enumerators also reachable unqualified
    Unscoped,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: Symbol,
    pub scoping: EnumScoping,
    /// None when the source left the storage type implicit
    pub underlying: Option<UnderlyingType>,
    pub enumerators: Vec<Enumerator>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Enumerator {
    pub name: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Class,
    Struct,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Struct => "struct",
        }
    }
}

/// Class or struct declaration
#[derive(Debug, Clone)]
pub struct RecordDecl {
    pub name: Symbol,
    pub kind: RecordKind,
    /// Base names as written. More than one is rejected by the model.
    pub bases: Vec<BaseRef>,
    pub operations: Vec<OperationDecl>,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

/// A base reference by name, resolved later against the type graph
#[derive(Debug, Clone, Copy)]
pub struct BaseRef {
    pub name: Symbol,
    pub span: Span,
}

/// Identity of an operation: its name plus normalized parameter text
/// (including trailing qualifiers such as `const`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationSignature {
    pub name: Symbol,
    pub params: Symbol,
}

impl OperationSignature {
    pub fn display(&self, interner: &Interner) -> String {
        format!(
            "{}{}",
            interner.resolve(self.name),
            interner.resolve(self.params)
        )
    }
}

#[derive(Debug, Clone)]
pub struct OperationDecl {
    pub signature: OperationSignature,
    pub is_virtual: bool,
    /// Declared `= 0`
    pub is_pure: bool,
    /// Informational only; never consulted when discharging obligations
    pub is_override: bool,
    pub has_body: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: Symbol,
    /// Type as spelled by the source, empty when unknown
    pub ty: Symbol,
    pub span: Span,
}

/// Collapse whitespace in a parameter list so `( int a )const` and
/// `(int a) const` compare equal.
pub fn normalize_params(params: &str) -> String {
    let collapsed = params.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' => {
                out.push('(');
                if chars.peek() == Some(&' ') {
                    chars.next();
                }
            }
            ' ' if matches!(chars.peek(), Some(')') | Some(',')) => {}
            ')' => {
                out.push(')');
                if chars.peek().is_some_and(|next| *next != ' ') {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }
    if out.is_empty() {
        out.push_str("()");
    }
    out
}
