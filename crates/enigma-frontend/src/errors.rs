// errors.rs
//! Tag input errors (E1xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum TagError {
    #[error("malformed tag line: {reason}")]
    #[diagnostic(
        code(E1001),
        help("expected `name<TAB>file<TAB>address;\"<TAB>kind<TAB>fields...`")
    )]
    MalformedLine {
        reason: String,
        #[label("cannot parse this tag")]
        span: SourceSpan,
    },

    #[error("invalid line number '{value}'")]
    #[diagnostic(code(E1002))]
    InvalidLineNumber {
        value: String,
        #[label("not a line number")]
        span: SourceSpan,
    },

    #[error("cannot determine the shape of enum '{name}'")]
    #[diagnostic(
        code(E1003),
        help("regenerate the tags file with pattern addresses (without `-n`)")
    )]
    UndeterminedEnumShape {
        name: String,
        #[label("no declaration pattern for this enum")]
        span: SourceSpan,
    },

    #[error("unsupported underlying type '{spelling}' for enum '{name}'")]
    #[diagnostic(
        code(E1004),
        help("underlying types must be integral: bool, char types, short, int, long or the <cstdint> aliases")
    )]
    UnsupportedUnderlyingType {
        name: String,
        spelling: String,
        #[label("unsupported storage type")]
        span: SourceSpan,
    },

    #[error("'{name}' is scoped to unknown {scope_kind} '{scope}'")]
    #[diagnostic(code(E1005))]
    OrphanMember {
        name: String,
        scope_kind: String,
        scope: String,
        #[label("no {scope_kind} named '{scope}' in this tags file")]
        span: SourceSpan,
    },

    #[error("'{name}' has no line number in a name-sorted tags file")]
    #[diagnostic(
        code(E1006),
        help("regenerate the tags file with `--fields=+n` so declaration order can be recovered")
    )]
    MissingLineNumbers {
        name: String,
        #[label("declaration order unknown")]
        span: SourceSpan,
    },
}
