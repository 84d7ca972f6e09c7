// errors.rs
//! Semantic model errors (E3xxx) and warnings (W3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("'{name}' is declared more than once in the same scope")]
    #[diagnostic(code(E3001))]
    DuplicateDeclaration {
        name: String,
        #[label("redeclared here")]
        span: SourceSpan,
        #[label("first declared here")]
        first: SourceSpan,
    },

    #[error("enumerator '{enumerator}' appears more than once in enum '{enum_name}'")]
    #[diagnostic(code(E3002))]
    DuplicateEnumerator {
        enum_name: String,
        enumerator: String,
        #[label("duplicate enumerator")]
        span: SourceSpan,
        #[label("first listed here")]
        first: SourceSpan,
    },

    #[error("base '{base}' of '{record}' does not name a known record")]
    #[diagnostic(
        code(E3003),
        help("declare '{base}' in the same declaration set")
    )]
    UnknownBase {
        record: String,
        base: String,
        #[label("unknown base")]
        span: SourceSpan,
    },

    #[error("'{record}' inherits from more than one base ({bases})")]
    #[diagnostic(
        code(E3004),
        help("only single inheritance is modelled")
    )]
    MultipleInheritanceUnsupported {
        record: String,
        bases: String,
        #[label("multiple bases")]
        span: SourceSpan,
    },

    #[error("inheritance cycle through '{record}': {path}")]
    #[diagnostic(code(E3005))]
    CyclicInheritance {
        record: String,
        path: String,
        #[label("this record is its own ancestor")]
        span: SourceSpan,
    },

    #[error("'{record}' is not concrete; unresolved: {missing}")]
    #[diagnostic(
        code(E3006),
        help("a derived type must provide a body for every listed operation")
    )]
    NotConcrete {
        record: String,
        missing: String,
        #[label("cannot be instantiated")]
        span: SourceSpan,
    },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SemanticWarning {
    #[error("'{record}::{operation}' is marked override but overrides nothing")]
    #[diagnostic(
        code(W3001),
        severity(Warning),
        help("no ancestor declares a virtual '{operation}'")
    )]
    OverrideWithoutTarget {
        record: String,
        operation: String,
        #[label("nothing to override")]
        span: SourceSpan,
    },
}
