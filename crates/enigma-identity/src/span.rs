// span.rs
//
// Source location span for diagnostics.

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize, // Byte offset
    pub end: usize,   // Byte offset (exclusive)
    pub line: u32,    // Start line (1-indexed, 0 when unknown)
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Span that only knows its line, e.g. a declaration built in memory
    pub fn at_line(line: u32) -> Self {
        Self {
            start: 0,
            end: 0,
            line,
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        // miette uses (offset, length)
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

impl From<&Span> for miette::SourceSpan {
    fn from(span: &Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}
