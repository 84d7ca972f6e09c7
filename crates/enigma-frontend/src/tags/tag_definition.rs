// tags/tag_definition.rs
//
// One record of a tags file.

use enigma_identity::Span;

use super::TagKind;
use crate::errors::TagError;

/// Scope kinds ctags writes as their own field key (`class:Test`).
const SCOPE_KEYS: [&str; 5] = ["class", "struct", "enum", "union", "namespace"];

/// A parsed tag record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
    pub file: String,
    /// Source text from a `/^...$/` address, unescaped
    pub pattern: Option<String>,
    /// 1-indexed source line, 0 when the record carries none
    pub line: u32,
    pub kind: TagKind,
    pub fields: Vec<(String, String)>,
    /// Location of the record inside the tags file
    pub span: Span,
}

impl TagDefinition {
    pub fn parse(record: &str, span: Span) -> Result<Self, TagError> {
        let malformed = |reason: &str| TagError::MalformedLine {
            reason: reason.to_string(),
            span: span.into(),
        };

        let mut columns = record.splitn(3, '\t');
        let name = columns
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| malformed("missing tag name"))?;
        let file = columns.next().ok_or_else(|| malformed("missing file column"))?;
        let rest = columns
            .next()
            .ok_or_else(|| malformed("missing address column"))?;

        let (address, extension) = split_address(rest).map_err(malformed)?;

        let mut tag = TagDefinition {
            name: name.to_string(),
            file: file.to_string(),
            pattern: None,
            line: 0,
            kind: TagKind::Unknown,
            fields: Vec::new(),
            span,
        };

        if let Some(pattern) = decode_pattern(address) {
            tag.pattern = Some(pattern);
        } else {
            tag.line = parse_line(address, span)?;
        }

        for column in extension.split('\t').filter(|c| !c.is_empty()) {
            match column.split_once(':') {
                Some(("kind", kind)) => tag.kind = TagKind::parse(kind),
                Some(("line", value)) => tag.line = parse_line(value, span)?,
                Some((key, value)) => tag.fields.push((key.to_string(), value.to_string())),
                None => tag.kind = TagKind::parse(column),
            }
        }

        Ok(tag)
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Enclosing scope as `(kind, name)`, e.g. `("class", "Test")`.
    pub fn scope(&self) -> Option<(&str, &str)> {
        for key in SCOPE_KEYS {
            if let Some(value) = self.field(key) {
                return Some((key, value));
            }
        }
        self.field("scope").and_then(|value| value.split_once(':'))
    }

    /// Entries of the comma-separated `properties` field.
    pub fn properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.field("properties")
            .into_iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.properties().any(|p| p == property)
    }

    pub fn signature(&self) -> Option<&str> {
        self.field("signature")
    }

    /// Type from `typeref:typename:int`, without the `typename:` prefix.
    pub fn typeref(&self) -> Option<&str> {
        self.field("typeref")
            .map(|value| value.split_once(':').map_or(value, |(_, ty)| ty))
    }

    /// Base names from `inherits:A,B`, with access specifiers dropped.
    pub fn inherits(&self) -> Vec<&str> {
        self.field("inherits")
            .into_iter()
            .flat_map(|value| value.split(','))
            .map(|base| {
                base.split_whitespace()
                    .filter(|word| !matches!(*word, "public" | "protected" | "private" | "virtual"))
                    .last()
                    .unwrap_or("")
            })
            .filter(|base| !base.is_empty())
            .collect()
    }
}

/// Split `address;"<TAB>extension` into its two halves.
fn split_address(rest: &str) -> Result<(&str, &str), &'static str> {
    let bytes = rest.as_bytes();
    let end = match bytes.first() {
        Some(&delimiter @ (b'/' | b'?')) => {
            let mut i = 1;
            loop {
                match bytes.get(i) {
                    None => return Err("unterminated search pattern"),
                    Some(b'\\') => i += 2,
                    Some(&b) if b == delimiter => break i + 1,
                    Some(_) => i += 1,
                }
            }
        }
        _ => rest
            .find(";\"")
            .or_else(|| rest.find('\t'))
            .unwrap_or(rest.len()),
    };
    let address = &rest[..end];
    let tail = &rest[end..];
    let extension = tail.strip_prefix(";\"").unwrap_or(tail);
    Ok((address, extension.trim_start_matches('\t')))
}

/// Turn `/^class Test {$/` into `class Test {`.
fn decode_pattern(address: &str) -> Option<String> {
    let delimiter = address.chars().next().filter(|c| *c == '/' || *c == '?')?;
    let body = address
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)
        .unwrap_or(&address[1..]);
    let body = body.strip_prefix('^').unwrap_or(body);
    let body = body.strip_suffix('$').unwrap_or(body);

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn parse_line(value: &str, span: Span) -> Result<u32, TagError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| TagError::InvalidLineNumber {
            value: value.to_string(),
            span: span.into(),
        })
}
