//! ctags input adapter.
//!
//! A tags file is produced by an external indexer; this module reads its
//! records and lowers the enum/class/member subset into declaration nodes.

mod lower;
mod tag_definition;
mod tag_file;

pub use lower::TagLowering;
pub use tag_definition::TagDefinition;
pub use tag_file::TagFile;

/// Kind of a tag record, as written by ctags for C-family sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Macro,
    Enumerator,
    Function,
    Enum,
    HeaderInclude,
    LocalVariable,
    Member,
    Prototype,
    Struct,
    Typedef,
    Union,
    Variable,
    ExternVariable,
    Parameter,
    Label,
    Class,
    Namespace,
    NamespaceAlias,
    UsingName,
    File,
    Unknown,
}

impl TagKind {
    /// Decode a one-letter kind column.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'd' => TagKind::Macro,
            'e' => TagKind::Enumerator,
            'f' => TagKind::Function,
            'g' => TagKind::Enum,
            'h' => TagKind::HeaderInclude,
            'l' => TagKind::LocalVariable,
            'm' => TagKind::Member,
            'p' => TagKind::Prototype,
            's' => TagKind::Struct,
            't' => TagKind::Typedef,
            'u' => TagKind::Union,
            'v' => TagKind::Variable,
            'x' => TagKind::ExternVariable,
            'z' => TagKind::Parameter,
            'L' => TagKind::Label,
            'c' => TagKind::Class,
            'n' => TagKind::Namespace,
            'A' => TagKind::NamespaceAlias,
            'N' | 'U' => TagKind::UsingName,
            'F' => TagKind::File,
            _ => TagKind::Unknown,
        }
    }

    /// Decode a long kind name (`--fields=+K`).
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "macro" => TagKind::Macro,
            "enumerator" | "enum_value" => TagKind::Enumerator,
            "function" => TagKind::Function,
            "enum" => TagKind::Enum,
            "header" | "header_include" => TagKind::HeaderInclude,
            "local" | "local_variable" => TagKind::LocalVariable,
            "member" => TagKind::Member,
            "prototype" | "function_prototype" => TagKind::Prototype,
            "struct" => TagKind::Struct,
            "typedef" => TagKind::Typedef,
            "union" => TagKind::Union,
            "variable" => TagKind::Variable,
            "externvar" => TagKind::ExternVariable,
            "parameter" | "function_parameter" => TagKind::Parameter,
            "label" | "goto_label" => TagKind::Label,
            "class" => TagKind::Class,
            "namespace" => TagKind::Namespace,
            "alias" | "namespace_alias" => TagKind::NamespaceAlias,
            "name" | "using" => TagKind::UsingName,
            "file" => TagKind::File,
            _ => TagKind::Unknown,
        }
    }

    /// Decode a kind column that may be either form.
    pub fn parse(column: &str) -> Self {
        let mut chars = column.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => Self::from_name(column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_names_agree() {
        for (letter, name) in [
            ('g', "enum"),
            ('e', "enumerator"),
            ('c', "class"),
            ('s', "struct"),
            ('f', "function"),
            ('p', "prototype"),
            ('m', "member"),
        ] {
            assert_eq!(TagKind::from_letter(letter), TagKind::from_name(name));
        }
    }

    #[test]
    fn parse_accepts_both_forms() {
        assert_eq!(TagKind::parse("c"), TagKind::Class);
        assert_eq!(TagKind::parse("class"), TagKind::Class);
        assert_eq!(TagKind::parse("Class"), TagKind::Class);
        assert_eq!(TagKind::parse("?"), TagKind::Unknown);
    }
}
