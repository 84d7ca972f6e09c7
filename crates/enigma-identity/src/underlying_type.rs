// underlying_type.rs
//
// Integral storage types an enumeration can be declared with.

use std::fmt;

/// Storage type backing an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderlyingType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl UnderlyingType {
    /// Storage used when a declaration does not name one.
    pub const DEFAULT: UnderlyingType = UnderlyingType::I32;

    /// Map a C-family type spelling onto a storage type.
    ///
    /// Plain `char` is treated as signed. `long` follows LP64.
    pub fn from_c_spelling(spelling: &str) -> Option<Self> {
        let normalized = spelling
            .split_whitespace()
            .filter(|word| *word != "int" || spelling.split_whitespace().count() == 1)
            .collect::<Vec<_>>()
            .join(" ");
        let normalized = normalized.trim_start_matches("std::");
        let ty = match normalized {
            "char" | "signed char" | "int8_t" => UnderlyingType::I8,
            "unsigned char" | "uint8_t" | "bool" | "char8_t" => UnderlyingType::U8,
            "short" | "signed short" | "int16_t" => UnderlyingType::I16,
            "unsigned short" | "uint16_t" | "char16_t" => UnderlyingType::U16,
            "int" | "signed" | "int32_t" | "wchar_t" => UnderlyingType::I32,
            "unsigned" | "uint32_t" | "char32_t" => UnderlyingType::U32,
            "long" | "signed long" | "long long" | "signed long long" | "int64_t" => {
                UnderlyingType::I64
            }
            "unsigned long" | "unsigned long long" | "uint64_t" => UnderlyingType::U64,
            _ => return None,
        };
        Some(ty)
    }

    pub fn size_bytes(self) -> u32 {
        match self {
            UnderlyingType::I8 | UnderlyingType::U8 => 1,
            UnderlyingType::I16 | UnderlyingType::U16 => 2,
            UnderlyingType::I32 | UnderlyingType::U32 => 4,
            UnderlyingType::I64 | UnderlyingType::U64 => 8,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            UnderlyingType::I8 | UnderlyingType::I16 | UnderlyingType::I32 | UnderlyingType::I64
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnderlyingType::I8 => "i8",
            UnderlyingType::I16 => "i16",
            UnderlyingType::I32 => "i32",
            UnderlyingType::I64 => "i64",
            UnderlyingType::U8 => "u8",
            UnderlyingType::U16 => "u16",
            UnderlyingType::U32 => "u32",
            UnderlyingType::U64 => "u64",
        }
    }
}

impl Default for UnderlyingType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for UnderlyingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
