// intern.rs
//
// String interning for Symbol IDs.

use crate::Symbol;
use rustc_hash::FxHashMap;

/// Interns strings to unique Symbol IDs
#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: FxHashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(sym) = self.map.get(s) {
            return *sym;
        }
        let sym = Symbol::new(self.strings.len() as u32);
        self.strings.push(s.to_string());
        self.map.insert(s.to_string(), sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.index() as usize]
    }

    /// Returns the number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Look up a string to get its symbol, if it has been interned.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_symbol() {
        let mut interner = Interner::new();
        let s1 = interner.intern("Test");
        let s2 = interner.intern("Test");
        let s3 = interner.intern("SubTest");

        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_returns_original_string() {
        let mut interner = Interner::new();
        let sym = interner.intern("EC_First");
        assert_eq!(interner.resolve(sym), "EC_First");
        assert_eq!(interner.lookup("EC_First"), Some(sym));
        assert_eq!(interner.lookup("EC_Second"), None);
    }
}
