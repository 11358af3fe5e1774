use std::collections::HashMap;

/// Case-fold a name, category or lookup key for comparison.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Interned identifier for a normalized name or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

/// Maps normalized strings to stable `Symbol`s. Filled once while the
/// knowledge base is built, read-only afterwards.
#[derive(Debug, Default)]
pub struct Interner {
    ids: HashMap<String, Symbol>,
}

impl Interner {
    pub fn intern(&mut self, raw: &str) -> Symbol {
        let key = normalize_key(raw);
        let next = Symbol(self.ids.len() as u32);
        *self.ids.entry(key).or_insert(next)
    }

    pub fn get(&self, raw: &str) -> Option<Symbol> {
        self.ids.get(&normalize_key(raw)).copied()
    }
}

/// Order-independent pair: `{a, b} == {b, a}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnorderedPair(Symbol, Symbol);

impl UnorderedPair {
    pub fn new(a: Symbol, b: Symbol) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}
