use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// A symbol name interned in the process-wide string interner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedSymbol(DefaultSymbol);

impl InternedSymbol {
    /// Intern a string and return its symbol
    pub fn new(s: &str) -> Self {
        let mut interner = INTERNER.write().unwrap_or_else(PoisonError::into_inner);
        InternedSymbol(interner.get_or_intern(s))
    }

    /// Resolve the symbol back to an owned name
    pub fn resolve(&self) -> String {
        self.with_str(str::to_owned)
    }

    /// Run `f` against the symbol's name without allocating
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap_or_else(PoisonError::into_inner);
        // Every InternedSymbol is minted by this interner, so resolution cannot miss.
        f(interner.resolve(self.0).unwrap_or_default())
    }

    pub fn is(&self, name: &str) -> bool {
        self.with_str(|s| s == name)
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| write!(f, "{s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string_returns_same_symbol() {
        assert_eq!(InternedSymbol::new("square"), InternedSymbol::new("square"));
    }

    #[test]
    fn test_intern_different_strings_returns_different_symbols() {
        assert_ne!(InternedSymbol::new("car"), InternedSymbol::new("cdr"));
    }

    #[test]
    fn test_resolve_and_is() {
        let sym = InternedSymbol::new("zero?");
        assert_eq!(sym.resolve(), "zero?");
        assert!(sym.is("zero?"));
        assert!(!sym.is("null?"));
    }

    #[test]
    fn test_display() {
        let sym = InternedSymbol::new("eq?");
        assert_eq!(format!("{sym}"), "eq?");
    }
}
