//! Node identifiers backed by a process-wide string interner.
//!
//! Graph nodes, positions and chart labels all refer to nodes through the
//! [`Id`] type. Interning keeps ids `Copy` and makes equality a symbol
//! comparison, which matters for the all-pairs loops in the layout engines.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Runs `f` with exclusive access to the global interner.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned identifier of a graph node.
///
/// # Examples
///
/// ```
/// use vantage_core::identifier::Id;
///
/// let hub = Id::new("HRHP");
/// let same: Id = "HRHP".into();
///
/// assert_eq!(hub, same);
/// assert_eq!(hub, "HRHP");
/// assert_eq!(hub.to_string(), "HRHP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns an owned copy of the identifier's text.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
