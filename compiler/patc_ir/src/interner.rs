//! String interner for identifiers appearing in patterns.
//!
//! A single `RwLock`-guarded table; interning takes the write lock only on a
//! miss. Strings are leaked so lookups can hand out `&'static str`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "interner exceeded capacity: {count} strings")
            }
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct Table {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Identifier interner.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    pub fn new() -> Self {
        let mut table = Table::default();
        table.map.insert("", Name::EMPTY);
        table.strings.push("");
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern `s`, or report overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }

        let mut table = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return Ok(name);
        }

        let count = table.strings.len();
        let raw = u32::try_from(count).map_err(|_| InternError::Overflow { count })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics after `u32::MAX` distinct strings. Use [`Self::try_intern`] to
    /// handle that case.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for `name`. Unknown names map to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
