//! Runtime values seen by the matcher.

use patc_ir::Name;

#[derive(Clone, Debug, PartialEq)]
pub enum MatchValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<MatchValue>),
    /// An instance of `class`. `components` back `componentN()` (1-based);
    /// `properties` back record-style `name = ...` entries.
    Object {
        class: Name,
        components: Vec<MatchValue>,
        properties: Vec<(Name, MatchValue)>,
    },
}

impl MatchValue {
    pub fn list(items: impl IntoIterator<Item = MatchValue>) -> Self {
        MatchValue::List(items.into_iter().collect())
    }

    /// `componentN()`, with `index` counted from 1.
    pub fn component(&self, index: usize) -> Option<&MatchValue> {
        match self {
            MatchValue::Object { components, .. } => {
                index.checked_sub(1).and_then(|i| components.get(i))
            }
            _ => None,
        }
    }

    pub fn property(&self, name: Name) -> Option<&MatchValue> {
        match self {
            MatchValue::Object { properties, .. } => properties
                .iter()
                .find_map(|(n, value)| (*n == name).then_some(value)),
            _ => None,
        }
    }

    /// The values an iteration over `self` yields.
    pub fn iter_items(&self) -> Option<&[MatchValue]> {
        match self {
            MatchValue::List(items) => Some(items),
            _ => None,
        }
    }
}
