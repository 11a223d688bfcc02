use std::fmt;

/// Codes for every diagnostic this workspace produces.
///
/// - E3xxx: pattern errors
/// - W3xxx: pattern warnings
/// - E5xxx: branch lowering errors
/// - E9xxx: internal errors
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    // Pattern errors (E3xxx)
    /// Variable declared where bindings cannot escape
    E3001,
    /// Deconstructor function lacks the `deconstructor` modifier
    E3002,
    /// Type test against an erased generic type
    E3003,
    /// Type call resolves to neither a deconstructor nor a type
    E3004,
    /// No `componentN` accessor for a positional entry
    E3005,
    /// No property for a named entry
    E3006,
    /// List deconstruction on a non-iterable subject
    E3007,
    /// Value or type can never match the subject
    E3008,
    /// Unresolved type reference
    E3009,
    /// Positional tuple entry after a named one
    E3010,
    /// Named entry inside a list deconstruction
    E3011,
    /// Tail entry outside the last list position
    E3012,
    /// Pattern used where a boolean condition is expected
    E3013,
    /// `when` condition kind not supported here
    E3014,

    // Pattern warnings (W3xxx)
    /// `is like` check that always succeeds
    W3001,
    /// Type test that is always true
    W3002,
    /// Deconstruction that checks and binds nothing
    W3003,
    /// Binding shadows a name from an outer scope
    W3004,

    // Branch lowering (E5xxx)
    /// Comparison token not supported for operand kind
    E5001,
    /// Temporary slot released out of order
    E5002,

    // Internal (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        ErrorCode::E3009,
        ErrorCode::E3010,
        ErrorCode::E3011,
        ErrorCode::E3012,
        ErrorCode::E3013,
        ErrorCode::E3014,
        ErrorCode::W3001,
        ErrorCode::W3002,
        ErrorCode::W3003,
        ErrorCode::W3004,
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E3012 => "E3012",
            ErrorCode::E3013 => "E3013",
            ErrorCode::E3014 => "E3014",
            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::W3003 => "W3003",
            ErrorCode::W3004 => "W3004",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// E3xxx and W3xxx.
    pub fn is_pattern_code(&self) -> bool {
        self.as_str()[1..].starts_with('3')
    }

    pub fn is_codegen_error(&self) -> bool {
        matches!(self, ErrorCode::E5001 | ErrorCode::E5002)
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive lookup over [`ErrorCode::ALL`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
