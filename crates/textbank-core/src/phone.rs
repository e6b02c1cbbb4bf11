use std::fmt;

/// A US phone number in E.164 form (`+1XXXXXXXXXX`).
///
/// All numbers that cross a boundary (CSV cells, API responses, database
/// rows) get canonicalized through here so that comparisons are exact
/// string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Canonicalizes a raw cell value: strips spaces, parens and dashes,
    /// keeps the last ten characters and prefixes `+1`.
    ///
    /// Idempotent: feeding an already-canonical number back in returns the
    /// same value.
    pub fn canonicalize(raw: &str) -> Self {
        let stripped: Vec<char> = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '(' | ')' | '-'))
            .collect();
        let start = stripped.len().saturating_sub(10);
        let tail: String = stripped[start..].iter().collect();
        Self(format!("+1{tail}"))
    }

    /// The three area-code digits, or an empty string when the value is too
    /// short to carry one.
    pub fn area_code(&self) -> &str {
        self.0.get(2..5).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Area code of an E.164 string without constructing a `PhoneNumber`.
///
/// Inventory listings come back from the API already canonical, so the
/// grouping path slices directly.
pub fn area_code_of(e164: &str) -> &str {
    e164.get(2..5).unwrap_or("")
}
