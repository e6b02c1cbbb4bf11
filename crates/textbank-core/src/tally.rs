use std::collections::BTreeMap;

/// A counter keyed by string, used for the various breakdown reports.
///
/// Reads of absent keys are zero; iteration is in sorted key order so
/// report output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<String, u64>);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to the count for `key`, inserting it on first sight.
    pub fn bump(&mut self, key: impl Into<String>) {
        *self.0.entry(key.into()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
