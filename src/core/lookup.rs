//! Lookup table from (collector number, foil indicator) to quantity

use crate::types::CellValue;
use std::collections::HashMap;

/// Composite join key: trimmed card number plus foil indicator text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub number: String,
    pub foil: String,
}

impl LookupKey {
    /// Build a key, trimming surrounding whitespace from the number only.
    /// The foil indicator is kept verbatim.
    pub fn new(number: &str, foil: &str) -> Self {
        Self {
            number: number.trim().to_string(),
            foil: foil.to_string(),
        }
    }
}

/// Quantities keyed by [`LookupKey`]. Later inserts overwrite earlier ones.
#[derive(Debug, Default)]
pub struct LookupTable {
    entries: HashMap<LookupKey, CellValue>,
    overwritten: usize,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quantity, replacing any previous value for the same key
    pub fn insert(&mut self, key: LookupKey, quantity: CellValue) {
        if self.entries.insert(key, quantity).is_some() {
            self.overwritten += 1;
        }
    }

    pub fn get(&self, key: &LookupKey) -> Option<&CellValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserts that replaced an existing key
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
