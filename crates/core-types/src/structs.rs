use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single bilateral trade transaction row from a BACI-style extract.
///
/// The extract is pre-filtered to one reporting country, so `exporter` is
/// constant across a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Reporting year (column `t`).
    pub year: i32,
    /// Exporter country code (column `i`).
    pub exporter: u32,
    /// Importer country code (column `j`), the join key into the reference table.
    pub importer: u32,
    /// Harmonized System product code (column `k`).
    pub product: u32,
    /// Trade value in thousands of USD (column `v`).
    pub value: Decimal,
    /// Traded quantity in metric tons (column `q`).
    pub quantity: Decimal,
}

/// A transaction after the reference join: the raw importer code has been
/// replaced by the importer's display name.
///
/// `importer_name` is `None` when the code had no entry in the reference
/// table. Such records are not errors; they flow through aggregation as
/// their own bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub year: i32,
    pub exporter: u32,
    pub importer_name: Option<String>,
    pub product: u32,
    pub value: Decimal,
    pub quantity: Decimal,
}

/// The country-code reference table: importer code to display name.
///
/// Construction fails on a duplicate code. This is what guarantees that a
/// left join against the table can never multiply rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryTable {
    names: HashMap<u32, String>,
}

impl CountryTable {
    /// Builds the table from `(code, name)` pairs, rejecting duplicate codes.
    pub fn from_entries<I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (u32, String)>,
    {
        let mut names = HashMap::new();
        for (code, name) in entries {
            if names.insert(code, name).is_some() {
                return Err(CoreError::DuplicateCountryCode(code));
            }
        }
        Ok(Self { names })
    }

    /// Looks up the display name for an importer code.
    pub fn name_for(&self, code: u32) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_table_resolves_known_codes() {
        let table = CountryTable::from_entries([(1, "Alpha".to_string()), (2, "Beta".to_string())])
            .unwrap();
        assert_eq!(table.name_for(1), Some("Alpha"));
        assert_eq!(table.name_for(2), Some("Beta"));
        assert_eq!(table.name_for(9), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn country_table_rejects_duplicate_codes() {
        let result = CountryTable::from_entries([
            (1, "Alpha".to_string()),
            (1, "Alpha again".to_string()),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateCountryCode(1))));
    }
}
