use core_types::EnrichedRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters driving one analysis pass.
///
/// Also serves as (part of) the memoization key for the dashboard cache,
/// hence `Eq` + `Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Harmonized System product code to restrict the extract to.
    pub product: u32,
    /// Lower bound (inclusive) of the synthetic year range.
    pub year_min: i32,
    /// Upper bound (inclusive) of the synthetic year range.
    pub year_max: i32,
    /// RNG seed for year synthesis. `Some` makes runs bit-identical;
    /// `None` draws from entropy.
    pub seed: Option<u64>,
    /// How many top importers the pivot matrix keeps.
    pub top_n: usize,
}

/// Headline metrics over the whole enriched dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub record_count: usize,
    pub total_value: Decimal,
    pub total_quantity: Decimal,
    /// `None` when total quantity is zero; the average is undefined then,
    /// never infinite.
    pub average_unit_price: Option<Decimal>,
}

/// Total trade value for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total_value: Decimal,
}

/// Total trade value and quantity for one importer.
///
/// `importer` is `None` for the bucket of records whose code had no
/// reference-table match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImporterTotal {
    pub importer: Option<String>,
    pub total_value: Decimal,
    pub total_quantity: Decimal,
    /// `total_value / total_quantity`, `None` when the quantity is zero.
    pub unit_price: Option<Decimal>,
}

/// The importer × year pivot over the top-ranked importers.
///
/// Rows are in ranking order (highest total value first); columns are the
/// distinct years present among the retained records, ascending. Absent
/// (importer, year) combinations hold zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportMatrix {
    pub importers: Vec<Option<String>>,
    pub years: Vec<i32>,
    /// `cells[row][col]` = summed value for `importers[row]` in `years[col]`.
    pub cells: Vec<Vec<Decimal>>,
}

impl ExportMatrix {
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

/// The assembled output of one analysis pass: the enriched records plus
/// every derived table the presentation layers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDataset {
    pub records: Vec<EnrichedRecord>,
    pub summary: TradeSummary,
    pub yearly: Vec<YearlyTotal>,
    pub importers: Vec<ImporterTotal>,
    pub matrix: ExportMatrix,
}
