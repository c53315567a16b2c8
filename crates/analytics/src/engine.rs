use crate::error::AnalyticsError;
use crate::report::{
    AnalysisDataset, AnalysisParams, ExportMatrix, ImporterTotal, TradeSummary, YearlyTotal,
};
use core_types::{CountryTable, EnrichedRecord, TransactionRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A stateless calculator that turns a raw transaction extract into the
/// derived tables the presentation layers consume.
#[derive(Debug, Default)]
pub struct AggregationEngine {}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: runs the full pipeline (filter, join, year
    /// synthesis, aggregations, top-N pivot) for one parameter set.
    ///
    /// # Arguments
    ///
    /// * `transactions` - The full loaded extract.
    /// * `countries` - The reference table (unique keys enforced at
    ///   construction, so the join cannot change cardinality).
    /// * `params` - Product code, year range, seed and top-N cutoff.
    pub fn analyze(
        &self,
        transactions: &[TransactionRecord],
        countries: &CountryTable,
        params: &AnalysisParams,
    ) -> Result<AnalysisDataset, AnalyticsError> {
        let mut records = self.filter_and_join(transactions, params.product, countries);
        self.synthesize_years(&mut records, params.year_min, params.year_max, params.seed)?;

        let summary = self.summary(&records);
        let yearly = self.yearly_totals(&records);
        let importers = self.importer_totals(&records);
        let matrix = self.top_matrix(&records, &importers, params.top_n);

        tracing::debug!(
            records = records.len(),
            importers = importers.len(),
            matrix_rows = matrix.importers.len(),
            "Analysis pass complete"
        );

        Ok(AnalysisDataset {
            records,
            summary,
            yearly,
            importers,
            matrix,
        })
    }

    /// Keeps only records for `product` and left-joins each survivor to the
    /// reference table. Output cardinality equals input cardinality after
    /// the filter; an unresolved code yields `importer_name: None`.
    pub fn filter_and_join(
        &self,
        transactions: &[TransactionRecord],
        product: u32,
        countries: &CountryTable,
    ) -> Vec<EnrichedRecord> {
        transactions
            .iter()
            .filter(|tx| tx.product == product)
            .map(|tx| EnrichedRecord {
                year: tx.year,
                exporter: tx.exporter,
                importer_name: countries.name_for(tx.importer).map(String::from),
                product: tx.product,
                value: tx.value,
                quantity: tx.quantity,
            })
            .collect()
    }

    /// Overwrites each record's year with an independent uniform draw from
    /// `[year_min, year_max]`. The original year is not retained.
    ///
    /// With `seed: Some(_)` the draw sequence is bit-identical across runs;
    /// with `None` it is entropy-seeded. The choice is the caller's, via
    /// configuration.
    pub fn synthesize_years(
        &self,
        records: &mut [EnrichedRecord],
        year_min: i32,
        year_max: i32,
        seed: Option<u64>,
    ) -> Result<(), AnalyticsError> {
        if year_min > year_max {
            return Err(AnalyticsError::InvalidYearRange {
                min: year_min,
                max: year_max,
            });
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for record in records.iter_mut() {
            record.year = rng.gen_range(year_min..=year_max);
        }
        Ok(())
    }

    /// Headline metrics. The average unit price is undefined (not infinite,
    /// not an error) when the total quantity is zero.
    pub fn summary(&self, records: &[EnrichedRecord]) -> TradeSummary {
        let total_value: Decimal = records.iter().map(|r| r.value).sum();
        let total_quantity: Decimal = records.iter().map(|r| r.quantity).sum();
        let average_unit_price = if total_quantity.is_zero() {
            None
        } else {
            Some(total_value / total_quantity)
        };

        TradeSummary {
            record_count: records.len(),
            total_value,
            total_quantity,
            average_unit_price,
        }
    }

    /// Groups by year and sums value, ascending year order.
    pub fn yearly_totals(&self, records: &[EnrichedRecord]) -> Vec<YearlyTotal> {
        let mut groups: BTreeMap<i32, Decimal> = BTreeMap::new();
        for record in records {
            *groups.entry(record.year).or_insert(Decimal::ZERO) += record.value;
        }
        groups
            .into_iter()
            .map(|(year, total_value)| YearlyTotal { year, total_value })
            .collect()
    }

    /// Groups by importer name and sums value and quantity, descending by
    /// summed value.
    ///
    /// Groups are accumulated in key order (null bucket first, then name
    /// order) before the stable descending sort, so equal totals keep a
    /// deterministic order for any input ordering. Records with no importer
    /// name form their own bucket; nothing is dropped.
    pub fn importer_totals(&self, records: &[EnrichedRecord]) -> Vec<ImporterTotal> {
        let mut groups: BTreeMap<Option<String>, (Decimal, Decimal)> = BTreeMap::new();
        for record in records {
            let entry = groups
                .entry(record.importer_name.clone())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += record.value;
            entry.1 += record.quantity;
        }

        let mut totals: Vec<ImporterTotal> = groups
            .into_iter()
            .map(|(importer, (total_value, total_quantity))| ImporterTotal {
                importer,
                total_value,
                total_quantity,
                unit_price: if total_quantity.is_zero() {
                    None
                } else {
                    Some(total_value / total_quantity)
                },
            })
            .collect();

        totals.sort_by(|a, b| b.total_value.cmp(&a.total_value));
        totals
    }

    /// Builds the importer × year pivot over the `top_n` highest-ranked
    /// importers from `ranking`. Rows stay in ranking order; columns are
    /// the distinct years among the retained records, ascending; absent
    /// cells hold zero. Fewer than `top_n` distinct importers means fewer
    /// rows, no padding.
    pub fn top_matrix(
        &self,
        records: &[EnrichedRecord],
        ranking: &[ImporterTotal],
        top_n: usize,
    ) -> ExportMatrix {
        let importers: Vec<Option<String>> = ranking
            .iter()
            .take(top_n)
            .map(|total| total.importer.clone())
            .collect();
        if importers.is_empty() {
            return ExportMatrix::default();
        }

        let row_index: HashMap<&Option<String>, usize> = importers
            .iter()
            .enumerate()
            .map(|(row, importer)| (importer, row))
            .collect();

        let retained: Vec<&EnrichedRecord> = records
            .iter()
            .filter(|r| row_index.contains_key(&r.importer_name))
            .collect();

        let years: Vec<i32> = retained
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let col_index: HashMap<i32, usize> = years
            .iter()
            .enumerate()
            .map(|(col, &year)| (year, col))
            .collect();

        let mut cells = vec![vec![Decimal::ZERO; years.len()]; importers.len()];
        for record in retained {
            let row = row_index[&record.importer_name];
            let col = col_index[&record.year];
            cells[row][col] += record.value;
        }

        ExportMatrix {
            importers,
            years,
            cells,
        }
    }
}
