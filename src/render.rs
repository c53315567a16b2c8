use analytics::{ExportMatrix, ImporterTotal, TradeSummary, YearlyTotal};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Label used for the bucket of records whose importer code had no
/// reference-table match.
const UNMATCHED: &str = "(unmatched)";

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn importer_label(importer: &Option<String>) -> String {
    importer.clone().unwrap_or_else(|| UNMATCHED.to_string())
}

fn numeric_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// The headline metrics block.
pub fn summary_table(summary: &TradeSummary) -> Table {
    let mut table = base_table(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Records"),
        numeric_cell(summary.record_count.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Total value ($1,000)"),
        numeric_cell(summary.total_value.round_dp(0).to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Total quantity (t)"),
        numeric_cell(summary.total_quantity.round_dp(1).to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Avg unit price ($/kg)"),
        numeric_cell(match summary.average_unit_price {
            Some(price) => price.round_dp(2).to_string(),
            None => "undefined".to_string(),
        }),
    ]);
    table
}

/// Value per year with each year's share of the total (the pie-chart view,
/// rendered as numbers).
pub fn yearly_table(yearly: &[YearlyTotal]) -> Table {
    let total: Decimal = yearly.iter().map(|y| y.total_value).sum();
    let mut table = base_table(vec!["Year", "Total value", "Share"]);
    for entry in yearly {
        let share = if total.is_zero() {
            "-".to_string()
        } else {
            format!(
                "{}%",
                (entry.total_value * Decimal::from(100) / total).round_dp(1)
            )
        };
        table.add_row(vec![
            Cell::new(entry.year.to_string()),
            numeric_cell(entry.total_value.round_dp(0).to_string()),
            numeric_cell(share),
        ]);
    }
    table
}

/// Per-importer totals, descending by value.
pub fn importer_table(importers: &[ImporterTotal]) -> Table {
    let mut table = base_table(vec!["Rank", "Importer", "Total value", "Quantity", "Unit price"]);
    for (rank, entry) in importers.iter().enumerate() {
        table.add_row(vec![
            numeric_cell((rank + 1).to_string()),
            Cell::new(importer_label(&entry.importer)),
            numeric_cell(entry.total_value.round_dp(0).to_string()),
            numeric_cell(entry.total_quantity.round_dp(2).to_string()),
            numeric_cell(match entry.unit_price {
                Some(price) => price.round_dp(2).to_string(),
                None => "undefined".to_string(),
            }),
        ]);
    }
    table
}

/// The importer × year heatmap matrix as a table, one column per year.
pub fn matrix_table(matrix: &ExportMatrix) -> Table {
    let mut header = vec!["Importer".to_string()];
    header.extend(matrix.years.iter().map(ToString::to_string));
    let mut table = base_table(header.iter().map(String::as_str).collect());

    for (row, importer) in matrix.importers.iter().enumerate() {
        let mut cells = vec![Cell::new(importer_label(importer))];
        cells.extend(
            matrix.cells[row]
                .iter()
                .map(|value| numeric_cell(value.round_dp(0).to_string())),
        );
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_table_labels_null_bucket() {
        let matrix = ExportMatrix {
            importers: vec![Some("Alpha".to_string()), None],
            years: vec![2020, 2021],
            cells: vec![
                vec![Decimal::from(10), Decimal::ZERO],
                vec![Decimal::ZERO, Decimal::from(5)],
            ],
        };
        let rendered = matrix_table(&matrix).to_string();
        assert!(rendered.contains("Alpha"));
        assert!(rendered.contains(UNMATCHED));
        assert!(rendered.contains("2021"));
    }

    #[test]
    fn yearly_table_handles_zero_total() {
        let yearly = vec![YearlyTotal {
            year: 2020,
            total_value: Decimal::ZERO,
        }];
        let rendered = yearly_table(&yearly).to_string();
        assert!(rendered.contains("2020"));
    }
}
