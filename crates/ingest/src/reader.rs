use crate::error::IngestError;
use core_types::{CountryTable, TransactionRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One row of the trade extract, named after the BACI column headers.
/// Extra columns in the file are ignored.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    t: i32,
    i: u32,
    j: u32,
    k: u32,
    v: Decimal,
    q: Decimal,
}

/// One row of the country-code reference table. The code column is aligned
/// to the extract's `j` join key at load time.
#[derive(Debug, Deserialize)]
struct RawCountry {
    country_code: u32,
    country_name: String,
}

/// Loads the transaction extract from `path`.
///
/// A missing or unreadable file maps to `IngestError::DataUnavailable`, the
/// recoverable signal the presentation layer turns into a user-facing
/// message.
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>, IngestError> {
    let file =
        File::open(path).map_err(|_| IngestError::DataUnavailable(path.to_path_buf()))?;
    let records = read_transactions(BufReader::new(file)).map_err(|source| {
        IngestError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!(path = %path.display(), rows = records.len(), "Loaded transaction extract");
    Ok(records)
}

/// Loads the country reference table from `path`.
///
/// Fails if the table contains a duplicate code: unique keys are what
/// guarantee the downstream left join preserves cardinality.
pub fn load_country_table(path: &Path) -> Result<CountryTable, IngestError> {
    let file =
        File::open(path).map_err(|_| IngestError::DataUnavailable(path.to_path_buf()))?;
    let entries = read_countries(BufReader::new(file)).map_err(|source| {
        IngestError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let table = CountryTable::from_entries(entries)?;
    tracing::info!(path = %path.display(), entries = table.len(), "Loaded country reference table");
    Ok(table)
}

fn read_transactions<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize::<RawTransaction>() {
        let raw = row?;
        records.push(TransactionRecord {
            year: raw.t,
            exporter: raw.i,
            importer: raw.j,
            product: raw.k,
            value: raw.v,
            quantity: raw.q,
        });
    }
    Ok(records)
}

fn read_countries<R: Read>(reader: R) -> Result<Vec<(u32, String)>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in rdr.deserialize::<RawCountry>() {
        let raw = row?;
        entries.push((raw.country_code, raw.country_name));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn parses_transaction_rows() {
        let data = "t,i,j,k,v,q\n2023,410,1,852352,100,10\n2023,410,2,852352,50.5,5\n";
        let records = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2023);
        assert_eq!(records[0].exporter, 410);
        assert_eq!(records[0].importer, 1);
        assert_eq!(records[0].product, 852352);
        assert_eq!(records[0].value, Decimal::from(100));
        assert_eq!(records[1].value, Decimal::new(505, 1));
    }

    #[test]
    fn ignores_extra_columns() {
        let data = "t,i,j,k,v,q,extra\n2023,410,1,852352,100,10,whatever\n";
        let records = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, Decimal::from(10));
    }

    #[test]
    fn parses_country_rows_with_extra_columns() {
        let data = "country_code,country_name,country_iso3\n1,Alpha,ALP\n2,Beta,BET\n";
        let entries = read_countries(data.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![(1, "Alpha".to_string()), (2, "Beta".to_string())]
        );
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load_transactions(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, IngestError::DataUnavailable(_)));
    }

    #[test]
    fn malformed_rows_are_reported() {
        let data = "t,i,j,k,v,q\nnot-a-year,410,1,852352,100,10\n";
        let err = read_transactions(data.as_bytes()).unwrap_err();
        assert!(matches!(err.kind(), csv::ErrorKind::Deserialize { .. }));
    }
}
