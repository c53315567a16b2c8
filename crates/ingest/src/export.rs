use crate::error::IngestError;
use core_types::EnrichedRecord;

/// Serializes the filtered-and-enriched dataset back to CSV with the
/// `t,i,j,k,v,q` header, `j` carrying the importer name (empty when the
/// code was unresolved).
pub fn enriched_to_csv(records: &[EnrichedRecord]) -> Result<Vec<u8>, IngestError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["t", "i", "j", "k", "v", "q"])
        .map_err(|e| IngestError::Export(e.to_string()))?;

    for record in records {
        writer
            .write_record([
                record.year.to_string(),
                record.exporter.to_string(),
                record.importer_name.clone().unwrap_or_default(),
                record.product.to_string(),
                record.value.to_string(),
                record.quantity.to_string(),
            ])
            .map_err(|e| IngestError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| IngestError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn enriched(year: i32, name: Option<&str>, value: i64) -> EnrichedRecord {
        EnrichedRecord {
            year,
            exporter: 410,
            importer_name: name.map(String::from),
            product: 852352,
            value: Decimal::from(value),
            quantity: Decimal::from(1),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let records = vec![enriched(2021, Some("Alpha"), 100), enriched(2022, None, 50)];
        let bytes = enriched_to_csv(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("t,i,j,k,v,q"));
        assert_eq!(lines.next(), Some("2021,410,Alpha,852352,100,1"));
        assert_eq!(lines.next(), Some("2022,410,,852352,50,1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_dataset_exports_header_only() {
        let bytes = enriched_to_csv(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "t,i,j,k,v,q\n");
    }
}
