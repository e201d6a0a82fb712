use std::path::Path;

use album_core::Collection;

use crate::error::StoreError;

/// Header row of the record store. Part of the on-disk contract.
pub const STORE_HEADER: [&str; 2] = ["sticker_number", "amount"];

/// A loaded collection plus how many malformed rows were skipped.
/// Malformed-record tolerance is deliberate: a bad row is dropped, not
/// fatal.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub collection: Collection,
    pub skipped_rows: usize,
}

/// Read the full store. A missing file yields an empty collection; the
/// store itself is created with a header on first save.
pub fn load(path: &Path) -> Result<LoadReport, StoreError> {
    if !path.exists() {
        return Ok(LoadReport::default());
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Io(format!("cannot read {}: {e}", path.display())))?;
    Ok(parse_records(&data))
}

/// Parse a peer collection fetched from elsewhere. Same tabular shape,
/// same malformed-row tolerance as the local store.
pub fn parse_peer(data: &str) -> LoadReport {
    parse_records(data)
}

fn parse_records(data: &str) -> LoadReport {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut collection = Collection::new();
    let mut skipped_rows = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        let id = record.get(0).and_then(|f| f.trim().parse::<u32>().ok());
        let count = record.get(1).and_then(|f| f.trim().parse::<u32>().ok());
        match (id, count) {
            // A stored count below 1 is malformed, not "owned zero times".
            (Some(id), Some(count)) if count >= 1 => collection.set_count(id, count),
            _ => skipped_rows += 1,
        }
    }

    LoadReport {
        collection,
        skipped_rows,
    }
}

/// Write the full collection, header first, one row per owned id in
/// ascending order, overwriting any prior content. The new content is
/// built in a sibling temp file and renamed over the store in one step,
/// so a failed write never leaves a half-written store behind.
/// Saving the same in-memory collection twice is byte-identical.
pub fn save(path: &Path, collection: &Collection) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::Io(format!("invalid store path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&tmp_path)
        .map_err(|e| StoreError::Io(format!("cannot create {}: {e}", tmp_path.display())))?;

    writer
        .write_record(STORE_HEADER)
        .map_err(|e| StoreError::Write(e.to_string()))?;
    for (id, count) in collection.iter() {
        writer
            .write_record([id.to_string(), count.to_string()])
            .map_err(|e| StoreError::Write(e.to_string()))?;
    }
    writer.flush().map_err(|e| StoreError::Write(e.to_string()))?;
    drop(writer);

    std::fs::rename(&tmp_path, path)
        .map_err(|e| StoreError::Io(format!("cannot replace {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        let data = "sticker_number,amount\n1,1\n5,3\n";
        let report = parse_records(data);
        assert_eq!(report.skipped_rows, 0);
        assert_eq!(report.collection.count_of(1), 1);
        assert_eq!(report.collection.count_of(5), 3);
        assert_eq!(report.collection.len(), 2);
    }

    #[test]
    fn malformed_rows_skipped_silently() {
        let data = "sticker_number,amount\n1,1\nabc,2\n3,xyz\n4\n5,0\n6,2\n";
        let report = parse_records(data);
        assert_eq!(report.skipped_rows, 4);
        assert_eq!(report.collection.count_of(1), 1);
        assert_eq!(report.collection.count_of(6), 2);
        assert_eq!(report.collection.len(), 2);
    }

    #[test]
    fn zero_count_row_is_malformed() {
        let report = parse_records("sticker_number,amount\n7,0\n");
        assert_eq!(report.skipped_rows, 1);
        assert!(!report.collection.contains(7));
    }

    #[test]
    fn header_only_store_is_empty() {
        let report = parse_records("sticker_number,amount\n");
        assert!(report.collection.is_empty());
        assert_eq!(report.skipped_rows, 0);
    }
}
