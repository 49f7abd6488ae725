//! Canonical CSV writer for the alarm database importer.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConvertError, Result};
use crate::model::{CanonicalField, CanonicalRecord, SheetResult};

/// UTF-8 byte-order mark expected by the importer.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Output file name for a sheet's records.
pub fn output_file_name(sheet_name: &str) -> String {
    format!("数据库模板_{}.csv", sheet_name)
}

/// Render records as CSV: BOM, the 48 canonical headers, then one line per record.
pub fn generate_csv(records: &[CanonicalRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(CanonicalField::headers())?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer
        .into_inner()
        .map_err(|e| ConvertError::Io(e.into_error()))
}

/// Write one CSV per normalized sheet into `dir`.
///
/// Skipped sheets produce no file. Returns the written paths in sheet order.
pub fn write_sheet_csvs(dir: &Path, results: &[SheetResult]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for result in results.iter().filter(|r| r.is_normalized()) {
        let path = dir.join(output_file_name(&result.sheet_name));
        std::fs::write(&path, generate_csv(result.records())?)?;
        info!(
            "Wrote {} records to {}",
            result.records().len(),
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeConfig;
    use crate::model::RawSheet;
    use crate::pipeline::normalize_sheet;

    fn di_records() -> Vec<CanonicalRecord> {
        let sheet = RawSheet::from_strings("DI", &["点名"], &[vec!["断路器1分闸"]]);
        normalize_sheet(&sheet, &NormalizeConfig::default(), "1.1.11.3")
            .records()
            .to_vec()
    }

    #[test]
    fn test_csv_has_bom_and_headers() {
        let bytes = generate_csv(&di_records()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(header.len(), 48);
        assert_eq!(header[0], "实际测点地址");
        assert_eq!(header[24], "ACC测点名");
        assert_eq!(header[47], "屏蔽");
    }

    #[test]
    fn test_csv_row_values() {
        let bytes = generate_csv(&di_records()).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();

        assert_eq!(row.len(), 48);
        assert_eq!(row[0], "1.1.11.3.0");
        assert_eq!(row[1], "断路器1分闸");
        assert_eq!(row[2], "0.0");
        assert_eq!(row[3], "COM1");
        assert_eq!(row[4], "false");
        assert_eq!(row[15], "true");
        assert_eq!(row[24], "KGZ_DIN000");
        assert_eq!(row[27], "0");
        assert_eq!(row[32], "复归");
        assert_eq!(row[33], "动作");
    }

    #[test]
    fn test_empty_record_set_writes_header_only() {
        let bytes = generate_csv(&[]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_write_sheet_csvs_skips_skipped_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let config = NormalizeConfig::default();
        let results = vec![
            normalize_sheet(&RawSheet::from_strings("说明", &["a"], &[]), &config, "1"),
            normalize_sheet(
                &RawSheet::from_strings("DI", &["点名"], &[vec!["断路器1分闸"]]),
                &config,
                "1",
            ),
        ];

        let written = write_sheet_csvs(dir.path(), &results).unwrap();
        assert_eq!(written, vec![dir.path().join("数据库模板_DI.csv")]);
        assert!(written[0].exists());
    }
}
