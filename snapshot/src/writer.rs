use std::{fs, path::Path};

use csv::{Terminator, WriterBuilder};
use tvl_common::CsvRow;

/// Writes `rows` to `path` behind a header row, creating parent directories
/// as needed. An empty slice still produces the header.
pub fn write_csv(path: &Path, rows: &[CsvRow]) -> crate::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| crate::Error::CreateDirAllFailed(parent.to_path_buf(), e))?;
    }

    let csv_error = |e: csv::Error| crate::Error::CsvWriteFailed(path.to_path_buf(), e);

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(csv_error)?;

    writer.write_record(CsvRow::HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| csv_error(csv::Error::from(e)))?;

    Ok(())
}
