use crate::core::engine::DashboardView;
use crate::utils::error::{InsightError, Result};
use serde::Serialize;

/// 把圖表資料列輸出成 CSV，標題列就是圖例名稱
pub fn series_to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    write_delimited(rows, b',')
}

pub fn series_to_tsv<T: Serialize>(rows: &[T]) -> Result<String> {
    write_delimited(rows, b'\t')
}

pub fn view_to_json(view: &DashboardView<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

fn write_delimited<T: Serialize>(rows: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InsightError::IoError(e.into_error()))?;
    let output = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(output)
}
