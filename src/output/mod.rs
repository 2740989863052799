//! Output Module
//!
//! 変換結果をXLSXワークブック（基本信息・角色信息の2シート）として出力するモジュール。

mod sheet;

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::error::JsonToXlsxError;
use crate::report::ProfileReport;

pub use sheet::write_table;

/// 見出し行の書式
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
}

/// 変換結果からワークブックを構築する
///
/// シートは`基本信息`、`角色信息`の順に追加されます。各シートは見出し行と
/// データ行のみで構成され、インデックス列は出力しません。
pub fn build_workbook(report: &ProfileReport) -> Result<Workbook, JsonToXlsxError> {
    let mut workbook = Workbook::new();
    let header = header_format();

    for table in report.tables() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.name)?;
        write_table(worksheet, &table, &header)?;
    }

    Ok(workbook)
}

/// 変換結果をXLSXファイルとして保存する
///
/// # 引数
///
/// * `report` - 変換結果
/// * `path` - 出力先のパス（既存ファイルは上書きされます）
///
/// # 戻り値
///
/// * `Ok(())` - 保存に成功した場合
/// * `Err(JsonToXlsxError::Xlsx)` - ワークブックの構築または保存に失敗した場合
pub fn write_report<P: AsRef<Path>>(report: &ProfileReport, path: P) -> Result<(), JsonToXlsxError> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// 変換結果をXLSXのバイト列に変換する
pub fn report_to_buffer(report: &ProfileReport) -> Result<Vec<u8>, JsonToXlsxError> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}
