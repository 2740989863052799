//! Sheet Writer
//!
//! 見出し付きテーブルをワークシートに書き込む。

use rust_xlsxwriter::{ColNum, Format, RowNum, Worksheet};

use crate::error::JsonToXlsxError;
use crate::report::Table;
use crate::types::CellValue;

/// テーブルをワークシートに書き込む
///
/// 1行目に見出し、2行目以降にデータ行を書き込みます。
/// 空セルは何も書き込まずに空欄のままにします。
pub fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
) -> Result<(), JsonToXlsxError> {
    for (col, header) in (0..).zip(&table.headers) {
        worksheet.write_string_with_format(0, col, *header, header_format)?;
    }

    for (row, cells) in (1..).zip(&table.rows) {
        for (col, cell) in (0..).zip(cells) {
            write_cell(worksheet, row, col, cell)?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &CellValue,
) -> Result<(), JsonToXlsxError> {
    match cell {
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Empty => {}
    }
    Ok(())
}
