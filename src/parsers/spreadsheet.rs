//! # 电子表格读写
//!
//! 读取使用 `calamine`（按内容识别 xlsx/xls/xlsb/ods），
//! 写出使用 `rust_xlsxwriter`（仅 xlsx）。
//!
//! ## 约定
//! - 第一行为表头，其余为数据行
//! - 工作表左侧的空列保留为 `Unnamed: {i}` 列
//! - 写出时表头加粗加边框，工作表名为 `Sheet1`，不写行索引
//! - 日期时间写为带格式的日期单元格；超出 2^53 的整数写为文本
//!
//! ## 依赖关系
//! - 被 `commands/convert/` 使用
//! - 使用 `models/table.rs`

use crate::error::{Result, TabkitError};
use crate::models::{Cell, Table};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// f64 可精确表示的最大整数
const MAX_EXACT_INT: u64 = 1 << 53;

/// 读取电子表格文件
///
/// `sheet` 为 `None` 时读取第一个工作表。
pub fn parse_spreadsheet_file(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let bytes = fs::read(path).map_err(|e| TabkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_spreadsheet_bytes(bytes, sheet, &path.display().to_string())
}

/// 从内存字节解析电子表格
pub fn parse_spreadsheet_bytes(bytes: Vec<u8>, sheet: Option<&str>, label: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TabkitError::ParseError {
                format: "spreadsheet".to_string(),
                path: label.to_string(),
                reason: "Workbook contains no worksheets".to_string(),
            })??,
    };

    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> Table {
    // calamine 的区域从第一个非空单元格开始
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let pad = |cells: Vec<Cell>| -> Vec<Cell> {
        let mut row = vec![Cell::Empty; leading_cols];
        row.extend(cells);
        row
    };

    let mut rows = range.rows();

    let header: Vec<String> = match rows.next() {
        Some(first) => pad(first.iter().map(data_to_cell).collect())
            .iter()
            .map(header_name)
            .collect(),
        None => return Table::default(),
    };

    let body: Vec<Vec<Cell>> = rows
        .map(|row| pad(row.iter().map(data_to_cell).collect()))
        .collect();

    Table::new(header, body)
}

/// 表头单元格转列名，整数值的数字不带小数
fn header_name(cell: &Cell) -> String {
    match cell {
        Cell::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => (*v as i64).to_string(),
        other => other.to_field(),
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(value),
            None => Cell::Float(dt.as_f64()),
        },
        other => Cell::Text(other.to_string()),
    }
}

/// 将表格序列化为 xlsx 字节
pub fn to_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Top);
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let worksheet = workbook.add_worksheet();

    for (c, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(c)?, name, &header_format)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_num = row_number(r + 1)?;
        for (c, cell) in row.iter().enumerate() {
            let col = column_number(c)?;
            match cell {
                Cell::Empty => {}
                Cell::Int(v) if v.unsigned_abs() <= MAX_EXACT_INT => {
                    worksheet.write_number(row_num, col, *v as f64)?;
                }
                Cell::Int(v) => {
                    worksheet.write_string(row_num, col, v.to_string())?;
                }
                Cell::Float(v) if v.is_finite() => {
                    worksheet.write_number(row_num, col, *v)?;
                }
                Cell::Float(_) => {}
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::DateTime(dt) => {
                    worksheet.write_datetime_with_format(row_num, col, dt, &date_format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_number(index: usize) -> Result<u32> {
    u32::try_from(index)
        .map_err(|_| TabkitError::Other(format!("Row index {} exceeds worksheet limits", index)))
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| TabkitError::Other(format!("Column index {} exceeds worksheet limits", index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec!["name".into(), "qty".into(), "price".into(), "ok".into()],
            vec![
                vec![
                    Cell::Text("bolt".into()),
                    Cell::Int(10),
                    Cell::Float(0.25),
                    Cell::Bool(true),
                ],
                vec![
                    Cell::Text("nut".into()),
                    Cell::Int(3),
                    Cell::Float(1.5),
                    Cell::Bool(false),
                ],
            ],
        )
    }

    #[test]
    fn test_xlsx_round_trip() {
        let table = sample_table();
        let bytes = to_xlsx_bytes(&table).unwrap();
        let parsed = parse_spreadsheet_bytes(bytes, None, "memory").unwrap();

        assert_eq!(parsed.columns, table.columns);
        assert_eq!(parsed.rows, table.rows);
    }

    #[test]
    fn test_named_sheet_selection() {
        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name("first")
            .unwrap()
            .write_string(0, 0, "a")
            .unwrap();
        workbook
            .add_worksheet()
            .set_name("second")
            .unwrap()
            .write_string(0, 0, "b")
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let first = parse_spreadsheet_bytes(bytes.clone(), None, "memory").unwrap();
        assert_eq!(first.columns, vec!["a"]);

        let second = parse_spreadsheet_bytes(bytes.clone(), Some("second"), "memory").unwrap();
        assert_eq!(second.columns, vec!["b"]);

        assert!(parse_spreadsheet_bytes(bytes, Some("missing"), "memory").is_err());
    }

    #[test]
    fn test_leading_empty_columns_kept() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 1, "value").unwrap();
        sheet.write_number(1, 1, 7).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_spreadsheet_bytes(bytes, None, "memory").unwrap();
        assert_eq!(table.columns, vec!["Unnamed: 0", "value"]);
        assert_eq!(table.rows, vec![vec![Cell::Empty, Cell::Int(7)]]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = parse_spreadsheet_bytes(b"not a workbook".to_vec(), None, "memory");
        assert!(result.is_err());
    }

    #[test]
    fn test_datetime_written_as_date_cell() {
        let noon = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let table = Table::new(vec!["when".into()], vec![vec![Cell::DateTime(noon)]]);

        let bytes = to_xlsx_bytes(&table).unwrap();
        let parsed = parse_spreadsheet_bytes(bytes, None, "memory").unwrap();

        assert_eq!(parsed.rows, vec![vec![Cell::DateTime(noon)]]);
    }

    #[test]
    fn test_large_int_kept_exact() {
        let table = Table::new(
            vec!["id".into()],
            vec![
                vec![Cell::Int(MAX_EXACT_INT as i64)],
                vec![Cell::Int(9_007_199_254_740_993)],
            ],
        );

        let bytes = to_xlsx_bytes(&table).unwrap();
        let parsed = parse_spreadsheet_bytes(bytes, None, "memory").unwrap();

        assert_eq!(parsed.rows[0], vec![Cell::Float(MAX_EXACT_INT as f64)]);
        assert_eq!(parsed.rows[1], vec![Cell::Text("9007199254740993".into())]);
    }
}
