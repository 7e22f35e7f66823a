//! # 分隔文本读写
//!
//! 基于 `csv` crate 读写任意单字节分隔符的文本表格。
//!
//! ## 读取规则
//! - 第一行为表头；短行以空单元格补齐，字段多于表头的行视为错误
//! - 常见缺失值标记（`NaN`, `NA`, `null` 等）读为空单元格
//! - 逐列推断类型：整数 -> 浮点 -> 布尔 -> 文本
//!
//! ## 写出规则
//! - 首列为行索引（表头为空，值为 0..n-1）
//! - 最小化引号，换行符为 `\n`，UTF-8
//!
//! ## 依赖关系
//! - 被 `commands/convert/` 使用
//! - 使用 `models/table.rs`

use crate::error::{Result, TabkitError};
use crate::models::{Cell, Table};

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 读作空单元格的字面量
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

/// 校验分隔符为单个 ASCII 字符
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' && delimiter != '"' {
        Ok(delimiter as u8)
    } else {
        Err(TabkitError::InvalidArgument(format!(
            "Delimiter must be a single ASCII character other than quote or newline, got {:?}",
            delimiter
        )))
    }
}

/// 读取分隔文本文件
pub fn parse_delimited_file(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path).map_err(|e| TabkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_delimited_content(file, delimiter, &path.display().to_string())
}

/// 从任意 reader 解析分隔文本
pub fn parse_delimited_content<R: Read>(reader: R, delimiter: u8, label: &str) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(parse_error(label, "No columns to parse from file".to_string()));
    }

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() > header.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(parse_error(
                label,
                format!(
                    "Expected {} fields in line {}, saw {}",
                    header.len(),
                    line,
                    record.len()
                ),
            ));
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| (!NA_VALUES.contains(&field)).then(|| field.to_string()))
            .collect();
        row.resize(header.len(), None);
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..header.len())
        .map(|col| infer_kind(raw_rows.iter().filter_map(|r| r[col].as_deref())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(value, kind)| match value {
                    Some(v) => kind.cell(v),
                    None => Cell::Empty,
                })
                .collect()
        })
        .collect();

    Ok(Table::new(header, rows))
}

/// 将表格序列化为分隔文本字节（带行索引列）
pub fn to_delimited_bytes(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = Vec::with_capacity(table.width() + 1);
    header.push(String::new());
    header.extend(table.columns.iter().cloned());
    wtr.write_record(&header)?;

    for (index, row) in table.rows.iter().enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(index.to_string());
        record.extend(row.iter().map(Cell::to_field));
        wtr.write_record(&record)?;
    }

    wtr.into_inner()
        .map_err(|e| TabkitError::Other(format!("Failed to flush CSV buffer: {}", e)))
}

fn parse_error(label: &str, reason: String) -> TabkitError {
    TabkitError::ParseError {
        format: "CSV".to_string(),
        path: label.to_string(),
        reason,
    }
}

// ─────────────────────────────────────────────────────────────
// 列类型推断
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn cell(self, value: String) -> Cell {
        match self {
            ColumnKind::Int => value
                .trim()
                .parse()
                .map(Cell::Int)
                .unwrap_or(Cell::Text(value)),
            ColumnKind::Float => value
                .trim()
                .parse()
                .map(Cell::Float)
                .unwrap_or(Cell::Text(value)),
            ColumnKind::Bool => Cell::Bool(TRUE_VALUES.contains(&value.as_str())),
            ColumnKind::Text => Cell::Text(value),
        }
    }
}

fn infer_kind<'a>(values: impl Iterator<Item = &'a str> + Clone) -> ColumnKind {
    let mut values = values.peekable();
    if values.peek().is_none() {
        return ColumnKind::Text;
    }

    if values.clone().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnKind::Int
    } else if values.clone().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if values
        .clone()
        .all(|v| TRUE_VALUES.contains(&v) || FALSE_VALUES.contains(&v))
    {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}
