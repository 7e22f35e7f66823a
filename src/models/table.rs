//! # 内存表格模型
//!
//! 一个表头行加若干数据行，单元格带类型。列类型规则与常见 dataframe 一致：
//! - 全为整数的数值列保持整数
//! - 含小数或含空单元格的数值列提升为浮点
//!
//! ## 依赖关系
//! - 被 `parsers/spreadsheet.rs`, `parsers/delimited.rs` 使用

use chrono::NaiveDateTime;

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// 输出到分隔文本时的字面量
    pub fn to_field(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format_float(*v),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Text(s) => s.clone(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 浮点数格式：整数值保留一位小数 (`4.0`)，其余使用最短表示
fn format_float(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_infinite() {
        if v > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:?}", v)
    }
}

/// 内存表格
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// 列名
    pub columns: Vec<String>,
    /// 数据行，每行长度与 `columns` 相同
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// 由原始表头和数据行构建表格
    ///
    /// 空列名替换为 `Unnamed: {i}`，重复列名依次改写为 `name.1`, `name.2`；
    /// 短行以空单元格补齐；最后按列统一数值类型。
    pub fn new(header: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let columns = dedupe_columns(header);
        for row in &mut rows {
            row.resize(columns.len(), Cell::Empty);
        }
        let mut table = Table { columns, rows };
        table.normalize_numeric_columns();
        table
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 数值列类型统一
    fn normalize_numeric_columns(&mut self) {
        for col in 0..self.width() {
            let cells = || self.rows.iter().map(move |r| &r[col]);

            let has_numeric = cells().any(Cell::is_numeric);
            let only_numeric_or_empty = cells().all(|c| c.is_numeric() || *c == Cell::Empty);
            if !has_numeric || !only_numeric_or_empty {
                continue;
            }

            let has_gap = cells().any(|c| *c == Cell::Empty);
            let all_integral = cells().all(|c| match c {
                Cell::Float(v) => v.fract() == 0.0 && v.abs() < i64::MAX as f64,
                _ => true,
            });

            let as_float = has_gap || !all_integral;
            for row in &mut self.rows {
                row[col] = match std::mem::replace(&mut row[col], Cell::Empty) {
                    Cell::Int(v) if as_float => Cell::Float(v as f64),
                    Cell::Float(v) if !as_float => Cell::Int(v as i64),
                    other => other,
                };
            }
        }
    }
}

/// 列名去重
fn dedupe_columns(header: Vec<String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(header.len());

    for (i, name) in header.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut n = 1;
        while columns.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        columns.push(candidate);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_integral_floats_become_ints() {
        let table = Table::new(
            header(&["qty"]),
            vec![vec![Cell::Float(1.0)], vec![Cell::Float(3.0)]],
        );
        assert_eq!(table.rows[0][0], Cell::Int(1));
        assert_eq!(table.rows[1][0].to_field(), "3");
    }

    #[test]
    fn test_mixed_numeric_column_promoted_to_float() {
        let table = Table::new(
            header(&["price"]),
            vec![vec![Cell::Float(2.5)], vec![Cell::Int(4)]],
        );
        assert_eq!(table.rows[1][0], Cell::Float(4.0));
        assert_eq!(table.rows[1][0].to_field(), "4.0");
        assert_eq!(table.rows[0][0].to_field(), "2.5");
    }

    #[test]
    fn test_numeric_column_with_gap_is_float() {
        let table = Table::new(header(&["n"]), vec![vec![Cell::Int(1)], vec![]]);
        assert_eq!(table.rows[0][0].to_field(), "1.0");
        assert_eq!(table.rows[1][0], Cell::Empty);
    }

    #[test]
    fn test_text_column_left_alone() {
        let table = Table::new(
            header(&["mixed"]),
            vec![vec![Cell::Int(1)], vec![Cell::Text("x".into())]],
        );
        assert_eq!(table.rows[0][0], Cell::Int(1));
    }

    #[test]
    fn test_column_names_deduplicated() {
        let table = Table::new(header(&["a", "", "a", "a"]), vec![]);
        assert_eq!(table.columns, vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn test_short_rows_padded() {
        let table = Table::new(
            header(&["a", "b", "c"]),
            vec![vec![Cell::Text("x".into())]],
        );
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], Cell::Empty);
    }

    #[test]
    fn test_field_formatting() {
        assert_eq!(Cell::Bool(true).to_field(), "True");
        assert_eq!(Cell::Empty.to_field(), "");
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(Cell::DateTime(dt).to_field(), "2024-01-05 08:30:00");
    }
}
