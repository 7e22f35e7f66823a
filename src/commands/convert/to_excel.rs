//! # to-excel 子命令实现
//!
//! 将源目录下的 .csv 文件逐个转换为电子表格。
//!
//! ## 功能
//! - 按给定分隔符解析 CSV，首行为表头，不写行索引
//! - 两种反馈：逐文件日志，或 `--progress` 进度条
//! - 单文件失败只记录，不影响其余文件
//!
//! ## 注意
//! 分隔符与文件实际分隔符不一致时不会报错，整行会落入同一列。
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `parsers/delimited.rs`, `parsers/spreadsheet.rs`
//! - 使用 `batch/`, `utils/fs.rs`

use super::output_file_name;
use crate::batch::{BatchReport, BatchRunner, Feedback, FileCollector};
use crate::cli::convert::{SpreadsheetFormat, ToExcelArgs};
use crate::error::{Result, TabkitError};
use crate::parsers::{delimited, spreadsheet, DELIMITED_EXTENSION};
use crate::utils::{fs as fsutil, output};

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 to-excel 命令
pub fn execute(args: ToExcelArgs) -> Result<()> {
    output::print_header(&format!("Converting CSV to {}", args.format));

    let delimiter = delimited::delimiter_byte(args.delimiter)?;
    convert_delimited_to_spreadsheets(
        &args.input,
        &args.output,
        delimiter,
        args.format,
        args.progress,
    )?;
    Ok(())
}

/// 将 `source_dir` 中的 CSV 文件转换为 `dest_dir` 中的电子表格
pub fn convert_delimited_to_spreadsheets(
    source_dir: &Path,
    dest_dir: &Path,
    delimiter: u8,
    format: SpreadsheetFormat,
    show_progress: bool,
) -> Result<BatchReport> {
    if format == SpreadsheetFormat::Xls {
        return Err(TabkitError::UnsupportedFormat(
            "writing legacy .xls workbooks is not supported, use xlsx".to_string(),
        ));
    }

    fsutil::ensure_source_exists(source_dir)?;
    fsutil::ensure_destination(dest_dir)?;

    let files = FileCollector::new(source_dir)
        .with_extensions(&[DELIMITED_EXTENSION])
        .collect();

    output::print_info(&format!(
        "Found {} CSV file(s) in '{}'",
        files.len(),
        source_dir.display()
    ));

    let feedback = if show_progress {
        Feedback::Bar
    } else {
        Feedback::PerFile
    };

    let report = BatchRunner::new(feedback)
        .with_label("Converting CSV to spreadsheet")
        .run(&files, |input| {
            convert_one(input, dest_dir, delimiter, format.extension())
        })?;

    report.print_summary("Converted", dest_dir);
    Ok(report)
}

/// 转换单个文件，表格完整读入并序列化后才写盘
fn convert_one(input: &Path, dest_dir: &Path, delimiter: u8, extension: &str) -> Result<PathBuf> {
    let table = delimited::parse_delimited_file(input, delimiter)?;
    let bytes = spreadsheet::to_xlsx_bytes(&table)?;

    let output_path = dest_dir.join(output_file_name(input, extension));
    fs::write(&output_path, bytes).map_err(|e| TabkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::convert::to_csv::{convert_spreadsheets_to_delimited, ToCsvOptions};
    use crate::models::Cell;
    use tempfile::TempDir;

    fn read_back(path: &Path) -> crate::models::Table {
        spreadsheet::parse_spreadsheet_file(path, None).unwrap()
    }

    #[test]
    fn test_converts_csv_files_without_index() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("parts.csv"), "name;qty\nbolt;10\nnut;3\n").unwrap();
        fs::write(src.path().join("readme.md"), "# ignored").unwrap();

        let report = convert_delimited_to_spreadsheets(
            src.path(),
            dst.path(),
            b';',
            SpreadsheetFormat::Xlsx,
            false,
        )
        .unwrap();

        assert_eq!(report.succeeded(), 1);
        let table = read_back(&dst.path().join("parts.xlsx"));
        assert_eq!(table.columns, vec!["name", "qty"]);
        assert_eq!(
            table.rows[1],
            vec![Cell::Text("nut".into()), Cell::Int(3)]
        );
        assert!(!dst.path().join("readme.xlsx").exists());
    }

    #[test]
    fn test_progress_variant_same_outcome() {
        let src = TempDir::new().unwrap();
        let plain = TempDir::new().unwrap();
        let bar = TempDir::new().unwrap();
        fs::write(src.path().join("a.csv"), "x,y\n1,2\n").unwrap();
        fs::write(src.path().join("bad.csv"), "x,y\n1,2,3\n").unwrap();

        let r1 =
            convert_delimited_to_spreadsheets(src.path(), plain.path(), b',', SpreadsheetFormat::Xlsx, false)
                .unwrap();
        let r2 =
            convert_delimited_to_spreadsheets(src.path(), bar.path(), b',', SpreadsheetFormat::Xlsx, true)
                .unwrap();

        assert_eq!(r1.succeeded(), 1);
        assert_eq!(r2.succeeded(), 1);
        assert_eq!(r1.failures(), r2.failures());
        assert_eq!(r1.failures()[0].0, "bad.csv");
        assert_eq!(
            read_back(&plain.path().join("a.xlsx")),
            read_back(&bar.path().join("a.xlsx"))
        );
    }

    #[test]
    fn test_wrong_delimiter_collapses_silently() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("comma.csv"), "a,b,c\n1,2,3\n").unwrap();

        let report = convert_delimited_to_spreadsheets(
            src.path(),
            dst.path(),
            b';',
            SpreadsheetFormat::Xlsx,
            false,
        )
        .unwrap();

        assert_eq!(report.failed(), 0);
        let table = read_back(&dst.path().join("comma.xlsx"));
        assert_eq!(table.columns, vec!["a,b,c"]);
        assert_eq!(table.rows, vec![vec![Cell::Text("1,2,3".into())]]);
    }

    #[test]
    fn test_legacy_format_rejected_before_touching_files() {
        let src = TempDir::new().unwrap();
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("out");
        fs::write(src.path().join("a.csv"), "x\n1\n").unwrap();

        let err =
            convert_delimited_to_spreadsheets(src.path(), &dst, b';', SpreadsheetFormat::Xls, false)
                .unwrap_err();

        assert!(matches!(err, TabkitError::UnsupportedFormat(_)));
        assert!(!dst.exists());
    }

    #[test]
    fn test_round_trip_through_spreadsheet() {
        let src = TempDir::new().unwrap();
        let xlsx_dir = TempDir::new().unwrap();
        let back_dir = TempDir::new().unwrap();
        fs::write(
            src.path().join("stock.csv"),
            "item;count;note\nbolt;10;\"a;b\"\nnut;3;plain\n",
        )
        .unwrap();

        convert_delimited_to_spreadsheets(
            src.path(),
            xlsx_dir.path(),
            b';',
            SpreadsheetFormat::Xlsx,
            false,
        )
        .unwrap();
        convert_spreadsheets_to_delimited(xlsx_dir.path(), back_dir.path(), &ToCsvOptions::default())
            .unwrap();

        assert_eq!(
            fs::read_to_string(back_dir.path().join("stock.csv")).unwrap(),
            ";item;count;note\n0;bolt;10;\"a;b\"\n1;nut;3;plain\n"
        );
    }
}
