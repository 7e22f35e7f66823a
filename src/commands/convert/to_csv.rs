//! # to-csv 子命令实现
//!
//! 将源目录下的 .xlsx/.xls 文件逐个转换为 CSV。
//!
//! ## 功能
//! - 读取第一个（或指定的）工作表，首行为表头
//! - 写出带行索引列的 CSV，默认分号分隔，UTF-8
//! - 单文件失败只记录，不影响其余文件
//! - 每成功一个输出 `k/n` 计数，最后输出总数
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `parsers/spreadsheet.rs`, `parsers/delimited.rs`
//! - 使用 `batch/`, `utils/fs.rs`

use super::output_file_name;
use crate::batch::{BatchReport, BatchRunner, Feedback, FileCollector};
use crate::cli::convert::ToCsvArgs;
use crate::error::{Result, TabkitError};
use crate::parsers::{delimited, spreadsheet, DELIMITED_EXTENSION, SPREADSHEET_EXTENSIONS};
use crate::utils::{fs as fsutil, output};

use std::fs;
use std::path::{Path, PathBuf};

/// 转换选项
#[derive(Debug, Clone)]
pub struct ToCsvOptions {
    /// 工作表名，`None` 表示第一个工作表
    pub sheet: Option<String>,
    /// 输出分隔符
    pub delimiter: u8,
}

impl Default for ToCsvOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            delimiter: b';',
        }
    }
}

/// 执行 to-csv 命令
pub fn execute(args: ToCsvArgs) -> Result<()> {
    output::print_header("Converting spreadsheets to CSV");

    let options = ToCsvOptions {
        sheet: args.sheet,
        delimiter: delimited::delimiter_byte(args.delimiter)?,
    };

    convert_spreadsheets_to_delimited(&args.input, &args.output, &options)?;
    Ok(())
}

/// 将 `source_dir` 中的电子表格转换为 `dest_dir` 中的 CSV 文件
pub fn convert_spreadsheets_to_delimited(
    source_dir: &Path,
    dest_dir: &Path,
    options: &ToCsvOptions,
) -> Result<BatchReport> {
    fsutil::ensure_source_exists(source_dir)?;
    fsutil::ensure_destination(dest_dir)?;

    let files = FileCollector::new(source_dir)
        .with_extensions(SPREADSHEET_EXTENSIONS)
        .collect();

    output::print_info(&format!(
        "Found {} spreadsheet file(s) in '{}'",
        files.len(),
        source_dir.display()
    ));

    let report = BatchRunner::new(Feedback::Counter)
        .run(&files, |input| convert_one(input, dest_dir, options))?;

    report.print_summary("Converted", dest_dir);
    Ok(report)
}

/// 转换单个文件，表格完整读入并序列化后才写盘
fn convert_one(input: &Path, dest_dir: &Path, options: &ToCsvOptions) -> Result<PathBuf> {
    let table = spreadsheet::parse_spreadsheet_file(input, options.sheet.as_deref())?;
    let bytes = delimited::to_delimited_bytes(&table, options.delimiter)?;

    let output_path = dest_dir.join(output_file_name(input, DELIMITED_EXTENSION));
    fs::write(&output_path, bytes).map_err(|e| TabkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(output_path)
}
