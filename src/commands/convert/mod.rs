//! # convert 命令实现
//!
//! 表格格式批量转换，包含两个子命令：
//! - `to-csv`: 电子表格 -> CSV
//! - `to-excel`: CSV -> 电子表格
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 子模块: to_csv, to_excel

pub mod to_csv;
pub mod to_excel;

use crate::cli::convert::{ConvertArgs, ConvertCommands};
use crate::error::Result;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    match args.command {
        ConvertCommands::ToCsv(to_csv_args) => to_csv::execute(to_csv_args),
        ConvertCommands::ToExcel(to_excel_args) => to_excel::execute(to_excel_args),
    }
}

/// 输出文件名：源文件主名 + 新扩展名
fn output_file_name(input: &std::path::Path, extension: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}{}", stem, extension)
}
