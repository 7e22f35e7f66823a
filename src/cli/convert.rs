//! # convert 子命令 CLI 定义
//!
//! 表格格式批量转换，包含两个子命令：
//! - `to-csv`: 电子表格 (.xlsx/.xls) -> CSV
//! - `to-excel`: CSV -> 电子表格
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert/` 相应模块

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Convert 主命令
// ─────────────────────────────────────────────────────────────

/// convert 主命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(subcommand)]
    pub command: ConvertCommands,
}

/// convert 子命令
#[derive(Subcommand, Debug)]
pub enum ConvertCommands {
    /// Convert every .xlsx/.xls file in a folder to a semicolon-separated CSV
    ToCsv(ToCsvArgs),

    /// Convert every .csv file in a folder to a spreadsheet
    ToExcel(ToExcelArgs),
}

// ─────────────────────────────────────────────────────────────
// to-csv 子命令
// ─────────────────────────────────────────────────────────────

/// to-csv 子命令参数
#[derive(Args, Debug)]
pub struct ToCsvArgs {
    /// Input directory containing spreadsheet files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for CSV files (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Worksheet to export (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Field delimiter for the written CSV files
    #[arg(short, long, env = "TABKIT_DELIMITER", default_value_t = ';')]
    pub delimiter: char,
}

// ─────────────────────────────────────────────────────────────
// to-excel 子命令
// ─────────────────────────────────────────────────────────────

/// 电子表格输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (.xlsx)
    Xlsx,
    /// Legacy BIFF workbook (.xls)
    Xls,
}

impl SpreadsheetFormat {
    /// 输出文件扩展名（含点）
    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => ".xlsx",
            SpreadsheetFormat::Xls => ".xls",
        }
    }
}

impl std::fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpreadsheetFormat::Xlsx => write!(f, "xlsx"),
            SpreadsheetFormat::Xls => write!(f, "xls"),
        }
    }
}

/// to-excel 子命令参数
#[derive(Args, Debug)]
pub struct ToExcelArgs {
    /// Input directory containing CSV files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for spreadsheet files (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Field delimiter used by the input CSV files
    #[arg(short, long, env = "TABKIT_DELIMITER", default_value_t = ';')]
    pub delimiter: char,

    /// Output spreadsheet format
    #[arg(short, long, value_enum, env = "TABKIT_FORMAT", default_value_t = SpreadsheetFormat::Xlsx)]
    pub format: SpreadsheetFormat,

    /// Show a progress bar instead of one line per converted file
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}
