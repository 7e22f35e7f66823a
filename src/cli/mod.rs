//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: 格式转换（嵌套子命令）
//!   - `to-csv`: 电子表格 -> CSV
//!   - `to-excel`: CSV -> 电子表格
//! - `collect`: 按扩展名收集文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert, collect

pub mod collect;
pub mod convert;

use clap::{Parser, Subcommand};

/// tabkit - 表格文件批处理工具
#[derive(Parser)]
#[command(name = "tabkit")]
#[command(version)]
#[command(about = "Batch conversion between spreadsheet and CSV files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a folder of spreadsheets to CSV or a folder of CSV files to spreadsheets
    Convert(convert::ConvertArgs),

    /// Copy every file with the given extensions from a directory tree into one folder
    Collect(collect::CollectArgs),
}
