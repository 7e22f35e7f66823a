//! # tabkit - 表格文件批处理工具
//!
//! 在电子表格 (.xlsx/.xls) 与分隔文本 (.csv) 之间批量转换，
//! 并支持从整棵目录树中按扩展名收集文件。
//!
//! ## 子命令
//! - `convert` - 格式转换
//!   - `to-csv`   - 电子表格 -> CSV
//!   - `to-excel` - CSV -> 电子表格
//! - `collect` - 按扩展名收集文件到单一目录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (表格读写)
//!   │     ├── models/    (内存表格模型)
//!   │     └── batch/     (候选文件枚举与统计)
//!   ├── utils/      (输出、进度条、目录校验)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
