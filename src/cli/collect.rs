//! # collect 子命令 CLI 定义
//!
//! 递归收集指定扩展名的文件到单一目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Root of the directory tree to search
    #[arg(short, long)]
    pub input: PathBuf,

    /// Flat destination folder (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// File extensions to collect, e.g. `.xls,.xlsx` (all files when omitted)
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Log copy failures and continue instead of aborting the walk
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}
