//! # collect 命令实现
//!
//! 递归遍历源目录树，将匹配扩展名的文件复制到单一目标目录。
//!
//! ## 功能
//! - 扩展名列表为空时复制所有文件
//! - 目标目录已有同名文件时追加 `_1`, `_2`, ... 后缀，绝不覆盖
//! - 复制时保留权限与时间戳
//! - 默认首个复制失败即中止；`--keep-going` 时记录失败并继续
//! - 目标目录位于源目录树内时跳过目标子树
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/`, `utils/fs.rs`

use crate::batch::{BatchReport, BatchRunner, Feedback, FileCollector};
use crate::cli::collect::CollectArgs;
use crate::error::{Result, TabkitError};
use crate::utils::{fs as fsutil, output};

use std::path::{Path, PathBuf};

/// 收集选项
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// 复制失败时记录并继续
    pub keep_going: bool,
}

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting files");

    let options = CollectOptions {
        keep_going: args.keep_going,
    };
    collect_files(&args.input, &args.output, &args.extensions, options)?;
    Ok(())
}

/// 将 `source_root` 整棵树中匹配 `extensions` 的文件复制到 `dest_dir`
pub fn collect_files<S: AsRef<str>>(
    source_root: &Path,
    dest_dir: &Path,
    extensions: &[S],
    options: CollectOptions,
) -> Result<BatchReport> {
    fsutil::ensure_source_exists(source_root)?;
    fsutil::ensure_destination(dest_dir)?;

    let files = FileCollector::new(source_root)
        .with_extensions(extensions)
        .recursive(true)
        .exclude(dest_dir)
        .collect();

    if extensions.is_empty() {
        output::print_info(&format!("Found {} file(s)", files.len()));
    } else {
        let list: Vec<&str> = extensions.iter().map(|e| e.as_ref()).collect();
        output::print_info(&format!(
            "Found {} file(s) matching {}",
            files.len(),
            list.join(", ")
        ));
    }

    let report = BatchRunner::new(Feedback::PerFile)
        .abort_on_failure(!options.keep_going)
        .run(&files, |input| copy_one(input, dest_dir))?;

    report.print_summary("Copied", dest_dir);
    Ok(report)
}

fn copy_one(input: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = input.file_name().ok_or_else(|| {
        TabkitError::InvalidArgument(format!("'{}' has no file name", input.display()))
    })?;

    let target = fsutil::unique_destination(dest_dir, file_name);
    fsutil::copy_preserving_metadata(input, &target)?;

    Ok(target)
}
