//! # 目录校验与文件放置
//!
//! ## 功能
//! - 源目录存在性检查（缺失即整批中止）
//! - 目标目录按需创建（仅在创建时提示一次）
//! - 目标文件名冲突时追加 `_N` 后缀
//! - 保留权限与时间戳的文件复制
//!
//! ## 依赖关系
//! - 被 `commands/` 各模块使用
//! - 使用 `utils/output.rs`
//! - 使用 `filetime` 设置时间戳

use crate::error::{Result, TabkitError};
use crate::utils::output;

use filetime::FileTime;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// 检查源目录存在
pub fn ensure_source_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(TabkitError::DirectoryNotFound {
            path: path.display().to_string(),
        })
    }
}

/// 目标目录不存在时创建（含中间目录），返回是否新建
pub fn ensure_destination(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    fs::create_dir_all(path).map_err(|e| TabkitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    output::print_info(&format!("Created destination directory '{}'", path.display()));

    Ok(true)
}

/// 计算不冲突的文件名
///
/// 依次尝试 `name.ext`, `name_1.ext`, `name_2.ext`, ...，返回第一个
/// `exists` 为假的名字。扩展名取最后一个点之后的部分，以点开头的文件名视为无扩展名。
/// 文件名按 `OsStr` 处理，非 UTF-8 名字原样保留。
pub fn resolve_collision<F>(file_name: &OsStr, exists: F) -> OsString
where
    F: Fn(&OsStr) -> bool,
{
    if !exists(file_name) {
        return file_name.to_os_string();
    }

    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name);
    let extension = path.extension();

    let mut counter = 1;
    loop {
        let mut candidate = stem.to_os_string();
        candidate.push(format!("_{}", counter));
        if let Some(ext) = extension {
            candidate.push(".");
            candidate.push(ext);
        }
        if !exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// 目标目录中不会覆盖已有文件的路径
pub fn unique_destination(dest_dir: &Path, file_name: &OsStr) -> PathBuf {
    let name = resolve_collision(file_name, |candidate| dest_dir.join(candidate).exists());
    dest_dir.join(name)
}

/// 复制文件，保留权限以及访问/修改时间
///
/// 时间戳按路径设置，复制结果为只读时同样生效。
pub fn copy_preserving_metadata(from: &Path, to: &Path) -> Result<()> {
    let copy_error = |e| TabkitError::CopyError {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source: e,
    };

    let metadata = fs::metadata(from).map_err(copy_error)?;
    fs::copy(from, to).map_err(copy_error)?;

    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(to, accessed, modified).map_err(copy_error)?;

    Ok(())
}
