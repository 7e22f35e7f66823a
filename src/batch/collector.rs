//! # 候选文件收集器
//!
//! 根据输入目录和扩展名列表收集待处理文件。
//!
//! ## 功能
//! - 单层目录列举或递归遍历整棵目录树
//! - 扩展名按"文件名以其结尾"匹配，区分大小写；空列表匹配所有文件
//! - 跟随符号链接，链接到文件的条目与普通文件同等对待
//! - 可排除一个子目录（目标目录位于源目录树内时）
//!
//! ## 依赖关系
//! - 被 `commands/convert/`, `commands/collect.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::utils::output;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 扩展名列表（含点），为空时不过滤
    extensions: Vec<String>,
    /// 是否递归
    recursive: bool,
    /// 遍历时跳过的目录
    exclude: Option<PathBuf>,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            extensions: Vec::new(),
            recursive: false,
            exclude: None,
        }
    }

    /// 设置扩展名列表，缺少前导点的自动补齐
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 跳过指定目录及其子树
    pub fn exclude(mut self, dir: &Path) -> Self {
        self.exclude = dir.canonicalize().ok();
        self
    }

    /// 收集所有匹配的文件，按路径排序
    ///
    /// 无法读取的目录项（含链接环）会给出警告并跳过。
    pub fn collect(&self) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let walker = WalkDir::new(&self.input)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && self.is_excluded(e.path())));

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if self.matches(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => output::print_warning(&format!("Skipping unreadable entry: {}", e)),
            }
        }

        files
    }

    fn is_excluded(&self, path: &Path) -> bool {
        match &self.exclude {
            Some(excluded) => path
                .canonicalize()
                .map(|p| p == *excluded)
                .unwrap_or(false),
            None => false,
        }
    }

    /// 检查文件名是否以任一扩展名结尾
    fn matches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        let filename = match path.file_name() {
            Some(name) => name.as_encoded_bytes(),
            None => return false,
        };

        self.extensions
            .iter()
            .any(|ext| filename.ends_with(ext.as_bytes()))
    }
}

/// 规范化扩展名：去除空白，补齐前导点；空字符串返回 `None`
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() || ext == "." {
        None
    } else if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{}", ext))
    }
}
