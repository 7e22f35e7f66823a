//! # 工具函数模块
//!
//! 提供美化输出、进度条、目录校验与文件放置等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 模块使用
//! - 子模块: output, progress, fs

pub mod fs;
pub mod output;
pub mod progress;
