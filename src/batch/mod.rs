//! # 批量处理模块
//!
//! 提供候选文件枚举、逐文件执行与结果统计。
//!
//! ## 功能
//! - 按扩展名收集候选文件（单层或递归）
//! - 顺序逐文件执行，失败隔离或中止
//! - 进度反馈与最终汇总
//!
//! ## 依赖关系
//! - 被 `commands/` 各模块使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `indicatif` 显示进度，`tabled` 输出失败表

pub mod collector;
pub mod report;
pub mod runner;

pub use collector::FileCollector;
pub use report::BatchReport;
pub use runner::{BatchRunner, Feedback};
