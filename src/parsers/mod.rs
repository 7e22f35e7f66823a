//! # 表格读写模块
//!
//! 提供电子表格与分隔文本两种格式的读取和序列化。
//!
//! ## 依赖关系
//! - 被 `commands/convert/` 使用
//! - 使用 `models/table.rs` 数据模型
//! - 子模块: spreadsheet, delimited

pub mod delimited;
pub mod spreadsheet;

/// 电子表格输入扩展名
pub const SPREADSHEET_EXTENSIONS: &[&str] = &[".xlsx", ".xls"];

/// 分隔文本扩展名
pub const DELIMITED_EXTENSION: &str = ".csv";
