//! # 数据模型模块
//!
//! 定义读写过程中共用的内存表格模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: table

pub mod table;

pub use table::{Cell, Table};
