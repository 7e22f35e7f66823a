//! # 统一错误处理模块
//!
//! 定义 tabkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 包装 `calamine`, `rust_xlsxwriter`, `csv` 的错误

use thiserror::Error;

/// tabkit 统一错误类型
#[derive(Error, Debug)]
pub enum TabkitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Failed to copy {from} -> {to}: {source}")]
    CopyError {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 表格格式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, TabkitError>;
