//! # 批量结果统计
//!
//! 记录单次批处理的候选数、成功数与失败详情，并输出最终汇总。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 填充
//! - 使用 `utils/output.rs` 输出，`tabled` 绘制失败表

use crate::utils::output;

use std::fmt::Display;
use std::path::Path;
use tabled::{Table, Tabled};

/// 失败表格行
#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Error")]
    error: String,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 候选文件数
    candidates: usize,
    /// 成功数量
    succeeded: usize,
    /// 失败详情 (文件名, 错误信息)
    failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, file: impl Into<String>, error: impl Display) {
        self.failures.push((file.into(), error.to_string()));
    }

    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }

    /// 打印最终汇总
    pub fn print_summary(&self, verb: &str, destination: &Path) {
        if self.failed() > 0 {
            let rows: Vec<FailureRow> = self
                .failures()
                .iter()
                .map(|(file, error)| FailureRow {
                    file: file.clone(),
                    error: error.clone(),
                })
                .collect();
            output::print_header(&format!("{} file(s) failed", rows.len()));
            println!("{}", Table::new(&rows));
        }

        output::print_done(&format!(
            "{} {} of {} file(s) into '{}'",
            verb,
            self.succeeded(),
            self.candidates(),
            destination.display()
        ));
    }
}

/// 错误及其来源链拼接为单行描述
pub fn describe_error(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
