//! # 批量执行器
//!
//! 顺序执行逐文件任务，负责进度反馈、失败隔离与结果统计。
//!
//! ## 功能
//! - 三种反馈方式：计数行、逐文件日志、进度条
//! - 默认隔离单文件失败；可配置为首个失败即中止
//!
//! ## 依赖关系
//! - 被 `commands/` 各模块调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `batch/report.rs` 汇总结果

use crate::batch::report::{describe_error, BatchReport};
use crate::error::Result;
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};

/// 逐文件反馈方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// 每个成功文件打印输出名与 `k/n` 计数
    Counter,
    /// 每个成功文件打印 `源 -> 目标`
    PerFile,
    /// 进度条，仅打印失败
    Bar,
}

/// 批量执行器
pub struct BatchRunner {
    feedback: Feedback,
    /// 首个失败即中止并返回该错误
    abort_on_failure: bool,
    /// 进度条描述
    label: String,
}

impl BatchRunner {
    /// 创建新的批量执行器（默认隔离失败）
    pub fn new(feedback: Feedback) -> Self {
        Self {
            feedback,
            abort_on_failure: false,
            label: "Processing".to_string(),
        }
    }

    pub fn abort_on_failure(mut self, abort: bool) -> Self {
        self.abort_on_failure = abort;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// 顺序处理文件列表
    ///
    /// `processor` 返回写出的目标路径。
    pub fn run<F>(&self, files: &[PathBuf], mut processor: F) -> Result<BatchReport>
    where
        F: FnMut(&Path) -> Result<PathBuf>,
    {
        let total = files.len();
        let mut report = BatchReport::new(total);

        let pb = (self.feedback == Feedback::Bar)
            .then(|| progress::create_progress_bar(total as u64, &self.label));

        for file in files {
            let name = display_name(file);

            match processor(file.as_path()) {
                Ok(written) => {
                    report.record_success();
                    match self.feedback {
                        Feedback::Counter => {
                            output::print_conversion(&name, &display_name(&written));
                            output::print_info(&format!(
                                "{}/{} processed",
                                report.succeeded(),
                                total
                            ));
                        }
                        Feedback::PerFile => output::print_conversion(
                            &file.display().to_string(),
                            &written.display().to_string(),
                        ),
                        Feedback::Bar => {}
                    }
                }
                Err(e) => {
                    if self.abort_on_failure {
                        if let Some(pb) = &pb {
                            pb.abandon();
                        }
                        return Err(e);
                    }

                    let message = describe_error(&e);
                    let line = format!("Failed to process {}: {}", name, message);
                    match &pb {
                        Some(pb) => pb.suspend(|| output::print_error(&line)),
                        None => output::print_error(&line),
                    }
                    report.record_failure(name, message);
                }
            }

            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }

        Ok(report)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabkitError;

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn fail_on_bad(path: &Path) -> Result<PathBuf> {
        if path.to_string_lossy().contains("bad") {
            Err(TabkitError::Other("broken".to_string()))
        } else {
            Ok(path.with_extension("out"))
        }
    }

    #[test]
    fn test_failures_isolated() {
        let list = files(&["a.csv", "bad.csv", "c.csv"]);
        let mut seen = Vec::new();
        let report = BatchRunner::new(Feedback::PerFile)
            .run(&list, |p| {
                seen.push(p.to_path_buf());
                fail_on_bad(p)
            })
            .unwrap();

        assert_eq!(seen, list);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failures(), &[("bad.csv".to_string(), "broken".to_string())]);
    }

    #[test]
    fn test_abort_stops_remaining_files() {
        let list = files(&["a.csv", "bad.csv", "c.csv"]);
        let mut seen = 0;
        let result = BatchRunner::new(Feedback::Counter)
            .abort_on_failure(true)
            .run(&list, |p| {
                seen += 1;
                fail_on_bad(p)
            });

        assert!(result.is_err());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_progress_bar_variant_counts_the_same() {
        let list = files(&["a.csv", "bad.csv"]);
        let report = BatchRunner::new(Feedback::Bar)
            .with_label("Testing")
            .run(&list, fail_on_bad)
            .unwrap();
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_empty_list() {
        let report = BatchRunner::new(Feedback::Counter)
            .run(&[], fail_on_bad)
            .unwrap();
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.candidates(), 0);
    }
}
