//! 外部协作方：AI 评分、PDF 导入、答疑聊天与学情分析
//!
//! 它们都是可能很慢、可能失败的异步服务，调用统一经过 [`CallPolicy`]
//! 加上超时与有限次数的重试。

pub mod mock;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::CollaboratorConfig;
use crate::errors::{PortalError, Result};
use crate::models::analytics::StudentAnalytics;
use crate::models::doubts::DoubtMessage;
use crate::models::files::UploadedFile;
use crate::models::submissions::{Feedback, Submission};
use crate::models::users::entities::User;
use crate::worksheet::{AnswerStore, RawWorksheetSchema, WorksheetSchema};

pub use mock::{MockAnalyst, MockChatter, MockGrader, MockIngestor};

/// 评分请求
#[derive(Debug, Clone, PartialEq)]
pub enum GradingRequest {
    Worksheet { answers: AnswerStore },
    Video { content_ref: String },
}

impl GradingRequest {
    pub fn label(&self) -> &'static str {
        match self {
            GradingRequest::Worksheet { .. } => "worksheet",
            GradingRequest::Video { .. } => "video",
        }
    }
}

#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, request: &GradingRequest) -> Result<Feedback>;
}

#[async_trait]
pub trait Ingestor: Send + Sync {
    /// 把上传的 PDF 转换为工作表结构（未校验）
    async fn ingest(&self, document: &UploadedFile) -> Result<RawWorksheetSchema>;
}

/// 答疑请求：本次问题和此前的对话
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<DoubtMessage>,
}

#[async_trait]
pub trait Chatter: Send + Sync {
    /// 回答学生的问题
    async fn reply(&self, request: &ChatRequest) -> Result<String>;
}

/// 学情分析请求
#[derive(Debug, Clone)]
pub struct AnalyticsRequest {
    pub student: User,
    pub submissions: Vec<Submission>,
}

#[async_trait]
pub trait Analyst: Send + Sync {
    async fn analyze(&self, request: &AnalyticsRequest) -> Result<StudentAnalytics>;
}

/// 协作方调用策略
#[derive(Debug, Clone, Copy)]
pub struct CallPolicy {
    pub timeout: Duration,
    pub retries: u32,
}

impl CallPolicy {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    pub fn from_config(config: &CollaboratorConfig) -> Self {
        Self::new(config.timeout(), config.retries)
    }

    /// 执行调用，超时或可重试错误时重新尝试
    ///
    /// 所有尝试失败后，用 `fail` 构造最终错误。
    pub async fn run<T, F, Fut>(
        &self,
        operation: &str,
        fail: fn(String) -> PortalError,
        mut call: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.retries.saturating_add(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    warn!(operation, attempt, error = %e, "collaborator call failed");
                    let retryable = e.is_retryable();
                    last_error = e.message().to_string();
                    if !retryable {
                        break;
                    }
                }
                Err(_) => {
                    warn!(operation, attempt, timeout = ?self.timeout, "collaborator call timed out");
                    last_error = format!("{operation} timed out after {:?}", self.timeout);
                }
            }
        }

        Err(fail(last_error))
    }
}

/// 导入 PDF 并校验结果
///
/// 协作方失败返回 `IngestionFailed`，结构不合法返回 `MalformedSchema`。
pub async fn ingest_schema(
    ingestor: &dyn Ingestor,
    policy: &CallPolicy,
    document: &UploadedFile,
) -> Result<WorksheetSchema> {
    let raw = policy
        .run("ingestion", PortalError::ingestion_failed::<String>, move || {
            ingestor.ingest(document)
        })
        .await?;
    WorksheetSchema::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(retries: u32) -> CallPolicy {
        CallPolicy::new(Duration::from_millis(50), retries)
    }

    #[tokio::test]
    async fn test_retry_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = policy(2)
            .run("grading", PortalError::grading_failed::<String>, move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(PortalError::grading_failed("flaky"))
                } else {
                    Ok(7)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_use_fail_constructor() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = policy(1)
            .run("ingestion", PortalError::ingestion_failed::<String>, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(PortalError::ingestion_failed("down"))
            })
            .await;
        assert!(matches!(result, Err(PortalError::IngestionFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = policy(3)
            .run("grading", PortalError::grading_failed::<String>, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(PortalError::validation("bad request"))
            })
            .await;
        assert!(matches!(result, Err(PortalError::GradingFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_failure() {
        let result: Result<()> = policy(0)
            .run("grading", PortalError::grading_failed::<String>, || async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            })
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, PortalError::GradingFailed(_)));
        assert!(err.message().contains("timed out"));
    }
}
