//! 内置的模拟协作方
//!
//! 没有接入真实 AI 服务时使用，按配置模拟延迟和失败率。

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use super::{AnalyticsRequest, Analyst, ChatRequest, Chatter, Grader, GradingRequest, Ingestor};
use crate::config::MockCollaboratorConfig;
use crate::errors::{PortalError, Result};
use crate::models::analytics::{MonthlyScore, StudentAnalytics};
use crate::models::files::UploadedFile;
use crate::models::submissions::Feedback;
use crate::worksheet::{RawQuestion, RawWorksheetSchema};

/// 按失败率掷骰子，`rng` 不能跨 await 持有
fn roll_failure(failure_rate: f64) -> bool {
    let p = failure_rate.clamp(0.0, 1.0);
    rand::rng().random_bool(p)
}

pub struct MockGrader {
    worksheet_latency: Duration,
    video_latency: Duration,
    failure_rate: f64,
}

impl MockGrader {
    pub fn new(worksheet_latency: Duration, video_latency: Duration, failure_rate: f64) -> Self {
        Self {
            worksheet_latency,
            video_latency,
            failure_rate,
        }
    }

    pub fn from_config(config: &MockCollaboratorConfig) -> Self {
        Self::new(
            Duration::from_millis(config.worksheet_latency_ms),
            Duration::from_millis(config.video_latency_ms),
            config.failure_rate,
        )
    }
}

#[async_trait]
impl Grader for MockGrader {
    async fn grade(&self, request: &GradingRequest) -> Result<Feedback> {
        let latency = match request {
            GradingRequest::Worksheet { .. } => self.worksheet_latency,
            GradingRequest::Video { .. } => self.video_latency,
        };
        debug!(kind = request.label(), ?latency, "mock grading started");
        tokio::time::sleep(latency).await;

        if roll_failure(self.failure_rate) {
            return Err(PortalError::grading_failed("mock grader is unavailable"));
        }

        let feedback = match request {
            GradingRequest::Worksheet { answers } => {
                let score = rand::rng().random_range(80..98);
                Feedback {
                    score,
                    summary: "Good work! You understand most of the concepts in this worksheet."
                        .to_string(),
                    detailed_feedback: format!(
                        "You answered {} question(s). Review the questions you found difficult \
                         and check your spelling in the written answers.",
                        answers.len()
                    ),
                }
            }
            GradingRequest::Video { content_ref } => {
                let score = rand::rng().random_range(70..95);
                Feedback {
                    score,
                    summary: "Nice presentation! Your explanation was clear and easy to follow."
                        .to_string(),
                    detailed_feedback: format!(
                        "Video '{content_ref}' reviewed. Try to speak a little slower and give \
                         one more example to support your main point."
                    ),
                }
            }
        };

        info!(kind = request.label(), score = feedback.score, "mock grading finished");
        Ok(feedback)
    }
}

pub struct MockIngestor {
    latency: Duration,
    failure_rate: f64,
}

impl MockIngestor {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate,
        }
    }

    pub fn from_config(config: &MockCollaboratorConfig) -> Self {
        Self::new(
            Duration::from_millis(config.ingestion_latency_ms),
            config.failure_rate,
        )
    }
}

#[async_trait]
impl Ingestor for MockIngestor {
    async fn ingest(&self, document: &UploadedFile) -> Result<RawWorksheetSchema> {
        debug!(file = %document.original_name, "mock ingestion started");
        tokio::time::sleep(self.latency).await;

        if roll_failure(self.failure_rate) {
            return Err(PortalError::ingestion_failed("mock ingestor is unavailable"));
        }

        Ok(solar_system_worksheet())
    }
}

const CANNED_REPLIES: [&str; 5] = [
    "That's a great question! Let me help you understand this concept better.",
    "I can see why that might be confusing. Let's break it down step by step.",
    "Excellent thinking! Here's some additional information that might help.",
    "Good question! This is a common area where students need clarification.",
    "Let me explain this in a different way that might make more sense.",
];

/// 从固定回复里随机挑一条，延迟在 `[min, max]` 之间均匀分布
pub struct MockChatter {
    min_latency: Duration,
    max_latency: Duration,
    failure_rate: f64,
}

impl MockChatter {
    pub fn new(min_latency: Duration, max_latency: Duration, failure_rate: f64) -> Self {
        Self {
            min_latency,
            max_latency: max_latency.max(min_latency),
            failure_rate,
        }
    }

    pub fn from_config(config: &MockCollaboratorConfig) -> Self {
        Self::new(
            Duration::from_millis(config.chat_latency_min_ms),
            Duration::from_millis(config.chat_latency_max_ms),
            config.failure_rate,
        )
    }

    fn latency(&self) -> Duration {
        if self.max_latency == self.min_latency {
            return self.min_latency;
        }
        let min = self.min_latency.as_millis() as u64;
        let max = self.max_latency.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

#[async_trait]
impl Chatter for MockChatter {
    async fn reply(&self, request: &ChatRequest) -> Result<String> {
        let latency = self.latency();
        debug!(history = request.history.len(), ?latency, "mock chat started");
        tokio::time::sleep(latency).await;

        if roll_failure(self.failure_rate) {
            return Err(PortalError::chat_failed("mock chatter is unavailable"));
        }

        let index = rand::rng().random_range(0..CANNED_REPLIES.len());
        Ok(CANNED_REPLIES[index].to_string())
    }
}

pub struct MockAnalyst {
    latency: Duration,
    failure_rate: f64,
}

impl MockAnalyst {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate,
        }
    }

    pub fn from_config(config: &MockCollaboratorConfig) -> Self {
        Self::new(
            Duration::from_millis(config.analytics_latency_ms),
            config.failure_rate,
        )
    }
}

#[async_trait]
impl Analyst for MockAnalyst {
    async fn analyze(&self, request: &AnalyticsRequest) -> Result<StudentAnalytics> {
        debug!(student_id = request.student.id, "mock analytics started");
        tokio::time::sleep(self.latency).await;

        if roll_failure(self.failure_rate) {
            return Err(PortalError::analytics_failed("mock analyst is unavailable"));
        }

        info!(
            student_id = request.student.id,
            submissions = request.submissions.len(),
            "mock analytics finished"
        );
        Ok(StudentAnalytics {
            summary: analytics_summary(&request.student.name),
            monthly_scores: monthly_scores(),
        })
    }
}

fn analytics_summary(name: &str) -> String {
    format!(
        "Overall Performance: {name} has shown consistent improvement throughout the term, \
         with both homework and worksheet scores trending upward.\n\n\
         Strengths: Strong performance on worksheets, particularly in science topics. \
         Submissions are usually on time.\n\n\
         Areas for Improvement: Homework presentations could include more supporting examples.\n\n\
         Recommendations: Keep practising short written answers and review teacher feedback \
         after each graded assignment."
    )
}

fn monthly_scores() -> Vec<MonthlyScore> {
    [
        ("Jan", 65, 80),
        ("Feb", 70, 82),
        ("Mar", 68, 88),
        ("Apr", 75, 85),
        ("May", 78, 90),
        ("Jun", 82, 92),
    ]
    .into_iter()
    .map(|(month, homework_score, worksheet_score)| MonthlyScore {
        month: month.to_string(),
        homework_score,
        worksheet_score,
    })
    .collect()
}

/// 模拟导入固定返回的工作表
pub fn solar_system_worksheet() -> RawWorksheetSchema {
    let question = |id: i64, kind: &str, prompt: &str| RawQuestion {
        id,
        kind: kind.to_string(),
        prompt: prompt.to_string(),
        options: None,
        lines: None,
    };

    RawWorksheetSchema {
        title: "Science Worksheet: The Solar System".to_string(),
        instructions: "Answer the following questions about our solar system.".to_string(),
        questions: vec![
            question(1, "fill-blank", "The planet closest to the sun is ____."),
            RawQuestion {
                options: Some(vec![
                    "Venus".to_string(),
                    "Mars".to_string(),
                    "Jupiter".to_string(),
                ]),
                ..question(2, "multiple-choice", "Which planet is known as the Red Planet?")
            },
            RawQuestion {
                lines: Some(3),
                ..question(3, "short-answer", "Explain why we have seasons on Earth.")
            },
            question(
                4,
                "true-false",
                "Earth is the largest planet in our solar system.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::{AnswerStore, WorksheetSchema};

    fn document() -> UploadedFile {
        UploadedFile {
            stored_name: "abc.pdf".into(),
            original_name: "solar.pdf".into(),
            file_size: 1024,
            file_type: ".pdf".into(),
            uploaded_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_grader_score_ranges() {
        let grader = MockGrader::new(Duration::ZERO, Duration::ZERO, 0.0);
        for _ in 0..20 {
            let ws = grader
                .grade(&GradingRequest::Worksheet {
                    answers: AnswerStore::new(),
                })
                .await
                .unwrap();
            assert!((80..98).contains(&ws.score));

            let video = grader
                .grade(&GradingRequest::Video {
                    content_ref: "clip.mp4".into(),
                })
                .await
                .unwrap();
            assert!((70..95).contains(&video.score));
        }
    }

    #[tokio::test]
    async fn test_mock_grader_always_fails_at_full_rate() {
        let grader = MockGrader::new(Duration::ZERO, Duration::ZERO, 1.0);
        let err = grader
            .grade(&GradingRequest::Video {
                content_ref: "clip.mp4".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::GradingFailed(_)));
    }

    #[tokio::test]
    async fn test_mock_ingestor_output_is_valid() {
        let ingestor = MockIngestor::new(Duration::ZERO, 0.0);
        let raw = ingestor.ingest(&document()).await.unwrap();
        let schema = WorksheetSchema::try_from(raw).unwrap();
        assert_eq!(schema.questions().len(), 4);
    }

    #[tokio::test]
    async fn test_mock_chatter_picks_a_canned_reply() {
        let chatter = MockChatter::new(Duration::ZERO, Duration::from_millis(2), 0.0);
        let request = ChatRequest {
            message: "What is photosynthesis?".into(),
            history: Vec::new(),
        };
        for _ in 0..10 {
            let reply = chatter.reply(&request).await.unwrap();
            assert!(CANNED_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_mock_chatter_latency_stays_in_range() {
        let chatter = MockChatter::new(Duration::from_millis(500), Duration::from_millis(1000), 0.0);
        for _ in 0..50 {
            let latency = chatter.latency();
            assert!(latency >= Duration::from_millis(500));
            assert!(latency <= Duration::from_millis(1000));
        }

        // 上限小于下限时按下限处理
        let fixed = MockChatter::new(Duration::from_millis(30), Duration::from_millis(10), 0.0);
        assert_eq!(fixed.latency(), Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_mock_analyst_returns_six_months() {
        let analyst = MockAnalyst::new(Duration::ZERO, 0.0);
        let request = AnalyticsRequest {
            student: crate::models::users::entities::User {
                id: 7,
                username: "alice".into(),
                name: "Alice".into(),
                role: crate::models::users::entities::UserRole::Student,
                roll_no: None,
                class_name: None,
                section: None,
                register_no: None,
                created_at: chrono::Utc::now(),
            },
            submissions: Vec::new(),
        };
        let analytics = analyst.analyze(&request).await.unwrap();
        assert!(analytics.summary.starts_with("Overall Performance: Alice"));
        assert_eq!(analytics.monthly_scores.len(), 6);
        assert_eq!(analytics.monthly_scores[0].month, "Jan");
        assert_eq!(analytics.monthly_scores[5].worksheet_score, 92);

        let failing = MockAnalyst::new(Duration::ZERO, 1.0);
        assert!(matches!(
            failing.analyze(&request).await,
            Err(PortalError::AnalyticsFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_ingestor_failure() {
        let ingestor = MockIngestor::new(Duration::ZERO, 1.0);
        assert!(matches!(
            ingestor.ingest(&document()).await,
            Err(PortalError::IngestionFailed(_))
        ));
    }
}
